use nom::{bytes::complete::take_till1, character::complete::char as nom_char, sequence::separated_pair};
use tracing::warn;

use super::common::{maybe_lpadded, maybe_padded};
use super::result::{IResult, ParseError, Span};
use crate::error::{Error, Result};
use crate::model::{parse_instant, Instant, TimeInterval};

/// Explicit open bound, as in STAC datetime ranges.
pub const UNBOUNDED: &str = "..";

/// Parses `start, end`. Each side is an ISO-8601 date or date-time, or `..`.
/// A side that is neither is an error, never an open bound.
pub fn parse_date_range(input: &str) -> Result<TimeInterval> {
    let (_, (start, end)) = date_pair(Span::new(input)).map_err(|e| {
        Error::malformed(format!(
            "couldn't parse date range '{}' at {}",
            input,
            String::from(ParseError::from(e))
        ))
    })?;

    let interval = TimeInterval::new(date_bound(&start)?, date_bound(&end)?);
    if interval.is_reversed() {
        warn!("date range '{}' ends before it starts", input);
    }
    Ok(interval)
}

fn date_bound(token: &str) -> Result<Option<Instant>> {
    if token == UNBOUNDED {
        return Ok(None);
    }
    match parse_instant(token) {
        Some(instant) => Ok(Some(instant.to_utc())),
        None => Err(Error::malformed(format!(
            "'{}' is not an ISO-8601 date or date-time",
            token
        ))),
    }
}

fn date_pair(input: Span) -> IResult<(String, String)> {
    let (rest, pair) =
        separated_pair(maybe_padded(date_token), nom_char(','), maybe_lpadded(date_token))(input)?;

    if !rest.fragment().is_empty() {
        return Err(nom::Err::Failure(ParseError::partial(
            "date range",
            "end of input",
            rest,
        )));
    }
    Ok((rest, pair))
}

fn date_token(input: Span) -> IResult<String> {
    let (rest, m) = take_till1(|c: char| c == ',')(input)?;
    Ok((rest, m.fragment().trim().to_owned()))
}
