use nom::{character::complete::char as nom_char, multi::separated_list1, number::complete::double};

use super::common::maybe_padded;
use super::result::{IResult, ParseError, Span};
use crate::error::{Error, Result};
use crate::model::Rectangle;

/// Parses `minLon, minLat, maxLon, maxLat`.
pub fn parse_bbox(input: &str) -> Result<Rectangle> {
    let (_, coords) = coordinate_list(Span::new(input)).map_err(|e| {
        Error::malformed(format!(
            "couldn't parse bounding box '{}' at {}",
            input,
            String::from(ParseError::from(e))
        ))
    })?;

    if coords.len() != 4 {
        return Err(Error::malformed(format!(
            "bounding box '{}' has {} coordinates, expected 4 (minLon, minLat, maxLon, maxLat)",
            input,
            coords.len()
        )));
    }

    if let Some(c) = coords.iter().find(|c| !c.is_finite()) {
        return Err(Error::malformed(format!(
            "bounding box '{}' has a non-finite coordinate {}",
            input, c
        )));
    }

    Ok(Rectangle::new(coords[0], coords[1], coords[2], coords[3]))
}

fn coordinate_list(input: Span) -> IResult<Vec<f64>> {
    let (rest, coords) = separated_list1(nom_char(','), maybe_padded(double))(input)?;

    if !rest.fragment().is_empty() {
        return Err(nom::Err::Failure(ParseError::partial(
            "bounding box",
            "',' or end of input",
            rest,
        )));
    }
    Ok((rest, coords))
}
