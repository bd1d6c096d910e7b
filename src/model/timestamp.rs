use chrono::prelude::*;
use chrono::SecondsFormat;
use tracing::trace;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const ZONED_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M%:z",
];

/// An instant as it was written: either with a declared offset or without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedInstant {
    Zoned(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
}

impl ParsedInstant {
    pub fn is_naive(&self) -> bool {
        matches!(self, ParsedInstant::Naive(_))
    }

    /// Normalizes to UTC. Naive instants carry no zone and are taken to be UTC.
    pub fn to_utc(&self) -> DateTime<Utc> {
        match self {
            ParsedInstant::Zoned(dt) => dt.with_timezone(&Utc),
            ParsedInstant::Naive(ndt) => {
                trace!("assuming UTC for naive instant {}", ndt);
                Utc.from_utc_datetime(ndt)
            }
        }
    }
}

/// Parses the ISO-8601 forms a catalog or a user is likely to write:
/// a calendar date, or a date-time with or without an offset.
pub fn parse_instant(s: &str) -> Option<ParsedInstant> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(ParsedInstant::Zoned(dt));
    }

    // chrono's %:z doesn't take a literal 'Z'.
    let offset_form = match s.strip_suffix('Z').or_else(|| s.strip_suffix('z')) {
        Some(prefix) => format!("{}+00:00", prefix),
        None => s.to_owned(),
    };
    for fmt in &ZONED_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&offset_form, fmt) {
            return Some(ParsedInstant::Zoned(dt));
        }
    }

    for fmt in &NAIVE_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ParsedInstant::Naive(ndt));
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(ParsedInstant::Naive)
}

pub fn to_string_utc(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}
