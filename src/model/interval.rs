use std::fmt;

use chrono::prelude::*;

use super::timestamp::to_string_utc;

pub type Instant = DateTime<Utc>;

/// Time interval with optional bounds. A missing bound is unbounded in its
/// direction. Both bounds are already normalized to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeInterval {
    start: Option<Instant>,
    end: Option<Instant>,
}

impl TimeInterval {
    pub fn new(start: Option<Instant>, end: Option<Instant>) -> Self {
        Self { start, end }
    }

    pub fn infinity() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    #[inline]
    pub fn start(&self) -> Option<Instant> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Option<Instant> {
        self.end
    }

    pub fn is_reversed(&self) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start > end,
            _ => false,
        }
    }

    /// Overlap test of a catalog extent (`self`) against a query `filter`.
    /// Only two present bounds can rule an overlap out.
    pub fn intersects(&self, filter: &TimeInterval) -> bool {
        let ends_before = match (self.end, filter.start) {
            (Some(end), Some(start)) => end < start,
            _ => false,
        };
        let starts_after = match (self.start, filter.end) {
            (Some(start), Some(end)) => start > end,
            _ => false,
        };
        !(ends_before || starts_after)
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let bound = |b: Option<Instant>| match b {
            Some(t) => to_string_utc(&t),
            None => "..".to_owned(),
        };
        write!(f, "{}/{}", bound(self.start), bound(self.end))
    }
}
