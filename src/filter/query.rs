use std::fmt;

use crate::error::Result;
use crate::model::{Rectangle, TimeInterval};
use crate::parser::{parse_bbox, parse_date_range};

/// One search action's bounding box and date range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Query {
    bbox: Rectangle,
    interval: TimeInterval,
}

impl Query {
    pub fn new(bbox: Rectangle, interval: TimeInterval) -> Self {
        Self { bbox, interval }
    }

    pub fn parse(bbox: &str, dates: &str) -> Result<Self> {
        Ok(Self::new(parse_bbox(bbox)?, parse_date_range(dates)?))
    }

    #[inline]
    pub fn bbox(&self) -> &Rectangle {
        &self.bbox
    }

    #[inline]
    pub fn interval(&self) -> &TimeInterval {
        &self.interval
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "bbox {} within {}", self.bbox, self.interval)
    }
}
