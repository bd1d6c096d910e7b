mod bbox;
mod common;
mod daterange;
mod result;

pub use bbox::parse_bbox;
pub use daterange::{parse_date_range, UNBOUNDED};
