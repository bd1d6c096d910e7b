use serde::{Deserialize, Serialize};

use super::interval::{Instant, TimeInterval};
use super::rect::Rectangle;
use super::timestamp::parse_instant;
use crate::error::{Error, Result};

/// A STAC collection as returned by a catalog's `/collections` endpoint.
/// Only the fields the search needs are kept.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Collection {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub extent: Extent,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Extent {
    #[serde(default)]
    pub spatial: SpatialExtent,
    #[serde(default)]
    pub temporal: TemporalExtent,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SpatialExtent {
    #[serde(default)]
    pub bbox: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TemporalExtent {
    #[serde(default)]
    pub interval: Vec<Vec<Option<String>>>,
}

impl Collection {
    /// The first bounding box of the spatial extent. Further boxes are ignored.
    pub fn spatial_extent(&self) -> Result<Rectangle> {
        let coords = self.extent.spatial.bbox.first().ok_or_else(|| {
            Error::missing_extent(format!("collection '{}' has no spatial extent", self.id))
        })?;

        Rectangle::from_coords(coords).ok_or_else(|| {
            Error::missing_extent(format!(
                "collection '{}' has a bounding box with {} coordinates",
                self.id,
                coords.len()
            ))
        })
    }

    /// The first interval of the temporal extent, `null` bounds are unbounded.
    pub fn temporal_extent(&self) -> Result<TimeInterval> {
        let interval = self.extent.temporal.interval.first().ok_or_else(|| {
            Error::missing_extent(format!("collection '{}' has no temporal extent", self.id))
        })?;

        match interval.as_slice() {
            [start, end] => Ok(TimeInterval::new(
                self.extent_bound(start.as_deref())?,
                self.extent_bound(end.as_deref())?,
            )),
            _ => Err(Error::missing_extent(format!(
                "collection '{}' has a temporal interval with {} bounds",
                self.id,
                interval.len()
            ))),
        }
    }

    fn extent_bound(&self, bound: Option<&str>) -> Result<Option<Instant>> {
        match bound {
            None => Ok(None),
            Some(s) => match parse_instant(s) {
                Some(instant) => Ok(Some(instant.to_utc())),
                None => Err(Error::missing_extent(format!(
                    "collection '{}' has an unreadable temporal bound '{}'",
                    self.id, s
                ))),
            },
        }
    }

    pub fn info(&self) -> CollectionInfo {
        CollectionInfo {
            name: &self.id,
            description: &self.description,
        }
    }
}

/// What the language model and the JSON output get to see of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CollectionInfo<'a> {
    pub name: &'a str,
    pub description: &'a str,
}
