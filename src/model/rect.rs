use std::fmt;

/// Axis-aligned box in longitude/latitude space.
///
/// `min <= max` is not checked. An unsorted box is still a valid value, it
/// just fails to intersect most queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    min_lon: f64,
    min_lat: f64,
    max_lon: f64,
    max_lat: f64,
}

impl Rectangle {
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Square of `margin` degrees on each side of the given point.
    pub fn around(lon: f64, lat: f64, margin: f64) -> Self {
        Self::new(lon - margin, lat - margin, lon + margin, lat + margin)
    }

    /// Builds a rectangle from a STAC bbox array. 3D boxes
    /// (`minx, miny, minz, maxx, maxy, maxz`) lose their elevation.
    pub fn from_coords(coords: &[f64]) -> Option<Self> {
        match *coords {
            [min_lon, min_lat, max_lon, max_lat] => {
                Some(Self::new(min_lon, min_lat, max_lon, max_lat))
            }
            [min_lon, min_lat, _, max_lon, max_lat, _] => {
                Some(Self::new(min_lon, min_lat, max_lon, max_lat))
            }
            _ => None,
        }
    }

    #[inline]
    pub fn min_lon(&self) -> f64 {
        self.min_lon
    }

    #[inline]
    pub fn min_lat(&self) -> f64 {
        self.min_lat
    }

    #[inline]
    pub fn max_lon(&self) -> f64 {
        self.max_lon
    }

    #[inline]
    pub fn max_lat(&self) -> f64 {
        self.max_lat
    }

    /// Closed-edge overlap test, touching edges or corners count.
    pub fn intersects(&self, other: &Rectangle) -> bool {
        !(self.min_lon > other.max_lon
            || self.max_lon < other.min_lon
            || self.min_lat > other.max_lat
            || self.max_lat < other.min_lat)
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.min_lon, self.min_lat, self.max_lon, self.max_lat
        )
    }
}
