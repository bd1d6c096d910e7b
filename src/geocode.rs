use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, ErrorKind, Result};
use crate::model::Rectangle;

pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";

const USER_AGENT: &str = "stac_search_app";

/// Degrees added around a geocoded point on each side.
pub const LOCATION_MARGIN: f64 = 0.1;

pub trait Geocoder {
    /// Bounding box around the named place, `None` if nothing was found.
    fn locate(&self, location: &str) -> Result<Option<Rectangle>>;
}

pub struct NominatimGeocoder {
    client: Client,
    url: String,
}

// Nominatim returns coordinates as strings.
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

impl NominatimGeocoder {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Configuration, "couldn't build HTTP client", e))?;

        Ok(Self {
            client,
            url: url.to_owned(),
        })
    }
}

fn place_bbox(places: &[Place]) -> Result<Option<Rectangle>> {
    let place = match places.first() {
        Some(place) => place,
        None => return Ok(None),
    };

    let coord = |s: &str| {
        s.trim().parse::<f64>().map_err(|e| {
            Error::external(format!("geocoder returned an invalid coordinate '{}'", s), e)
        })
    };
    Ok(Some(Rectangle::around(
        coord(&place.lon)?,
        coord(&place.lat)?,
        LOCATION_MARGIN,
    )))
}

impl Geocoder for NominatimGeocoder {
    fn locate(&self, location: &str) -> Result<Option<Rectangle>> {
        debug!("geocoding '{}'", location);

        let places = self
            .client
            .get(&self.url)
            .query(&[("q", location), ("format", "json"), ("limit", "1")])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<Vec<Place>>())
            .map_err(|e| Error::external(format!("geocoding '{}' failed", location), e))?;

        place_bbox(&places)
    }
}
