use std::{rc::Rc, time::Duration};

use serde::Deserialize;

use super::{Geocoder, GeocodeHit, HttpClient, ServiceError};
use crate::constants::NOMINATIM_URL;

/// [`Geocoder`] backed by the OpenStreetMap Nominatim search API.
///
/// Only the best match is requested (`limit=1`). Nominatim returns coordinates as
/// strings, they are parsed here.
pub struct NominatimGeocoder {
    http: Rc<dyn HttpClient>,
    url: String,
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    display_name: String,
    lat: String,
    lon: String,
}

impl NominatimGeocoder {
    pub fn new(http: Rc<dyn HttpClient>) -> Self {
        NominatimGeocoder {
            http,
            url: NOMINATIM_URL.to_string(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, query: &str, timeout: Duration) -> Result<Option<GeocodeHit>, ServiceError> {
        let response = self.http.get_json(
            &self.url,
            &[("q", query), ("format", "json"), ("limit", "1")],
            timeout,
        )?;

        let places: Vec<NominatimPlace> = serde_json::from_value(response)
            .map_err(|e| ServiceError::InvalidResponse(e.to_string()))?;

        let Some(place) = places.into_iter().next() else {
            return Ok(None);
        };

        let parse = |value: &str, what: &str| {
            value
                .trim()
                .parse::<f64>()
                .map_err(|_| ServiceError::InvalidResponse(format!("unparsable {what}: {value}")))
        };

        Ok(Some(GeocodeHit {
            latitude: parse(&place.lat, "latitude")?,
            longitude: parse(&place.lon, "longitude")?,
            address: place.display_name,
        }))
    }
}
