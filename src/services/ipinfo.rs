use std::{rc::Rc, time::Duration};

use serde_json::Value;

use super::{HttpClient, IpLocation, IpLocator, ServiceError};
use crate::constants::IPINFO_URL;

/// [`IpLocator`] backed by the ipinfo.io JSON endpoint.
///
/// The response carries the position as a single `"lat,lon"` string:
///
/// ```text
/// {"ip": "...", "city": "Tokyo", "region": "Tokyo", "loc": "35.6895,139.6917", ...}
/// ```
pub struct IpInfoLocator {
    http: Rc<dyn HttpClient>,
    url: String,
}

impl IpInfoLocator {
    pub fn new(http: Rc<dyn HttpClient>) -> Self {
        IpInfoLocator {
            http,
            url: IPINFO_URL.to_string(),
        }
    }

    /// Point the locator at another endpoint with the same response shape.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

impl IpLocator for IpInfoLocator {
    fn locate(&self, timeout: Duration) -> Result<IpLocation, ServiceError> {
        let response = self.http.get_json(&self.url, &[], timeout)?;
        parse_ipinfo(&response)
    }
}

fn parse_ipinfo(response: &Value) -> Result<IpLocation, ServiceError> {
    let invalid = |what: &str| ServiceError::InvalidResponse(format!("{what} in {response}"));

    let loc = response["loc"]
        .as_str()
        .ok_or_else(|| invalid("missing \"loc\""))?;
    let city = response["city"]
        .as_str()
        .ok_or_else(|| invalid("missing \"city\""))?;

    let (latitude, longitude) = loc
        .split_once(',')
        .ok_or_else(|| invalid("\"loc\" is not \"lat,lon\""))?;
    let latitude: f64 = latitude
        .trim()
        .parse()
        .map_err(|_| invalid("unparsable latitude"))?;
    let longitude: f64 = longitude
        .trim()
        .parse()
        .map_err(|_| invalid("unparsable longitude"))?;

    Ok(IpLocation {
        city: city.to_string(),
        latitude,
        longitude,
    })
}
