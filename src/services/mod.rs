//! # External lookup services
//!
//! The resolvers never talk to the network directly. Every external lookup goes
//! through one of the traits below, and a concrete implementation is injected
//! through [`AzelyEnv`](crate::env_state::AzelyEnv). Tests substitute fakes.
//!
//! | Trait               | Default implementation                          | Used by            |
//! |---------------------|-------------------------------------------------|--------------------|
//! | [`HttpClient`]      | [`http::ReqwestClient`] (reqwest + tokio)       | the HTTP services  |
//! | [`IpLocator`]       | [`ipinfo::IpInfoLocator`] (ipinfo.io)           | `"here"` locations |
//! | [`Geocoder`]        | [`nominatim::NominatimGeocoder`] (OSM)          | named locations    |
//! | [`TimezoneLookup`]  | [`timezone::TzfLookup`] (offline polygons)      | both location paths|
//! | [`NameResolver`]    | [`sesame::SesameResolver`] (CDS Sesame)         | object names       |
//!
//! All calls are blocking. Each network call takes its own `timeout`; exceeding it
//! yields [`ServiceError::Timeout`].

pub mod http;
pub mod ipinfo;
pub mod nominatim;
pub mod sesame;
pub mod timezone;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use http::HttpClient;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("unable to start the HTTP runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Approximate position of the current machine, as reported by an IP geolocation service.
#[derive(Debug, Clone, PartialEq)]
pub struct IpLocation {
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Best match returned by a geocoder for a free-text place name.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeHit {
    /// Full address, comma separated, most specific component first.
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// ICRS position returned by an object-name resolver, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkyPosition {
    pub ra: f64,
    pub dec: f64,
}

pub trait IpLocator {
    /// Locate the machine running this process.
    fn locate(&self, timeout: Duration) -> Result<IpLocation, ServiceError>;
}

pub trait Geocoder {
    /// Geocode a free-text place name.
    ///
    /// Return
    /// ------
    /// * `Ok(None)` when the service answered but found nothing.
    fn geocode(&self, query: &str, timeout: Duration) -> Result<Option<GeocodeHit>, ServiceError>;
}

pub trait TimezoneLookup {
    /// IANA zone name at the given position (degrees), `None` if unknown.
    fn timezone_at(&self, longitude: f64, latitude: f64) -> Option<String>;
}

pub trait NameResolver {
    /// Resolve an astronomical object name into ICRS coordinates.
    ///
    /// Return
    /// ------
    /// * `Ok(None)` when the name is unknown to the service.
    fn resolve_name(&self, name: &str, timeout: Duration)
        -> Result<Option<SkyPosition>, ServiceError>;
}
