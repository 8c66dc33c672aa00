//! # Azely environment state
//!
//! This module defines [`AzelyEnv`](crate::env_state::AzelyEnv), the **bundle of external
//! services** the resolvers call into:
//!
//! - an [`IpLocator`] for the `"here"` location,
//! - a [`Geocoder`] for place names,
//! - a [`TimezoneLookup`] deriving IANA zones from coordinates,
//! - a [`NameResolver`] for astronomical object names.
//!
//! ## Structure
//!
//! ```text
//! AzelyEnv
//! ├── ip_locator  (IpInfoLocator  ─┐
//! ├── geocoder    (NominatimGeocoder├── one shared ReqwestClient)
//! ├── names       (SesameResolver ─┘
//! └── timezones   (TzfLookup, offline)
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use azely::env_state::AzelyEnv;
//!
//! // Real services, one HTTP client shared between them
//! let env = AzelyEnv::new()?;
//! # Ok::<(), azely::services::ServiceError>(())
//! ```
//!
//! Every service can be swapped, which is how tests run without network access:
//!
//! ```rust,ignore
//! let env = AzelyEnv::new()?.with_geocoder(MyFakeGeocoder::default());
//! ```
//!
//! ## Notes
//!
//! - Nothing here is cached; persistence of lookups is the job of
//!   [`DiskCache`](crate::cache::DiskCache).
//! - The environment is single-threaded (`Rc` shared HTTP client).

use std::rc::Rc;

use crate::services::{
    http::ReqwestClient, ipinfo::IpInfoLocator, nominatim::NominatimGeocoder,
    sesame::SesameResolver, timezone::TzfLookup, Geocoder, HttpClient, IpLocator, NameResolver,
    ServiceError, TimezoneLookup,
};

pub struct AzelyEnv {
    pub ip_locator: Box<dyn IpLocator>,
    pub geocoder: Box<dyn Geocoder>,
    pub timezones: Box<dyn TimezoneLookup>,
    pub names: Box<dyn NameResolver>,
}

impl AzelyEnv {
    /// Create the environment with the real network services.
    ///
    /// Return
    /// ------
    /// * The environment, or a [`ServiceError`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, ServiceError> {
        let http: Rc<dyn HttpClient> = Rc::new(ReqwestClient::new()?);
        Ok(Self::with_http(http))
    }

    /// Create the environment with the real services on top of a given HTTP client.
    pub fn with_http(http: Rc<dyn HttpClient>) -> Self {
        AzelyEnv {
            ip_locator: Box::new(IpInfoLocator::new(http.clone())),
            geocoder: Box::new(NominatimGeocoder::new(http.clone())),
            timezones: Box::new(TzfLookup::new()),
            names: Box::new(SesameResolver::new(http)),
        }
    }

    pub fn with_ip_locator(mut self, ip_locator: impl IpLocator + 'static) -> Self {
        self.ip_locator = Box::new(ip_locator);
        self
    }

    pub fn with_geocoder(mut self, geocoder: impl Geocoder + 'static) -> Self {
        self.geocoder = Box::new(geocoder);
        self
    }

    pub fn with_timezones(mut self, timezones: impl TimezoneLookup + 'static) -> Self {
        self.timezones = Box::new(timezones);
        self
    }

    pub fn with_names(mut self, names: impl NameResolver + 'static) -> Self {
        self.names = Box::new(names);
        self
    }
}
