//! # Location resolution
//!
//! Turns a short query into a [`Location`]: display name, geodetic coordinates,
//! altitude and IANA timezone.
//!
//! ## Strategies
//!
//! 1. **Configured sites**: a `[sites.<name>]` entry whose normalized name equals the
//!    normalized query is returned as is (no cache, no network).
//! 2. **`"here"`** (case-insensitive): the machine's position from the
//!    [`IpLocator`](crate::services::IpLocator), cached under `location_by_ip(query=here)`.
//! 3. **Anything else**: the best [`Geocoder`](crate::services::Geocoder) match for the
//!    query, cached under `location_by_query(query=<normalized query>)`.
//!
//! In both network paths the timezone is derived from the coordinates through the
//! [`TimezoneLookup`](crate::services::TimezoneLookup).
//!
//! ## Caching
//!
//! The cache stores the raw [`LocationRecord`]; the validated [`Location`] is built
//! after retrieval. The timeout is not part of the key, and queries differing only
//! by case or whitespace share an entry. A failed lookup stores nothing.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    azely_errors::AzelyError,
    cache::{CacheKey, DiskCache},
    constants::HERE,
    env_state::AzelyEnv,
    time::TimeZoneSpec,
};

/// Raw field mapping of a location, as stored in the cache and in `[sites]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    #[serde(default)]
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
    #[serde(default)]
    pub altitude: f64,
    pub timezone: String,
}

/// A resolved observation site.
///
/// Invariants: longitude in [-180, 180] degrees, latitude in [-90, 90] degrees,
/// finite altitude (meters) and a timezone that parses as a [`TimeZoneSpec`].
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    name: String,
    longitude: f64,
    latitude: f64,
    altitude: f64,
    timezone: String,
}

impl Location {
    /// Build a location, checking its invariants.
    ///
    /// Return
    /// ------
    /// * The location, or the reason it is invalid.
    pub fn new(
        name: impl Into<String>,
        longitude: f64,
        latitude: f64,
        altitude: f64,
        timezone: impl Into<String>,
    ) -> Result<Self, String> {
        let timezone = timezone.into();

        if !(-180.0..=180.0).contains(&longitude) {
            return Err(format!("longitude {longitude} out of [-180, 180]"));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(format!("latitude {latitude} out of [-90, 90]"));
        }
        if !altitude.is_finite() {
            return Err(format!("altitude {altitude} is not finite"));
        }
        if TimeZoneSpec::parse(&timezone).is_none() {
            return Err(format!("unknown timezone {timezone:?}"));
        }

        Ok(Location {
            name: name.into(),
            longitude,
            latitude,
            altitude,
            timezone,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Degrees, east positive.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Degrees, north positive.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Meters.
    pub fn altitude(&self) -> f64 {
        self.altitude
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    /// The parsed timezone of the site.
    pub fn zone(&self) -> TimeZoneSpec {
        // checked in `Location::new`
        TimeZoneSpec::parse(&self.timezone).unwrap_or(TimeZoneSpec::Utc)
    }

    pub fn to_record(&self) -> LocationRecord {
        LocationRecord {
            name: self.name.clone(),
            longitude: self.longitude,
            latitude: self.latitude,
            altitude: self.altitude,
            timezone: self.timezone.clone(),
        }
    }
}

impl TryFrom<LocationRecord> for Location {
    type Error = String;

    fn try_from(record: LocationRecord) -> Result<Self, Self::Error> {
        Location::new(
            record.name,
            record.longitude,
            record.latitude,
            record.altitude,
            record.timezone,
        )
    }
}

/// Lower-case the query and collapse its whitespace.
pub fn normalize_query(query: &str) -> String {
    query
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

pub struct LocationResolver<'a> {
    env: &'a AzelyEnv,
    cache: &'a DiskCache,
    sites: &'a [(String, LocationRecord)],
}

impl<'a> LocationResolver<'a> {
    pub fn new(
        env: &'a AzelyEnv,
        cache: &'a DiskCache,
        sites: &'a [(String, LocationRecord)],
    ) -> Self {
        LocationResolver { env, cache, sites }
    }

    /// Resolve `query` into a [`Location`].
    ///
    /// Arguments
    /// ---------
    /// * `query`: a configured site name, `"here"`, or a free-text place name
    /// * `timeout`: bound on each network call
    ///
    /// Errors
    /// ------
    /// * [`AzelyError::LocationResolution`] naming the query when the service fails,
    ///   times out, finds nothing or answers with an invalid location.
    pub fn resolve(&self, query: &str, timeout: Duration) -> Result<Location, AzelyError> {
        let normalized = normalize_query(query);
        if normalized.is_empty() {
            return Err(AzelyError::location(query, "empty query"));
        }

        if let Some((_, record)) = self
            .sites
            .iter()
            .find(|(name, _)| normalize_query(name) == normalized)
        {
            return Location::try_from(record.clone()).map_err(|r| AzelyError::location(query, r));
        }

        let record = if normalized == HERE {
            let key = CacheKey::new("location_by_ip").arg("query", HERE);
            self.cached(query, &key, || self.location_by_ip(query, timeout))?
        } else {
            let key = CacheKey::new("location_by_query").arg("query", &normalized);
            self.cached(query, &key, || self.location_by_query(query, timeout))?
        };

        Location::try_from(record)
            .map_err(|reason| AzelyError::location(query, format!("cached entry: {reason}")))
    }

    fn cached(
        &self,
        query: &str,
        key: &CacheKey,
        lookup: impl FnOnce() -> Result<LocationRecord, AzelyError>,
    ) -> Result<LocationRecord, AzelyError> {
        self.cache.get_or_try_insert_with(key, || {
            let record = lookup()?;
            // never store a record that would not build a Location
            Location::try_from(record.clone()).map_err(|r| AzelyError::location(query, r))?;
            Ok(record)
        })
    }

    fn location_by_ip(&self, query: &str, timeout: Duration) -> Result<LocationRecord, AzelyError> {
        info!("locating this machine by IP address");
        let here = self
            .env
            .ip_locator
            .locate(timeout)
            .map_err(|e| AzelyError::location(query, e))?;

        Ok(LocationRecord {
            timezone: self.timezone_at(query, here.longitude, here.latitude)?,
            name: here.city,
            longitude: here.longitude,
            latitude: here.latitude,
            altitude: 0.0,
        })
    }

    fn location_by_query(
        &self,
        query: &str,
        timeout: Duration,
    ) -> Result<LocationRecord, AzelyError> {
        info!(query, "geocoding location");
        let hit = self
            .env
            .geocoder
            .geocode(query.trim(), timeout)
            .map_err(|e| AzelyError::location(query, e))?
            .ok_or_else(|| AzelyError::location(query, "no match"))?;

        let name = hit
            .address
            .split(',')
            .next()
            .unwrap_or(&hit.address)
            .trim()
            .to_string();

        Ok(LocationRecord {
            timezone: self.timezone_at(query, hit.longitude, hit.latitude)?,
            name,
            longitude: hit.longitude,
            latitude: hit.latitude,
            altitude: 0.0,
        })
    }

    fn timezone_at(&self, query: &str, longitude: f64, latitude: f64) -> Result<String, AzelyError> {
        self.env
            .timezones
            .timezone_at(longitude, latitude)
            .ok_or_else(|| {
                AzelyError::location(query, format!("no timezone at ({longitude}, {latitude})"))
            })
    }
}
