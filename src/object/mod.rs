//! # Object resolution
//!
//! Turns an object query into one or more [`Object`]s. A query is first classified
//! ([`ObjectQuery::classify`]) and then dispatched:
//!
//! | Query                        | Result                                                  |
//! |------------------------------|---------------------------------------------------------|
//! | `"Sun"`, `"jupiter"`         | a solar-system body, position left to the ephemeris     |
//! | `"M87 12h30m49s +12d23m28s"` | fixed coordinates in the requested frame                |
//! | `"#tag"`, `"#tag:entry"`     | entries of the catalog file `tag.toml`                  |
//! | anything else                | ICRS coordinates from the online name resolver (cached) |
//!
//! Only the online name lookup is cached (namespace `objects`, key
//! `object_by_name(query=<normalized>)`): every other strategy is local and cheap.
//!
//! ## Catalog entries
//!
//! ```toml
//! [M87]
//! ra = "12h30m49.42s"   # or longitude = ...
//! dec = "+12d23m28.0s"  # or latitude = ...
//! frame = "icrs"        # optional, the requested frame otherwise
//! name = "Virgo A"      # optional, the table name otherwise
//! ```

pub mod angle;
pub mod query;
pub mod solar_body;

use std::time::Duration;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use toml::Value;
use tracing::info;

pub use query::ObjectQuery;
pub use solar_body::SolarBody;

use crate::{
    azely_errors::AzelyError,
    cache::{CacheKey, DiskCache},
    catalog::{CatalogLoader, CatalogRecord},
    constants::DEFAULT_FRAME,
    env_state::AzelyEnv,
    location::normalize_query,
    services::SkyPosition,
};

use self::{angle::parse_angle, query::is_equatorial};

/// What the coordinate engine has to point at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Target {
    /// A body of the solar system, resolved by the ephemeris at compute time.
    SolarBody { body: SolarBody },
    /// Fixed sky coordinates in degrees. `longitude` is the right ascension in
    /// equatorial frames and lies in [0, 360).
    Fixed {
        longitude: f64,
        latitude: f64,
        frame: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Object {
    name: String,
    target: Target,
}

impl Object {
    pub fn solar(body: SolarBody) -> Self {
        Object {
            name: body.to_string(),
            target: Target::SolarBody { body },
        }
    }

    /// Object at fixed coordinates.
    ///
    /// The longitude is wrapped into [0, 360); the latitude must lie in [-90, 90].
    pub fn fixed(
        name: impl Into<String>,
        longitude: f64,
        latitude: f64,
        frame: &str,
    ) -> Result<Self, String> {
        if !longitude.is_finite() {
            return Err(format!("longitude {longitude} is not finite"));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(format!("latitude {latitude} out of [-90, 90]"));
        }
        let frame = frame.trim().to_lowercase();
        if frame.is_empty() {
            return Err("empty frame".to_string());
        }

        // rem_euclid rounds tiny negatives up to exactly 360
        let longitude = match longitude.rem_euclid(360.0) {
            wrapped if wrapped >= 360.0 => 0.0,
            wrapped => wrapped,
        };

        Ok(Object {
            name: name.into(),
            target: Target::Fixed {
                longitude,
                latitude,
                frame,
            },
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn is_solar(&self) -> bool {
        matches!(self.target, Target::SolarBody { .. })
    }

    pub fn solar_body(&self) -> Option<SolarBody> {
        match self.target {
            Target::SolarBody { body } => Some(body),
            Target::Fixed { .. } => None,
        }
    }

    /// `(longitude, latitude)` in degrees, `None` for solar bodies.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match self.target {
            Target::Fixed {
                longitude,
                latitude,
                ..
            } => Some((longitude, latitude)),
            Target::SolarBody { .. } => None,
        }
    }

    pub fn frame(&self) -> Option<&str> {
        match &self.target {
            Target::Fixed { frame, .. } => Some(frame),
            Target::SolarBody { .. } => None,
        }
    }
}

pub struct ObjectResolver<'a> {
    env: &'a AzelyEnv,
    cache: &'a DiskCache,
    catalogs: &'a CatalogLoader,
}

impl<'a> ObjectResolver<'a> {
    pub fn new(env: &'a AzelyEnv, cache: &'a DiskCache, catalogs: &'a CatalogLoader) -> Self {
        ObjectResolver {
            env,
            cache,
            catalogs,
        }
    }

    /// Resolve `query` into exactly one [`Object`].
    ///
    /// Arguments
    /// ---------
    /// * `query`: solar body, coordinate literal, `#tag[:entry]` or object name
    /// * `frame`: frame of coordinate literals and of catalog entries without one
    /// * `timeout`: bound on the online name lookup
    ///
    /// Errors
    /// ------
    /// * [`AzelyError::ObjectResolution`] naming the query when no strategy yields
    ///   an object, or when a bare `#tag` holds more than one entry.
    /// * [`AzelyError::CatalogNotFound`] / [`AzelyError::CatalogMalformed`] for tags.
    pub fn resolve(&self, query: &str, frame: &str, timeout: Duration) -> Result<Object, AzelyError> {
        let frame = effective_frame(frame);
        self.resolve_one(query, ObjectQuery::classify(query, frame), frame, timeout)
    }

    /// Resolve `query` into every object it designates.
    ///
    /// A bare `#tag` expands to all entries of the catalog, in file order; any other
    /// query yields a single object.
    pub fn resolve_many(
        &self,
        query: &str,
        frame: &str,
        timeout: Duration,
    ) -> Result<Vec<Object>, AzelyError> {
        let frame = effective_frame(frame);

        match ObjectQuery::classify(query, frame) {
            ObjectQuery::CatalogTag { tag, entry: None } => self.resolve_catalog(query, &tag, frame),
            classified => Ok(vec![self.resolve_one(query, classified, frame, timeout)?]),
        }
    }

    fn resolve_one(
        &self,
        query: &str,
        classified: ObjectQuery,
        frame: &str,
        timeout: Duration,
    ) -> Result<Object, AzelyError> {
        match classified {
            ObjectQuery::SolarBody(body) => Ok(Object::solar(body)),
            ObjectQuery::Coordinates {
                name,
                longitude,
                latitude,
            } => Object::fixed(name, longitude, latitude, frame)
                .map_err(|reason| AzelyError::object(query, reason)),
            ObjectQuery::CatalogTag { tag, entry: None } => {
                let mut objects = self.resolve_catalog(query, &tag, frame)?;
                match objects.len() {
                    1 => Ok(objects.remove(0)),
                    n => Err(AzelyError::object(
                        query,
                        format!("catalog {tag} holds {n} objects, name one with #{tag}:<entry>"),
                    )),
                }
            }
            ObjectQuery::CatalogTag {
                tag,
                entry: Some(entry),
            } => self.resolve_catalog_entry(query, &tag, &entry, frame),
            ObjectQuery::Name(name) => self.object_by_name(query, &name, timeout),
        }
    }

    fn resolve_catalog(&self, query: &str, tag: &str, frame: &str) -> Result<Vec<Object>, AzelyError> {
        let (path, records) = self.catalogs.load(tag)?;
        if records.is_empty() {
            return Err(AzelyError::object(query, format!("catalog {path} is empty")));
        }
        records
            .iter()
            .map(|record| catalog_object(record, frame).map_err(|r| malformed(&path, record, r)))
            .collect()
    }

    fn resolve_catalog_entry(
        &self,
        query: &str,
        tag: &str,
        entry: &str,
        frame: &str,
    ) -> Result<Object, AzelyError> {
        let (path, records) = self.catalogs.load(tag)?;
        let record = records
            .iter()
            .find(|record| record.key.eq_ignore_ascii_case(entry))
            .ok_or_else(|| AzelyError::object(query, format!("no entry {entry} in {path}")))?;

        catalog_object(record, frame).map_err(|r| malformed(&path, record, r))
    }

    fn object_by_name(&self, query: &str, name: &str, timeout: Duration) -> Result<Object, AzelyError> {
        if name.is_empty() {
            return Err(AzelyError::object(query, "empty query"));
        }

        let key = CacheKey::new("object_by_name").arg("query", normalize_query(name));
        let position: SkyPosition = self.cache.get_or_try_insert_with(&key, || {
            info!(name, "resolving object name online");
            let position = self
                .env
                .names
                .resolve_name(name, timeout)
                .map_err(|e| AzelyError::object(query, e))?
                .ok_or_else(|| AzelyError::object(query, "unknown object name"))?;
            // never store a position that would not build an Object
            Object::fixed(name, position.ra, position.dec, DEFAULT_FRAME)
                .map_err(|r| AzelyError::object(query, r))?;
            Ok(position)
        })?;

        Object::fixed(name, position.ra, position.dec, DEFAULT_FRAME)
            .map_err(|reason| AzelyError::object(query, format!("cached entry: {reason}")))
    }
}

fn effective_frame(frame: &str) -> &str {
    let frame = frame.trim();
    if frame.is_empty() {
        DEFAULT_FRAME
    } else {
        frame
    }
}

fn malformed(path: &Utf8Path, record: &CatalogRecord, reason: String) -> AzelyError {
    AzelyError::CatalogMalformed {
        path: path.to_path_buf(),
        reason: format!("entry {}: {reason}", record.key),
    }
}

/// Build the object described by one catalog entry.
fn catalog_object(record: &CatalogRecord, default_frame: &str) -> Result<Object, String> {
    let fields = &record.fields;

    let name = match fields.get("name") {
        Some(Value::String(name)) => name.clone(),
        Some(other) => return Err(format!("name is a {}, expected a string", other.type_str())),
        None => record.key.clone(),
    };

    let frame = match fields.get("frame") {
        Some(Value::String(frame)) => frame.as_str(),
        Some(other) => return Err(format!("frame is a {}, expected a string", other.type_str())),
        None => default_frame,
    };

    let (longitude, latitude) = match (fields.get("longitude"), fields.get("ra")) {
        (Some(lon), None) => (lon, fields.get("latitude")),
        (None, Some(ra)) => (ra, fields.get("dec")),
        (Some(_), Some(_)) => return Err("both longitude and ra given".to_string()),
        (None, None) => {
            // a bare entry may still name a solar-system body
            return SolarBody::from_name(&name)
                .map(Object::solar)
                .ok_or_else(|| "missing longitude/ra".to_string());
        }
    };
    let latitude = latitude.ok_or_else(|| "missing latitude/dec".to_string())?;

    let longitude = angle_value(longitude, is_equatorial(frame))?;
    let latitude = angle_value(latitude, false)?;
    Object::fixed(name, longitude, latitude, frame)
}

fn angle_value(value: &Value, colon_in_hours: bool) -> Result<f64, String> {
    match value {
        Value::Float(v) => Ok(*v),
        Value::Integer(v) => Ok(*v as f64),
        Value::String(s) => parse_angle(s, colon_in_hours),
        other => Err(format!("angle is a {}, expected a number or a string", other.type_str())),
    }
}
