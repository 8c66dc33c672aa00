//! # Layered configuration
//!
//! [`ConfigStore`] holds the defaults every resolver falls back to when a call site
//! leaves an argument unspecified. Two layers are merged:
//!
//! 1. the built-in document shipped with the crate (`src/data/defaults.toml`),
//! 2. the user's `config.toml` in the azely directory, if it exists.
//!
//! The merge is **deep**: a user table only replaces the leaves it names, every other
//! key keeps its built-in value.
//!
//! ```toml
//! # ~/.config/azely/config.toml
//! [location]
//! query = "Mitaka"
//!
//! [time]
//! freq = "5T"
//!
//! [sites."nobeyama 45m"]
//! longitude = 138.4726
//! latitude = 35.9442
//! altitude = 1350.0
//! timezone = "Asia/Tokyo"
//! ```
//!
//! ## Directories
//!
//! The azely directory is `$AZELY_DIR` when set, otherwise `<config dir>/azely`.
//! Cache files go to `[cache] dir` when set, otherwise `$AZELY_DIR`, otherwise
//! `<cache dir>/azely`.
//!
//! ## Errors
//!
//! An unparsable user file, or a section whose values have the wrong type, is an
//! [`AzelyError::Config`] naming the file. Overrides are never silently dropped.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use directories::BaseDirs;
use serde::{de::DeserializeOwned, Deserialize};
use toml::{Table, Value};
use tracing::debug;

use crate::{
    azely_errors::AzelyError,
    constants::{AZELY_DIR_ENV, AZELY_DIR_NAME, CONFIG_FILE},
    location::LocationRecord,
};

static BUILTIN_DEFAULTS: &str = include_str!("data/defaults.toml");

const BUILTIN_SOURCE: &str = "<built-in defaults>";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LocationOptions {
    pub query: String,
    pub timeout: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ObjectOptions {
    pub frame: String,
    pub timeout: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimeOptions {
    pub query: String,
    pub view: String,
    pub freq: String,
    pub sep: String,
    pub timeout: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CacheOptions {
    pub dir: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogOptions {
    pub dirs: Vec<String>,
    pub extension: String,
}

#[derive(Debug, Clone)]
pub struct ConfigStore {
    merged: Table,
    source: String,
    azely_dir: Utf8PathBuf,
    default_cache_dir: Utf8PathBuf,
}

impl ConfigStore {
    /// Load the configuration from the user's azely directory.
    pub fn load() -> Result<Self, AzelyError> {
        let (azely_dir, default_cache_dir) = match std::env::var(AZELY_DIR_ENV) {
            Ok(dir) if !dir.is_empty() => (Utf8PathBuf::from(&dir), Utf8PathBuf::from(dir)),
            _ => {
                let base = BaseDirs::new().ok_or_else(|| AzelyError::Config {
                    path: AZELY_DIR_ENV.to_string(),
                    reason: "no home directory, set the variable explicitly".to_string(),
                })?;
                (
                    utf8(base.config_dir())?.join(AZELY_DIR_NAME),
                    utf8(base.cache_dir())?.join(AZELY_DIR_NAME),
                )
            }
        };

        let mut store = Self::from_dir(&azely_dir)?;
        store.default_cache_dir = default_cache_dir;
        Ok(store)
    }

    /// Load the configuration from an explicit azely directory.
    ///
    /// The directory doubles as the default cache directory.
    pub fn from_dir(dir: &Utf8Path) -> Result<Self, AzelyError> {
        let path = dir.join(CONFIG_FILE);
        let mut store = Self::builtin();
        store.azely_dir = dir.to_path_buf();
        store.default_cache_dir = dir.to_path_buf();

        if path.is_file() {
            debug!(config = %path, "loading user configuration");
            let text = fs::read_to_string(&path).map_err(|e| AzelyError::Config {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
            store.overlay(&text, path.as_str())?;
        }
        Ok(store)
    }

    /// Built-in defaults only, rooted at the current directory.
    pub fn builtin() -> Self {
        // the embedded document is covered by `test_builtin_defaults_parse`
        let merged = BUILTIN_DEFAULTS.parse::<Table>().unwrap_or_default();
        ConfigStore {
            merged,
            source: BUILTIN_SOURCE.to_string(),
            azely_dir: Utf8PathBuf::from("."),
            default_cache_dir: Utf8PathBuf::from("."),
        }
    }

    /// Merge a user TOML document over the current values.
    ///
    /// Arguments
    /// ---------
    /// * `text`: the TOML document
    /// * `source`: name reported in errors (usually the file path)
    pub fn overlay(&mut self, text: &str, source: &str) -> Result<(), AzelyError> {
        let user = text.parse::<Table>().map_err(|e| AzelyError::Config {
            path: source.to_string(),
            reason: e.to_string(),
        })?;
        deep_merge(&mut self.merged, user);
        self.source = source.to_string();
        Ok(())
    }

    /// Raw merged mapping of `section`, empty if the section does not exist.
    pub fn defaults_for(&self, section: &str) -> Table {
        match self.merged.get(section) {
            Some(Value::Table(table)) => table.clone(),
            _ => Table::new(),
        }
    }

    /// Deserialize `section` into its typed options.
    pub fn section<T: DeserializeOwned>(&self, section: &str) -> Result<T, AzelyError> {
        Value::Table(self.defaults_for(section))
            .try_into()
            .map_err(|e| AzelyError::Config {
                path: self.source.clone(),
                reason: format!("[{section}] {e}"),
            })
    }

    pub fn location_options(&self) -> Result<LocationOptions, AzelyError> {
        self.section("location")
    }

    pub fn object_options(&self) -> Result<ObjectOptions, AzelyError> {
        self.section("object")
    }

    pub fn time_options(&self) -> Result<TimeOptions, AzelyError> {
        self.section("time")
    }

    /// Literal locations from the `[sites]` section, keyed by their table name.
    pub fn sites(&self) -> Result<Vec<(String, LocationRecord)>, AzelyError> {
        let sites = match self.merged.get("sites") {
            None => return Ok(Vec::new()),
            Some(Value::Table(sites)) => sites.clone(),
            Some(_) => {
                return Err(AzelyError::Config {
                    path: self.source.clone(),
                    reason: "[sites] must be a table".to_string(),
                })
            }
        };
        sites
            .into_iter()
            .map(|(key, value)| {
                let mut record: LocationRecord =
                    value.try_into().map_err(|e| AzelyError::Config {
                        path: self.source.clone(),
                        reason: format!("[sites.{key}] {e}"),
                    })?;
                if record.name.is_empty() {
                    record.name = key.clone();
                }
                Ok((key, record))
            })
            .collect()
    }

    pub fn azely_dir(&self) -> &Utf8Path {
        &self.azely_dir
    }

    pub fn cache_dir(&self) -> Result<Utf8PathBuf, AzelyError> {
        let options: CacheOptions = self.section("cache")?;
        if options.dir.is_empty() {
            Ok(self.default_cache_dir.clone())
        } else {
            Ok(Utf8PathBuf::from(options.dir))
        }
    }

    /// Ordered catalog search directories and the catalog file extension.
    pub fn catalog_search(&self) -> Result<(Vec<Utf8PathBuf>, String), AzelyError> {
        let options: CatalogOptions = self.section("catalog")?;
        let dirs = if options.dirs.is_empty() {
            vec![Utf8PathBuf::from("."), self.azely_dir.clone()]
        } else {
            options.dirs.into_iter().map(Utf8PathBuf::from).collect()
        };
        Ok((dirs, options.extension))
    }
}

/// Merge `overlay` into `base` at the leaf level.
///
/// Tables present on both sides are merged recursively; any other value from
/// `overlay` replaces the one in `base`.
pub fn deep_merge(base: &mut Table, overlay: Table) {
    for (key, value) in overlay {
        if let Value::Table(incoming) = value {
            if let Some(Value::Table(existing)) = base.get_mut(&key) {
                deep_merge(existing, incoming);
                continue;
            }
            base.insert(key, Value::Table(incoming));
        } else {
            base.insert(key, value);
        }
    }
}

fn utf8(path: &std::path::Path) -> Result<Utf8PathBuf, AzelyError> {
    Utf8PathBuf::from_path_buf(path.to_path_buf()).map_err(|p| AzelyError::Config {
        path: p.display().to_string(),
        reason: "path is not valid UTF-8".to_string(),
    })
}
