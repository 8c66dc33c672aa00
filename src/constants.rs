//! # Constants and shared definitions for Azely
//!
//! This module centralizes the **sentinels**, **service endpoints**, **file naming
//! conventions** and **default values** used throughout the `azely` library.
//!
//! ## Overview
//!
//! - Query sentinels (`"here"`, `"now"`, catalog-tag marker)
//! - External service URLs (IP geolocation, geocoding, name resolution)
//! - Azely directory layout (environment override, cache namespaces, file suffixes)
//! - Limits applied when expanding time ranges

// -------------------------------------------------------------------------------------------------
// Query sentinels
// -------------------------------------------------------------------------------------------------

/// Location query meaning "where this machine is" (matched case-insensitively).
pub const HERE: &str = "here";

/// Time query meaning "the current instant".
pub const NOW: &str = "now";

/// Prefix marking an object query as a catalog tag (`#tag` or `#tag:entry`).
pub const CATALOG_TAG_MARKER: char = '#';

/// Separator between a catalog tag and an entry name (`#tag:entry`).
pub const CATALOG_ENTRY_SEPARATOR: char = ':';

// -------------------------------------------------------------------------------------------------
// External services
// -------------------------------------------------------------------------------------------------

/// IP geolocation endpoint, returns `{"city": ..., "loc": "lat,lon", ...}`.
pub const IPINFO_URL: &str = "https://ipinfo.io/json";

/// OpenStreetMap Nominatim search endpoint.
pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";

/// CDS Sesame name resolver (plain-text output, all databases).
pub const SESAME_URL: &str = "https://cds.unistra.fr/cgi-bin/nph-sesame/-oI/A";

/// User agent sent to every service (Nominatim rejects anonymous clients).
pub const USER_AGENT: &str = concat!("azely/", env!("CARGO_PKG_VERSION"));

// -------------------------------------------------------------------------------------------------
// Files and directories
// -------------------------------------------------------------------------------------------------

/// Environment variable overriding the azely directory (config, cache, catalogs).
pub const AZELY_DIR_ENV: &str = "AZELY_DIR";

/// Directory name under the platform config/cache directories.
pub const AZELY_DIR_NAME: &str = "azely";

/// User configuration file name inside the azely directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Suffix of cache namespace files and of catalog files.
pub const TOML_SUFFIX: &str = "toml";

/// Cache namespace for resolved locations.
pub const LOCATION_NAMESPACE: &str = "locations";

/// Cache namespace for objects resolved by name.
pub const OBJECT_NAMESPACE: &str = "objects";

// -------------------------------------------------------------------------------------------------
// Defaults and limits
// -------------------------------------------------------------------------------------------------

/// Frame assumed for coordinates when none is given.
pub const DEFAULT_FRAME: &str = "icrs";

/// Upper bound on the number of samples a time range may expand into.
pub const MAX_TIME_SAMPLES: usize = 1_000_000;
