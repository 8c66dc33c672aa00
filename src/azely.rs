//! # Azely: configuration, caches and resolvers in one place
//!
//! [`Azely`] is the entry point of the crate. It owns:
//!
//! 1. the service environment ([`AzelyEnv`]),
//! 2. the merged configuration ([`ConfigStore`]) supplying every default,
//! 3. the two cache namespaces (`locations`, `objects`),
//! 4. the catalog search path and the literal sites of the configuration.
//!
//! and exposes the three resolvers plus [`Azely::compute`], which resolves an
//! `{object, site, time}` triple and hands it to a [`SkyEngine`].
//!
//! ## Typical usage
//!
//! ```rust,ignore
//! use azely::azely::{Azely, ComputeArgs};
//!
//! let azely = Azely::new()?;
//! let table = azely.compute(&my_engine, &ComputeArgs::new("M87").site("Mitaka").time("today"))?;
//! ```
//!
//! ## Defaults
//!
//! Every field of [`ComputeArgs`] left to `None` is taken from the configuration:
//! `site` from `[location] query`, `time`, `view`, `freq` and `sep` from `[time]`,
//! `frame` from `[object]`. Without an explicit `timeout`, each resolver uses the
//! timeout of its own section.
//!
//! ## Errors
//!
//! Any resolver failure aborts the call; no partial result is returned.

use std::time::Duration;

use chrono::Utc;
use tracing::debug;

use crate::{
    azely_errors::AzelyError,
    cache::DiskCache,
    catalog::CatalogLoader,
    config::ConfigStore,
    constants::{LOCATION_NAMESPACE, OBJECT_NAMESPACE},
    engine::SkyEngine,
    env_state::AzelyEnv,
    location::{Location, LocationRecord, LocationResolver},
    object::{Object, ObjectResolver},
    time::{TimeResolver, TimeSpec},
};

/// Arguments of [`Azely::compute`]. Only the object is mandatory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComputeArgs {
    pub object: String,
    pub site: Option<String>,
    pub time: Option<String>,
    pub view: Option<String>,
    pub frame: Option<String>,
    pub freq: Option<String>,
    pub sep: Option<String>,
    pub timeout: Option<Duration>,
}

impl ComputeArgs {
    pub fn new(object: impl Into<String>) -> Self {
        ComputeArgs {
            object: object.into(),
            ..Default::default()
        }
    }

    pub fn site(mut self, site: impl Into<String>) -> Self {
        self.site = Some(site.into());
        self
    }

    pub fn time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    /// Zone or location whose timezone is used instead of the site's.
    pub fn view(mut self, view: impl Into<String>) -> Self {
        self.view = Some(view.into());
        self
    }

    pub fn frame(mut self, frame: impl Into<String>) -> Self {
        self.frame = Some(frame.into());
        self
    }

    pub fn freq(mut self, freq: impl Into<String>) -> Self {
        self.freq = Some(freq.into());
        self
    }

    pub fn sep(mut self, sep: impl Into<String>) -> Self {
        self.sep = Some(sep.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

pub struct Azely {
    env: AzelyEnv,
    config: ConfigStore,
    locations: DiskCache,
    objects: DiskCache,
    catalogs: CatalogLoader,
    sites: Vec<(String, LocationRecord)>,
}

impl Azely {
    /// Real network services and the user's configuration.
    pub fn new() -> Result<Self, AzelyError> {
        let env = AzelyEnv::new().map_err(|e| AzelyError::Io(std::io::Error::other(e)))?;
        Self::with_env(env, ConfigStore::load()?)
    }

    /// Build from an explicit environment and configuration.
    ///
    /// Errors
    /// ------
    /// * [`AzelyError::Config`] if the `[cache]`, `[catalog]` or `[sites]` sections are invalid.
    pub fn with_env(env: AzelyEnv, config: ConfigStore) -> Result<Self, AzelyError> {
        let cache_dir = config.cache_dir()?;
        let (search_dirs, extension) = config.catalog_search()?;
        let sites = config.sites()?;
        debug!(cache = %cache_dir, sites = sites.len(), "azely ready");

        Ok(Azely {
            locations: DiskCache::new(&cache_dir, LOCATION_NAMESPACE),
            objects: DiskCache::new(&cache_dir, OBJECT_NAMESPACE),
            catalogs: CatalogLoader::new(search_dirs, extension),
            sites,
            env,
            config,
        })
    }

    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    pub fn location_cache(&self) -> &DiskCache {
        &self.locations
    }

    pub fn object_cache(&self) -> &DiskCache {
        &self.objects
    }

    pub fn catalogs(&self) -> &CatalogLoader {
        &self.catalogs
    }

    fn location_resolver(&self) -> LocationResolver<'_> {
        LocationResolver::new(&self.env, &self.locations, &self.sites)
    }

    fn object_resolver(&self) -> ObjectResolver<'_> {
        ObjectResolver::new(&self.env, &self.objects, &self.catalogs)
    }

    /// Resolve a location, `None` arguments taken from `[location]`.
    pub fn resolve_location(
        &self,
        query: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<Location, AzelyError> {
        let options = self.config.location_options()?;
        self.location_resolver().resolve(
            query.unwrap_or(&options.query),
            timeout.unwrap_or(Duration::from_secs(options.timeout)),
        )
    }

    /// Resolve exactly one object, `None` arguments taken from `[object]`.
    pub fn resolve_object(
        &self,
        query: &str,
        frame: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<Object, AzelyError> {
        let options = self.config.object_options()?;
        self.object_resolver().resolve(
            query,
            frame.unwrap_or(&options.frame),
            timeout.unwrap_or(Duration::from_secs(options.timeout)),
        )
    }

    /// Resolve every object designated by `query` (a bare `#tag` expands the catalog).
    pub fn resolve_objects(
        &self,
        query: &str,
        frame: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<Vec<Object>, AzelyError> {
        let options = self.config.object_options()?;
        self.object_resolver().resolve_many(
            query,
            frame.unwrap_or(&options.frame),
            timeout.unwrap_or(Duration::from_secs(options.timeout)),
        )
    }

    /// Resolve a time expression, `None` arguments taken from `[time]`.
    ///
    /// Without a view, the zone is the one of the default `[location] query`.
    pub fn resolve_time(
        &self,
        query: Option<&str>,
        view: Option<&str>,
        freq: Option<&str>,
        sep: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<TimeSpec, AzelyError> {
        let options = self.config.time_options()?;
        let view = view.unwrap_or(&options.view).trim();
        let view = if view.is_empty() {
            self.config.location_options()?.query
        } else {
            view.to_string()
        };

        let locations = self.location_resolver();
        TimeResolver::new(&locations).resolve(
            query.unwrap_or(&options.query),
            &view,
            freq.unwrap_or(&options.freq),
            sep.unwrap_or(&options.sep),
            timeout.unwrap_or(Duration::from_secs(options.timeout)),
        )
    }

    /// Resolve object, site and time and hand them to `engine`.
    ///
    /// A catalog tag holding several entries is an [`AzelyError::ObjectResolution`];
    /// use [`Azely::compute_many`] for those.
    pub fn compute<E: SkyEngine>(
        &self,
        engine: &E,
        args: &ComputeArgs,
    ) -> Result<E::Output, AzelyError> {
        let (frame, object_timeout) = self.object_defaults(args)?;
        let object = self
            .object_resolver()
            .resolve(&args.object, &frame, object_timeout)?;

        let (site, time) = self.site_and_time(args)?;
        engine
            .compute(&object, &site, &time, &frame)
            .map_err(AzelyError::Engine)
    }

    /// Like [`Azely::compute`], one engine call per resolved object.
    ///
    /// All objects, the site and the time are resolved before the first engine call.
    pub fn compute_many<E: SkyEngine>(
        &self,
        engine: &E,
        args: &ComputeArgs,
    ) -> Result<Vec<(Object, E::Output)>, AzelyError> {
        let (frame, object_timeout) = self.object_defaults(args)?;
        let objects = self
            .object_resolver()
            .resolve_many(&args.object, &frame, object_timeout)?;

        let (site, time) = self.site_and_time(args)?;
        objects
            .into_iter()
            .map(|object| {
                let output = engine
                    .compute(&object, &site, &time, &frame)
                    .map_err(AzelyError::Engine)?;
                Ok((object, output))
            })
            .collect()
    }

    fn object_defaults(&self, args: &ComputeArgs) -> Result<(String, Duration), AzelyError> {
        let options = self.config.object_options()?;
        Ok((
            args.frame.clone().unwrap_or(options.frame),
            args.timeout
                .unwrap_or(Duration::from_secs(options.timeout)),
        ))
    }

    fn site_and_time(&self, args: &ComputeArgs) -> Result<(Location, TimeSpec), AzelyError> {
        let location_options = self.config.location_options()?;
        let time_options = self.config.time_options()?;
        let locations = self.location_resolver();

        let site = locations.resolve(
            args.site.as_deref().unwrap_or(&location_options.query),
            args.timeout
                .unwrap_or(Duration::from_secs(location_options.timeout)),
        )?;

        let time_timeout = args
            .timeout
            .unwrap_or(Duration::from_secs(time_options.timeout));
        let times = TimeResolver::new(&locations);
        let view = args.view.as_deref().unwrap_or(&time_options.view).trim();
        let zone = if view.is_empty() {
            site.zone()
        } else {
            times.zone(view, time_timeout)?
        };

        let time = times.resolve_in(
            args.time.as_deref().unwrap_or(&time_options.query),
            zone,
            args.freq.as_deref().unwrap_or(&time_options.freq),
            args.sep.as_deref().unwrap_or(&time_options.sep),
            Utc::now(),
        )?;
        Ok((site, time))
    }
}
