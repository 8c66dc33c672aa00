//! # Disk-backed memoization
//!
//! A [`DiskCache`] is one **namespace**: a single TOML file mapping a derived
//! [`CacheKey`] to the raw record produced by a resolver. It exists so that a
//! location or object name is looked up over the network once, ever, on a given
//! machine.
//!
//! ## File layout
//!
//! ```toml
//! ["location_by_query(query=mitaka)"]
//! stored_at = "2024-05-01T10:00:00+00:00"
//!
//! ["location_by_query(query=mitaka)".value]
//! name = "Mitaka"
//! longitude = 139.5597
//! latitude = 35.6835
//! altitude = 0.0
//! timezone = "Asia/Tokyo"
//! ```
//!
//! ## Semantics
//!
//! - The file is read lazily, on the first access through this handle.
//! - Every insertion rewrites the whole file through a temporary file in the same
//!   directory and an atomic rename, so a crash never leaves a half-written cache.
//! - Entries never expire. Deleting the file (or [`DiskCache::clear`]) invalidates
//!   the namespace.
//! - An unreadable or corrupt file, or an entry that does not decode into the
//!   requested type, counts as a miss and a warning is logged.
//! - A file that exists but cannot be read is never overwritten by this handle.
//! - A failing computation is propagated and nothing is stored.
//! - Single-process use is assumed; concurrent writers are last-writer-wins.

mod key;

pub use key::CacheKey;

use std::{
    cell::{Cell, RefCell},
    fs,
    io::Write,
};

use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tempfile::NamedTempFile;
use toml::{Table, Value};
use tracing::{debug, warn};

use crate::{azely_errors::AzelyError, constants::TOML_SUFFIX};

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry<T> {
    stored_at: String,
    value: T,
}

#[derive(Debug)]
pub struct DiskCache {
    path: Utf8PathBuf,
    entries: RefCell<Option<Table>>,
    unreadable: Cell<bool>,
}

impl DiskCache {
    /// Open the namespace `namespace` inside `dir` (file `<dir>/<namespace>.toml`).
    ///
    /// Nothing is read or created until the cache is first used.
    pub fn new(dir: &Utf8Path, namespace: &str) -> Self {
        let path = dir.join(namespace).with_extension(TOML_SUFFIX);
        DiskCache {
            path,
            entries: RefCell::new(None),
            unreadable: Cell::new(false),
        }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Return the stored value for `key`, computing and storing it on a miss.
    ///
    /// Arguments
    /// ---------
    /// * `key`: the derived key of the call
    /// * `compute`: the wrapped resolution, only invoked on a miss
    ///
    /// Return
    /// ------
    /// * The cached or freshly computed value.
    /// * The error of `compute` if it fails; the cache is left untouched.
    ///
    /// A failure to write the cache file is logged and does not fail the call.
    pub fn get_or_try_insert_with<T, F>(&self, key: &CacheKey, compute: F) -> Result<T, AzelyError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Result<T, AzelyError>,
    {
        if let Some(value) = self.get(key) {
            debug!(cache = %self.path, %key, "cache hit");
            return Ok(value);
        }

        debug!(cache = %self.path, %key, "cache miss");
        let value = compute()?;

        if let Err(err) = self.insert(key, &value) {
            warn!(%err, "result not cached");
        }
        Ok(value)
    }

    /// Look up `key` without computing anything.
    pub fn get<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        let raw = self.with_entries(|entries| entries.get(&key.to_string()).cloned())?;

        match raw.try_into::<CacheEntry<T>>() {
            Ok(entry) => Some(entry.value),
            Err(err) => {
                warn!(cache = %self.path, %key, %err, "ignoring undecodable cache entry");
                None
            }
        }
    }

    /// Store `value` under `key` and flush the namespace file.
    pub fn insert<T: Serialize>(&self, key: &CacheKey, value: &T) -> Result<(), AzelyError> {
        let entry = CacheEntry {
            stored_at: Utc::now().to_rfc3339(),
            value,
        };
        let raw = Value::try_from(&entry).map_err(|e| self.error(e))?;

        self.with_entries(|entries| {
            entries.insert(key.to_string(), raw);
            self.flush(entries)
        })
    }

    /// Remove `key` from the namespace.
    ///
    /// Return
    /// ------
    /// * `true` if an entry was removed.
    pub fn invalidate(&self, key: &CacheKey) -> Result<bool, AzelyError> {
        self.with_entries(|entries| {
            if entries.remove(&key.to_string()).is_none() {
                return Ok(false);
            }
            self.flush(entries).map(|_| true)
        })
    }

    /// Delete the namespace file and forget every entry.
    pub fn clear(&self) -> Result<(), AzelyError> {
        *self.entries.borrow_mut() = Some(Table::new());
        self.unreadable.set(false);
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(self.error(err)),
        }
    }

    pub fn len(&self) -> usize {
        self.with_entries(|entries| entries.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn with_entries<R>(&self, f: impl FnOnce(&mut Table) -> R) -> R {
        let mut entries = self.entries.borrow_mut();
        let entries = entries.get_or_insert_with(|| self.load());
        f(entries)
    }

    fn load(&self) -> Table {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Table::new(),
            Err(err) => {
                warn!(cache = %self.path, %err, "unreadable cache file, not writing to it");
                self.unreadable.set(true);
                return Table::new();
            }
        };

        text.parse::<Table>().unwrap_or_else(|err| {
            warn!(cache = %self.path, %err, "corrupt cache file, starting empty");
            Table::new()
        })
    }

    fn flush(&self, entries: &Table) -> Result<(), AzelyError> {
        if self.unreadable.get() {
            return Err(self.error("existing file could not be read, not overwriting it"));
        }
        let text = toml::to_string(entries).map_err(|e| self.error(e))?;

        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_str().is_empty())
            .unwrap_or(Utf8Path::new("."));
        fs::create_dir_all(dir).map_err(|e| self.error(e))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.error(e))?;
        tmp.write_all(text.as_bytes()).map_err(|e| self.error(e))?;
        tmp.persist(&self.path).map_err(|e| self.error(e.error))?;
        Ok(())
    }

    fn error(&self, reason: impl ToString) -> AzelyError {
        AzelyError::Cache {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod cache_test {
    use std::cell::Cell;

    use tempfile::TempDir;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Record {
        name: String,
        longitude: f64,
        latitude: f64,
    }

    fn utf8_dir(tmp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap()
    }

    fn record() -> Record {
        Record {
            name: "Mitaka".into(),
            longitude: 139.5597,
            latitude: 35.6835,
        }
    }

    #[test]
    fn test_compute_once_then_hit() {
        let tmp = TempDir::new().unwrap();
        let cache = DiskCache::new(&utf8_dir(&tmp), "locations");
        let key = CacheKey::new("location_by_query").arg("query", "mitaka");
        let calls = Cell::new(0);

        for _ in 0..3 {
            let value: Record = cache
                .get_or_try_insert_with(&key, || {
                    calls.set(calls.get() + 1);
                    Ok(record())
                })
                .unwrap();
            assert_eq!(value, record());
        }
        assert_eq!(calls.get(), 1);
        assert!(cache.path().exists());
    }

    #[test]
    fn test_persists_across_handles() {
        let tmp = TempDir::new().unwrap();
        let dir = utf8_dir(&tmp);
        let key = CacheKey::new("location_by_query").arg("query", "mitaka");

        DiskCache::new(&dir, "locations").insert(&key, &record()).unwrap();

        let reopened = DiskCache::new(&dir, "locations");
        assert_eq!(reopened.get::<Record>(&key), Some(record()));
        assert_eq!(reopened.len(), 1);
    }

    #[test]
    fn test_failure_is_not_cached() {
        let tmp = TempDir::new().unwrap();
        let cache = DiskCache::new(&utf8_dir(&tmp), "locations");
        let key = CacheKey::new("location_by_query").arg("query", "nowhere");

        let res: Result<Record, _> = cache.get_or_try_insert_with(&key, || {
            Err(AzelyError::location("nowhere", "no match"))
        });
        assert_eq!(res, Err(AzelyError::location("nowhere", "no match")));
        assert!(cache.is_empty());
        assert!(!cache.path().exists());

        let value = cache.get_or_try_insert_with(&key, || Ok(record())).unwrap();
        assert_eq!(value, record());
    }

    #[test]
    fn test_corrupt_file_is_a_miss() {
        let tmp = TempDir::new().unwrap();
        let dir = utf8_dir(&tmp);
        fs::write(dir.join("locations.toml"), "this is [not toml").unwrap();

        let cache = DiskCache::new(&dir, "locations");
        let key = CacheKey::new("location_by_query").arg("query", "mitaka");
        assert_eq!(cache.get::<Record>(&key), None);

        let value = cache.get_or_try_insert_with(&key, || Ok(record())).unwrap();
        assert_eq!(value, record());

        // the rewritten file is valid again
        let text = fs::read_to_string(dir.join("locations.toml")).unwrap();
        assert!(text.parse::<Table>().is_ok());
    }

    #[test]
    fn test_unreadable_file_is_never_overwritten() {
        let tmp = TempDir::new().unwrap();
        let dir = utf8_dir(&tmp);
        let bytes = b"[\"f(query=a)\"]\nstored_at = \"\xff\"\n".to_vec();
        fs::write(dir.join("locations.toml"), &bytes).unwrap();

        let cache = DiskCache::new(&dir, "locations");
        let key = CacheKey::new("location_by_query").arg("query", "mitaka");

        // the value is still returned, the file is left alone
        let value = cache.get_or_try_insert_with(&key, || Ok(record())).unwrap();
        assert_eq!(value, record());
        assert!(matches!(
            cache.insert(&key, &record()),
            Err(AzelyError::Cache { .. })
        ));
        assert_eq!(fs::read(dir.join("locations.toml")).unwrap(), bytes);
    }

    #[test]
    fn test_undecodable_entry_is_a_miss() {
        let tmp = TempDir::new().unwrap();
        let cache = DiskCache::new(&utf8_dir(&tmp), "objects");
        let key = CacheKey::new("object_by_name").arg("query", "m87");
        cache.insert(&key, &"just a string").unwrap();

        assert_eq!(cache.get::<Record>(&key), None);
    }

    #[test]
    fn test_invalidate_and_clear() {
        let tmp = TempDir::new().unwrap();
        let cache = DiskCache::new(&utf8_dir(&tmp), "locations");
        let a = CacheKey::new("f").arg("query", "a");
        let b = CacheKey::new("f").arg("query", "b");
        cache.insert(&a, &record()).unwrap();
        cache.insert(&b, &record()).unwrap();

        assert!(cache.invalidate(&a).unwrap());
        assert!(!cache.invalidate(&a).unwrap());
        assert_eq!(cache.len(), 1);

        cache.clear().unwrap();
        assert!(cache.is_empty());
        assert!(!cache.path().exists());
    }
}
