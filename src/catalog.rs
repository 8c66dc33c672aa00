//! # Catalog files
//!
//! A catalog is a TOML file whose top-level tables are objects, addressed by a
//! **tag** equal to the file stem. `#favorites` refers to `favorites.toml`:
//!
//! ```toml
//! [M87]
//! ra = "12h30m49.42s"
//! dec = "+12d23m28.0s"
//!
//! [GC]
//! name = "Galactic center"
//! longitude = 0.0
//! latitude = 0.0
//! frame = "galactic"
//! ```
//!
//! The loader only reads the raw records; turning them into
//! [`Object`](crate::object::Object)s is done by the object resolver.
//!
//! Directories are searched in order and the **first** file found wins. Files of
//! the same name in later directories are never read.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use toml::{Table, Value};
use tracing::debug;

use crate::azely_errors::AzelyError;

/// One raw object record of a catalog, loaded verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRecord {
    /// Table name of the entry in the file.
    pub key: String,
    pub fields: Table,
}

#[derive(Debug, Clone)]
pub struct CatalogLoader {
    search_dirs: Vec<Utf8PathBuf>,
    extension: String,
}

impl CatalogLoader {
    pub fn new(search_dirs: Vec<Utf8PathBuf>, extension: impl Into<String>) -> Self {
        CatalogLoader {
            search_dirs,
            extension: extension.into(),
        }
    }

    pub fn search_dirs(&self) -> &[Utf8PathBuf] {
        &self.search_dirs
    }

    /// Find the file of catalog `tag` in the first directory that has one.
    pub fn locate(&self, tag: &str) -> Result<Utf8PathBuf, AzelyError> {
        let not_found = |searched: Vec<Utf8PathBuf>| AzelyError::CatalogNotFound {
            tag: tag.to_string(),
            searched,
        };

        // a tag is a bare file stem, never a path
        if tag.is_empty() || tag.contains(['/', '\\']) || tag.starts_with('.') {
            return Err(not_found(Vec::new()));
        }

        let filename = format!("{tag}.{}", self.extension);
        self.search_dirs
            .iter()
            .map(|dir| dir.join(&filename))
            .find(|path| path.is_file())
            .ok_or_else(|| not_found(self.search_dirs.clone()))
    }

    /// Load every record of catalog `tag`, in file order.
    ///
    /// Return
    /// ------
    /// * The path actually read and its records.
    ///
    /// Errors
    /// ------
    /// * [`AzelyError::CatalogNotFound`] when no directory holds the file.
    /// * [`AzelyError::CatalogMalformed`] when the file found cannot be parsed.
    pub fn load(&self, tag: &str) -> Result<(Utf8PathBuf, Vec<CatalogRecord>), AzelyError> {
        let path = self.locate(tag)?;
        debug!(tag, catalog = %path, "loading catalog");

        let records = read_catalog(&path)?;
        Ok((path, records))
    }
}

fn read_catalog(path: &Utf8Path) -> Result<Vec<CatalogRecord>, AzelyError> {
    let malformed = |reason: String| AzelyError::CatalogMalformed {
        path: path.to_path_buf(),
        reason,
    };

    let text = fs::read_to_string(path).map_err(|e| malformed(e.to_string()))?;
    let table = text
        .parse::<Table>()
        .map_err(|e| malformed(e.to_string()))?;

    table
        .into_iter()
        .map(|(key, value)| match value {
            Value::Table(fields) => Ok(CatalogRecord { key, fields }),
            other => Err(malformed(format!(
                "entry {key} is a {}, expected a table",
                other.type_str()
            ))),
        })
        .collect()
}
