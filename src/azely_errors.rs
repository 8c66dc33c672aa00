use camino::Utf8PathBuf;
use itertools::Itertools;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AzelyError {
    #[error("Invalid configuration in {path}: {reason}")]
    Config { path: String, reason: String },

    #[error("Catalog not found: {tag} (searched: {})", display_dirs(.searched))]
    CatalogNotFound {
        tag: String,
        searched: Vec<Utf8PathBuf>,
    },

    #[error("Catalog malformed: {path}: {reason}")]
    CatalogMalformed { path: Utf8PathBuf, reason: String },

    #[error("Failed to get location: {query} ({reason})")]
    LocationResolution { query: String, reason: String },

    #[error("Failed to get object: {query} ({reason})")]
    ObjectResolution { query: String, reason: String },

    #[error("Failed to get time: {input} ({reason})")]
    TimeResolution { input: String, reason: String },

    #[error("Unable to update cache file {path}: {reason}")]
    Cache { path: Utf8PathBuf, reason: String },

    #[error("Coordinate engine failed: {0}")]
    Engine(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Unable to perform file operation: {0}")]
    Io(#[from] std::io::Error),
}

fn display_dirs(dirs: &[Utf8PathBuf]) -> String {
    if dirs.is_empty() {
        "no directories".to_string()
    } else {
        dirs.iter().join(", ")
    }
}

impl AzelyError {
    pub(crate) fn location(query: &str, reason: impl ToString) -> Self {
        AzelyError::LocationResolution {
            query: query.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn object(query: &str, reason: impl ToString) -> Self {
        AzelyError::ObjectResolution {
            query: query.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn time(input: &str, reason: impl ToString) -> Self {
        AzelyError::TimeResolution {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl PartialEq for AzelyError {
    fn eq(&self, other: &Self) -> bool {
        use AzelyError::*;
        match (self, other) {
            (Config { path: a, reason: r }, Config { path: b, reason: s }) => a == b && r == s,
            (
                CatalogNotFound { tag: a, searched: x },
                CatalogNotFound { tag: b, searched: y },
            ) => a == b && x == y,
            (
                CatalogMalformed { path: a, reason: r },
                CatalogMalformed { path: b, reason: s },
            ) => a == b && r == s,
            (
                LocationResolution { query: a, reason: r },
                LocationResolution { query: b, reason: s },
            ) => a == b && r == s,
            (
                ObjectResolution { query: a, reason: r },
                ObjectResolution { query: b, reason: s },
            ) => a == b && r == s,
            (
                TimeResolution { input: a, reason: r },
                TimeResolution { input: b, reason: s },
            ) => a == b && r == s,
            (Cache { path: a, reason: r }, Cache { path: b, reason: s }) => a == b && r == s,

            // not comparable: equal when same variant
            (Engine(_), Engine(_)) => true,
            (Io(_), Io(_)) => true,

            _ => false,
        }
    }
}

#[cfg(test)]
mod azely_errors_test {
    use super::*;

    #[test]
    fn test_catalog_not_found_names_tag_and_dirs() {
        let err = AzelyError::CatalogNotFound {
            tag: "mytag".into(),
            searched: vec!["/a".into(), "/b".into()],
        };
        assert_eq!(err.to_string(), "Catalog not found: mytag (searched: /a, /b)");

        let err = AzelyError::CatalogNotFound {
            tag: "mytag".into(),
            searched: vec![],
        };
        assert_eq!(
            err.to_string(),
            "Catalog not found: mytag (searched: no directories)"
        );
    }

    #[test]
    fn test_resolution_errors_name_query() {
        let err = AzelyError::location("Nonexistent Place", "no match");
        assert_eq!(
            err.to_string(),
            "Failed to get location: Nonexistent Place (no match)"
        );
        assert_eq!(err, AzelyError::location("Nonexistent Place", "no match"));
        assert_ne!(err, AzelyError::object("Nonexistent Place", "no match"));
    }
}
