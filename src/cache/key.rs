use std::{collections::BTreeMap, fmt};

/// Deterministic cache key: the identity of the resolving function plus its
/// normalized arguments.
///
/// Arguments are kept sorted by name, so the order in which they are added does
/// not matter. Volatile arguments (timeouts and the like) are simply never added.
///
/// ```
/// use azely::cache::CacheKey;
///
/// let a = CacheKey::new("location_by_query").arg("query", "tokyo").arg("lang", "en");
/// let b = CacheKey::new("location_by_query").arg("lang", "en").arg("query", "tokyo");
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "location_by_query(lang=en, query=tokyo)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    function: String,
    args: BTreeMap<String, String>,
}

impl CacheKey {
    pub fn new(function: &str) -> Self {
        CacheKey {
            function: function.to_string(),
            args: BTreeMap::new(),
        }
    }

    /// Add (or replace) a named argument.
    pub fn arg(mut self, name: &str, value: impl ToString) -> Self {
        self.args.insert(name.to_string(), value.to_string());
        self
    }

    pub fn function(&self) -> &str {
        &self.function
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.function)?;
        for (i, (name, value)) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        write!(f, ")")
    }
}
