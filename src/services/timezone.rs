use once_cell::sync::OnceCell;
use tzf_rs::DefaultFinder;

use super::TimezoneLookup;

/// Offline [`TimezoneLookup`] over the timezone boundary polygons bundled with `tzf-rs`.
///
/// Building the finder decodes the embedded polygon data, so it is done lazily on the
/// first lookup and reused afterwards.
#[derive(Default)]
pub struct TzfLookup {
    finder: OnceCell<DefaultFinder>,
}

impl TzfLookup {
    pub fn new() -> Self {
        TzfLookup {
            finder: OnceCell::new(),
        }
    }
}

impl TimezoneLookup for TzfLookup {
    fn timezone_at(&self, longitude: f64, latitude: f64) -> Option<String> {
        let finder = self.finder.get_or_init(DefaultFinder::new);
        let name = finder.get_tz_name(longitude, latitude);
        (!name.is_empty()).then(|| name.to_string())
    }
}
