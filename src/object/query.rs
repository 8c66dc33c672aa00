use crate::constants::{CATALOG_ENTRY_SEPARATOR, CATALOG_TAG_MARKER};

use super::{angle::parse_angle, solar_body::SolarBody};

/// Shape of an object query, decided before any lookup happens.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectQuery {
    /// A built-in solar-system body (`"Sun"`, `"jupiter"`).
    SolarBody(SolarBody),
    /// `"[name] <lon> <lat>"`, angles already in degrees.
    Coordinates {
        name: String,
        longitude: f64,
        latitude: f64,
    },
    /// `"#tag"` or `"#tag:entry"`.
    CatalogTag { tag: String, entry: Option<String> },
    /// Anything else, left to the online name resolver.
    Name(String),
}

impl ObjectQuery {
    /// Classify `query`. Solar bodies take precedence over coordinates, which take
    /// precedence over a plain name.
    ///
    /// Arguments
    /// ---------
    /// * `query`: the user query
    /// * `frame`: frame the coordinates are expressed in, which decides whether a
    ///   colon-sexagesimal longitude is read in hours
    pub fn classify(query: &str, frame: &str) -> Self {
        let query = query.trim();

        if let Some(rest) = query.strip_prefix(CATALOG_TAG_MARKER) {
            return match rest.split_once(CATALOG_ENTRY_SEPARATOR) {
                Some((tag, entry)) => ObjectQuery::CatalogTag {
                    tag: tag.trim().to_string(),
                    entry: Some(entry.trim().to_string()),
                },
                None => ObjectQuery::CatalogTag {
                    tag: rest.trim().to_string(),
                    entry: None,
                },
            };
        }

        if let Some(body) = SolarBody::from_name(query) {
            return ObjectQuery::SolarBody(body);
        }

        if let Some((name, longitude, latitude)) = parse_coordinates(query, frame) {
            return ObjectQuery::Coordinates {
                name,
                longitude,
                latitude,
            };
        }

        ObjectQuery::Name(query.to_string())
    }
}

/// Frames whose longitude is a right ascension.
pub fn is_equatorial(frame: &str) -> bool {
    matches!(
        frame.to_lowercase().as_str(),
        "icrs" | "fk4" | "fk4noeterms" | "fk5" | "gcrs" | "cirs" | "hcrs" | "tete" | "precessedgeocentric"
    )
}

fn parse_coordinates(query: &str, frame: &str) -> Option<(String, f64, f64)> {
    let tokens: Vec<&str> = query.split_whitespace().collect();
    if tokens.len() < 2 {
        return None;
    }

    let (name, angles) = tokens.split_at(tokens.len() - 2);
    let longitude = parse_angle(angles[0], is_equatorial(frame)).ok()?;
    let latitude = parse_angle(angles[1], false).ok()?;

    let name = if name.is_empty() {
        query.to_string()
    } else {
        name.join(" ")
    };
    Some((name, longitude, latitude))
}
