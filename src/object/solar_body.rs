use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Solar-system bodies whose position is left to the ephemeris of the
/// coordinate engine, with their NAIF integer ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SolarBody {
    Sun,
    Mercury,
    Venus,
    Earth,
    Moon,
    EarthMoonBarycenter,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl SolarBody {
    pub const ALL: [SolarBody; 12] = [
        SolarBody::Sun,
        SolarBody::Mercury,
        SolarBody::Venus,
        SolarBody::Earth,
        SolarBody::Moon,
        SolarBody::EarthMoonBarycenter,
        SolarBody::Mars,
        SolarBody::Jupiter,
        SolarBody::Saturn,
        SolarBody::Uranus,
        SolarBody::Neptune,
        SolarBody::Pluto,
    ];

    pub fn naif_id(&self) -> i32 {
        match self {
            SolarBody::Sun => 10,
            SolarBody::Mercury => 199,
            SolarBody::Venus => 299,
            SolarBody::Earth => 399,
            SolarBody::Moon => 301,
            SolarBody::EarthMoonBarycenter => 3,
            SolarBody::Mars => 499,
            SolarBody::Jupiter => 599,
            SolarBody::Saturn => 699,
            SolarBody::Uranus => 799,
            SolarBody::Neptune => 899,
            SolarBody::Pluto => 999,
        }
    }

    pub fn from_naif_id(id: i32) -> Option<Self> {
        SolarBody::ALL.into_iter().find(|body| body.naif_id() == id)
    }

    /// Lower-case identifier, as accepted in queries.
    pub fn key(&self) -> &'static str {
        match self {
            SolarBody::Sun => "sun",
            SolarBody::Mercury => "mercury",
            SolarBody::Venus => "venus",
            SolarBody::Earth => "earth",
            SolarBody::Moon => "moon",
            SolarBody::EarthMoonBarycenter => "earth-moon-barycenter",
            SolarBody::Mars => "mars",
            SolarBody::Jupiter => "jupiter",
            SolarBody::Saturn => "saturn",
            SolarBody::Uranus => "uranus",
            SolarBody::Neptune => "neptune",
            SolarBody::Pluto => "pluto",
        }
    }

    /// Case-insensitive lookup; spaces and underscores count as hyphens.
    pub fn from_name(name: &str) -> Option<Self> {
        let key = name
            .trim()
            .to_lowercase()
            .replace([' ', '_'], "-");
        SolarBody::ALL.into_iter().find(|body| body.key() == key)
    }
}

impl From<SolarBody> for i32 {
    fn from(body: SolarBody) -> Self {
        body.naif_id()
    }
}

impl TryFrom<i32> for SolarBody {
    type Error = String;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        SolarBody::from_naif_id(id).ok_or_else(|| format!("Invalid solar-system body id: {id}"))
    }
}

impl FromStr for SolarBody {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SolarBody::from_name(s).ok_or_else(|| format!("Unknown solar-system body: {s}"))
    }
}

impl fmt::Display for SolarBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SolarBody::Sun => "Sun",
            SolarBody::Mercury => "Mercury",
            SolarBody::Venus => "Venus",
            SolarBody::Earth => "Earth",
            SolarBody::Moon => "Moon",
            SolarBody::EarthMoonBarycenter => "Earth-Moon Barycenter",
            SolarBody::Mars => "Mars",
            SolarBody::Jupiter => "Jupiter",
            SolarBody::Saturn => "Saturn",
            SolarBody::Uranus => "Uranus",
            SolarBody::Neptune => "Neptune",
            SolarBody::Pluto => "Pluto",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod solar_body_test {
    use super::*;

    #[test]
    fn test_from_name_is_case_insensitive() {
        assert_eq!("Sun".parse::<SolarBody>().unwrap(), SolarBody::Sun);
        assert_eq!("  MOON ".parse::<SolarBody>().unwrap(), SolarBody::Moon);
        assert_eq!(
            "Earth Moon Barycenter".parse::<SolarBody>().unwrap(),
            SolarBody::EarthMoonBarycenter
        );
        assert!("M87".parse::<SolarBody>().is_err());
        assert!("".parse::<SolarBody>().is_err());
    }

    #[test]
    fn test_naif_ids() {
        assert_eq!(i32::from(SolarBody::Sun), 10);
        assert_eq!(i32::from(SolarBody::Moon), 301);
        assert_eq!(i32::from(SolarBody::EarthMoonBarycenter), 3);
        assert_eq!(SolarBody::try_from(599).unwrap(), SolarBody::Jupiter);
        assert!(SolarBody::try_from(42).is_err());
    }

    #[test]
    fn test_key_round_trip() {
        for body in SolarBody::ALL {
            assert_eq!(SolarBody::from_name(body.key()), Some(body));
            assert_eq!(SolarBody::from_naif_id(body.naif_id()), Some(body));
        }
    }
}
