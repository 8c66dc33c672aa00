//! Angle literals used in coordinate queries and catalog entries.
//!
//! Accepted forms, all returning **degrees**:
//!
//! | form                   | example          | unit                      |
//! |------------------------|------------------|---------------------------|
//! | decimal                | `187.7059`       | degrees                   |
//! | unit-marked sexagesimal| `12h30m49.42s`   | hours (`h`) or degrees (`d`, `°`) |
//! | colon sexagesimal      | `12:30:49.42`    | hours or degrees, chosen by the caller |

use once_cell::sync::Lazy;
use regex::Regex;

static DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?$").unwrap());

static UNIT_MARKED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<sign>[+-])?(?P<major>\d+(?:\.\d*)?)(?P<unit>[hdHD°])(?:(?P<min>\d+(?:\.\d*)?)[m'])?(?:(?P<sec>\d+(?:\.\d*)?)[s\x22])?$",
    )
    .unwrap()
});

static COLON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<sign>[+-])?(?P<major>\d+):(?P<min>\d+(?:\.\d*)?)(?::(?P<sec>\d+(?:\.\d*)?))?$")
        .unwrap()
});

/// Parse an angle literal into degrees.
///
/// Arguments
/// ---------
/// * `text`: the literal, surrounding whitespace ignored
/// * `colon_in_hours`: read colon sexagesimal as hours (right ascension) instead of degrees
///
/// Return
/// ------
/// * The angle in degrees, or a message describing why the literal was rejected.
pub fn parse_angle(text: &str, colon_in_hours: bool) -> Result<f64, String> {
    let text = text.trim();

    if DECIMAL.is_match(text) {
        return text
            .parse::<f64>()
            .map_err(|e| format!("invalid angle {text:?}: {e}"));
    }

    if let Some(caps) = UNIT_MARKED.captures(text) {
        let hours = matches!(&caps["unit"], "h" | "H");
        return sexagesimal(
            text,
            caps.name("sign").map(|m| m.as_str()),
            &caps["major"],
            caps.name("min").map(|m| m.as_str()),
            caps.name("sec").map(|m| m.as_str()),
            hours,
        );
    }

    if let Some(caps) = COLON.captures(text) {
        return sexagesimal(
            text,
            caps.name("sign").map(|m| m.as_str()),
            &caps["major"],
            caps.name("min").map(|m| m.as_str()),
            caps.name("sec").map(|m| m.as_str()),
            colon_in_hours,
        );
    }

    Err(format!("invalid angle {text:?}"))
}

fn sexagesimal(
    text: &str,
    sign: Option<&str>,
    major: &str,
    minutes: Option<&str>,
    seconds: Option<&str>,
    hours: bool,
) -> Result<f64, String> {
    let number = |s: &str| {
        s.parse::<f64>()
            .map_err(|e| format!("invalid angle {text:?}: {e}"))
    };

    let major = number(major)?;
    let minutes = minutes.map(number).transpose()?.unwrap_or(0.0);
    let seconds = seconds.map(number).transpose()?.unwrap_or(0.0);

    if minutes >= 60.0 || seconds >= 60.0 {
        return Err(format!("invalid angle {text:?}: minutes and seconds must be below 60"));
    }

    let value = major + minutes / 60.0 + seconds / 3600.0;
    let value = if hours { value * 15.0 } else { value };
    Ok(if sign == Some("-") { -value } else { value })
}
