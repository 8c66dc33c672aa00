//! # Time resolution
//!
//! Turns a time expression into a [`TimeSpec`]: a non-empty, ordered sequence of
//! UTC instants tagged with the zone used to read naive input.
//!
//! ## Expressions
//!
//! | Input                                 | Result                                          |
//! |---------------------------------------|-------------------------------------------------|
//! | `""`, `"now"`                         | the current instant                             |
//! | `"2024-05-01 21:30"`                  | one instant, read in the resolved zone          |
//! | `"2024-05-01T12:30:00+09:00"`         | one instant, its own offset wins               |
//! | `"2024-05-01"`, `"today"`, `"tomorrow"`| the whole day, `00:00` to next `00:00` inclusive|
//! | `"<start> to <end>"`                  | `start..=end` sampled every `freq`              |
//!
//! A date-only bound stands for `00:00` of that day, so `"2024-01-01 to 2024-01-02"`
//! at `"1H"` yields 25 samples.
//!
//! ## Zones
//!
//! The `view` argument is an IANA zone (`"Asia/Tokyo"`), `"UTC"`, a fixed offset
//! (`"+09:00"`, `"-0530"`, `"+9"`) or, failing those, a location query whose
//! timezone is used. An empty view means UTC.

use std::{fmt, str::FromStr, time::Duration};

use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc,
};
use chrono_tz::Tz;
use hifitime::Epoch;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::{
    azely_errors::AzelyError,
    constants::{MAX_TIME_SAMPLES, NOW},
    location::LocationResolver,
};

static OFFSET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i:utc|gmt)?(?P<sign>[+-])(?P<hours>\d{1,2})(?::?(?P<minutes>\d{2}))?$").unwrap()
});

static FREQ: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<count>\d+)?\s*(?P<unit>T|min|m|H|h|S|s|D|d)$").unwrap());

const DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

/// Zone used to read naive timestamps and to display results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeZoneSpec {
    Utc,
    Named(Tz),
    Fixed(FixedOffset),
}

impl TimeZoneSpec {
    /// Parse a zone name or offset, `None` if `text` is neither.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if ["utc", "gmt", "z"].contains(&text.to_lowercase().as_str()) {
            return Some(TimeZoneSpec::Utc);
        }
        if let Ok(tz) = Tz::from_str(text) {
            return Some(TimeZoneSpec::Named(tz));
        }

        let caps = OFFSET.captures(text)?;
        let hours: i32 = caps["hours"].parse().ok()?;
        let minutes: i32 = caps
            .name("minutes")
            .map_or(Ok(0), |m| m.as_str().parse())
            .ok()?;
        if hours > 23 || minutes > 59 {
            return None;
        }
        let seconds = (hours * 3600 + minutes * 60) * if &caps["sign"] == "-" { -1 } else { 1 };
        FixedOffset::east_opt(seconds).map(TimeZoneSpec::Fixed)
    }

    /// Read a naive local time in this zone.
    ///
    /// Ambiguous times (DST fold) take the earliest instant; times falling in a
    /// DST gap do not exist and give `None`.
    pub fn local_to_utc(&self, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            TimeZoneSpec::Utc => Some(naive.and_utc()),
            TimeZoneSpec::Named(tz) => tz
                .from_local_datetime(&naive)
                .earliest()
                .map(|t| t.with_timezone(&Utc)),
            TimeZoneSpec::Fixed(offset) => offset
                .from_local_datetime(&naive)
                .single()
                .map(|t| t.with_timezone(&Utc)),
        }
    }

    pub fn to_local(&self, instant: &DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            TimeZoneSpec::Utc => instant.fixed_offset(),
            TimeZoneSpec::Named(tz) => instant.with_timezone(tz).fixed_offset(),
            TimeZoneSpec::Fixed(offset) => instant.with_timezone(offset),
        }
    }

    /// Calendar date of `instant` in this zone.
    pub fn date_of(&self, instant: &DateTime<Utc>) -> NaiveDate {
        self.to_local(instant).date_naive()
    }
}

impl fmt::Display for TimeZoneSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeZoneSpec::Utc => write!(f, "UTC"),
            TimeZoneSpec::Named(tz) => write!(f, "{}", tz.name()),
            TimeZoneSpec::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

/// Parse a sampling frequency such as `"10T"`, `"1H"`, `"30s"` or `"D"`.
///
/// Units: `T`, `min`, `m` (minutes), `H`, `h` (hours), `S`, `s` (seconds) and
/// `D`, `d` (days). The count defaults to 1 and must be positive.
pub fn parse_freq(text: &str) -> Result<TimeDelta, String> {
    let text = text.trim();
    let caps = FREQ
        .captures(text)
        .ok_or_else(|| format!("invalid frequency {text:?}"))?;

    let count: i64 = match caps.name("count") {
        Some(m) => m
            .as_str()
            .parse()
            .map_err(|e| format!("invalid frequency {text:?}: {e}"))?,
        None => 1,
    };
    if count == 0 {
        return Err(format!("invalid frequency {text:?}: must be positive"));
    }

    let step = match &caps["unit"] {
        "T" | "min" | "m" => TimeDelta::try_minutes(count),
        "H" | "h" => TimeDelta::try_hours(count),
        "S" | "s" => TimeDelta::try_seconds(count),
        _ => TimeDelta::try_days(count),
    };
    step.ok_or_else(|| format!("invalid frequency {text:?}: too large"))
}

/// Resolved times: UTC instants plus the zone they are displayed in.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSpec {
    instants: Vec<DateTime<Utc>>,
    zone: TimeZoneSpec,
    freq: Option<TimeDelta>,
}

impl TimeSpec {
    pub fn instants(&self) -> &[DateTime<Utc>] {
        &self.instants
    }

    pub fn zone(&self) -> TimeZoneSpec {
        self.zone
    }

    /// Sampling step, `None` for a single instant.
    pub fn freq(&self) -> Option<TimeDelta> {
        self.freq
    }

    pub fn len(&self) -> usize {
        self.instants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instants.is_empty()
    }

    /// Instants in the display zone.
    pub fn local(&self) -> Vec<DateTime<FixedOffset>> {
        self.instants.iter().map(|t| self.zone.to_local(t)).collect()
    }

    /// Instants as UTC epochs, the form consumed by the coordinate engine.
    pub fn epochs(&self) -> Vec<Epoch> {
        self.instants
            .iter()
            .map(|t| {
                Epoch::from_unix_seconds(
                    t.timestamp() as f64 + f64::from(t.timestamp_subsec_nanos()) * 1e-9,
                )
            })
            .collect()
    }
}

/// One side of a time expression.
enum Point {
    Instant(DateTime<Utc>),
    Day(NaiveDate),
}

pub struct TimeResolver<'a> {
    locations: &'a LocationResolver<'a>,
}

impl<'a> TimeResolver<'a> {
    /// Arguments
    /// ---------
    /// * `locations`: resolves a `view` that is neither a zone nor an offset
    pub fn new(locations: &'a LocationResolver<'a>) -> Self {
        TimeResolver { locations }
    }

    /// Resolve `expr` against the current time.
    ///
    /// Arguments
    /// ---------
    /// * `expr`: time expression (see the module docs)
    /// * `view`: zone, offset or location query giving the zone of naive input
    /// * `freq`: sampling step of days and ranges
    /// * `sep`: word separating the two ends of a range
    /// * `timeout`: bound on the location lookup of `view`
    ///
    /// Errors
    /// ------
    /// * [`AzelyError::TimeResolution`] naming the input and the accepted formats.
    /// * [`AzelyError::LocationResolution`] if `view` is a location that cannot be resolved.
    pub fn resolve(
        &self,
        expr: &str,
        view: &str,
        freq: &str,
        sep: &str,
        timeout: Duration,
    ) -> Result<TimeSpec, AzelyError> {
        self.resolve_at(expr, view, freq, sep, timeout, Utc::now())
    }

    /// Same as [`TimeResolver::resolve`] with an explicit current instant.
    pub fn resolve_at(
        &self,
        expr: &str,
        view: &str,
        freq: &str,
        sep: &str,
        timeout: Duration,
        now: DateTime<Utc>,
    ) -> Result<TimeSpec, AzelyError> {
        let zone = self.zone(view, timeout)?;
        self.resolve_in(expr, zone, freq, sep, now)
    }

    /// Resolve `expr` in an already known zone.
    pub fn resolve_in(
        &self,
        expr: &str,
        zone: TimeZoneSpec,
        freq: &str,
        sep: &str,
        now: DateTime<Utc>,
    ) -> Result<TimeSpec, AzelyError> {
        let step = parse_freq(freq).map_err(|reason| AzelyError::time(expr, reason))?;
        debug!(expr, %zone, "resolving time");

        let parts = split_range(expr, sep).map_err(|reason| AzelyError::time(expr, reason))?;
        let (start, end) = match parts.as_slice() {
            [single] => match parse_point(single, zone, now).map_err(|r| AzelyError::time(expr, r))? {
                Point::Instant(instant) => {
                    return Ok(TimeSpec {
                        instants: vec![instant],
                        zone,
                        freq: None,
                    })
                }
                Point::Day(date) => (
                    start_of_day(date, zone, expr)?,
                    start_of_day(next_day(date, expr)?, zone, expr)?,
                ),
            },
            [start, end] => (
                Self::bound(expr, start, zone, now)?,
                Self::bound(expr, end, zone, now)?,
            ),
            _ => return Err(AzelyError::time(expr, format!("more than one {sep:?} separator"))),
        };

        if end < start {
            return Err(AzelyError::time(expr, "range ends before it starts"));
        }

        Ok(TimeSpec {
            instants: expand(expr, start, end, step)?,
            zone,
            freq: Some(step),
        })
    }

    /// Zone designated by `view`: a zone name, an offset or a location query.
    /// An empty view means UTC.
    pub fn zone(&self, view: &str, timeout: Duration) -> Result<TimeZoneSpec, AzelyError> {
        let view = view.trim();
        if view.is_empty() {
            return Ok(TimeZoneSpec::Utc);
        }
        if let Some(zone) = TimeZoneSpec::parse(view) {
            return Ok(zone);
        }
        Ok(self.locations.resolve(view, timeout)?.zone())
    }

    fn bound(
        expr: &str,
        text: &str,
        zone: TimeZoneSpec,
        now: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, AzelyError> {
        match parse_point(text, zone, now).map_err(|r| AzelyError::time(expr, r))? {
            Point::Instant(instant) => Ok(instant),
            Point::Day(date) => start_of_day(date, zone, expr),
        }
    }
}

fn split_range<'e>(expr: &'e str, sep: &str) -> Result<Vec<&'e str>, String> {
    let expr = expr.trim();
    let sep = sep.trim();
    if sep.is_empty() {
        return Ok(vec![expr]);
    }

    let finder = Regex::new(&format!("(?i){}", regex::escape(sep)))
        .map_err(|e| format!("invalid separator {sep:?}: {e}"))?;
    // a word separator may touch digits ("2024-01-01to2024-01-02") but never letters
    let is_word = sep.chars().all(char::is_alphanumeric);
    let inside_word = |start: usize, end: usize| {
        is_word
            && (expr[..start].chars().next_back().is_some_and(char::is_alphabetic)
                || expr[end..].chars().next().is_some_and(char::is_alphabetic))
    };

    let mut parts = Vec::new();
    let mut rest = 0;
    for found in finder.find_iter(expr) {
        if inside_word(found.start(), found.end()) {
            continue;
        }
        parts.push(expr[rest..found.start()].trim());
        rest = found.end();
    }
    parts.push(expr[rest..].trim());
    Ok(parts)
}

fn parse_point(text: &str, zone: TimeZoneSpec, now: DateTime<Utc>) -> Result<Point, String> {
    let text = text.trim();
    let today = zone.date_of(&now);

    match text.to_lowercase().as_str() {
        "" | NOW => return Ok(Point::Instant(now)),
        "today" => return Ok(Point::Day(today)),
        "tomorrow" => return today.succ_opt().map(Point::Day).ok_or_else(|| out_of_range(text)),
        "yesterday" => return today.pred_opt().map(Point::Day).ok_or_else(|| out_of_range(text)),
        _ => {}
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Ok(Point::Instant(instant.with_timezone(&Utc)));
    }

    let naive = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            TIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveTime::parse_from_str(text, fmt).ok())
                .map(|time| today.and_time(time))
        });
    if let Some(naive) = naive {
        return zone
            .local_to_utc(naive)
            .map(Point::Instant)
            .ok_or_else(|| format!("{naive} does not exist in {zone}"));
    }

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
    {
        return Ok(Point::Day(date));
    }

    Err(format!(
        "unrecognized time {text:?}; tried now, today, tomorrow, yesterday, RFC 3339, {}, {}, {}",
        DATETIME_FORMATS.join(", "),
        DATE_FORMATS.join(", "),
        TIME_FORMATS.join(", ")
    ))
}

fn out_of_range(text: &str) -> String {
    format!("{text} is out of the supported date range")
}

fn next_day(date: NaiveDate, expr: &str) -> Result<NaiveDate, AzelyError> {
    date.succ_opt()
        .ok_or_else(|| AzelyError::time(expr, out_of_range(&date.to_string())))
}

fn start_of_day(date: NaiveDate, zone: TimeZoneSpec, expr: &str) -> Result<DateTime<Utc>, AzelyError> {
    let midnight = date.and_time(NaiveTime::MIN);
    zone.local_to_utc(midnight)
        .or_else(|| zone.local_to_utc(midnight + TimeDelta::hours(1)))
        .ok_or_else(|| AzelyError::time(expr, format!("{date} has no midnight in {zone}")))
}

fn expand(
    expr: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    step: TimeDelta,
) -> Result<Vec<DateTime<Utc>>, AzelyError> {
    let too_many = || {
        AzelyError::time(
            expr,
            format!("more than {MAX_TIME_SAMPLES} samples, use a coarser frequency"),
        )
    };

    let span = (end - start).num_seconds();
    let count = span / step.num_seconds() + 1;
    if count > MAX_TIME_SAMPLES as i64 {
        return Err(too_many());
    }
    let count = i32::try_from(count).map_err(|_| too_many())?;

    Ok((0..count).map(|i| start + step * i).collect())
}

#[cfg(test)]
mod time_test {
    use std::{path::Path, rc::Rc};

    use approx::assert_relative_eq;
    use camino::Utf8PathBuf;
    use chrono::Timelike;
    use tempfile::TempDir;

    use super::*;
    use crate::{
        cache::DiskCache, env_state::AzelyEnv, location::LocationRecord,
        services::http::http_test::FakeHttpClient,
    };

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn now() -> DateTime<Utc> {
        // 2024-05-01 15:30 UTC = 2024-05-02 00:30 in Tokyo
        Utc.with_ymd_and_hms(2024, 5, 1, 15, 30, 0).unwrap()
    }

    fn with_resolver<R>(test: impl FnOnce(&TimeResolver) -> R) -> R {
        let tmp = TempDir::new().unwrap();
        let dir = Utf8PathBuf::from_path_buf(Path::new(tmp.path()).to_path_buf()).unwrap();
        let env = AzelyEnv::with_http(Rc::new(FakeHttpClient::failing("offline")));
        let cache = DiskCache::new(&dir, "locations");
        let sites = vec![(
            "mitaka".to_string(),
            LocationRecord {
                name: "Mitaka".into(),
                longitude: 139.5597,
                latitude: 35.6835,
                altitude: 58.0,
                timezone: "Asia/Tokyo".into(),
            },
        )];
        let locations = LocationResolver::new(&env, &cache, &sites);
        test(&TimeResolver::new(&locations))
    }

    #[test]
    fn test_parse_zone() {
        assert_eq!(TimeZoneSpec::parse("UTC"), Some(TimeZoneSpec::Utc));
        assert_eq!(
            TimeZoneSpec::parse("Asia/Tokyo"),
            Some(TimeZoneSpec::Named(chrono_tz::Asia::Tokyo))
        );
        let nine = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(TimeZoneSpec::parse("+09:00"), Some(TimeZoneSpec::Fixed(nine)));
        assert_eq!(TimeZoneSpec::parse("+9"), Some(TimeZoneSpec::Fixed(nine)));
        assert_eq!(
            TimeZoneSpec::parse("-0530"),
            Some(TimeZoneSpec::Fixed(FixedOffset::west_opt(5 * 3600 + 1800).unwrap()))
        );
        assert_eq!(TimeZoneSpec::parse("Mitaka"), None);
        assert_eq!(TimeZoneSpec::parse("+25:00"), None);
    }

    #[test]
    fn test_parse_freq() {
        assert_eq!(parse_freq("10T").unwrap(), TimeDelta::minutes(10));
        assert_eq!(parse_freq("1h").unwrap(), TimeDelta::hours(1));
        assert_eq!(parse_freq("H").unwrap(), TimeDelta::hours(1));
        assert_eq!(parse_freq("30s").unwrap(), TimeDelta::seconds(30));
        assert_eq!(parse_freq("5min").unwrap(), TimeDelta::minutes(5));
        assert_eq!(parse_freq("2D").unwrap(), TimeDelta::days(2));
        assert!(parse_freq("0H").is_err());
        assert!(parse_freq("10 parsecs").is_err());
    }

    #[test]
    fn test_now_is_single_instant() {
        with_resolver(|r| {
            for expr in ["now", "", "  NOW "] {
                let spec = r.resolve_at(expr, "UTC", "10T", "to", TIMEOUT, now()).unwrap();
                assert_eq!(spec.instants(), &[now()]);
                assert_eq!(spec.freq(), None);
            }
        })
    }

    #[test]
    fn test_range_is_end_inclusive() {
        with_resolver(|r| {
            let spec = r
                .resolve_at("2024-01-01 to 2024-01-02", "UTC", "1h", "to", TIMEOUT, now())
                .unwrap();
            assert_eq!(spec.len(), 25);
            assert_eq!(spec.instants()[0], Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
            assert_eq!(spec.instants()[24], Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap());
            assert!(spec
                .instants()
                .windows(2)
                .all(|w| w[1] - w[0] == TimeDelta::hours(1)));
        })
    }

    #[test]
    fn test_naive_input_is_read_in_view_zone() {
        with_resolver(|r| {
            let spec = r
                .resolve_at("2024-05-01 21:00", "Asia/Tokyo", "10T", "to", TIMEOUT, now())
                .unwrap();
            assert_eq!(spec.instants(), &[Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()]);
            assert_eq!(spec.local()[0].hour(), 21);
            assert_eq!(spec.local()[0].offset().local_minus_utc(), 9 * 3600);
        })
    }

    #[test]
    fn test_rfc3339_keeps_its_offset() {
        with_resolver(|r| {
            let spec = r
                .resolve_at("2024-05-01T12:00:00+02:00", "Asia/Tokyo", "10T", "to", TIMEOUT, now())
                .unwrap();
            assert_eq!(spec.instants(), &[Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()]);
            assert_eq!(spec.zone(), TimeZoneSpec::Named(chrono_tz::Asia::Tokyo));
        })
    }

    #[test]
    fn test_today_follows_the_zone() {
        with_resolver(|r| {
            // already May 2nd in Tokyo
            let spec = r.resolve_at("today", "mitaka", "1H", "to", TIMEOUT, now()).unwrap();
            assert_eq!(spec.len(), 25);
            assert_eq!(spec.local()[0].date_naive(), NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());

            let spec = r.resolve_at("tomorrow", "UTC", "1D", "to", TIMEOUT, now()).unwrap();
            assert_eq!(spec.instants()[0], Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap());
            assert_eq!(spec.len(), 2);
        })
    }

    #[test]
    fn test_separator_does_not_split_words() {
        with_resolver(|r| {
            let spec = r
                .resolve_at("today to tomorrow", "UTC", "1H", "to", TIMEOUT, now())
                .unwrap();
            assert_eq!(spec.len(), 25);
        })
    }

    #[test]
    fn test_word_separator_may_touch_digits() {
        assert_eq!(
            split_range("2024-01-01to2024-01-02", "to").unwrap(),
            vec!["2024-01-01", "2024-01-02"]
        );
        assert_eq!(
            split_range("today TO tomorrow", "to").unwrap(),
            vec!["today", "tomorrow"]
        );
        assert_eq!(split_range("tomorrow", "to").unwrap(), vec!["tomorrow"]);
        assert_eq!(
            split_range("2024-01-01 / 2024-01-02", "/").unwrap(),
            vec!["2024-01-01", "2024-01-02"]
        );

        with_resolver(|r| {
            let spec = r
                .resolve_at("2024-01-01to2024-01-02", "UTC", "1H", "to", TIMEOUT, now())
                .unwrap();
            assert_eq!(spec.len(), 25);
        })
    }

    #[test]
    fn test_malformed_input_lists_formats() {
        with_resolver(|r| match r
            .resolve_at("next full moon", "UTC", "1H", "to", TIMEOUT, now())
            .unwrap_err()
        {
            AzelyError::TimeResolution { input, reason } => {
                assert_eq!(input, "next full moon");
                assert!(reason.contains("%Y-%m-%d"));
            }
            other => panic!("unexpected error: {other:?}"),
        })
    }

    #[test]
    fn test_reversed_and_oversized_ranges() {
        with_resolver(|r| {
            assert!(r
                .resolve_at("2024-01-02 to 2024-01-01", "UTC", "1H", "to", TIMEOUT, now())
                .is_err());
            assert!(r
                .resolve_at("2000-01-01 to 2024-01-01", "UTC", "1s", "to", TIMEOUT, now())
                .is_err());
        })
    }

    #[test]
    fn test_unknown_view_is_a_location_error() {
        with_resolver(|r| {
            let err = r
                .resolve_at("now", "Atlantis", "1H", "to", TIMEOUT, now())
                .unwrap_err();
            assert!(matches!(err, AzelyError::LocationResolution { .. }));
        })
    }

    #[test]
    fn test_epochs_match_instants() {
        with_resolver(|r| {
            let spec = r
                .resolve_at("2024-01-01 00:00 to 2024-01-01 00:20", "UTC", "10T", "to", TIMEOUT, now())
                .unwrap();
            let epochs = spec.epochs();
            assert_eq!(epochs.len(), 3);
            assert_relative_eq!(epochs[0].to_unix_seconds(), 1_704_067_200.0);
            assert_relative_eq!(epochs[2].to_unix_seconds(), 1_704_068_400.0);
        })
    }
}
