//! Thin adapter over `chrono` / `chrono-tz`.
//!
//! Everything calendar-shaped goes through here: parsing caller input into an
//! [`Instant`], resolving a [`Zone`] to a UTC offset, locating local midnight,
//! computing [`WeekWindow`]s and rendering through strftime patterns. The
//! classifier and formatters never do calendar arithmetic on their own.
//!
//! No function here reads the system clock except [`Instant::now`]. The zone
//! is always passed in explicitly; [`Zone::Local`] is the host zone and is
//! only the default at the outermost entry point.

use std::fmt::Write as _;
use std::str::FromStr;

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime,
    Offset, TimeZone, Utc, Weekday,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{FormatError, Result};

// ── Zone ────────────────────────────────────────────────────────────────────

/// The timezone used to derive local calendar views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Zone {
    /// Whatever the host environment reports.
    #[default]
    Local,
    /// An IANA zone, DST-aware.
    Named(Tz),
    /// A constant offset from UTC.
    Fixed(FixedOffset),
}

impl Zone {
    /// Parse a zone name.
    ///
    /// Accepts `local` (or an empty/missing value), `utc` / `z`, an IANA name
    /// such as `Asia/Tokyo`, or a fixed offset such as `+09:00` / `-0530`.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidTimezone`] for anything else.
    pub fn parse(value: Option<&str>) -> Result<Self> {
        let Some(raw) = value else {
            return Ok(Zone::Local);
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("local") {
            return Ok(Zone::Local);
        }
        if trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("z") {
            return Ok(Zone::Named(chrono_tz::UTC));
        }
        if trimmed.starts_with('+') || trimmed.starts_with('-') {
            return parse_fixed_offset(trimmed)
                .map(Zone::Fixed)
                .ok_or_else(|| FormatError::InvalidTimezone(format!("'{trimmed}'")));
        }
        Tz::from_str(trimmed)
            .map(Zone::Named)
            .map_err(|_| FormatError::InvalidTimezone(format!("'{trimmed}'")))
    }

    /// The UTC offset this zone observes at `instant`.
    pub fn offset_at(&self, instant: DateTime<Utc>) -> FixedOffset {
        match self {
            Zone::Local => instant.with_timezone(&Local).offset().fix(),
            Zone::Named(tz) => instant.with_timezone(tz).offset().fix(),
            Zone::Fixed(offset) => *offset,
        }
    }

    /// The first instant of `date` in this zone.
    ///
    /// When midnight falls into a DST gap the first valid wall-clock hour of
    /// the day is used instead.
    pub fn local_midnight(&self, date: NaiveDate) -> Option<DateTime<Utc>> {
        let midnight = date.and_time(NaiveTime::MIN);
        (0..3).find_map(|hour| {
            let naive = midnight.checked_add_signed(Duration::hours(hour))?;
            self.resolve_local(&naive)
        })
    }

    /// Map a wall-clock datetime in this zone to UTC (earliest on ambiguity).
    pub fn resolve_local(&self, naive: &NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            Zone::Local => earliest_utc(&Local, naive),
            Zone::Named(tz) => earliest_utc(tz, naive),
            Zone::Fixed(offset) => earliest_utc(offset, naive),
        }
    }
}

fn earliest_utc<T: TimeZone>(tz: &T, naive: &NaiveDateTime) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parse `+09:00`, `-0530` or `+9` into a [`FixedOffset`].
fn parse_fixed_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'+') => (1, &s[1..]),
        Some(b'-') => (-1, &s[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.is_empty() || digits.len() > 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        1 | 2 => (digits.parse::<i32>().ok()?, 0),
        3 => (digits[..1].parse::<i32>().ok()?, digits[1..].parse::<i32>().ok()?),
        _ => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
    };
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

// ── Week start ──────────────────────────────────────────────────────────────

/// Which day begins a calendar week for the week windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStartDay {
    /// US convention, and the default of most calendar libraries.
    #[default]
    Sunday,
    /// ISO 8601.
    Monday,
}

/// How many days `weekday` is from the week-start day.
fn days_from_week_start(weekday: Weekday, week_start: WeekStartDay) -> i64 {
    match week_start {
        WeekStartDay::Monday => weekday.num_days_from_monday() as i64,
        WeekStartDay::Sunday => weekday.num_days_from_sunday() as i64,
    }
}

// ── Instant ─────────────────────────────────────────────────────────────────

/// A normalized point in time.
///
/// Keeps the offset the caller wrote it with, so the original wall-clock
/// reading survives, but all comparisons go through [`Instant::epoch_seconds`]
/// or an explicit offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instant(DateTime<FixedOffset>);

impl Instant {
    /// The current time, read from the system clock.
    pub fn now() -> Self {
        Instant(Utc::now().fixed_offset())
    }

    /// Parse an ISO 8601 string.
    ///
    /// RFC 3339 strings carry their own offset. A date-time without an offset
    /// is read as wall-clock time in `zone`. A bare date (`2024-02-10`) is
    /// midnight UTC.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidInstant`] if nothing matches.
    pub fn parse(s: &str, zone: &Zone) -> Result<Self> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Instant(dt));
        }
        for pattern in NAIVE_DATETIME_PATTERNS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, pattern) {
                let utc = zone
                    .resolve_local(&naive)
                    .ok_or_else(|| FormatError::InvalidInstant(format!("'{s}': not a valid local time")))?;
                return Ok(Instant(utc.with_timezone(&zone.offset_at(utc))));
            }
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(|date| Instant(date.and_time(NaiveTime::MIN).and_utc().fixed_offset()))
            .map_err(|e| FormatError::InvalidInstant(format!("'{s}': {e}")))
    }

    /// From milliseconds since the Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidInstant`] if the value is out of range.
    pub fn from_epoch_millis(millis: i64) -> Result<Self> {
        DateTime::from_timestamp_millis(millis)
            .map(|dt| Instant(dt.fixed_offset()))
            .ok_or_else(|| FormatError::InvalidInstant(format!("epoch millis {millis} out of range")))
    }

    pub fn utc(&self) -> DateTime<Utc> {
        self.0.with_timezone(&Utc)
    }

    /// The instant as the caller wrote it.
    pub fn as_written(&self) -> DateTime<FixedOffset> {
        self.0
    }

    /// Whole seconds since the Unix epoch, floored.
    pub fn epoch_seconds(&self) -> i64 {
        self.0.timestamp()
    }

    /// The local-time view of this instant at `offset`.
    pub fn in_offset(&self, offset: FixedOffset) -> DateTime<FixedOffset> {
        self.0.with_timezone(&offset)
    }

    /// Whether the UTC rendering of this instant is anything other than
    /// `00:00:00.000`.
    pub fn has_time_of_day(&self) -> bool {
        self.0.naive_utc().time() != NaiveTime::MIN
    }
}

impl<T: TimeZone> From<DateTime<T>> for Instant {
    fn from(dt: DateTime<T>) -> Self {
        Instant(dt.fixed_offset())
    }
}

const NAIVE_DATETIME_PATTERNS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

// ── DateLike ────────────────────────────────────────────────────────────────

/// Anything a caller may hand in as a target or reference instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateLike {
    /// ISO 8601 / RFC 3339 text.
    Iso(String),
    /// Milliseconds since the Unix epoch.
    EpochMillis(i64),
    /// An already normalized value.
    Instant(Instant),
}

impl DateLike {
    /// Normalize into an [`Instant`], reading offset-less text in `zone`.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidInstant`] if the value cannot be parsed.
    pub fn normalize(&self, zone: &Zone) -> Result<Instant> {
        match self {
            DateLike::Iso(s) => Instant::parse(s, zone),
            DateLike::EpochMillis(ms) => Instant::from_epoch_millis(*ms),
            DateLike::Instant(instant) => Ok(*instant),
        }
    }
}

impl From<&str> for DateLike {
    fn from(s: &str) -> Self {
        DateLike::Iso(s.to_string())
    }
}

impl From<String> for DateLike {
    fn from(s: String) -> Self {
        DateLike::Iso(s)
    }
}

impl From<&String> for DateLike {
    fn from(s: &String) -> Self {
        DateLike::Iso(s.clone())
    }
}

impl From<i64> for DateLike {
    fn from(millis: i64) -> Self {
        DateLike::EpochMillis(millis)
    }
}

impl From<Instant> for DateLike {
    fn from(instant: Instant) -> Self {
        DateLike::Instant(instant)
    }
}

impl From<&Instant> for DateLike {
    fn from(instant: &Instant) -> Self {
        DateLike::Instant(*instant)
    }
}

impl<T: TimeZone> From<DateTime<T>> for DateLike {
    fn from(dt: DateTime<T>) -> Self {
        DateLike::Instant(Instant::from(dt))
    }
}

// ── Week windows ────────────────────────────────────────────────────────────

/// An inclusive `[start, end]` range of epoch seconds covering one calendar week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekWindow {
    pub start: i64,
    pub end: i64,
}

impl WeekWindow {
    pub fn contains(&self, epoch_seconds: i64) -> bool {
        self.start <= epoch_seconds && epoch_seconds <= self.end
    }
}

/// The week `weeks_from_now` weeks away from the week containing `today`.
///
/// `end` is one second before the following week's start, so consecutive
/// windows never overlap or leave a gap, DST transitions included.
///
/// # Errors
///
/// Returns [`FormatError::InvalidInstant`] if the week lies outside the
/// representable calendar range.
pub fn week_window(
    today: NaiveDate,
    zone: &Zone,
    week_start: WeekStartDay,
    weeks_from_now: i64,
) -> Result<WeekWindow> {
    let out_of_range =
        || FormatError::InvalidInstant(format!("week {weeks_from_now:+} from {today} is out of range"));

    let this_start = today
        .checked_sub_signed(Duration::days(days_from_week_start(today.weekday(), week_start)))
        .ok_or_else(out_of_range)?;
    let start_date = this_start
        .checked_add_signed(Duration::weeks(weeks_from_now))
        .ok_or_else(out_of_range)?;
    let next_date = start_date
        .checked_add_signed(Duration::weeks(1))
        .ok_or_else(out_of_range)?;

    let start = zone.local_midnight(start_date).ok_or_else(out_of_range)?;
    let next = zone.local_midnight(next_date).ok_or_else(out_of_range)?;

    let window = WeekWindow {
        start: start.timestamp(),
        end: next.timestamp() - 1,
    };
    tracing::trace!(weeks_from_now, start = window.start, end = window.end, "week window");
    Ok(window)
}

// ── Rendering ───────────────────────────────────────────────────────────────

/// Render `dt` through a strftime pattern.
///
/// # Errors
///
/// Returns [`FormatError::InvalidPattern`] if the pattern contains an
/// unknown specifier.
pub fn render(dt: &DateTime<FixedOffset>, pattern: &str) -> Result<String> {
    let mut out = String::new();
    write!(out, "{}", dt.format(pattern))
        .map_err(|_| FormatError::InvalidPattern(format!("'{pattern}'")))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        s.parse::<DateTime<Utc>>().unwrap()
    }

    // ── Zone ────────────────────────────────────────────────────────────

    #[test]
    fn parse_none_and_local() {
        assert_eq!(Zone::parse(None).unwrap(), Zone::Local);
        assert_eq!(Zone::parse(Some("  LOCAL ")).unwrap(), Zone::Local);
        assert_eq!(Zone::parse(Some("")).unwrap(), Zone::Local);
    }

    #[test]
    fn parse_utc_variants() {
        for raw in ["utc", "UTC", "z", "Z"] {
            assert_eq!(Zone::parse(Some(raw)).unwrap(), Zone::Named(chrono_tz::UTC));
        }
    }

    #[test]
    fn parse_named_zone() {
        assert_eq!(
            Zone::parse(Some("Asia/Tokyo")).unwrap(),
            Zone::Named(chrono_tz::Asia::Tokyo)
        );
    }

    #[test]
    fn parse_fixed_offsets() {
        let plus_nine = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(Zone::parse(Some("+09:00")).unwrap(), Zone::Fixed(plus_nine));
        assert_eq!(Zone::parse(Some("+9")).unwrap(), Zone::Fixed(plus_nine));
        let minus = FixedOffset::west_opt(5 * 3600 + 30 * 60).unwrap();
        assert_eq!(Zone::parse(Some("-0530")).unwrap(), Zone::Fixed(minus));
    }

    #[test]
    fn parse_invalid_zone() {
        let err = Zone::parse(Some("Mars/Olympus")).unwrap_err();
        assert!(err.to_string().contains("Mars/Olympus"), "got: {err}");
        assert!(Zone::parse(Some("+25:00")).is_err());
        assert!(Zone::parse(Some("+ab")).is_err());
    }

    #[test]
    fn offset_at_follows_dst() {
        let ny = Zone::Named(chrono_tz::America::New_York);
        assert_eq!(ny.offset_at(utc("2026-01-15T12:00:00Z")).local_minus_utc(), -5 * 3600);
        assert_eq!(ny.offset_at(utc("2026-07-15T12:00:00Z")).local_minus_utc(), -4 * 3600);
    }

    #[test]
    fn local_midnight_in_dst_gap_moves_forward() {
        // Santiago springs forward at local midnight (2024-09-08 00:00 → 01:00).
        let zone = Zone::Named(chrono_tz::America::Santiago);
        let date = NaiveDate::from_ymd_opt(2024, 9, 8).unwrap();
        let start = zone.local_midnight(date).unwrap();
        let local = start.with_timezone(&chrono_tz::America::Santiago);
        assert_eq!(local.date_naive(), date);
        assert_eq!(local.format("%H:%M").to_string(), "01:00");
    }

    // ── Instant ─────────────────────────────────────────────────────────

    #[test]
    fn parse_rfc3339_keeps_offset() {
        let instant = Instant::parse("2024-02-10T09:00:00+09:00", &Zone::Local).unwrap();
        assert_eq!(instant.utc(), utc("2024-02-10T00:00:00Z"));
        assert_eq!(instant.as_written().offset().local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn parse_date_only_is_utc_midnight() {
        let zone = Zone::Named(chrono_tz::Asia::Tokyo);
        let instant = Instant::parse("2024-02-10", &zone).unwrap();
        assert_eq!(instant.utc(), utc("2024-02-10T00:00:00Z"));
        assert!(!instant.has_time_of_day());
    }

    #[test]
    fn parse_naive_datetime_reads_in_zone() {
        let zone = Zone::Named(chrono_tz::Asia::Tokyo);
        let instant = Instant::parse("2024-02-10T09:30:00", &zone).unwrap();
        assert_eq!(instant.utc(), utc("2024-02-10T00:30:00Z"));
    }

    #[test]
    fn parse_garbage_is_invalid_instant() {
        let err = Instant::parse("not-a-date", &Zone::Local).unwrap_err();
        assert!(matches!(err, FormatError::InvalidInstant(_)));
        assert!(err.to_string().contains("not-a-date"), "got: {err}");
    }

    #[test]
    fn epoch_millis_round_down_to_seconds() {
        let instant = Instant::from_epoch_millis(1_707_523_200_999).unwrap();
        assert_eq!(instant.epoch_seconds(), 1_707_523_200);
        assert!(Instant::from_epoch_millis(i64::MAX).is_err());
    }

    #[test]
    fn has_time_of_day_uses_utc_reading() {
        assert!(!Instant::from(utc("2024-02-10T00:00:00Z")).has_time_of_day());
        assert!(Instant::from(utc("2024-02-10T00:00:00.001Z")).has_time_of_day());
        assert!(Instant::from(utc("2024-02-10T21:23:45Z")).has_time_of_day());
    }

    #[test]
    fn datelike_conversions_normalize() {
        let zone = Zone::Named(chrono_tz::UTC);
        let expected = utc("2024-02-10T00:00:00Z");
        assert_eq!(DateLike::from("2024-02-10T00:00:00Z").normalize(&zone).unwrap().utc(), expected);
        assert_eq!(DateLike::from(1_707_523_200_000).normalize(&zone).unwrap().utc(), expected);
        assert_eq!(DateLike::from(expected).normalize(&zone).unwrap().utc(), expected);
    }

    // ── Week windows ────────────────────────────────────────────────────

    #[test]
    fn week_window_sunday_start() {
        // 2024-02-10 is a Saturday; the week runs Sun 02-04 .. Sat 02-10.
        let today = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        let zone = Zone::Named(chrono_tz::UTC);
        let w = week_window(today, &zone, WeekStartDay::Sunday, 0).unwrap();
        assert_eq!(w.start, utc("2024-02-04T00:00:00Z").timestamp());
        assert_eq!(w.end, utc("2024-02-10T23:59:59Z").timestamp());
    }

    #[test]
    fn week_window_monday_start() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        let zone = Zone::Named(chrono_tz::UTC);
        let w = week_window(today, &zone, WeekStartDay::Monday, 0).unwrap();
        assert_eq!(w.start, utc("2024-02-05T00:00:00Z").timestamp());
        assert_eq!(w.end, utc("2024-02-11T23:59:59Z").timestamp());
    }

    #[test]
    fn week_windows_are_contiguous_across_dst() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let zone = Zone::Named(chrono_tz::America::New_York);
        let last = week_window(today, &zone, WeekStartDay::Sunday, -1).unwrap();
        let this = week_window(today, &zone, WeekStartDay::Sunday, 0).unwrap();
        let next = week_window(today, &zone, WeekStartDay::Sunday, 1).unwrap();
        assert_eq!(last.end + 1, this.start);
        assert_eq!(this.end + 1, next.start);
        // The week of 2026-03-08 lost an hour to DST.
        assert_eq!(this.end - this.start + 1, 7 * 86400 - 3600);
    }

    #[test]
    fn window_contains_is_inclusive() {
        let w = WeekWindow { start: 10, end: 20 };
        assert!(w.contains(10));
        assert!(w.contains(20));
        assert!(!w.contains(9));
        assert!(!w.contains(21));
    }

    // ── Rendering ───────────────────────────────────────────────────────

    #[test]
    fn render_patterns() {
        let dt = utc("2024-02-10T21:23:45Z").fixed_offset();
        assert_eq!(render(&dt, "%B %-d, %Y").unwrap(), "February 10, 2024");
        assert_eq!(render(&dt, "%A").unwrap(), "Saturday");
        assert_eq!(render(&dt, "%-I:%M %p").unwrap(), "9:23 PM");
    }

    #[test]
    fn render_invalid_pattern_is_error() {
        let dt = utc("2024-02-10T21:23:45Z").fixed_offset();
        let err = render(&dt, "%Q").unwrap_err();
        assert!(matches!(err, FormatError::InvalidPattern(_)));
    }
}
