//! Coarse elapsed / remaining time phrases ("3 days ago", "in 2 months").
//!
//! Units have fixed sizes: a month is 30 days and a year is 365 days. The
//! drift from real calendar lengths is intentional and observable.

use serde::Serialize;

use crate::adapter::{DateLike, Instant};
use crate::error::Result;
use crate::labels::{fill_template, Labels};
use crate::relative::FormatOptions;

pub const SECS_PER_MINUTE: u64 = 60;
pub const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
pub const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;
pub const SECS_PER_MONTH: u64 = 30 * SECS_PER_DAY;
pub const SECS_PER_YEAR: u64 = 365 * SECS_PER_DAY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Months,
    Years,
}

impl DurationUnit {
    /// Seconds in one unit.
    pub fn size(self) -> u64 {
        match self {
            DurationUnit::Seconds => 1,
            DurationUnit::Minutes => SECS_PER_MINUTE,
            DurationUnit::Hours => SECS_PER_HOUR,
            DurationUnit::Days => SECS_PER_DAY,
            DurationUnit::Months => SECS_PER_MONTH,
            DurationUnit::Years => SECS_PER_YEAR,
        }
    }

    pub fn label(self, labels: &Labels) -> &str {
        match self {
            DurationUnit::Seconds => &labels.seconds,
            DurationUnit::Minutes => &labels.minutes,
            DurationUnit::Hours => &labels.hours,
            DurationUnit::Days => &labels.days,
            DurationUnit::Months => &labels.months,
            DurationUnit::Years => &labels.years,
        }
    }
}

/// Whether the target lies ahead of or behind "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Past,
    Future,
}

/// A bucketed distance between two instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Elapsed {
    pub direction: Direction,
    pub value: u64,
    pub unit: DurationUnit,
}

impl Elapsed {
    /// Bucket the distance from `now` to `target`.
    ///
    /// Both sides are floored to whole epoch seconds before subtracting. A
    /// zero distance counts as past.
    pub fn between(target: &Instant, now: &Instant) -> Self {
        let target_secs = target.epoch_seconds();
        let now_secs = now.epoch_seconds();
        let direction = if now_secs < target_secs {
            Direction::Future
        } else {
            Direction::Past
        };
        let (value, unit) = bucket_seconds(target_secs.abs_diff(now_secs));
        Elapsed {
            direction,
            value,
            unit,
        }
    }

    /// `"<value> <unit>"` inserted into the future or past template.
    pub fn render(&self, labels: &Labels) -> String {
        let words = format!("{} {}", self.value, self.unit.label(labels));
        let template = match self.direction {
            Direction::Future => &labels.future_template,
            Direction::Past => &labels.past_template,
        };
        fill_template(template, &words)
    }
}

/// Pick the unit for a magnitude in seconds and the floored count of it.
pub fn bucket_seconds(magnitude: u64) -> (u64, DurationUnit) {
    let unit = if magnitude < SECS_PER_MINUTE {
        DurationUnit::Seconds
    } else if magnitude < SECS_PER_HOUR {
        DurationUnit::Minutes
    } else if magnitude < SECS_PER_DAY {
        DurationUnit::Hours
    } else if magnitude < SECS_PER_MONTH {
        DurationUnit::Days
    } else if magnitude < SECS_PER_YEAR {
        DurationUnit::Months
    } else {
        DurationUnit::Years
    };
    (magnitude / unit.size(), unit)
}

/// The elapsed-time phrase for `target` relative to "now".
///
/// # Errors
///
/// Returns [`crate::FormatError::InvalidInstant`] if the target or the
/// configured "now" cannot be parsed.
///
/// # Examples
///
/// ```
/// use relative_date::{from_now, FormatOptions};
///
/// let options = FormatOptions::new().with_now("2024-02-10T00:00:00Z");
/// assert_eq!(from_now("2024-02-13T00:00:00Z", &options).unwrap(), "in 3 days");
/// assert_eq!(from_now("2024-02-09T22:00:00Z", &options).unwrap(), "2 hours ago");
/// ```
pub fn from_now(target: impl Into<DateLike>, options: &FormatOptions) -> Result<String> {
    let now = options.resolve_now()?;
    let target = target.into().normalize(&options.zone)?;
    let elapsed = Elapsed::between(&target, &now);
    tracing::debug!(
        direction = ?elapsed.direction,
        value = elapsed.value,
        unit = ?elapsed.unit,
        "bucketed duration"
    );
    Ok(elapsed.render(&options.labels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::Zone;
    use crate::error::FormatError;
    use crate::labels::LabelOverrides;

    const NOW: &str = "2024-02-10T00:00:00Z";

    fn options() -> FormatOptions {
        FormatOptions::new()
            .with_now(NOW)
            .with_zone(Zone::Named(chrono_tz::UTC))
    }

    /// Epoch millis for `NOW` shifted by `secs`.
    fn shifted(secs: i64) -> i64 {
        (1_707_523_200 + secs) * 1000
    }

    #[test]
    fn test_thresholds_past() {
        let cases = [
            (59, "59 seconds ago"),
            (60, "1 minutes ago"),
            (3599, "59 minutes ago"),
            (3600, "1 hours ago"),
            (86399, "23 hours ago"),
            (86400, "1 days ago"),
        ];
        for (secs, want) in cases {
            assert_eq!(from_now(shifted(-secs), &options()).unwrap(), want, "diff {secs}");
        }
    }

    #[test]
    fn test_thresholds_future() {
        assert_eq!(from_now(shifted(59), &options()).unwrap(), "in 59 seconds");
        assert_eq!(from_now(shifted(60), &options()).unwrap(), "in 1 minutes");
        assert_eq!(from_now(shifted(86400 * 3), &options()).unwrap(), "in 3 days");
    }

    #[test]
    fn test_one_second_either_side() {
        assert_eq!(from_now("2024-02-10T00:00:01Z", &options()).unwrap(), "in 1 seconds");
        assert_eq!(from_now("2024-02-09T23:59:59Z", &options()).unwrap(), "1 seconds ago");
    }

    #[test]
    fn test_zero_difference_is_past() {
        assert_eq!(from_now(NOW, &options()).unwrap(), "0 seconds ago");
    }

    #[test]
    fn test_month_and_year_are_fixed_size() {
        // 29 days is still days, 30 days is a "month".
        assert_eq!(bucket_seconds(29 * SECS_PER_DAY), (29, DurationUnit::Days));
        assert_eq!(bucket_seconds(30 * SECS_PER_DAY), (1, DurationUnit::Months));
        // 364 days: 12 months of 30 days.
        assert_eq!(bucket_seconds(364 * SECS_PER_DAY), (12, DurationUnit::Months));
        assert_eq!(bucket_seconds(365 * SECS_PER_DAY), (1, DurationUnit::Years));
        // A leap year is still one 365-day year plus change.
        assert_eq!(bucket_seconds(366 * SECS_PER_DAY), (1, DurationUnit::Years));
    }

    #[test]
    fn test_calendar_month_is_not_a_month() {
        // January has 31 days: one calendar month back crosses the 30-day mark.
        assert_eq!(from_now("2024-01-10T00:00:00Z", &options()).unwrap(), "1 months ago");
        // February 2024 has 29 days: one calendar month back stays in days.
        let march = FormatOptions::new().with_now("2024-03-10T00:00:00Z");
        assert_eq!(from_now("2024-02-10T00:00:00Z", &march).unwrap(), "29 days ago");
    }

    #[test]
    fn test_sub_second_input_is_floored() {
        // 00:00:00.900 floors to the same second as now.
        assert_eq!(from_now("2024-02-10T00:00:00.900Z", &options()).unwrap(), "0 seconds ago");
    }

    #[test]
    fn test_custom_templates_and_units() {
        let labels = Labels::with_overrides(&LabelOverrides {
            future_template: Some("%s後".to_string()),
            past_template: Some("%s前".to_string()),
            days: Some("日".to_string()),
            ..Default::default()
        });
        let options = options().with_labels(labels);
        assert_eq!(from_now(shifted(2 * 86400), &options).unwrap(), "2 日後");
        assert_eq!(from_now(shifted(-2 * 86400), &options).unwrap(), "2 日前");
        // Units that were not overridden keep their defaults.
        assert_eq!(from_now(shifted(-120), &options).unwrap(), "2 minutes前");
    }

    #[test]
    fn test_elapsed_serializes() {
        let elapsed = Elapsed {
            direction: Direction::Future,
            value: 2,
            unit: DurationUnit::Months,
        };
        assert_eq!(
            serde_json::to_string(&elapsed).unwrap(),
            r#"{"direction":"future","value":2,"unit":"months"}"#
        );
    }

    #[test]
    fn test_invalid_input_is_error() {
        let err = from_now("not-a-datetime", &options()).unwrap_err();
        assert!(matches!(err, FormatError::InvalidInstant(_)), "got: {err}");
    }
}
