//! Relative date classification.
//!
//! Places a target instant into exactly one of seven buckets relative to a
//! reference "now": yesterday, today, tomorrow, last week, this week, next
//! week, or the absolute fallback. The caller may pin "now" through
//! [`FormatOptions::now`]; otherwise the system clock is read once per call.
//!
//! # Algorithm
//!
//! 1. View now and target in the zone, each at the UTC offset the zone
//!    observes at that instant.
//! 2. Compare local calendar days: same day, the day before and the day after
//!    map to today, yesterday and tomorrow.
//! 3. Otherwise test the target's epoch second against the last, this and
//!    next week windows (closed on both ends).
//! 4. Anything else falls back to the absolute date.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::adapter::{self, week_window, DateLike, Instant, WeekStartDay, Zone};
use crate::error::Result;
use crate::labels::Labels;

// ── Options ─────────────────────────────────────────────────────────────────

/// Per-call options shared by every formatter.
#[derive(Debug, Clone, Default)]
pub struct FormatOptions {
    /// The reference instant. `None` reads the system clock when the call starts.
    pub now: Option<DateLike>,
    pub labels: Labels,
    /// Zone for local calendar views. Defaults to the host zone.
    pub zone: Zone,
    pub week_start: WeekStartDay,
}

impl FormatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_now(mut self, now: impl Into<DateLike>) -> Self {
        self.now = Some(now.into());
        self
    }

    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.zone = zone;
        self
    }

    pub fn with_week_start(mut self, week_start: WeekStartDay) -> Self {
        self.week_start = week_start;
        self
    }

    /// Snapshot "now" for a single call.
    pub(crate) fn resolve_now(&self) -> Result<Instant> {
        match &self.now {
            Some(now) => now.normalize(&self.zone),
            None => Ok(Instant::now()),
        }
    }
}

// ── Buckets ─────────────────────────────────────────────────────────────────

/// Where a target lands relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Bucket {
    Yesterday,
    Today,
    Tomorrow,
    LastWeek,
    ThisWeek,
    NextWeek,
    /// Outside all three week windows, past or future.
    Absolute,
}

/// The outcome of [`classify_at`]: the bucket plus the target's local view,
/// which is what every label is rendered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub bucket: Bucket,
    /// The target at the offset the zone observes at the target.
    pub local: DateTime<FixedOffset>,
}

impl Classification {
    /// Render the bucket through `labels`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FormatError::InvalidPattern`] if the week-name or
    /// absolute-date pattern cannot be rendered.
    pub fn render(&self, labels: &Labels) -> Result<String> {
        match self.bucket {
            Bucket::Today => Ok(labels.today.clone()),
            Bucket::Yesterday => Ok(labels.yesterday.clone()),
            Bucket::Tomorrow => Ok(labels.tomorrow.clone()),
            Bucket::LastWeek => Ok(format!(
                "{} {}",
                labels.last,
                adapter::render(&self.local, &labels.week_name_pattern)?
            )),
            Bucket::ThisWeek => adapter::render(&self.local, &labels.week_name_pattern),
            Bucket::NextWeek => Ok(format!(
                "{} {}",
                labels.next,
                adapter::render(&self.local, &labels.week_name_pattern)?
            )),
            Bucket::Absolute => adapter::render(&self.local, &labels.absolute_date_pattern),
        }
    }
}

// ── classify ────────────────────────────────────────────────────────────────

/// Classify `target` against `now` in `zone`.
///
/// Pure: the result depends only on the arguments.
///
/// # Errors
///
/// Returns [`crate::FormatError::InvalidInstant`] if a week window falls
/// outside the representable calendar range.
pub fn classify_at(
    target: &Instant,
    now: &Instant,
    zone: &Zone,
    week_start: WeekStartDay,
) -> Result<Classification> {
    let today = now.in_offset(zone.offset_at(now.utc())).date_naive();
    let local = target.in_offset(zone.offset_at(target.utc()));
    let target_day = local.date_naive();

    let day_bucket = if target_day == today {
        Some(Bucket::Today)
    } else if today.pred_opt() == Some(target_day) {
        Some(Bucket::Yesterday)
    } else if today.succ_opt() == Some(target_day) {
        Some(Bucket::Tomorrow)
    } else {
        None
    };
    if let Some(bucket) = day_bucket {
        return Ok(Classification { bucket, local });
    }

    let ordinal = target.epoch_seconds();
    for (bucket, weeks) in [
        (Bucket::LastWeek, -1),
        (Bucket::ThisWeek, 0),
        (Bucket::NextWeek, 1),
    ] {
        if week_window(today, zone, week_start, weeks)?.contains(ordinal) {
            return Ok(Classification { bucket, local });
        }
    }

    Ok(Classification {
        bucket: Bucket::Absolute,
        local,
    })
}

/// Normalize `target` and classify it with `options`.
///
/// # Errors
///
/// Returns [`crate::FormatError::InvalidInstant`] if the target or the
/// configured "now" cannot be parsed.
pub fn classify(target: impl Into<DateLike>, options: &FormatOptions) -> Result<Classification> {
    let now = options.resolve_now()?;
    let target = target.into().normalize(&options.zone)?;
    let classification = classify_at(&target, &now, &options.zone, options.week_start)?;
    tracing::debug!(
        target_utc = %target.utc(),
        now_utc = %now.utc(),
        bucket = ?classification.bucket,
        "classified relative date"
    );
    Ok(classification)
}

/// The relative label for `target`: "Today", "Last Sunday",
/// "February 18, 2024", ...
///
/// # Errors
///
/// Returns [`crate::FormatError::InvalidInstant`] for unparsable input and
/// [`crate::FormatError::InvalidPattern`] for unrenderable label patterns.
///
/// # Examples
///
/// ```
/// use relative_date::{relative_date, FormatOptions, Zone};
///
/// let options = FormatOptions::new()
///     .with_now("2024-02-10T00:00:00Z")
///     .with_zone(Zone::parse(Some("UTC")).unwrap());
/// assert_eq!(relative_date("2024-01-28", &options).unwrap(), "Last Sunday");
/// assert_eq!(relative_date("2024-02-12", &options).unwrap(), "Next Monday");
/// ```
pub fn relative_date(target: impl Into<DateLike>, options: &FormatOptions) -> Result<String> {
    classify(target, options)?.render(&options.labels)
}
