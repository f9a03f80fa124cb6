//! Relative labels with a time-of-day suffix ("Tomorrow 6:23 AM").

use crate::adapter::{self, DateLike};
use crate::error::Result;
use crate::relative::{classify_at, FormatOptions};

/// The relative label for `target`, followed by its local time when the
/// target is more precise than a date.
///
/// A target counts as date-only when its UTC reading is exactly midnight.
/// Such targets get no time suffix, even where a host formatter plugged in
/// through [`crate::hook`] would print the local wall-clock time.
/// "Now" is taken afresh on every call unless [`FormatOptions::now`] pins it;
/// pass the same pinned instant to [`crate::relative_date`] when both calls
/// must agree.
///
/// # Errors
///
/// Returns [`crate::FormatError::InvalidInstant`] for unparsable input and
/// [`crate::FormatError::InvalidPattern`] for unrenderable label patterns.
///
/// # Examples
///
/// ```
/// use relative_date::{schedule, FormatOptions, Zone};
///
/// let options = FormatOptions::new()
///     .with_now("2024-02-10T00:00:00Z")
///     .with_zone(Zone::parse(Some("Asia/Tokyo")).unwrap());
/// assert_eq!(schedule("2024-02-10T21:23:45Z", &options).unwrap(), "Tomorrow 6:23 AM");
/// ```
pub fn schedule(target: impl Into<DateLike>, options: &FormatOptions) -> Result<String> {
    let now = options.resolve_now()?;
    let target = target.into().normalize(&options.zone)?;
    let classification = classify_at(&target, &now, &options.zone, options.week_start)?;
    let label = classification.render(&options.labels)?;

    if !target.has_time_of_day() {
        return Ok(label);
    }
    let time = adapter::render(&classification.local, &options.labels.time_pattern)?;
    tracing::debug!(bucket = ?classification.bucket, %time, "scheduled label");
    Ok(format!("{label} {time}"))
}
