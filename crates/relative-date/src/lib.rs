//! # relative-date
//!
//! Human-friendly relative dates for calendar libraries.
//!
//! Turns an instant into a relative label ("Today", "Last Monday",
//! "February 18, 2024") or a coarse elapsed-time phrase ("3 days ago",
//! "in 2 months"). All functions take an explicit "now" and zone through
//! [`FormatOptions`]; the system clock and host zone are only the defaults.
//!
//! ## Modules
//!
//! - [`adapter`] — parsing, zones, week windows and pattern rendering over chrono
//! - [`labels`] — default label set and per-key overrides
//! - [`relative`] — bucket classification and the relative label
//! - [`duration`] — fixed-size elapsed-time buckets
//! - [`schedule`] — relative label plus time of day
//! - [`hook`] — handler table for a host library's pattern tokens
//! - [`error`] — Error types

pub mod adapter;
pub mod duration;
pub mod error;
pub mod hook;
pub mod labels;
pub mod relative;
pub mod schedule;

pub use adapter::{render, week_window, DateLike, Instant, WeekStartDay, WeekWindow, Zone};
pub use duration::{bucket_seconds, from_now, Direction, DurationUnit, Elapsed};
pub use error::{FormatError, Result};
pub use hook::{
    relative, relative_with, schedule_with, Handler, Handlers, RELATIVE_TOKEN, SCHEDULE_TOKEN,
};
pub use labels::{fill_template, LabelOverrides, Labels};
pub use relative::{classify, classify_at, relative_date, Bucket, Classification, FormatOptions};
pub use schedule::schedule;
