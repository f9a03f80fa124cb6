//! Label templates for every bucket and duration unit.
//!
//! [`Labels`] is always complete. Partial localization goes through
//! [`LabelOverrides`], whose present keys replace the defaults one by one.

use serde::{Deserialize, Serialize};

use crate::error::{FormatError, Result};

/// Placeholder replaced by the `"<value> <unit>"` phrase in the
/// future/past templates.
pub const PLACEHOLDER: &str = "%s";

/// A complete label set.
///
/// Patterns (`week_name_pattern`, `absolute_date_pattern`, `time_pattern`)
/// are strftime patterns rendered by [`crate::adapter::render`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Labels {
    pub yesterday: String,
    pub today: String,
    pub tomorrow: String,
    /// Prefix for targets in next week, e.g. "Next" in "Next Monday".
    pub next: String,
    /// Prefix for targets in last week.
    pub last: String,
    pub week_name_pattern: String,
    /// Used for targets outside the three week windows.
    pub absolute_date_pattern: String,
    /// Time-of-day suffix used by the schedule formatter.
    pub time_pattern: String,
    pub future_template: String,
    pub past_template: String,
    pub seconds: String,
    pub minutes: String,
    pub hours: String,
    pub days: String,
    pub months: String,
    pub years: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            yesterday: "Yesterday".to_string(),
            today: "Today".to_string(),
            tomorrow: "Tomorrow".to_string(),
            next: "Next".to_string(),
            last: "Last".to_string(),
            week_name_pattern: "%A".to_string(),
            absolute_date_pattern: "%B %-d, %Y".to_string(),
            time_pattern: "%-I:%M %p".to_string(),
            future_template: "in %s".to_string(),
            past_template: "%s ago".to_string(),
            seconds: "seconds".to_string(),
            minutes: "minutes".to_string(),
            hours: "hours".to_string(),
            days: "days".to_string(),
            months: "months".to_string(),
            years: "years".to_string(),
        }
    }
}

/// A partial label set. Absent keys keep their default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct LabelOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yesterday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub today: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tomorrow: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
    #[serde(default, alias = "week", skip_serializing_if = "Option::is_none")]
    pub week_name_pattern: Option<String>,
    #[serde(default, alias = "others", skip_serializing_if = "Option::is_none")]
    pub absolute_date_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_pattern: Option<String>,
    #[serde(default, alias = "future", skip_serializing_if = "Option::is_none")]
    pub future_template: Option<String>,
    #[serde(default, alias = "past", skip_serializing_if = "Option::is_none")]
    pub past_template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub months: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years: Option<String>,
}

impl LabelOverrides {
    /// Parse overrides from a flat JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidLabels`] for malformed JSON, non-string
    /// values or unknown keys.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| FormatError::InvalidLabels(e.to_string()))
    }
}

impl Labels {
    /// Defaults with `overrides` applied key by key.
    pub fn with_overrides(overrides: &LabelOverrides) -> Self {
        Self::default().merge(overrides)
    }

    /// Replace each key present in `overrides`, keep the rest.
    pub fn merge(self, overrides: &LabelOverrides) -> Self {
        let pick = |value: &Option<String>, current: String| value.clone().unwrap_or(current);
        Self {
            yesterday: pick(&overrides.yesterday, self.yesterday),
            today: pick(&overrides.today, self.today),
            tomorrow: pick(&overrides.tomorrow, self.tomorrow),
            next: pick(&overrides.next, self.next),
            last: pick(&overrides.last, self.last),
            week_name_pattern: pick(&overrides.week_name_pattern, self.week_name_pattern),
            absolute_date_pattern: pick(&overrides.absolute_date_pattern, self.absolute_date_pattern),
            time_pattern: pick(&overrides.time_pattern, self.time_pattern),
            future_template: pick(&overrides.future_template, self.future_template),
            past_template: pick(&overrides.past_template, self.past_template),
            seconds: pick(&overrides.seconds, self.seconds),
            minutes: pick(&overrides.minutes, self.minutes),
            hours: pick(&overrides.hours, self.hours),
            days: pick(&overrides.days, self.days),
            months: pick(&overrides.months, self.months),
            years: pick(&overrides.years, self.years),
        }
    }
}

/// Insert `value` at the first [`PLACEHOLDER`] of `template`.
///
/// A template without a placeholder is returned as is.
pub fn fill_template(template: &str, value: &str) -> String {
    template.replacen(PLACEHOLDER, value, 1)
}
