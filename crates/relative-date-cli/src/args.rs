//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use relative_date::{DateLike, WeekStartDay};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub(crate) enum WeekStartArg {
    /// Weeks run Sunday to Saturday (default)
    #[default]
    Sunday,
    /// Weeks run Monday to Sunday (ISO 8601)
    Monday,
}

impl From<WeekStartArg> for WeekStartDay {
    fn from(arg: WeekStartArg) -> Self {
        match arg {
            WeekStartArg::Sunday => WeekStartDay::Sunday,
            WeekStartArg::Monday => WeekStartDay::Monday,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "relday", version, about = "Relative date labels and elapsed-time phrases")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,

    /// Reference "now" (RFC 3339, YYYY-MM-DD or epoch milliseconds) [default: system clock]
    #[arg(long, global = true)]
    pub(crate) now: Option<String>,

    /// Timezone: "local", "utc", an IANA name or a fixed offset like +09:00
    #[arg(long, global = true)]
    pub(crate) tz: Option<String>,

    /// First day of the week
    #[arg(long, global = true, value_enum, default_value = "sunday")]
    pub(crate) week_start: WeekStartArg,

    /// JSON file with label overrides, e.g. {"today": "Heute"}
    #[arg(long, global = true)]
    pub(crate) labels: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Relative label: "Today", "Last Sunday", "February 18, 2024"
    Relative {
        /// Target instant (RFC 3339, YYYY-MM-DD or epoch milliseconds)
        #[arg(allow_negative_numbers = true)]
        target: String,
    },
    /// Elapsed-time phrase: "3 days ago", "in 2 months"
    FromNow {
        /// Target instant (RFC 3339, YYYY-MM-DD or epoch milliseconds)
        #[arg(allow_negative_numbers = true)]
        target: String,
    },
    /// Relative label with time of day: "Tomorrow 6:23 AM"
    Schedule {
        /// Target instant (RFC 3339, YYYY-MM-DD or epoch milliseconds)
        #[arg(allow_negative_numbers = true)]
        target: String,
    },
    /// Everything above as one JSON object
    Classify {
        /// Target instant (RFC 3339, YYYY-MM-DD or epoch milliseconds)
        #[arg(allow_negative_numbers = true)]
        target: String,
    },
}

impl Command {
    pub(crate) fn target(&self) -> &str {
        match self {
            Command::Relative { target }
            | Command::FromNow { target }
            | Command::Schedule { target }
            | Command::Classify { target } => target,
        }
    }
}

/// Integers are epoch milliseconds, anything else is ISO 8601 text.
pub(crate) fn parse_date_like(raw: &str) -> DateLike {
    let trimmed = raw.trim();
    match trimmed.parse::<i64>() {
        Ok(millis) => DateLike::EpochMillis(millis),
        Err(_) => DateLike::Iso(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn integers_are_epoch_millis() {
        assert_eq!(parse_date_like("1707523200000"), DateLike::EpochMillis(1_707_523_200_000));
        assert_eq!(parse_date_like("-1000"), DateLike::EpochMillis(-1000));
    }

    #[test]
    fn text_is_iso() {
        assert_eq!(
            parse_date_like(" 2024-02-10 "),
            DateLike::Iso("2024-02-10".to_string())
        );
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["relday", "relative", "2024-02-10", "--tz", "UTC"]);
        assert_eq!(cli.tz.as_deref(), Some("UTC"));
        assert_eq!(cli.command.target(), "2024-02-10");
        assert!(matches!(cli.week_start, WeekStartArg::Sunday));
    }
}
