//! Scheduler configuration and duration parsing.

use super::{ScheduleError, WeeklyTrigger};
use crate::config::ScheduleSettings;
use std::time::Duration;

/// Runtime configuration for the schedule loop.
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    /// When the weekly job is due
    pub trigger: WeeklyTrigger,
    /// Sleep between trigger checks
    pub tick_interval: Duration,
    /// Run the job once before the first tick
    pub run_on_start: bool,
    /// Stop after this many ticks (None = run until interrupted)
    pub max_ticks: Option<u64>,
    /// Suppress non-essential output
    pub quiet: bool,
}

impl ScheduleConfig {
    /// Resolve file/CLI settings into a runnable configuration.
    pub fn from_settings(settings: &ScheduleSettings) -> Result<Self, ScheduleError> {
        Ok(Self {
            trigger: WeeklyTrigger::from_settings(settings)?,
            tick_interval: parse_duration(&settings.tick_interval)?,
            run_on_start: settings.run_on_start,
            max_ticks: None,
            quiet: false,
        })
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            trigger: WeeklyTrigger::default(),
            tick_interval: Duration::from_secs(60),
            run_on_start: false,
            max_ticks: None,
            quiet: false,
        }
    }
}

/// Parse a human-readable duration string into a [`Duration`].
///
/// Supported suffixes: `ms` (milliseconds), `s` (seconds), `m` (minutes),
/// `h` (hours), `d` (days).
///
/// # Examples
///
/// ```
/// use salesops_dash::schedule::parse_duration;
/// use std::time::Duration;
///
/// assert_eq!(parse_duration("30s").unwrap(), Duration::from_secs(30));
/// assert_eq!(parse_duration("5m").unwrap(), Duration::from_secs(300));
/// ```
pub fn parse_duration(s: &str) -> Result<Duration, ScheduleError> {
    let s = s.trim();
    let invalid = || ScheduleError::InvalidInterval(s.to_string());
    if s.is_empty() {
        return Err(invalid());
    }

    let (num_str, unit) = if let Some(stripped) = s.strip_suffix("ms") {
        (stripped, "ms")
    } else if s.ends_with(['s', 'm', 'h', 'd']) {
        s.split_at(s.len() - 1)
    } else {
        return Err(invalid());
    };

    let value: u64 = num_str.parse().map_err(|_| invalid())?;

    let secs = |mult: u64| value.checked_mul(mult).map(Duration::from_secs).ok_or_else(invalid);
    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => Ok(Duration::from_secs(value)),
        "m" => secs(60),
        "h" => secs(3600),
        "d" => secs(86_400),
        _ => Err(invalid()),
    }
}
