//! Weekly civil-time trigger.

use super::ScheduleError;
use crate::config::ScheduleSettings;
use crate::utils::{day_key, parse_timezone, BUSINESS_TZ};
use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use chrono_tz::Tz;

/// Fires once per civil day when the wall clock in `tz` reads
/// `weekday hour:minute`.
///
/// The last fired day key lives in memory only: a restart inside the
/// trigger minute can fire again, and a minute missed entirely (process
/// asleep, tick longer than a minute) is not caught up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyTrigger {
    weekday: Weekday,
    hour: u32,
    minute: u32,
    tz: Tz,
    last_run_key: Option<String>,
}

impl Default for WeeklyTrigger {
    /// Monday 08:30 America/New_York.
    fn default() -> Self {
        Self {
            weekday: Weekday::Mon,
            hour: 8,
            minute: 30,
            tz: BUSINESS_TZ,
            last_run_key: None,
        }
    }
}

impl WeeklyTrigger {
    pub fn new(weekday: Weekday, hour: u32, minute: u32, tz: Tz) -> Result<Self, ScheduleError> {
        if hour > 23 || minute > 59 {
            return Err(ScheduleError::InvalidTime { hour, minute });
        }
        Ok(Self {
            weekday,
            hour,
            minute,
            tz,
            last_run_key: None,
        })
    }

    pub fn from_settings(settings: &ScheduleSettings) -> Result<Self, ScheduleError> {
        let weekday = settings
            .weekday
            .trim()
            .parse::<Weekday>()
            .map_err(|_| ScheduleError::InvalidWeekday(settings.weekday.clone()))?;
        let tz = parse_timezone(&settings.timezone).map_err(ScheduleError::InvalidTimezone)?;
        Self::new(weekday, settings.hour, settings.minute, tz)
    }

    /// Day key to run under if the job is due at `now`.
    ///
    /// Nothing is recorded here; call [`mark_ran`](Self::mark_ran) once the
    /// job has succeeded so a failed run is retried on the next tick.
    #[must_use]
    pub fn check(&self, now: DateTime<Utc>) -> Option<String> {
        let local = now.with_timezone(&self.tz);
        if local.weekday() != self.weekday || local.hour() != self.hour || local.minute() != self.minute {
            return None;
        }
        let key = day_key(now, self.tz);
        if self.last_run_key.as_deref() == Some(key.as_str()) {
            tracing::trace!(%key, "already ran today");
            return None;
        }
        Some(key)
    }

    /// Record a successful run for `day_key`.
    pub fn mark_ran(&mut self, day_key: String) {
        self.last_run_key = Some(day_key);
    }

    #[must_use]
    pub fn last_run_key(&self) -> Option<&str> {
        self.last_run_key.as_deref()
    }

    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.tz
    }
}

impl std::fmt::Display for WeeklyTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:02}:{:02} {}", self.weekday, self.hour, self.minute, self.tz.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_fires_monday_0830_eastern_standard_time() {
        let trigger = WeeklyTrigger::default();
        // 2025-11-03 is a Monday; EST is UTC-5
        assert_eq!(trigger.check(utc(2025, 11, 3, 13, 30)).as_deref(), Some("2025-11-03"));
        assert_eq!(trigger.check(utc(2025, 11, 3, 13, 31)), None);
        assert_eq!(trigger.check(utc(2025, 11, 3, 12, 30)), None);
    }

    #[test]
    fn test_wrong_weekday() {
        let trigger = WeeklyTrigger::default();
        assert_eq!(trigger.check(utc(2025, 11, 4, 13, 30)), None);
    }

    #[test]
    fn test_once_per_day_after_mark() {
        let mut trigger = WeeklyTrigger::default();
        let now = utc(2025, 11, 3, 13, 30);
        let key = trigger.check(now).unwrap();
        trigger.mark_ran(key);
        assert_eq!(trigger.check(now), None);
        assert_eq!(trigger.last_run_key(), Some("2025-11-03"));
        // the following Monday fires again
        assert!(trigger.check(utc(2025, 11, 10, 13, 30)).is_some());
    }

    #[test]
    fn test_unmarked_run_is_retried() {
        let trigger = WeeklyTrigger::default();
        let now = utc(2025, 11, 3, 13, 30);
        assert!(trigger.check(now).is_some());
        assert!(trigger.check(now + chrono::Duration::seconds(20)).is_some());
    }

    #[test]
    fn test_invalid_time_rejected() {
        assert!(WeeklyTrigger::new(Weekday::Mon, 24, 0, BUSINESS_TZ).is_err());
        assert!(WeeklyTrigger::new(Weekday::Mon, 8, 60, BUSINESS_TZ).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(WeeklyTrigger::default().to_string(), "Mon 08:30 America/New_York");
    }
}
