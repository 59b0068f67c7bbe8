//! Integration tests for the weekly trigger and the schedule loop.

use chrono::{DateTime, TimeZone, Utc, Weekday};
use salesops_dash::alerts::{AlertSink, AlertStore, SharedAlertStore};
use salesops_dash::config::ScheduleSettings;
use salesops_dash::model::{DateRange, InventoryBatch, SupplierCostRecord, Transaction};
use salesops_dash::schedule::{
    parse_duration, run_schedule_loop_with, JobRunner, ScheduleConfig, ScheduleError, WeeklyTrigger,
};
use salesops_dash::sources::{DataSource, FixtureSource, SourceError};
use salesops_dash::utils::BUSINESS_TZ;
use std::cell::Cell;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
}

/// Clock that walks through a fixed list, repeating the last instant.
fn scripted_clock(times: Vec<DateTime<Utc>>) -> impl FnMut() -> DateTime<Utc> {
    let mut index = 0;
    move || {
        let now = times[index.min(times.len() - 1)];
        index += 1;
        now
    }
}

fn fast_config(max_ticks: u64) -> ScheduleConfig {
    ScheduleConfig {
        tick_interval: Duration::from_millis(1),
        max_ticks: Some(max_ticks),
        quiet: true,
        ..ScheduleConfig::default()
    }
}

/// Source whose transaction fetch fails a set number of times.
struct FlakySource {
    inner: FixtureSource,
    failures_left: Cell<u32>,
}

impl DataSource for FlakySource {
    fn name(&self) -> &str {
        "flaky"
    }

    fn transactions(&self, range: Option<&DateRange>) -> Result<Vec<Transaction>, SourceError> {
        if self.failures_left.get() > 0 {
            self.failures_left.set(self.failures_left.get() - 1);
            return Err(SourceError::Network {
                collection: "quotes".to_string(),
                message: "connection reset".to_string(),
            });
        }
        self.inner.transactions(range)
    }

    fn supplier_costs(&self, product_id: Option<&str>) -> Result<Vec<SupplierCostRecord>, SourceError> {
        self.inner.supplier_costs(product_id)
    }

    fn inventory(&self) -> Result<Vec<InventoryBatch>, SourceError> {
        self.inner.inventory()
    }
}

// ============================================================================
// Weekly trigger
// ============================================================================

#[test]
fn test_trigger_fires_in_winter() {
    // 13:30 UTC is 08:30 EST
    let trigger = WeeklyTrigger::default();
    assert_eq!(trigger.check(utc(2025, 11, 3, 13, 30, 5)).as_deref(), Some("2025-11-03"));
    assert!(trigger.check(utc(2025, 11, 3, 12, 30, 5)).is_none());
}

#[test]
fn test_trigger_follows_daylight_saving() {
    // 12:30 UTC is 08:30 EDT
    let trigger = WeeklyTrigger::default();
    assert_eq!(trigger.check(utc(2025, 7, 14, 12, 30, 0)).as_deref(), Some("2025-07-14"));
    assert!(trigger.check(utc(2025, 7, 14, 13, 30, 0)).is_none());
}

#[test]
fn test_trigger_ignores_other_weekdays() {
    let trigger = WeeklyTrigger::default();
    // Tuesday 08:30 EST
    assert!(trigger.check(utc(2025, 11, 4, 13, 30, 0)).is_none());
}

#[test]
fn test_trigger_once_per_day() {
    let mut trigger = WeeklyTrigger::default();
    let key = trigger.check(utc(2025, 11, 3, 13, 30, 0)).unwrap();
    trigger.mark_ran(key);
    assert!(trigger.check(utc(2025, 11, 3, 13, 30, 40)).is_none());
    // the following Monday fires again
    assert!(trigger.check(utc(2025, 11, 10, 13, 30, 0)).is_some());
}

#[test]
fn test_trigger_from_settings() {
    let settings = ScheduleSettings {
        weekday: "friday".to_string(),
        hour: 17,
        minute: 0,
        timezone: "Europe/London".to_string(),
        ..ScheduleSettings::default()
    };
    let trigger = WeeklyTrigger::from_settings(&settings).unwrap();
    assert_eq!(trigger.timezone(), chrono_tz::Europe::London);
    assert!(trigger.check(utc(2025, 1, 10, 17, 0, 0)).is_some());
    assert_eq!(trigger.to_string(), "Fri 17:00 Europe/London");
}

#[test]
fn test_trigger_rejects_bad_settings() {
    let bad_day = ScheduleSettings {
        weekday: "someday".to_string(),
        ..ScheduleSettings::default()
    };
    assert!(matches!(
        WeeklyTrigger::from_settings(&bad_day),
        Err(ScheduleError::InvalidWeekday(_))
    ));
    assert!(matches!(
        WeeklyTrigger::new(Weekday::Mon, 24, 0, BUSINESS_TZ),
        Err(ScheduleError::InvalidTime { .. })
    ));
}

#[test]
fn test_parse_duration_rejects_garbage() {
    assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
    assert!(parse_duration("").is_err());
    assert!(parse_duration("10x").is_err());
    assert!(parse_duration("fast").is_err());
}

// ============================================================================
// Schedule loop
// ============================================================================

#[test]
fn test_loop_runs_once_inside_trigger_minute() {
    let store = SharedAlertStore::new(AlertStore::default());
    let mut sinks: Vec<Box<dyn AlertSink>> = vec![Box::new(store.clone())];
    let clock = scripted_clock(vec![
        utc(2025, 11, 3, 13, 29, 30),
        utc(2025, 11, 3, 13, 30, 0),
        utc(2025, 11, 3, 13, 30, 30),
        utc(2025, 11, 3, 13, 31, 0),
    ]);
    let stop = AtomicBool::new(false);

    let summary =
        run_schedule_loop_with(&fast_config(4), &FixtureSource::sample(), &mut sinks, &stop, clock)
            .unwrap();

    assert_eq!(summary.ticks, 4);
    assert_eq!(summary.runs, 1);
    assert_eq!(summary.failures, 0);
    assert_eq!(summary.last_report.unwrap().total_flagged, 3);
    // one margin-leak and one stockout alert from the single run
    assert_eq!(store.snapshot().unwrap().len(), 2);
}

#[test]
fn test_run_on_start_inside_trigger_minute_counts_as_weekly_run() {
    let store = SharedAlertStore::new(AlertStore::default());
    let mut sinks: Vec<Box<dyn AlertSink>> = vec![Box::new(store.clone())];
    let config = ScheduleConfig {
        run_on_start: true,
        ..fast_config(1)
    };
    let stop = AtomicBool::new(false);
    let monday = utc(2025, 11, 3, 13, 30, 0);

    let summary =
        run_schedule_loop_with(&config, &FixtureSource::sample(), &mut sinks, &stop, || monday)
            .unwrap();

    assert_eq!(summary.ticks, 1);
    assert_eq!(summary.runs, 1);
    assert_eq!(store.snapshot().unwrap().len(), 2);
}

#[test]
fn test_failed_run_retries_next_tick() {
    let source = FlakySource {
        inner: FixtureSource::sample(),
        failures_left: Cell::new(1),
    };
    let mut sinks: Vec<Box<dyn AlertSink>> = Vec::new();
    let clock = scripted_clock(vec![utc(2025, 11, 3, 13, 30, 0), utc(2025, 11, 3, 13, 30, 20)]);
    let stop = AtomicBool::new(false);

    let summary = run_schedule_loop_with(&fast_config(2), &source, &mut sinks, &stop, clock).unwrap();

    assert_eq!(summary.failures, 1);
    assert_eq!(summary.runs, 1);
}

#[test]
fn test_run_on_start_runs_outside_window() {
    let mut sinks: Vec<Box<dyn AlertSink>> = Vec::new();
    let config = ScheduleConfig {
        run_on_start: true,
        ..fast_config(1)
    };
    let stop = AtomicBool::new(false);
    let clock = scripted_clock(vec![utc(2025, 11, 5, 0, 0, 0)]);

    let summary =
        run_schedule_loop_with(&config, &FixtureSource::sample(), &mut sinks, &stop, clock).unwrap();
    assert_eq!(summary.runs, 1);
    assert_eq!(summary.ticks, 1);
}

#[test]
fn test_stop_flag_ends_loop_before_first_tick() {
    let mut sinks: Vec<Box<dyn AlertSink>> = Vec::new();
    let stop = AtomicBool::new(true);
    let summary = run_schedule_loop_with(
        &fast_config(100),
        &FixtureSource::sample(),
        &mut sinks,
        &stop,
        Utc::now,
    )
    .unwrap();
    assert_eq!(summary.ticks, 0);
    assert_eq!(summary.runs, 0);
}

// ============================================================================
// Single-flight guard
// ============================================================================

#[test]
fn test_job_runner_rejects_overlap() {
    let runner = JobRunner::new();
    let inner = runner.run(|| Ok(runner.run(|| Ok(()))));
    assert!(matches!(inner, Ok(Err(ScheduleError::JobInProgress))));
    // the guard is released afterwards
    assert!(runner.run(|| Ok(())).is_ok());
}
