//! Main schedule loop.

use super::job::{run_margin_leak_job, JobRunner};
use super::ScheduleConfig;
use crate::alerts::AlertSink;
use crate::metrics::MarginLeakReport;
use crate::sources::DataSource;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Longest single sleep, so an interrupt is noticed promptly.
const SLEEP_SLICE: Duration = Duration::from_millis(250);

/// What happened during one scheduler session.
#[derive(Debug, Default)]
pub struct ScheduleSummary {
    pub ticks: u64,
    pub runs: u64,
    pub failures: u64,
    pub last_report: Option<MarginLeakReport>,
}

/// Run the weekly trigger loop until interrupted (Ctrl-C) or `max_ticks`.
pub fn run_schedule_loop(
    config: &ScheduleConfig,
    source: &dyn DataSource,
    sinks: &mut [Box<dyn AlertSink>],
) -> anyhow::Result<ScheduleSummary> {
    // Graceful shutdown flag
    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop_flag = Arc::clone(&stop);
        ctrlc::set_handler(move || {
            stop_flag.store(true, Ordering::Relaxed);
        })
        .ok(); // Non-fatal if handler cannot be installed
    }

    run_schedule_loop_with(config, source, sinks, &stop, Utc::now)
}

/// Loop body with an injectable clock and stop flag.
pub fn run_schedule_loop_with<C>(
    config: &ScheduleConfig,
    source: &dyn DataSource,
    sinks: &mut [Box<dyn AlertSink>],
    stop: &AtomicBool,
    mut clock: C,
) -> anyhow::Result<ScheduleSummary>
where
    C: FnMut() -> DateTime<Utc>,
{
    let runner = JobRunner::new();
    let mut trigger = config.trigger.clone();
    let mut summary = ScheduleSummary::default();
    let started = Instant::now();

    if !config.quiet {
        eprintln!(
            "Scheduler started: margin-leak job every {trigger}, checking every {:?}",
            config.tick_interval
        );
    }
    tracing::info!(source = source.name(), trigger = %trigger, "scheduler started");

    if config.run_on_start {
        let now = clock();
        let due = trigger.check(now);
        // A start run inside the trigger minute counts as that day's run
        if attempt(&runner, source, sinks, now, &mut summary) {
            if let Some(key) = due {
                trigger.mark_ran(key);
            }
        }
    }

    loop {
        if stop.load(Ordering::Relaxed) {
            if !config.quiet {
                eprintln!("Shutting down gracefully...");
            }
            break;
        }
        if config.max_ticks.is_some_and(|max| summary.ticks >= max) {
            break;
        }

        summary.ticks += 1;
        let now = clock();
        if let Some(key) = trigger.check(now) {
            tracing::debug!(%key, "trigger due");
            if attempt(&runner, source, sinks, now, &mut summary) {
                trigger.mark_ran(key);
            }
        }

        if config.max_ticks.is_some_and(|max| summary.ticks >= max) {
            break;
        }
        sleep_unless_stopped(config.tick_interval, stop);
    }

    tracing::info!(
        ticks = summary.ticks,
        runs = summary.runs,
        failures = summary.failures,
        uptime_secs = started.elapsed().as_secs(),
        "scheduler stopped"
    );
    Ok(summary)
}

/// Run the job once; `true` when it succeeded.
fn attempt(
    runner: &JobRunner,
    source: &dyn DataSource,
    sinks: &mut [Box<dyn AlertSink>],
    now: DateTime<Utc>,
    summary: &mut ScheduleSummary,
) -> bool {
    match runner.run(|| run_margin_leak_job(source, sinks, now)) {
        Ok(report) => {
            summary.runs += 1;
            summary.last_report = Some(report);
            true
        }
        Err(e) => {
            summary.failures += 1;
            tracing::warn!("Margin leak job failed: {e}");
            false
        }
    }
}

fn sleep_unless_stopped(total: Duration, stop: &AtomicBool) {
    let deadline = Instant::now() + total;
    loop {
        let now = Instant::now();
        if now >= deadline || stop.load(Ordering::Relaxed) {
            return;
        }
        std::thread::sleep((deadline - now).min(SLEEP_SLICE));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::FixtureSource;
    use chrono::TimeZone;

    fn quick_config(max_ticks: u64) -> ScheduleConfig {
        ScheduleConfig {
            tick_interval: Duration::from_millis(1),
            max_ticks: Some(max_ticks),
            quiet: true,
            ..ScheduleConfig::default()
        }
    }

    #[test]
    fn test_max_ticks_without_trigger() {
        let stop = AtomicBool::new(false);
        let tuesday = Utc.with_ymd_and_hms(2025, 11, 4, 13, 30, 0).unwrap();
        let summary = run_schedule_loop_with(
            &quick_config(3),
            &FixtureSource::sample(),
            &mut [],
            &stop,
            || tuesday,
        )
        .unwrap();
        assert_eq!(summary.ticks, 3);
        assert_eq!(summary.runs, 0);
    }

    #[test]
    fn test_start_run_in_trigger_minute_marks_day() {
        let stop = AtomicBool::new(false);
        let monday = Utc.with_ymd_and_hms(2025, 11, 3, 13, 30, 0).unwrap();
        let config = ScheduleConfig {
            run_on_start: true,
            ..quick_config(1)
        };
        let summary =
            run_schedule_loop_with(&config, &FixtureSource::sample(), &mut [], &stop, || monday)
                .unwrap();
        assert_eq!(summary.ticks, 1);
        assert_eq!(summary.runs, 1);
    }

    #[test]
    fn test_stop_flag_exits_immediately() {
        let stop = AtomicBool::new(true);
        let summary = run_schedule_loop_with(
            &quick_config(100),
            &FixtureSource::sample(),
            &mut [],
            &stop,
            Utc::now,
        )
        .unwrap();
        assert_eq!(summary.ticks, 0);
    }
}
