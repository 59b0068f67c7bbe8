//! CLI handler for the `schedule` subcommand.

use super::ensure_valid;
use crate::alerts::{build_alert_sinks, AlertSink, AlertStore, SharedAlertStore, SinkOptions};
use crate::config::AppConfig;
use crate::pipeline::exit_codes;
use crate::schedule::{run_schedule_loop, ScheduleConfig};
use crate::sources::build_source;
use anyhow::Result;

/// Run the weekly margin-leak scheduler until interrupted or `max_ticks`.
///
/// With `ndjson` set, alerts stream to stdout (or the report file) as one JSON
/// object per line; otherwise they are logged.
pub fn run_schedule(
    config: &AppConfig,
    max_ticks: Option<u64>,
    ndjson: bool,
    quiet: bool,
) -> Result<i32> {
    ensure_valid(config)?;

    let mut schedule = ScheduleConfig::from_settings(&config.schedule)?;
    schedule.max_ticks = max_ticks;
    schedule.quiet = quiet;

    let source = build_source(&config.source)?;

    let mut sinks = build_alert_sinks(&SinkOptions {
        ndjson,
        output_file: config.report.file.clone(),
        webhook_url: config.alerts.webhook_url.clone(),
        quiet,
    })?;
    let store = SharedAlertStore::new(AlertStore::new(config.alerts.capacity));
    sinks.push(Box::new(store.clone()) as Box<dyn AlertSink>);

    let summary = run_schedule_loop(&schedule, source.as_ref(), &mut sinks)?;

    let retained = store.with(|s| s.len())?;
    if !quiet {
        eprintln!(
            "Scheduler stopped after {} tick(s): {} run(s), {} failure(s), {} alert(s) retained",
            summary.ticks, summary.runs, summary.failures, retained
        );
    }

    if summary.failures > 0 && summary.runs == 0 {
        return Ok(exit_codes::ERROR);
    }
    Ok(exit_codes::SUCCESS)
}
