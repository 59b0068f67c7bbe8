//! CLI handler for the `leaks` subcommand.

use super::ensure_valid;
use crate::alerts::{build_alert_sinks, SinkOptions};
use crate::config::AppConfig;
use crate::pipeline::{exit_codes, write_output, OutputTarget};
use crate::schedule::{run_margin_leak_job, JobRunner};
use crate::sources::build_source;
use anyhow::{Context, Result};
use chrono::Utc;

/// Run the margin-leak job once, print the report and notify sinks.
///
/// Returns [`exit_codes::LEAKS_DETECTED`] when leaks were found and
/// `fail_on_leak` is set.
pub fn run_leaks(config: &AppConfig, fail_on_leak: bool, quiet: bool) -> Result<i32> {
    ensure_valid(config)?;

    let source = build_source(&config.source)?;
    let mut sinks = build_alert_sinks(&SinkOptions {
        ndjson: false,
        output_file: None,
        webhook_url: config.alerts.webhook_url.clone(),
        quiet,
    })?;

    let runner = JobRunner::new();
    let report = runner.run(|| run_margin_leak_job(source.as_ref(), &mut sinks, Utc::now()))?;

    let json = serde_json::to_string_pretty(&report).context("failed to serialize leak report")?;
    let target = OutputTarget::from_option(config.report.file.clone());
    write_output(&json, &target, quiet)?;

    if fail_on_leak && report.has_leaks() {
        return Ok(exit_codes::LEAKS_DETECTED);
    }
    Ok(exit_codes::SUCCESS)
}
