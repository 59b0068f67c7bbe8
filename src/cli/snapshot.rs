//! CLI handler for the `snapshot` subcommand.

use super::ensure_valid;
use crate::config::AppConfig;
use crate::model::DateRange;
use crate::pipeline::{build_dashboard, exit_codes, output_dashboard};
use crate::sources::build_source;
use anyhow::Result;
use chrono::Utc;

/// Fetch, compose and render one dashboard.
///
/// Returns the process exit code.
pub fn run_snapshot(config: &AppConfig, range: Option<DateRange>, quiet: bool) -> Result<i32> {
    ensure_valid(config)?;

    let source = build_source(&config.source)?;
    if !quiet {
        tracing::info!(source = source.name(), "building snapshot");
    }

    let dashboard = build_dashboard(source.as_ref(), range.as_ref(), Utc::now())?;
    output_dashboard(&dashboard, &config.report, quiet)?;

    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::ReportFormat;

    #[test]
    fn test_snapshot_to_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        let mut config = AppConfig::default();
        config.report.format = ReportFormat::Json;
        config.report.file = Some(path.clone());

        assert_eq!(run_snapshot(&config, None, true).unwrap(), exit_codes::SUCCESS);
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value["snapshot"]["kpis"]["activeProducts"], 6);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = AppConfig::default();
        config.schedule.hour = 30;
        assert!(run_snapshot(&config, None, true).is_err());
    }
}
