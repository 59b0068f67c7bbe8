//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod leaks;
mod schedule;
mod snapshot;

pub use leaks::run_leaks;
pub use schedule::run_schedule;
pub use snapshot::run_snapshot;

use crate::config::{AppConfig, Validatable};
use crate::pipeline::exit_codes;

/// Turn a handler result into a process exit code.
///
/// Errors are logged with their full cause chain and map to
/// [`exit_codes::ERROR`], keeping them distinct from
/// [`exit_codes::LEAKS_DETECTED`].
pub fn exit_code(result: anyhow::Result<i32>) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            exit_codes::ERROR
        }
    }
}

/// Reject invalid configuration before touching any data source.
fn ensure_valid(config: &AppConfig) -> anyhow::Result<()> {
    let errors = config.validate();
    if errors.is_empty() {
        return Ok(());
    }
    for e in &errors {
        tracing::error!("config: {e}");
    }
    anyhow::bail!(
        "invalid configuration ({} error{})",
        errors.len(),
        if errors.len() == 1 { "" } else { "s" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_codes_pass_through() {
        assert_eq!(exit_code(Ok(exit_codes::SUCCESS)), 0);
        assert_eq!(exit_code(Ok(exit_codes::LEAKS_DETECTED)), 1);
    }

    #[test]
    fn test_missing_fixture_exits_with_error_code() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.source.fixture_path = Some(dir.path().join("missing.json"));
        config.report.file = Some(dir.path().join("leaks.json"));

        let code = exit_code(run_leaks(&config, true, true));
        assert_eq!(code, exit_codes::ERROR);
        assert_ne!(code, exit_codes::LEAKS_DETECTED);
        assert!(!dir.path().join("leaks.json").exists());
    }

    #[test]
    fn test_invalid_config_exits_with_error_code() {
        let mut config = AppConfig::default();
        config.schedule.timezone = "Mars/Olympus".to_string();
        assert_eq!(exit_code(run_schedule(&config, Some(1), false, true)), exit_codes::ERROR);
    }
}
