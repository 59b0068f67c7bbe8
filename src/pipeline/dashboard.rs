//! Fetch, compose and render stages for the dashboard.

use super::{auto_detect_format, should_use_color, write_output, OutputTarget};
use crate::error::{ErrorContext, Result};
use crate::metrics::{detect_margin_leaks, MarginLeakReport, Snapshot};
use crate::model::DateRange;
use crate::reports::{create_reporter_with_options, ReportConfig};
use crate::sources::{load_snapshot, DataSource};
use chrono::{DateTime, Utc};

/// A composed snapshot and the leak scan taken from it.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub snapshot: Snapshot,
    pub leaks: MarginLeakReport,
}

/// Load every collection from `source` and derive the dashboard.
pub fn build_dashboard(
    source: &dyn DataSource,
    range: Option<&DateRange>,
    now: DateTime<Utc>,
) -> Result<Dashboard> {
    let snapshot = load_snapshot(source, range, now)
        .with_context(|| format!("loading snapshot from {}", source.name()))?;
    let leaks = detect_margin_leaks(&snapshot);
    tracing::debug!(
        products = snapshot.products.len(),
        leaks = leaks.total_flagged,
        "dashboard composed"
    );
    Ok(Dashboard { snapshot, leaks })
}

/// Render `dashboard` in the configured format and write it out.
pub fn output_dashboard(dashboard: &Dashboard, config: &ReportConfig, quiet: bool) -> Result<()> {
    let target = OutputTarget::from_option(config.file.clone());
    let format = auto_detect_format(config.format, &target);
    let use_color = should_use_color(config.no_color) && target.is_terminal();

    let reporter = create_reporter_with_options(format, use_color);
    let report = reporter
        .generate_dashboard(&dashboard.snapshot, &dashboard.leaks, config)
        .with_context(|| format!("rendering {format} dashboard"))?;

    write_output(&report, &target, quiet)
}
