//! Dashboard rendering.
//!
//! Every reporter renders the same two inputs: a composed [`Snapshot`] and
//! the [`MarginLeakReport`] derived from it.
//! - Summary: compact shell-friendly output, optionally colored
//! - JSON: structured data for programmatic integration
//! - HTML: the single-page dashboard
//!
//! # Security
//!
//! The `escape` module provides utilities for safe output generation.
//! Product, customer and supplier names must be escaped before embedding
//! them in HTML.

pub mod escape;
mod html;
mod json;
mod summary;
mod types;

pub use html::HtmlReporter;
pub use json::JsonReporter;
pub use summary::SummaryReporter;
pub use types::{ReportConfig, ReportFormat};

use crate::metrics::{sort_products, MarginLeakReport, ProductAggregate, Snapshot};
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render the dashboard for one snapshot and its leak scan.
    fn generate_dashboard(
        &self,
        snapshot: &Snapshot,
        leaks: &MarginLeakReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Write the dashboard to a writer
    fn write_dashboard(
        &self,
        snapshot: &Snapshot,
        leaks: &MarginLeakReport,
        config: &ReportConfig,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let report = self.generate_dashboard(snapshot, leaks, config)?;
        writer.write_all(report.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Product rows in the order the config asks for.
pub(crate) fn sorted_products(snapshot: &Snapshot, config: &ReportConfig) -> Vec<ProductAggregate> {
    let mut products = snapshot.products.clone();
    sort_products(&mut products, config.sort, config.direction);
    products
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    create_reporter_with_options(format, true)
}

/// Create a report generator with color control
#[must_use]
pub fn create_reporter_with_options(
    format: ReportFormat,
    use_color: bool,
) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Auto | ReportFormat::Summary => {
            if use_color {
                Box::new(SummaryReporter::new())
            } else {
                Box::new(SummaryReporter::new().no_color())
            }
        }
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Html => Box::new(HtmlReporter::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{detect_margin_leaks, ProductSortKey, SortDirection};
    use crate::sources::{load_snapshot, FixtureSource};
    use chrono::{TimeZone, Utc};

    fn sample() -> (Snapshot, MarginLeakReport) {
        let now = Utc.with_ymd_and_hms(2025, 11, 3, 13, 30, 0).unwrap();
        let snapshot = load_snapshot(&FixtureSource::sample(), None, now).unwrap();
        let leaks = detect_margin_leaks(&snapshot);
        (snapshot, leaks)
    }

    #[test]
    fn test_create_reporter_formats() {
        for format in [ReportFormat::Summary, ReportFormat::Json, ReportFormat::Html] {
            assert_eq!(create_reporter(format).format(), format);
        }
        assert_eq!(create_reporter(ReportFormat::Auto).format(), ReportFormat::Summary);
    }

    #[test]
    fn test_write_dashboard_matches_generate() {
        let (snapshot, leaks) = sample();
        let config = ReportConfig::default();
        let reporter = create_reporter_with_options(ReportFormat::Summary, false);
        let mut out = Vec::new();
        reporter
            .write_dashboard(&snapshot, &leaks, &config, &mut out)
            .unwrap();
        let expected = reporter.generate_dashboard(&snapshot, &leaks, &config).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn test_sorted_products_follow_config() {
        let (snapshot, _) = sample();
        let config = ReportConfig {
            sort: ProductSortKey::Units,
            direction: SortDirection::Asc,
            ..ReportConfig::default()
        };
        let units: Vec<u64> = sorted_products(&snapshot, &config).iter().map(|p| p.units).collect();
        assert_eq!(units, [4, 10, 15, 20, 30, 30]);
    }
}
