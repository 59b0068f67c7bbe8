//! Report type definitions.

use crate::metrics::{ProductSortKey, SortDirection};
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// HTML when writing to a `.html` file, summary otherwise
    #[default]
    Auto,
    /// Brief terminal summary
    Summary,
    /// Structured JSON output
    Json,
    /// Single-page HTML dashboard
    Html,
}

impl ReportFormat {
    /// Resolve `Auto` against the output destination.
    #[must_use]
    pub fn resolve(self, output: Option<&std::path::Path>) -> Self {
        match self {
            Self::Auto => match output.and_then(|p| p.extension()).and_then(|e| e.to_str()) {
                Some(ext) if ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm") => {
                    Self::Html
                }
                Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
                _ => Self::Summary,
            },
            other => other,
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Auto => write!(f, "auto"),
            ReportFormat::Summary => write!(f, "summary"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Html => write!(f, "html"),
        }
    }
}

/// Configuration for dashboard rendering
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ReportConfig {
    /// Output format
    pub format: ReportFormat,
    /// Write the report to this file instead of stdout
    pub file: Option<PathBuf>,
    /// Custom title for the dashboard
    pub title: Option<String>,
    /// Product table sort key
    pub sort: ProductSortKey,
    /// Product table sort direction
    pub direction: SortDirection,
    /// Disable ANSI colors in terminal output
    pub no_color: bool,
}

impl ReportConfig {
    /// Title shown in report headers.
    #[must_use]
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or("Sales Operations Dashboard")
    }
}
