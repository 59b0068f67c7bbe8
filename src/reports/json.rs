//! Machine-readable dashboard: snapshot, sorted product table and leak scan.

use super::{sorted_products, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::metrics::{MarginLeakReport, ProductAggregate, Snapshot};
use serde::Serialize;

/// Writes the whole dashboard as one camelCase JSON document.
pub struct JsonReporter {
    pretty: bool,
}

impl JsonReporter {
    /// Pretty-printed by default.
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Compact single-line output when `false`.
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate_dashboard(
        &self,
        snapshot: &Snapshot,
        leaks: &MarginLeakReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let report = JsonDashboard {
            metadata: JsonReportMetadata {
                tool: ToolInfo {
                    name: env!("CARGO_PKG_NAME"),
                    version: env!("CARGO_PKG_VERSION"),
                },
                title: config.title_or_default(),
                sort: config.sort.label(),
            },
            products_sorted: sorted_products(snapshot, config),
            snapshot,
            margin_leaks: leaks,
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        };
        json.map_err(|e| ReportError::SerializationError(e.to_string()))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

// JSON structures

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonDashboard<'a> {
    metadata: JsonReportMetadata<'a>,
    snapshot: &'a Snapshot,
    /// Product table in display order.
    products_sorted: Vec<ProductAggregate>,
    margin_leaks: &'a MarginLeakReport,
}

#[derive(Serialize)]
struct JsonReportMetadata<'a> {
    tool: ToolInfo,
    title: &'a str,
    sort: &'static str,
}

#[derive(Serialize)]
struct ToolInfo {
    name: &'static str,
    version: &'static str,
}
