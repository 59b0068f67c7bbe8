//! Summary report generator for shell output.
//!
//! Provides a compact, human-readable summary for terminal usage.

use super::escape::{format_pct, format_usd};
use super::{sorted_products, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::metrics::{MarginLeakReport, Snapshot, LEAK_THRESHOLD};
use crate::utils::eastern_timestamp;

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate_dashboard(
        &self,
        snapshot: &Snapshot,
        leaks: &MarginLeakReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        let kpis = &snapshot.kpis;

        lines.push(self.color(config.title_or_default(), "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));
        lines.push(format!(
            "{}  {} ET",
            self.color("As of:", "cyan"),
            eastern_timestamp(snapshot.generated_at)
        ));
        lines.push(format!(
            "{}  {}   {}  {}",
            self.color("Revenue:", "cyan"),
            format_usd(kpis.total_revenue),
            self.color("COGS:", "cyan"),
            format_usd(kpis.total_cost)
        ));
        let margin_color = if kpis.gross_margin_pct < LEAK_THRESHOLD {
            "red"
        } else {
            "green"
        };
        lines.push(format!(
            "{}  {}   {}  {}",
            self.color("Profit:", "cyan"),
            format_usd(kpis.profit),
            self.color("Margin:", "cyan"),
            self.color(&format_pct(kpis.gross_margin_pct, 1), margin_color)
        ));
        lines.push(format!(
            "{}  {} customers, {} products",
            self.color("Active:", "cyan"),
            kpis.active_customers,
            kpis.active_products
        ));

        lines.push(String::new());
        lines.push(self.color(&format!("Products (by {}):", config.sort.label()), "bold"));
        let products = sorted_products(snapshot, config);
        if products.is_empty() {
            lines.push(format!("  {}", self.color("No sales in range", "dim")));
        }
        for p in &products {
            let margin = format_pct(p.margin_pct, 1);
            let margin = if p.margin_pct < LEAK_THRESHOLD {
                self.color(&margin, "red")
            } else {
                self.color(&margin, "green")
            };
            lines.push(format!(
                "  {} {:<24} {:>12} {:>7} {:>5}u",
                p.trend.symbol(),
                p.product_name,
                format_usd(p.revenue),
                margin,
                p.units
            ));
        }

        if let Some(top) = snapshot.top_revenue_product() {
            if let Some(best) = snapshot.suppliers_for(&top.product_id).first() {
                lines.push(String::new());
                lines.push(format!(
                    "{}  {} for {} (SourceScore {:.1}, landed {})",
                    self.color("Best source:", "cyan"),
                    best.supplier_id,
                    top.product_name,
                    best.source_score * 100.0,
                    format_usd(best.landed_cost)
                ));
            }
        }

        lines.push(String::new());
        lines.push(self.color("Alerts:", "bold"));
        if leaks.has_leaks() {
            lines.push(format!(
                "  {}",
                self.color(&format!("{} margin leak(s)", leaks.total_flagged), "red")
            ));
            for row in &leaks.rows {
                lines.push(format!(
                    "    {} {} / {} at {} ({})",
                    row.quote_id,
                    row.product_name,
                    row.customer,
                    format_usd(row.unit_price),
                    format_pct(row.margin_pct, 1)
                ));
            }
        } else {
            lines.push(format!("  {}", self.color("No margin leaks", "green")));
        }
        for risk in &snapshot.stock_risks {
            lines.push(format!(
                "  {} {}: {} on hand, {} forecast, reorder {}",
                self.color("Stockout risk", "yellow"),
                risk.product_name,
                risk.on_hand_units,
                risk.forecast_14d,
                risk.restock_units
            ));
        }

        lines.push(String::new());
        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}
