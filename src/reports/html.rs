//! HTML dashboard generator.

use super::escape::{escape_html, format_pct, format_usd};
use super::{sorted_products, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::metrics::{MarginLeakReport, Snapshot, LEAK_THRESHOLD};
use crate::utils::eastern_timestamp;
use std::fmt::Write;

/// HTML report generator
pub struct HtmlReporter {
    /// Include inline CSS
    include_styles: bool,
}

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self {
            include_styles: true,
        }
    }

    /// Omit the inline stylesheet
    #[must_use]
    pub const fn without_styles(mut self) -> Self {
        self.include_styles = false;
        self
    }

    fn get_styles(&self) -> &'static str {
        r#"
        <style>
            :root {
                --bg-color: #0a0a0a;
                --text-color: #e5e5e5;
                --accent-color: #7dd3fc;
                --success-color: #34d399;
                --warning-color: #fbbf24;
                --error-color: #f87171;
                --border-color: #262626;
                --card-bg: #171717;
            }

            body {
                font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
                background-color: var(--bg-color);
                color: var(--text-color);
                margin: 0;
                padding: 20px;
                line-height: 1.6;
            }

            .container {
                max-width: 1280px;
                margin: 0 auto;
            }

            h1, h2 {
                color: var(--accent-color);
            }

            .header {
                border-bottom: 2px solid var(--border-color);
                padding-bottom: 20px;
                margin-bottom: 30px;
            }

            .subtitle {
                font-size: 0.9em;
                color: #a3a3a3;
            }

            .summary-cards {
                display: grid;
                grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
                gap: 20px;
                margin-bottom: 30px;
            }

            .card {
                background-color: var(--card-bg);
                border-radius: 16px;
                padding: 20px;
                border: 1px solid var(--border-color);
            }

            .card-title {
                font-size: 0.9em;
                color: #a3a3a3;
                margin-bottom: 10px;
            }

            .card-value {
                font-size: 1.8em;
                font-weight: bold;
            }

            table {
                width: 100%;
                border-collapse: collapse;
                margin-bottom: 20px;
                background-color: var(--card-bg);
                border-radius: 8px;
                overflow: hidden;
            }

            th, td {
                padding: 10px 14px;
                text-align: left;
                border-bottom: 1px solid var(--border-color);
            }

            td.num, th.num {
                text-align: right;
            }

            th {
                background-color: #262626;
                font-weight: 600;
            }

            tr:hover {
                background-color: #1f1f1f;
            }

            .badge {
                display: inline-block;
                padding: 2px 8px;
                border-radius: 4px;
                font-size: 0.85em;
                font-weight: 500;
                background-color: rgba(125, 211, 252, 0.15);
                color: var(--accent-color);
            }

            .low-margin { color: var(--error-color); }
            .ok-margin { color: var(--success-color); }
            .risk { color: var(--warning-color); }
            .muted { color: #a3a3a3; }

            .alert {
                border: 1px solid var(--error-color);
                border-radius: 8px;
                padding: 16px;
                margin-bottom: 20px;
                background-color: rgba(248, 113, 113, 0.08);
            }

            .alert.warning {
                border-color: var(--warning-color);
                background-color: rgba(251, 191, 36, 0.08);
            }

            .alert.success {
                border-color: var(--success-color);
                background-color: rgba(52, 211, 153, 0.08);
            }

            .section {
                margin-bottom: 40px;
            }

            .footer {
                margin-top: 40px;
                padding-top: 20px;
                border-top: 1px solid var(--border-color);
                font-size: 0.9em;
                color: #a3a3a3;
            }
        </style>
        "#
    }

    fn write_kpis(&self, html: &mut String, snapshot: &Snapshot) -> Result<(), ReportError> {
        let kpis = &snapshot.kpis;
        let cards = [
            ("Total Revenue", format_usd(kpis.total_revenue)),
            ("Total COGS", format_usd(kpis.total_cost)),
            ("Gross Margin %", format_pct(kpis.gross_margin_pct, 1)),
            ("Profit (USD)", format_usd(kpis.profit)),
            ("Active Customers", kpis.active_customers.to_string()),
            ("Active Products", kpis.active_products.to_string()),
        ];

        writeln!(html, "<div class=\"summary-cards\">")?;
        for (title, value) in cards {
            writeln!(html, "    <div class=\"card\">")?;
            writeln!(html, "        <div class=\"card-title\">{title}</div>")?;
            writeln!(html, "        <div class=\"card-value\">{value}</div>")?;
            writeln!(html, "    </div>")?;
        }
        writeln!(html, "</div>")?;
        Ok(())
    }

    fn write_products(
        &self,
        html: &mut String,
        snapshot: &Snapshot,
        config: &ReportConfig,
    ) -> Result<(), ReportError> {
        writeln!(html, "<div class=\"section\" id=\"products\">")?;
        writeln!(html, "    <h2>Product Performance</h2>")?;
        writeln!(
            html,
            "    <p><span class=\"badge\">Sorted by: {}</span></p>",
            config.sort.label()
        )?;
        writeln!(html, "    <table>")?;
        writeln!(html, "        <thead>")?;
        writeln!(html, "            <tr>")?;
        writeln!(html, "                <th>Product</th>")?;
        writeln!(html, "                <th class=\"num\">Revenue</th>")?;
        writeln!(html, "                <th class=\"num\">Cost</th>")?;
        writeln!(html, "                <th class=\"num\">Margin %</th>")?;
        writeln!(html, "                <th class=\"num\">Units</th>")?;
        writeln!(html, "                <th class=\"num\">Trend</th>")?;
        writeln!(html, "            </tr>")?;
        writeln!(html, "        </thead>")?;
        writeln!(html, "        <tbody>")?;

        for p in sorted_products(snapshot, config) {
            let margin_class = if p.margin_pct < LEAK_THRESHOLD {
                "low-margin"
            } else {
                "ok-margin"
            };
            writeln!(html, "            <tr>")?;
            writeln!(html, "                <td>{}</td>", escape_html(&p.product_name))?;
            writeln!(html, "                <td class=\"num\">{}</td>", format_usd(p.revenue))?;
            writeln!(html, "                <td class=\"num\">{}</td>", format_usd(p.cost))?;
            writeln!(
                html,
                "                <td class=\"num {margin_class}\">{}</td>",
                format_pct(p.margin_pct, 1)
            )?;
            writeln!(html, "                <td class=\"num\">{}</td>", p.units)?;
            writeln!(
                html,
                "                <td class=\"num\" title=\"{}\">{}</td>",
                p.trend,
                p.trend.symbol()
            )?;
            writeln!(html, "            </tr>")?;
        }

        writeln!(html, "        </tbody>")?;
        writeln!(html, "    </table>")?;
        writeln!(html, "</div>")?;
        Ok(())
    }

    fn write_suppliers(&self, html: &mut String, snapshot: &Snapshot) -> Result<(), ReportError> {
        writeln!(html, "<div class=\"section\" id=\"suppliers\">")?;
        writeln!(html, "    <h2>Supplier Optimization: SourceScore</h2>")?;
        writeln!(
            html,
            "    <p class=\"subtitle\">SourceScore = 0.45&times;Margin + 0.35&times;Speed + 0.20&times;Reliability</p>"
        )?;

        let Some(top) = snapshot.top_revenue_product() else {
            writeln!(html, "    <p class=\"muted\">No sales in range.</p>")?;
            writeln!(html, "</div>")?;
            return Ok(());
        };
        writeln!(
            html,
            "    <p>Top revenue product: <strong>{}</strong></p>",
            escape_html(&top.product_name)
        )?;

        let rows = snapshot.suppliers_for(&top.product_id);
        if rows.is_empty() {
            writeln!(html, "    <p class=\"muted\">No supplier cost records for this product.</p>")?;
            writeln!(html, "</div>")?;
            return Ok(());
        }

        writeln!(html, "    <table>")?;
        writeln!(html, "        <thead>")?;
        writeln!(html, "            <tr>")?;
        for header in ["Supplier", "Region", "Landed Cost", "Lead", "Reliability", "MOQ", "Effective"] {
            writeln!(html, "                <th>{header}</th>")?;
        }
        for header in ["MarginScore", "SpeedScore", "ReliabilityScore", "SourceScore"] {
            writeln!(html, "                <th class=\"num\">{header}</th>")?;
        }
        writeln!(html, "            </tr>")?;
        writeln!(html, "        </thead>")?;
        writeln!(html, "        <tbody>")?;

        for r in rows {
            writeln!(html, "            <tr>")?;
            writeln!(html, "                <td>{}</td>", escape_html(&r.supplier_id))?;
            writeln!(html, "                <td>{}</td>", r.region)?;
            writeln!(html, "                <td>{}</td>", format_usd(r.landed_cost))?;
            writeln!(html, "                <td>{}</td>", escape_html(&r.lead))?;
            writeln!(html, "                <td>{}</td>", r.reliability)?;
            writeln!(html, "                <td>{}</td>", r.moq)?;
            writeln!(html, "                <td>{}</td>", r.effective_date)?;
            writeln!(html, "                <td class=\"num\">{}</td>", format_pct(r.margin_score, 1))?;
            writeln!(html, "                <td class=\"num\">{}</td>", format_pct(r.speed_score, 0))?;
            writeln!(
                html,
                "                <td class=\"num\">{}</td>",
                format_pct(r.reliability_score, 0)
            )?;
            writeln!(
                html,
                "                <td class=\"num\"><strong>{:.1}</strong></td>",
                r.source_score * 100.0
            )?;
            writeln!(html, "            </tr>")?;
        }

        writeln!(html, "        </tbody>")?;
        writeln!(html, "    </table>")?;
        writeln!(html, "</div>")?;
        Ok(())
    }

    fn write_inventory(&self, html: &mut String, snapshot: &Snapshot) -> Result<(), ReportError> {
        writeln!(html, "<div class=\"section\" id=\"inventory\">")?;
        writeln!(html, "    <h2>Inventory &amp; Velocity</h2>")?;
        writeln!(
            html,
            "    <p class=\"subtitle\">Velocity Buckets: A &ge; 2/wk, B = 0.5&ndash;2/wk, C &lt; 0.5/wk</p>"
        )?;
        writeln!(html, "    <table>")?;
        writeln!(html, "        <thead>")?;
        writeln!(html, "            <tr>")?;
        writeln!(html, "                <th>Product</th>")?;
        writeln!(html, "                <th class=\"num\">In Stock</th>")?;
        writeln!(html, "                <th class=\"num\">14d Forecast</th>")?;
        writeln!(html, "                <th class=\"num\">Velocity</th>")?;
        writeln!(html, "                <th class=\"num\">Risk</th>")?;
        writeln!(html, "                <th class=\"num\">Restock Suggestion</th>")?;
        writeln!(html, "            </tr>")?;
        writeln!(html, "        </thead>")?;
        writeln!(html, "        <tbody>")?;

        for batch in &snapshot.inventory {
            let at_risk = batch.is_stockout_risk();
            writeln!(html, "            <tr>")?;
            writeln!(html, "                <td>{}</td>", escape_html(&batch.product_name))?;
            writeln!(html, "                <td class=\"num\">{}</td>", batch.on_hand_units)?;
            writeln!(html, "                <td class=\"num\">{}</td>", batch.forecast_14d)?;
            writeln!(html, "                <td class=\"num\">{}</td>", batch.velocity_bucket)?;
            if at_risk {
                writeln!(html, "                <td class=\"num risk\">Stockout Risk</td>")?;
                writeln!(
                    html,
                    "                <td class=\"num\">{} units</td>",
                    batch.restock_suggestion()
                )?;
            } else {
                writeln!(html, "                <td class=\"num muted\">OK</td>")?;
                writeln!(html, "                <td class=\"num\">&mdash;</td>")?;
            }
            writeln!(html, "            </tr>")?;
        }

        writeln!(html, "        </tbody>")?;
        writeln!(html, "    </table>")?;
        writeln!(html, "</div>")?;
        Ok(())
    }

    fn write_trends(&self, html: &mut String, snapshot: &Snapshot) -> Result<(), ReportError> {
        writeln!(html, "<div class=\"section\" id=\"trends\">")?;
        writeln!(html, "    <h2>Trend Analysis</h2>")?;
        if snapshot.daily.is_empty() {
            writeln!(html, "    <p class=\"muted\">No sales in range.</p>")?;
            writeln!(html, "</div>")?;
            return Ok(());
        }
        writeln!(html, "    <table>")?;
        writeln!(html, "        <thead>")?;
        writeln!(html, "            <tr>")?;
        writeln!(html, "                <th>Date</th>")?;
        writeln!(html, "                <th class=\"num\">Revenue</th>")?;
        writeln!(html, "                <th class=\"num\">Cost</th>")?;
        writeln!(html, "                <th class=\"num\">Margin %</th>")?;
        writeln!(html, "            </tr>")?;
        writeln!(html, "        </thead>")?;
        writeln!(html, "        <tbody>")?;
        for point in &snapshot.daily {
            writeln!(html, "            <tr>")?;
            writeln!(html, "                <td>{}</td>", point.date)?;
            writeln!(html, "                <td class=\"num\">{}</td>", format_usd(point.revenue))?;
            writeln!(html, "                <td class=\"num\">{}</td>", format_usd(point.cost))?;
            writeln!(
                html,
                "                <td class=\"num\">{}</td>",
                format_pct(point.margin_pct, 1)
            )?;
            writeln!(html, "            </tr>")?;
        }
        writeln!(html, "        </tbody>")?;
        writeln!(html, "    </table>")?;
        writeln!(html, "</div>")?;
        Ok(())
    }

    fn write_alerts(
        &self,
        html: &mut String,
        snapshot: &Snapshot,
        leaks: &MarginLeakReport,
    ) -> Result<(), ReportError> {
        writeln!(html, "<div class=\"section\" id=\"alerts\">")?;
        writeln!(html, "    <h2>Alerts &amp; Recommendations</h2>")?;

        if leaks.has_leaks() {
            writeln!(html, "    <div class=\"alert\">")?;
            writeln!(html, "        <h3>Margin Leak Detected</h3>")?;
            writeln!(
                html,
                "        <p>Quotes with margin &lt; {:.0}% (leak threshold). Sorted by lowest margin first.</p>",
                LEAK_THRESHOLD * 100.0
            )?;
            writeln!(html, "        <table>")?;
            writeln!(html, "            <thead>")?;
            writeln!(html, "                <tr>")?;
            writeln!(html, "                    <th>Quote</th>")?;
            writeln!(html, "                    <th>Product</th>")?;
            writeln!(html, "                    <th>Customer</th>")?;
            writeln!(html, "                    <th class=\"num\">Unit Price</th>")?;
            writeln!(html, "                    <th class=\"num\">Landed Cost</th>")?;
            writeln!(html, "                    <th class=\"num\">Margin %</th>")?;
            writeln!(html, "                </tr>")?;
            writeln!(html, "            </thead>")?;
            writeln!(html, "            <tbody>")?;
            for row in &leaks.rows {
                writeln!(html, "                <tr>")?;
                writeln!(html, "                    <td>{}</td>", escape_html(&row.quote_id))?;
                writeln!(html, "                    <td>{}</td>", escape_html(&row.product_name))?;
                writeln!(html, "                    <td>{}</td>", escape_html(&row.customer))?;
                writeln!(
                    html,
                    "                    <td class=\"num\">{}</td>",
                    format_usd(row.unit_price)
                )?;
                writeln!(
                    html,
                    "                    <td class=\"num\">{}</td>",
                    format_usd(row.landed_cost)
                )?;
                writeln!(
                    html,
                    "                    <td class=\"num low-margin\">{}</td>",
                    format_pct(row.margin_pct, 1)
                )?;
                writeln!(html, "                </tr>")?;
            }
            writeln!(html, "            </tbody>")?;
            writeln!(html, "        </table>")?;
            writeln!(html, "    </div>")?;
        } else {
            writeln!(html, "    <div class=\"alert success\">")?;
            writeln!(
                html,
                "        <p>All quotes meet the {:.0}% minimum margin threshold.</p>",
                LEAK_THRESHOLD * 100.0
            )?;
            writeln!(html, "    </div>")?;
        }

        if !snapshot.stock_risks.is_empty() {
            writeln!(html, "    <div class=\"alert warning\">")?;
            writeln!(html, "        <h3>Stockout Risk</h3>")?;
            writeln!(html, "        <ul>")?;
            for risk in &snapshot.stock_risks {
                writeln!(
                    html,
                    "            <li>{}: {} on hand vs {} forecast over 14 days. Reorder {} units.</li>",
                    escape_html(&risk.product_name),
                    risk.on_hand_units,
                    risk.forecast_14d,
                    risk.restock_units
                )?;
            }
            writeln!(html, "        </ul>")?;
            writeln!(html, "    </div>")?;
        }

        writeln!(html, "</div>")?;
        Ok(())
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn generate_dashboard(
        &self,
        snapshot: &Snapshot,
        leaks: &MarginLeakReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut html = String::new();
        let title = escape_html(config.title_or_default());

        // HTML header
        writeln!(html, "<!DOCTYPE html>")?;
        writeln!(html, "<html lang=\"en\">")?;
        writeln!(html, "<head>")?;
        writeln!(html, "    <meta charset=\"UTF-8\">")?;
        writeln!(
            html,
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
        )?;
        writeln!(html, "    <title>{title}</title>")?;
        if self.include_styles {
            writeln!(html, "{}", self.get_styles())?;
        }
        writeln!(html, "</head>")?;
        writeln!(html, "<body>")?;
        writeln!(html, "<div class=\"container\">")?;

        writeln!(html, "<div class=\"header\">")?;
        writeln!(html, "    <h1>{title}</h1>")?;
        writeln!(
            html,
            "    <p class=\"subtitle\">Generated by salesops-dash v{} at {} (ET)</p>",
            env!("CARGO_PKG_VERSION"),
            eastern_timestamp(snapshot.generated_at)
        )?;
        writeln!(html, "</div>")?;

        self.write_kpis(&mut html, snapshot)?;
        self.write_products(&mut html, snapshot, config)?;
        self.write_suppliers(&mut html, snapshot)?;
        self.write_inventory(&mut html, snapshot)?;
        self.write_trends(&mut html, snapshot)?;
        self.write_alerts(&mut html, snapshot, leaks)?;

        writeln!(html, "<div class=\"footer\">")?;
        writeln!(html, "    <p>For Research Use Only. Not for human use.</p>")?;
        writeln!(html, "</div>")?;

        writeln!(html, "</div>")?;
        writeln!(html, "</body>")?;
        writeln!(html, "</html>")?;

        Ok(html)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Html
    }
}
