//! Per-product rollups, business KPIs and the daily revenue/cost series.

use super::calc::margin_pct;
use crate::model::Transaction;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Direction a product's profitability is heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    /// Up above a 1.35x revenue/cost ratio, down below 1.10x.
    #[must_use]
    pub fn classify(revenue: f64, cost: f64) -> Self {
        if revenue > cost * 1.35 {
            Self::Up
        } else if revenue < cost * 1.10 {
            Self::Down
        } else {
            Self::Flat
        }
    }

    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Up => "▲",
            Self::Down => "▼",
            Self::Flat => "■",
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Flat => "flat",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Revenue, cost and margin totals for every transaction of one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAggregate {
    pub product_id: String,
    /// Name from the first transaction seen for this product.
    pub product_name: String,
    pub revenue: f64,
    pub cost: f64,
    /// Margin of the totals, not an average of per-line margins.
    pub margin_pct: f64,
    pub units: u64,
    pub trend: Trend,
}

impl ProductAggregate {
    #[must_use]
    pub fn profit(&self) -> f64 {
        self.revenue - self.cost
    }
}

/// Whole-business figures for the snapshot window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
    pub total_revenue: f64,
    pub total_cost: f64,
    pub profit: f64,
    pub gross_margin_pct: f64,
    pub active_customers: usize,
    pub active_products: usize,
}

/// Revenue and cost summed over one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPoint {
    pub date: chrono::NaiveDate,
    pub revenue: f64,
    pub cost: f64,
    pub margin_pct: f64,
}

/// Column the product table is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProductSortKey {
    #[default]
    Margin,
    Revenue,
    Units,
}

impl ProductSortKey {
    /// Column label shown next to the product table.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Margin => "gross_margin_pct",
            Self::Revenue => "revenue",
            Self::Units => "units",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

#[derive(Default)]
struct Accumulator<'a> {
    name: &'a str,
    revenue: f64,
    cost: f64,
    units: u64,
}

/// Group transactions by product id in a single pass.
///
/// Groups keep first-seen order. Margin is computed from the accumulated
/// totals, so one large low-margin sale can dominate a product.
#[must_use]
pub fn aggregate_products(transactions: &[Transaction]) -> Vec<ProductAggregate> {
    let mut groups: IndexMap<&str, Accumulator<'_>> = IndexMap::new();

    for tx in transactions {
        let acc = groups
            .entry(tx.product_id.as_str())
            .or_insert_with(|| Accumulator {
                name: tx.product_name.as_str(),
                ..Accumulator::default()
            });
        acc.revenue += tx.revenue();
        acc.cost += tx.cost();
        acc.units += u64::from(tx.units);
    }

    groups
        .into_iter()
        .map(|(product_id, acc)| ProductAggregate {
            product_id: product_id.to_string(),
            product_name: acc.name.to_string(),
            revenue: acc.revenue,
            cost: acc.cost,
            margin_pct: ratio_margin(acc.revenue, acc.cost),
            units: acc.units,
            trend: Trend::classify(acc.revenue, acc.cost),
        })
        .collect()
}

/// Business-wide KPIs over the product groups.
///
/// Active customers are distinct customer names across `transactions`.
#[must_use]
pub fn compute_kpis(transactions: &[Transaction], products: &[ProductAggregate]) -> Kpis {
    let total_revenue: f64 = products.iter().map(|p| p.revenue).sum();
    let total_cost: f64 = products.iter().map(|p| p.cost).sum();
    let profit = total_revenue - total_cost;
    let active_customers = transactions
        .iter()
        .map(|t| t.customer.as_str())
        .collect::<HashSet<_>>()
        .len();

    Kpis {
        total_revenue,
        total_cost,
        profit,
        gross_margin_pct: ratio_margin(total_revenue, total_cost),
        active_customers,
        active_products: products.len(),
    }
}

/// Revenue and cost per date, oldest first.
#[must_use]
pub fn daily_series(transactions: &[Transaction]) -> Vec<DailyPoint> {
    let mut by_date: BTreeMap<chrono::NaiveDate, (f64, f64)> = BTreeMap::new();
    for tx in transactions {
        let entry = by_date.entry(tx.date).or_default();
        entry.0 += tx.revenue();
        entry.1 += tx.cost();
    }
    by_date
        .into_iter()
        .map(|(date, (revenue, cost))| DailyPoint {
            date,
            revenue,
            cost,
            margin_pct: ratio_margin(revenue, cost),
        })
        .collect()
}

/// Stable sort of the product table.
pub fn sort_products(products: &mut [ProductAggregate], key: ProductSortKey, direction: SortDirection) {
    let value = |p: &ProductAggregate| match key {
        ProductSortKey::Margin => p.margin_pct,
        ProductSortKey::Revenue => p.revenue,
        ProductSortKey::Units => p.units as f64,
    };
    products.sort_by(|a, b| {
        let ord = value(a).total_cmp(&value(b));
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

/// `(revenue - cost) / revenue`, 0 when there is no revenue.
fn ratio_margin(revenue: f64, cost: f64) -> f64 {
    if revenue > 0.0 {
        margin_pct(revenue, cost)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuoteStatus;
    use chrono::NaiveDate;

    fn tx(id: &str, product: &str, customer: &str, units: u32, price: f64, cost: f64) -> Transaction {
        Transaction {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 10, 27).unwrap(),
            customer: customer.to_string(),
            product_id: product.to_string(),
            product_name: format!("{product} name"),
            units,
            unit_price: price,
            landed_cost: cost,
            lead_days: None,
            reliability: None,
            region: None,
            status: QuoteStatus::Paid,
        }
    }

    #[test]
    fn test_single_product_rollup() {
        let products = aggregate_products(&[tx("Q1", "TRZ-10", "CVS", 10, 120.0, 80.0)]);
        assert_eq!(products.len(), 1);
        let p = &products[0];
        assert!((p.revenue - 1200.0).abs() < 1e-9);
        assert!((p.cost - 800.0).abs() < 1e-9);
        assert!((p.margin_pct - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(p.units, 10);
    }

    #[test]
    fn test_margin_is_from_totals_not_average() {
        // 50% margin on 1 unit and 10% margin on 100 units
        let txs = [
            tx("Q1", "P", "A", 1, 100.0, 50.0),
            tx("Q2", "P", "B", 100, 100.0, 90.0),
        ];
        let p = &aggregate_products(&txs)[0];
        let expected = (10_100.0 - 9_050.0) / 10_100.0;
        assert!((p.margin_pct - expected).abs() < 1e-12);
        assert!(p.margin_pct < 0.11);
    }

    #[test]
    fn test_groups_keep_first_seen_order_and_name() {
        let mut second = tx("Q3", "A", "X", 1, 10.0, 5.0);
        second.product_name = "renamed".to_string();
        let txs = [
            tx("Q1", "B", "X", 1, 10.0, 5.0),
            tx("Q2", "A", "X", 1, 10.0, 5.0),
            second,
        ];
        let products = aggregate_products(&txs);
        let ids: Vec<_> = products.iter().map(|p| p.product_id.as_str()).collect();
        assert_eq!(ids, ["B", "A"]);
        assert_eq!(products[1].product_name, "A name");
        assert_eq!(products[1].units, 2);
    }

    #[test]
    fn test_zero_revenue_margin_is_zero() {
        let p = &aggregate_products(&[tx("Q1", "P", "A", 0, 100.0, 50.0)])[0];
        assert_eq!(p.margin_pct, 0.0);
    }

    #[test]
    fn test_kpis() {
        let txs = [
            tx("Q1", "P1", "CVS", 10, 120.0, 80.0),
            tx("Q2", "P2", "MedCore", 4, 155.0, 110.0),
            tx("Q3", "P1", "CVS", 1, 100.0, 100.0),
        ];
        let products = aggregate_products(&txs);
        let kpis = compute_kpis(&txs, &products);
        assert!((kpis.total_revenue - 1920.0).abs() < 1e-9);
        assert!((kpis.total_cost - 1340.0).abs() < 1e-9);
        assert!((kpis.profit - 580.0).abs() < 1e-9);
        assert!((kpis.gross_margin_pct - 580.0 / 1920.0).abs() < 1e-12);
        assert_eq!(kpis.active_customers, 2);
        assert_eq!(kpis.active_products, 2);
    }

    #[test]
    fn test_empty_kpis() {
        let kpis = compute_kpis(&[], &[]);
        assert_eq!(kpis, Kpis::default());
    }

    #[test]
    fn test_trend_classification() {
        assert_eq!(Trend::classify(1200.0, 800.0), Trend::Up);
        assert_eq!(Trend::classify(1000.0, 950.0), Trend::Down);
        assert_eq!(Trend::classify(1200.0, 1000.0), Trend::Flat);
    }

    #[test]
    fn test_daily_series_sorted_by_date() {
        let mut early = tx("Q1", "P", "A", 1, 10.0, 5.0);
        early.date = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
        let late = tx("Q2", "P", "A", 2, 10.0, 9.0);
        let also_late = tx("Q3", "P", "B", 1, 20.0, 10.0);
        let series = daily_series(&[late, early, also_late]);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2025, 10, 1).unwrap());
        assert!((series[1].revenue - 40.0).abs() < 1e-9);
        assert!((series[1].cost - 28.0).abs() < 1e-9);
    }

    #[test]
    fn test_sort_products_is_stable() {
        let txs = [
            tx("Q1", "A", "X", 5, 10.0, 5.0),
            tx("Q2", "B", "X", 1, 10.0, 5.0),
            tx("Q3", "C", "X", 9, 10.0, 9.0),
        ];
        let mut products = aggregate_products(&txs);
        sort_products(&mut products, ProductSortKey::Margin, SortDirection::Desc);
        let ids: Vec<_> = products.iter().map(|p| p.product_id.as_str()).collect();
        assert_eq!(ids, ["A", "B", "C"]);

        sort_products(&mut products, ProductSortKey::Units, SortDirection::Asc);
        let ids: Vec<_> = products.iter().map(|p| p.product_id.as_str()).collect();
        assert_eq!(ids, ["B", "A", "C"]);
    }
}
