//! Supplier ranking by composite SourceScore.

use super::aggregate::ProductAggregate;
use super::calc::{clamp01, normalize_speed, source_score, BASE_MARGIN_MIN};
use crate::model::{Region, SupplierCostRecord, Transaction};
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One scored supplier option for a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierScoreRow {
    pub supplier_id: String,
    pub region: Region,
    pub landed_cost: f64,
    /// Lead window label, e.g. `5-7d`.
    pub lead: String,
    /// Raw reliability, 0-100.
    pub reliability: f64,
    pub moq: u32,
    pub effective_date: NaiveDate,
    pub margin_score: f64,
    pub speed_score: f64,
    pub reliability_score: f64,
    pub source_score: f64,
}

/// Unit price of the most recent transaction for `product_id`.
///
/// Input order does not matter; quotes sharing the latest date resolve to
/// the first one seen.
#[must_use]
pub fn reference_price(transactions: &[Transaction], product_id: &str) -> Option<f64> {
    transactions
        .iter()
        .filter(|t| t.product_id == product_id)
        .reduce(|latest, t| if t.date > latest.date { t } else { latest })
        .map(|t| t.unit_price)
}

/// Score and rank supplier records, highest SourceScore first.
///
/// Without a reference price each record is priced at its own landed cost
/// marked up by [`BASE_MARGIN_MIN`]. Ties keep input order.
#[must_use]
pub fn rank_suppliers(
    records: &[SupplierCostRecord],
    reference_price: Option<f64>,
) -> Vec<SupplierScoreRow> {
    let mut rows: Vec<SupplierScoreRow> = records
        .iter()
        .map(|record| score_record(record, reference_price))
        .collect();
    rows.sort_by(|a, b| b.source_score.total_cmp(&a.source_score));
    rows
}

fn score_record(record: &SupplierCostRecord, reference_price: Option<f64>) -> SupplierScoreRow {
    let landed = record.landed_cost();
    let price = reference_price.unwrap_or(landed * (1.0 + BASE_MARGIN_MIN));

    let margin_score = if price > 0.0 {
        clamp01((price - landed) / price)
    } else {
        0.0
    };
    let speed_score = clamp01(normalize_speed(Some(f64::from(record.lead_min))));
    let reliability_score = clamp01(record.reliability_score / 100.0);

    SupplierScoreRow {
        supplier_id: record.supplier_id.clone(),
        region: record.region,
        landed_cost: landed,
        lead: record.lead_label(),
        reliability: record.reliability_score,
        moq: record.moq_units,
        effective_date: record.effective_date,
        margin_score,
        speed_score,
        reliability_score,
        source_score: source_score(margin_score, speed_score, reliability_score),
    }
}

/// Rankings for every aggregated product, keyed by product id.
///
/// Products without supplier records map to an empty list.
#[must_use]
pub fn rank_all(
    transactions: &[Transaction],
    supplier_costs: &[SupplierCostRecord],
    products: &[ProductAggregate],
) -> IndexMap<String, Vec<SupplierScoreRow>> {
    products
        .iter()
        .map(|product| {
            let records: Vec<SupplierCostRecord> = supplier_costs
                .iter()
                .filter(|r| r.product_id == product.product_id)
                .cloned()
                .collect();
            let price = reference_price(transactions, &product.product_id);
            tracing::trace!(
                product = %product.product_id,
                suppliers = records.len(),
                "ranking suppliers"
            );
            (product.product_id.clone(), rank_suppliers(&records, price))
        })
        .collect()
}
