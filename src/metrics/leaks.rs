//! Margin-leak detection.

use super::calc::{margin_pct, LEAK_THRESHOLD};
use super::snapshot::Snapshot;
use crate::alerts::{Alert, AlertKind};
use crate::model::Transaction;
use crate::utils::eastern_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A quote priced below the minimum margin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginLeakRow {
    pub quote_id: String,
    pub product_name: String,
    pub customer: String,
    pub unit_price: f64,
    pub landed_cost: f64,
    pub margin_pct: f64,
}

/// Result of one margin-leak scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginLeakReport {
    /// New York civil time of the scan, minute precision.
    pub generated_at_et: String,
    pub total_flagged: usize,
    /// Worst margin first.
    pub rows: Vec<MarginLeakRow>,
    pub alert: Alert,
}

impl MarginLeakReport {
    #[must_use]
    pub fn has_leaks(&self) -> bool {
        self.total_flagged > 0
    }
}

/// Scan a snapshot's transactions, stamped with the snapshot's reference time.
#[must_use]
pub fn detect_margin_leaks(snapshot: &Snapshot) -> MarginLeakReport {
    detect_margin_leaks_at(&snapshot.transactions, snapshot.generated_at)
}

/// Flag every transaction below [`LEAK_THRESHOLD`], sorted ascending by margin.
#[must_use]
pub fn detect_margin_leaks_at(transactions: &[Transaction], now: DateTime<Utc>) -> MarginLeakReport {
    let mut rows: Vec<MarginLeakRow> = transactions
        .iter()
        .filter_map(|tx| {
            let margin = margin_pct(tx.unit_price, tx.landed_cost);
            (margin < LEAK_THRESHOLD).then(|| MarginLeakRow {
                quote_id: tx.id.clone(),
                product_name: tx.product_name.clone(),
                customer: tx.customer.clone(),
                unit_price: tx.unit_price,
                landed_cost: tx.landed_cost,
                margin_pct: margin,
            })
        })
        .collect();
    rows.sort_by(|a, b| a.margin_pct.total_cmp(&b.margin_pct));

    let generated_at_et = eastern_timestamp(now);
    let message = if rows.is_empty() {
        "No margin leaks detected.".to_string()
    } else {
        format!("Detected {} quotes below 25% margin.", rows.len())
    };
    let alert = Alert {
        kind: AlertKind::MarginLeak,
        title: "Margin Leak Snapshot".to_string(),
        message,
        created_at: generated_at_et.clone(),
        rows: serde_json::to_value(&rows).unwrap_or_default(),
    };

    tracing::debug!(flagged = rows.len(), "margin leak scan complete");

    MarginLeakReport {
        generated_at_et,
        total_flagged: rows.len(),
        rows,
        alert,
    }
}
