//! Stockout risk.

use crate::alerts::{Alert, AlertKind};
use crate::model::{InventoryBatch, VelocityBucket};
use crate::utils::eastern_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An inventory line that will not cover its 14-day forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRiskRow {
    pub product_id: String,
    pub product_name: String,
    pub on_hand_units: u32,
    #[serde(rename = "forecast14d")]
    pub forecast_14d: u32,
    pub velocity_bucket: VelocityBucket,
    /// Suggested order quantity: two forecast windows minus stock on hand.
    pub restock_units: u32,
}

impl From<&InventoryBatch> for StockRiskRow {
    fn from(batch: &InventoryBatch) -> Self {
        Self {
            product_id: batch.product_id.clone(),
            product_name: batch.product_name.clone(),
            on_hand_units: batch.on_hand_units,
            forecast_14d: batch.forecast_14d,
            velocity_bucket: batch.velocity_bucket,
            restock_units: batch.restock_suggestion(),
        }
    }
}

/// Batches at risk of stocking out, in input order.
#[must_use]
pub fn stock_risks(inventory: &[InventoryBatch]) -> Vec<StockRiskRow> {
    inventory
        .iter()
        .filter(|b| b.is_stockout_risk())
        .map(StockRiskRow::from)
        .collect()
}

/// Stockout alert for the at-risk lines, or `None` when every line is covered.
///
/// The message lists one line per product with its restock suggestion.
#[must_use]
pub fn stock_risk_alert(risks: &[StockRiskRow], now: DateTime<Utc>) -> Option<Alert> {
    if risks.is_empty() {
        return None;
    }
    let message = risks
        .iter()
        .map(|r| {
            format!(
                "{}: In-stock {} < 14d forecast {}. Suggest restock {} units.",
                r.product_name, r.on_hand_units, r.forecast_14d, r.restock_units
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    Some(Alert {
        kind: AlertKind::StockRisk,
        title: "Stockout Risks".to_string(),
        message,
        created_at: eastern_timestamp(now),
        rows: serde_json::to_value(risks).unwrap_or_default(),
    })
}
