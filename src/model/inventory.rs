//! Inventory batches and velocity tiers.

use serde::{Deserialize, Serialize};

/// Sales-rate tier: A ≥ 2/wk, B = 0.5–2/wk, C < 0.5/wk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VelocityBucket {
    A,
    B,
    C,
}

impl VelocityBucket {
    #[must_use]
    pub const fn letter(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        }
    }
}

impl std::fmt::Display for VelocityBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.letter())
    }
}

/// On-hand stock for one product together with its short-term forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryBatch {
    pub product_id: String,
    pub product_name: String,
    pub on_hand_units: u32,
    pub velocity_bucket: VelocityBucket,
    /// Units expected to sell in the next 14 days.
    #[serde(rename = "forecast14d")]
    pub forecast_14d: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_days: Option<u32>,
}

impl InventoryBatch {
    /// On-hand stock will not cover the 14-day forecast.
    #[must_use]
    pub const fn is_stockout_risk(&self) -> bool {
        self.on_hand_units < self.forecast_14d
    }

    /// Units needed to hold two forecast windows of stock, never negative.
    #[must_use]
    pub const fn restock_suggestion(&self) -> u32 {
        (self.forecast_14d.saturating_mul(2)).saturating_sub(self.on_hand_units)
    }
}
