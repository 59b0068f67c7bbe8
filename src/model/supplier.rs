//! Supplier cost records.

use super::Region;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A supplier's quoted cost structure for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierCostRecord {
    pub supplier_id: String,
    pub product_id: String,
    pub region: Region,
    pub unit_cost: f64,
    pub shipping_est: f64,
    pub duties_est: f64,
    /// Reliability on a 0-100 scale.
    pub reliability_score: f64,
    pub lead_min: u32,
    pub lead_max: u32,
    pub moq_units: u32,
    pub effective_date: NaiveDate,
}

impl SupplierCostRecord {
    /// Unit cost plus shipping and duties estimates.
    #[must_use]
    pub fn landed_cost(&self) -> f64 {
        self.unit_cost + self.shipping_est + self.duties_est
    }

    /// Lead-time window as displayed on the dashboard, e.g. `2-3d`.
    #[must_use]
    pub fn lead_label(&self) -> String {
        format!("{}-{}d", self.lead_min, self.lead_max)
    }
}
