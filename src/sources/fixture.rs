//! In-memory data source backed by sample data or a JSON fixture file.

use super::{DataSource, SourceError};
use crate::model::{
    DateRange, InventoryBatch, QuoteStatus, Region, SupplierCostRecord, Transaction, VelocityBucket,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The three collections as stored in a fixture file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FixtureData {
    pub transactions: Vec<Transaction>,
    pub supplier_costs: Vec<SupplierCostRecord>,
    pub inventory: Vec<InventoryBatch>,
}

/// Serves a fixed [`FixtureData`] set, filtering in memory.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    name: String,
    pub data: FixtureData,
}

impl FixtureSource {
    #[must_use]
    pub fn new(name: impl Into<String>, data: FixtureData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Load `{transactions, supplierCosts, inventory}` from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, SourceError> {
        let content = std::fs::read_to_string(path).map_err(|source| SourceError::FixtureIo {
            path: path.to_path_buf(),
            source,
        })?;
        let data: FixtureData =
            serde_json::from_str(&content).map_err(|source| SourceError::FixtureParse {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(path = %path.display(), "loaded fixture");
        Ok(Self::new(path.display().to_string(), data))
    }

    /// Built-in demo data set.
    #[must_use]
    pub fn sample() -> Self {
        Self::new("sample", sample_data())
    }
}

impl DataSource for FixtureSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn transactions(&self, range: Option<&DateRange>) -> Result<Vec<Transaction>, SourceError> {
        let mut txs: Vec<Transaction> = self
            .data
            .transactions
            .iter()
            .filter(|t| range.map_or(true, |r| r.contains(t.date)))
            .cloned()
            .collect();
        txs.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(txs)
    }

    fn supplier_costs(&self, product_id: Option<&str>) -> Result<Vec<SupplierCostRecord>, SourceError> {
        Ok(self
            .data
            .supplier_costs
            .iter()
            .filter(|r| product_id.map_or(true, |id| r.product_id == id))
            .cloned()
            .collect())
    }

    fn inventory(&self) -> Result<Vec<InventoryBatch>, SourceError> {
        Ok(self.data.inventory.clone())
    }
}

// ============================================================================
// Sample data
// ============================================================================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn quote(
    id: &str,
    day: u32,
    customer: &str,
    product: (&str, &str),
    units: u32,
    unit_price: f64,
    landed_cost: f64,
    lead_days: u32,
    reliability: f64,
    region: Region,
    status: QuoteStatus,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        date: date(2025, 10, day),
        customer: customer.to_string(),
        product_id: product.0.to_string(),
        product_name: product.1.to_string(),
        units,
        unit_price,
        landed_cost,
        lead_days: Some(lead_days),
        reliability: Some(reliability),
        region: Some(region),
        status,
    }
}

#[allow(clippy::too_many_arguments)]
fn supplier(
    supplier_id: &str,
    product_id: &str,
    region: Region,
    costs: (f64, f64, f64),
    reliability_score: f64,
    lead: (u32, u32),
    moq_units: u32,
    effective_day: u32,
) -> SupplierCostRecord {
    SupplierCostRecord {
        supplier_id: supplier_id.to_string(),
        product_id: product_id.to_string(),
        region,
        unit_cost: costs.0,
        shipping_est: costs.1,
        duties_est: costs.2,
        reliability_score,
        lead_min: lead.0,
        lead_max: lead.1,
        moq_units,
        effective_date: date(2025, 10, effective_day),
    }
}

fn batch(product: (&str, &str), on_hand: u32, bucket: VelocityBucket, forecast: u32) -> InventoryBatch {
    InventoryBatch {
        product_id: product.0.to_string(),
        product_name: product.1.to_string(),
        on_hand_units: on_hand,
        velocity_bucket: bucket,
        forecast_14d: forecast,
        expiry_days: None,
    }
}

fn sample_data() -> FixtureData {
    use QuoteStatus::{Accepted, Paid, Sent};
    use Region::{Cn, Us};

    const TRZ_10: (&str, &str) = ("TRZ-10", "Tirzepatide 10mg Kit");
    const TRZ_15: (&str, &str) = ("TRZ-15", "Tirzepatide 15mg Kit");
    const TRZ_30: (&str, &str) = ("TRZ-30", "Tirzepatide 30mg Kit");
    const GLOW_70: (&str, &str) = ("GLOW-70", "GLOW 70mg");
    const MOTS_10: (&str, &str) = ("MOTS-10", "MOTS-C 10mg");
    const RT_30: (&str, &str) = ("RT-30", "Retatrutide 30mg");

    FixtureData {
        transactions: vec![
            quote("Q-1001", 27, "CVS", TRZ_10, 10, 120.0, 80.0, 3, 0.92, Us, Paid),
            quote("Q-1002", 28, "MedCore", TRZ_15, 4, 155.0, 110.0, 5, 0.90, Us, Accepted),
            quote("Q-1003", 31, "RejuvLab", GLOW_70, 20, 165.0, 130.0, 2, 0.95, Us, Paid),
            quote("Q-1004", 25, "MedCore", MOTS_10, 30, 90.0, 65.0, 6, 0.88, Cn, Paid),
            quote("Q-1005", 23, "Mike", TRZ_30, 30, 115.0, 95.0, 5, 0.90, Cn, Paid),
            quote("Q-1006", 27, "CVS", RT_30, 15, 210.0, 180.0, 7, 0.85, Cn, Sent),
        ],
        supplier_costs: vec![
            supplier("SUP-US-01", "TRZ-10", Us, (70.0, 6.0, 4.0), 95.0, (2, 3), 1, 26),
            supplier("SUP-CN-02", "TRZ-10", Cn, (55.0, 10.0, 8.0), 88.0, (5, 7), 5, 25),
            supplier("SUP-US-01", "TRZ-15", Us, (100.0, 8.0, 5.0), 95.0, (3, 4), 1, 26),
            supplier("SUP-US-ELSA", "GLOW-70", Us, (145.0, 8.0, 0.0), 90.0, (2, 3), 1, 28),
            supplier("SUP-CN-ELSA", "MOTS-10", Cn, (65.0, 10.0, 0.0), 88.0, (5, 6), 10, 25),
            supplier("SUP-CN-ZHANG", "TRZ-30", Cn, (90.0, 4.0, 1.0), 90.0, (5, 6), 10, 8),
        ],
        inventory: vec![
            batch(TRZ_10, 60, VelocityBucket::A, 40),
            batch(TRZ_15, 20, VelocityBucket::B, 18),
            batch(TRZ_30, 15, VelocityBucket::B, 22),
            batch(GLOW_70, 37, VelocityBucket::A, 28),
            batch(MOTS_10, 30, VelocityBucket::B, 26),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_is_most_recent_first() {
        let txs = FixtureSource::sample().transactions(None).unwrap();
        let ids: Vec<_> = txs.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["Q-1003", "Q-1002", "Q-1001", "Q-1006", "Q-1004", "Q-1005"]);
    }

    #[test]
    fn test_range_filter_is_inclusive() {
        let range = DateRange::new(date(2025, 10, 25), date(2025, 10, 27));
        let txs = FixtureSource::sample().transactions(Some(&range)).unwrap();
        let ids: Vec<_> = txs.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["Q-1001", "Q-1006", "Q-1004"]);
    }

    #[test]
    fn test_supplier_filter() {
        let source = FixtureSource::sample();
        assert_eq!(source.supplier_costs(Some("TRZ-10")).unwrap().len(), 2);
        assert!(source.supplier_costs(Some("RT-30")).unwrap().is_empty());
        assert_eq!(source.supplier_costs(None).unwrap().len(), 6);
    }

    #[test]
    fn test_sample_landed_costs() {
        let source = FixtureSource::sample();
        let costs = source.supplier_costs(Some("TRZ-10")).unwrap();
        assert!((costs[0].landed_cost() - 80.0).abs() < 1e-9);
        assert!((costs[1].landed_cost() - 73.0).abs() < 1e-9);
    }
}
