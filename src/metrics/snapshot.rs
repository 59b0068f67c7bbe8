//! Immutable bundle of inputs and derived metrics for one reporting run.

use super::aggregate::{aggregate_products, compute_kpis, daily_series, DailyPoint, Kpis, ProductAggregate};
use super::stock::{stock_risks, StockRiskRow};
use super::suppliers::{rank_all, SupplierScoreRow};
use crate::model::{InventoryBatch, SupplierCostRecord, Transaction};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Everything the dashboard shows, computed from one set of inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub generated_at: DateTime<Utc>,
    pub transactions: Vec<Transaction>,
    pub supplier_costs: Vec<SupplierCostRecord>,
    pub inventory: Vec<InventoryBatch>,
    pub products: Vec<ProductAggregate>,
    pub kpis: Kpis,
    pub suppliers_by_product: IndexMap<String, Vec<SupplierScoreRow>>,
    pub stock_risks: Vec<StockRiskRow>,
    pub daily: Vec<DailyPoint>,
}

impl Snapshot {
    /// Product with the highest revenue; the first one wins ties.
    #[must_use]
    pub fn top_revenue_product(&self) -> Option<&ProductAggregate> {
        self.products.iter().fold(None, |best, p| match best {
            Some(b) if b.revenue >= p.revenue => Some(b),
            _ => Some(p),
        })
    }

    /// Supplier ranking for `product_id`, empty if the product is unknown.
    #[must_use]
    pub fn suppliers_for(&self, product_id: &str) -> &[SupplierScoreRow] {
        self.suppliers_by_product
            .get(product_id)
            .map_or(&[], Vec::as_slice)
    }
}

/// Compute every derived metric for the given inputs.
///
/// Total: empty inputs produce an empty snapshot with zeroed KPIs.
#[must_use]
pub fn compose_snapshot(
    transactions: Vec<Transaction>,
    supplier_costs: Vec<SupplierCostRecord>,
    inventory: Vec<InventoryBatch>,
    generated_at: DateTime<Utc>,
) -> Snapshot {
    let products = aggregate_products(&transactions);
    let kpis = compute_kpis(&transactions, &products);
    let suppliers_by_product = rank_all(&transactions, &supplier_costs, &products);
    let risks = stock_risks(&inventory);
    let daily = daily_series(&transactions);

    tracing::debug!(
        transactions = transactions.len(),
        products = products.len(),
        stock_risks = risks.len(),
        "composed snapshot"
    );

    Snapshot {
        generated_at,
        transactions,
        supplier_costs,
        inventory,
        products,
        kpis,
        suppliers_by_product,
        stock_risks: risks,
        daily,
    }
}
