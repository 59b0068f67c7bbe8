//! Integration tests for the metrics engine.

use chrono::{NaiveDate, TimeZone, Utc};
use salesops_dash::metrics::{
    aggregate_products, compose_snapshot, detect_margin_leaks, detect_margin_leaks_at,
    margin_pct, rank_suppliers, sort_products, ProductSortKey, SortDirection,
};
use salesops_dash::model::{
    InventoryBatch, QuoteStatus, Region, SupplierCostRecord, Transaction, VelocityBucket,
};
use salesops_dash::{load_snapshot, FixtureSource};

fn tx(id: &str, product: &str, units: u32, price: f64, cost: f64) -> Transaction {
    Transaction {
        id: id.to_string(),
        date: NaiveDate::from_ymd_opt(2025, 10, 28).unwrap(),
        customer: "Acme Labs".to_string(),
        product_id: product.to_string(),
        product_name: format!("{product} 10mg"),
        units,
        unit_price: price,
        landed_cost: cost,
        lead_days: None,
        reliability: None,
        region: None,
        status: QuoteStatus::Accepted,
    }
}

fn supplier(id: &str, unit_cost: f64, shipping: f64, duties: f64, lead_min: u32) -> SupplierCostRecord {
    SupplierCostRecord {
        supplier_id: id.to_string(),
        product_id: "P1".to_string(),
        region: Region::Cn,
        unit_cost,
        shipping_est: shipping,
        duties_est: duties,
        reliability_score: 90.0,
        lead_min,
        lead_max: lead_min + 2,
        moq_units: 50,
        effective_date: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
    }
}

fn sample_snapshot() -> salesops_dash::Snapshot {
    let now = Utc.with_ymd_and_hms(2025, 11, 3, 13, 30, 0).unwrap();
    load_snapshot(&FixtureSource::sample(), None, now).unwrap()
}

// ============================================================================
// Aggregation
// ============================================================================

#[test]
fn test_single_transaction_product() {
    let products = aggregate_products(&[tx("Q1", "P1", 10, 120.0, 80.0)]);
    assert_eq!(products.len(), 1);
    let p = &products[0];
    assert!((p.revenue - 1200.0).abs() < 1e-9);
    assert!((p.cost - 800.0).abs() < 1e-9);
    assert!((p.margin_pct - 1.0 / 3.0).abs() < 1e-9);
    assert_eq!(p.units, 10);
}

#[test]
fn test_product_margin_uses_totals() {
    // 1 unit at 50% and 9 units at 10% is not a 30% average
    let products = aggregate_products(&[
        tx("Q1", "P1", 1, 100.0, 50.0),
        tx("Q2", "P1", 9, 100.0, 90.0),
    ]);
    let p = &products[0];
    assert!((p.revenue - 1000.0).abs() < 1e-9);
    assert!((p.cost - 860.0).abs() < 1e-9);
    assert!((p.margin_pct - 0.14).abs() < 1e-9);
}

#[test]
fn test_products_keep_first_seen_order() {
    let products = aggregate_products(&[
        tx("Q1", "B", 1, 10.0, 5.0),
        tx("Q2", "A", 1, 10.0, 5.0),
        tx("Q3", "B", 1, 10.0, 5.0),
    ]);
    let ids: Vec<&str> = products.iter().map(|p| p.product_id.as_str()).collect();
    assert_eq!(ids, vec!["B", "A"]);
    assert_eq!(products[0].units, 2);
}

#[test]
fn test_empty_inputs_give_zero_kpis() {
    let snap = compose_snapshot(Vec::new(), Vec::new(), Vec::new(), Utc::now());
    assert!(snap.products.is_empty());
    assert_eq!(snap.kpis.total_revenue, 0.0);
    assert_eq!(snap.kpis.gross_margin_pct, 0.0);
    assert_eq!(snap.kpis.active_customers, 0);
    assert!(snap.top_revenue_product().is_none());
}

// ============================================================================
// Sample data set
// ============================================================================

#[test]
fn test_sample_kpis() {
    let snap = sample_snapshot();
    assert!((snap.kpis.total_revenue - 14_420.0).abs() < 1e-6);
    assert!((snap.kpis.total_cost - 11_340.0).abs() < 1e-6);
    assert!((snap.kpis.profit - 3_080.0).abs() < 1e-6);
    assert!((snap.kpis.gross_margin_pct - 3_080.0 / 14_420.0).abs() < 1e-9);
    assert_eq!(snap.kpis.active_products, 6);
    assert_eq!(snap.kpis.active_customers, 4);
}

#[test]
fn test_sample_top_product_and_best_source() {
    let snap = sample_snapshot();
    let top = snap.top_revenue_product().unwrap();
    assert_eq!(top.product_id, "TRZ-30");

    let best = snap.suppliers_for("TRZ-30").first().unwrap();
    assert_eq!(best.supplier_id, "SUP-CN-ZHANG");
}

#[test]
fn test_sample_stock_risk() {
    let snap = sample_snapshot();
    let ids: Vec<&str> = snap.stock_risks.iter().map(|r| r.product_id.as_str()).collect();
    assert_eq!(ids, vec!["TRZ-30"]);
}

#[test]
fn test_sample_sort_by_units() {
    let mut products = sample_snapshot().products;
    sort_products(&mut products, ProductSortKey::Units, SortDirection::Asc);
    let units: Vec<u64> = products.iter().map(|p| p.units).collect();
    assert_eq!(units, vec![4, 10, 15, 20, 30, 30]);

    sort_products(&mut products, ProductSortKey::Margin, SortDirection::Desc);
    assert_eq!(products[0].product_id, "TRZ-10");
}

// ============================================================================
// Margin leaks
// ============================================================================

#[test]
fn test_leak_example() {
    assert!((margin_pct(100.0, 90.0) - 0.10).abs() < 1e-9);
    let report = detect_margin_leaks_at(&[tx("Q1", "P1", 1, 100.0, 90.0)], Utc::now());
    assert_eq!(report.total_flagged, 1);
    assert_eq!(report.alert.message, "Detected 1 quotes below 25% margin.");
}

#[test]
fn test_threshold_is_exclusive() {
    // exactly 25% is not a leak
    let report = detect_margin_leaks_at(&[tx("Q1", "P1", 1, 100.0, 75.0)], Utc::now());
    assert_eq!(report.total_flagged, 0);
    assert!(!report.has_leaks());
    assert_eq!(report.alert.message, "No margin leaks detected.");
}

#[test]
fn test_healthy_quote_not_flagged() {
    let report = detect_margin_leaks_at(&[tx("Q1", "P1", 10, 120.0, 80.0)], Utc::now());
    assert!(report.rows.is_empty());
}

#[test]
fn test_sample_leaks_sorted_worst_first() {
    let report = detect_margin_leaks(&sample_snapshot());
    let ids: Vec<&str> = report.rows.iter().map(|r| r.quote_id.as_str()).collect();
    assert_eq!(ids, vec!["Q-1006", "Q-1005", "Q-1003"]);
    assert_eq!(report.generated_at_et, "2025-11-03T08:30:00-05:00");
    assert_eq!(report.alert.created_at, report.generated_at_et);
    assert_eq!(report.alert.rows.as_array().unwrap().len(), 3);
}

// ============================================================================
// Supplier ranking
// ============================================================================

#[test]
fn test_landed_cost_sums_components() {
    let record = supplier("S1", 70.0, 6.0, 4.0, 3);
    assert!((record.landed_cost() - 80.0).abs() < 1e-9);
}

#[test]
fn test_faster_supplier_wins_at_equal_cost() {
    let rows = rank_suppliers(
        &[supplier("SLOW", 70.0, 6.0, 4.0, 10), supplier("FAST", 70.0, 6.0, 4.0, 2)],
        Some(120.0),
    );
    assert_eq!(rows[0].supplier_id, "FAST");
    assert!(rows[0].source_score >= rows[1].source_score);
}

#[test]
fn test_missing_reference_price_uses_markup() {
    let rows = rank_suppliers(&[supplier("S1", 70.0, 6.0, 4.0, 3)], None);
    // priced at landed * 1.30, so margin is 0.3 / 1.3
    assert!((rows[0].margin_score - 0.3 / 1.3).abs() < 1e-9);
}

#[test]
fn test_supplier_loss_clamps_margin_score() {
    let rows = rank_suppliers(&[supplier("S1", 200.0, 0.0, 0.0, 3)], Some(100.0));
    assert_eq!(rows[0].margin_score, 0.0);
}

#[test]
fn test_snapshot_scores_against_latest_price_in_any_order() {
    let mut early = tx("Q-1", "P1", 1, 100.0, 70.0);
    early.date = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
    let mut late = tx("Q-2", "P1", 1, 200.0, 70.0);
    late.date = NaiveDate::from_ymd_opt(2025, 10, 30).unwrap();
    let suppliers = vec![supplier("S1", 70.0, 6.0, 4.0, 3)];

    for txs in [vec![early.clone(), late.clone()], vec![late.clone(), early.clone()]] {
        let snap = compose_snapshot(txs, suppliers.clone(), Vec::new(), Utc::now());
        // landed 80 against the Oct 30 price of 200
        let row = &snap.suppliers_for("P1")[0];
        assert!((row.margin_score - 0.6).abs() < 1e-9);
    }
}

// ============================================================================
// Inventory
// ============================================================================

#[test]
fn test_restock_suggestion_never_negative() {
    let batch = InventoryBatch {
        product_id: "P1".to_string(),
        product_name: "P1 10mg".to_string(),
        on_hand_units: 500,
        velocity_bucket: VelocityBucket::C,
        forecast_14d: 10,
        expiry_days: None,
    };
    assert!(!batch.is_stockout_risk());
    assert_eq!(batch.restock_suggestion(), 0);
}
