//! Metrics and scoring engine.
//!
//! Everything in here is pure and total: functions take borrowed input
//! collections and return freshly computed values without I/O. Malformed
//! numbers degrade to floor values rather than errors.
//!
//! - [`calc`]: margin, speed and composite score primitives
//! - [`aggregate`]: per-product rollups, KPIs, daily series
//! - [`suppliers`]: SourceScore ranking of supplier options
//! - [`leaks`]: quotes below the minimum margin
//! - [`stock`]: stockout risk
//! - [`snapshot`]: composes all of the above

pub mod aggregate;
pub mod calc;
pub mod leaks;
pub mod snapshot;
pub mod stock;
pub mod suppliers;

pub use aggregate::{
    aggregate_products, compute_kpis, daily_series, sort_products, DailyPoint, Kpis,
    ProductAggregate, ProductSortKey, SortDirection, Trend,
};
pub use calc::{
    clamp01, margin_pct, normalize_speed, source_score, BASE_MARGIN_MIN, LEAK_THRESHOLD,
};
pub use leaks::{detect_margin_leaks, detect_margin_leaks_at, MarginLeakReport, MarginLeakRow};
pub use snapshot::{compose_snapshot, Snapshot};
pub use stock::{stock_risk_alert, stock_risks, StockRiskRow};
pub use suppliers::{rank_all, rank_suppliers, reference_price, SupplierScoreRow};
