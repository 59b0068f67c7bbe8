//! **Sales-operations metrics, supplier scoring and margin-leak alerts.**
//!
//! `salesops-dash` turns three raw collections (quotes, supplier cost records
//! and inventory batches) into the figures a sales-ops team reviews every
//! week: revenue and margin KPIs, per-product performance, a SourceScore
//! ranking of supplier options, stockout risk and a list of quotes priced
//! below the 25% minimum margin.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the source records, [`Transaction`], [`SupplierCostRecord`]
//!   and [`InventoryBatch`].
//! - **[`sources`]**: the [`DataSource`] capability with a fixture and a live
//!   HTTP implementation.
//! - **[`metrics`]**: pure calculations. [`compose_snapshot`] bundles them into
//!   a [`Snapshot`]; [`detect_margin_leaks`] scans one for underpriced quotes.
//! - **[`alerts`]**: [`Alert`] values, the bounded [`AlertStore`] and the sinks
//!   alerts are delivered to.
//! - **[`schedule`]**: the weekly trigger and the margin-leak job loop.
//! - **[`reports`]**: summary, JSON and HTML renderers for a snapshot.
//! - **[`config`]**: YAML configuration with validation and env overrides.
//!
//! ## Getting Started
//!
//! ```
//! use chrono::Utc;
//! use salesops_dash::{detect_margin_leaks, load_snapshot, FixtureSource};
//!
//! let snapshot = load_snapshot(&FixtureSource::sample(), None, Utc::now())?;
//! let leaks = detect_margin_leaks(&snapshot);
//!
//! println!(
//!     "{} products, gross margin {:.1}%, {} leak(s)",
//!     snapshot.products.len(),
//!     snapshot.kpis.gross_margin_pct * 100.0,
//!     leaks.total_flagged
//! );
//! # Ok::<(), salesops_dash::SourceError>(())
//! ```
//!
//! ### Rendering the dashboard
//!
//! ```
//! use chrono::Utc;
//! use salesops_dash::reports::{create_reporter, ReportConfig, ReportFormat};
//! use salesops_dash::{build_dashboard, FixtureSource};
//!
//! let dashboard = build_dashboard(&FixtureSource::sample(), None, Utc::now())?;
//! let html = create_reporter(ReportFormat::Html).generate_dashboard(
//!     &dashboard.snapshot,
//!     &dashboard.leaks,
//!     &ReportConfig::default(),
//! )?;
//! assert!(html.contains("Product Performance"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(clippy::unwrap_used)]

pub mod alerts;
pub mod cli;
pub mod config;
pub mod error;
pub mod metrics;
pub mod model;
pub mod pipeline;
pub mod reports;
pub mod schedule;
pub mod sources;
pub mod utils;

// Re-export main types for convenience
pub use alerts::{Alert, AlertKind, AlertSink, AlertStore};
pub use error::{DashError, Result};
pub use metrics::{
    compose_snapshot, detect_margin_leaks, MarginLeakReport, ProductAggregate, Snapshot,
    SupplierScoreRow,
};
pub use model::{DateRange, InventoryBatch, Region, SupplierCostRecord, Transaction};
pub use pipeline::{build_dashboard, Dashboard};
pub use reports::{ReportFormat, ReportGenerator};
pub use schedule::{ScheduleConfig, WeeklyTrigger};
pub use sources::{load_snapshot, DataSource, FixtureSource, SourceError};
