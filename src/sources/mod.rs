//! Data sources for quotes, supplier costs and inventory.
//!
//! The metrics engine never fetches anything itself. A [`DataSource`]
//! supplies the three input collections, either from fixture data
//! ([`FixtureSource`]) or from HTTP endpoints (`HttpSource`, feature
//! `live`). Which one is used is decided by configuration; a failing live
//! source reports its error rather than silently switching to sample data.

mod fixture;
#[cfg(feature = "live")]
mod live;

pub use fixture::{FixtureData, FixtureSource};
#[cfg(feature = "live")]
pub use live::{Endpoint, HttpSource};

use crate::config::{SourceConfig, SourceMode};
use crate::metrics::{compose_snapshot, Snapshot};
use crate::model::{CustomerLastPrices, DateRange, InventoryBatch, SupplierCostRecord, Transaction};
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Errors raised while fetching source data.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("failed to read fixture {}: {source}", path.display())]
    FixtureIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid fixture {}: {source}", path.display())]
    FixtureParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{collection} request failed: {message}")]
    Network { collection: String, message: String },

    #[error("{collection} endpoint returned HTTP {status}")]
    Status { collection: String, status: u16 },

    #[error("{collection} response could not be parsed: {message}")]
    InvalidResponse { collection: String, message: String },

    #[error("no endpoint configured for {0}")]
    MissingEndpoint(String),

    #[error("live data sources require the `live` feature")]
    LiveUnavailable,
}

/// Supplier of the three input collections.
pub trait DataSource {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Transactions, most recent first, optionally limited to `range`.
    fn transactions(&self, range: Option<&DateRange>) -> Result<Vec<Transaction>, SourceError>;

    /// Supplier cost records, optionally for a single product.
    fn supplier_costs(&self, product_id: Option<&str>) -> Result<Vec<SupplierCostRecord>, SourceError>;

    /// Current inventory batches.
    fn inventory(&self) -> Result<Vec<InventoryBatch>, SourceError>;

    /// The latest prices `customer` paid for `product_id`, newest first.
    ///
    /// Derived from the full transaction history.
    fn customer_last_prices(
        &self,
        customer: &str,
        product_id: &str,
    ) -> Result<CustomerLastPrices, SourceError> {
        let transactions = self.transactions(None)?;
        Ok(CustomerLastPrices::from_transactions(&transactions, customer, product_id))
    }
}

/// Pick a data source implementation from configuration.
pub fn build_source(config: &SourceConfig) -> Result<Box<dyn DataSource>, SourceError> {
    match config.mode {
        SourceMode::Fixture => match &config.fixture_path {
            Some(path) => Ok(Box::new(FixtureSource::from_file(path)?)),
            None => Ok(Box::new(FixtureSource::sample())),
        },
        #[cfg(feature = "live")]
        SourceMode::Live => Ok(Box::new(HttpSource::from_config(config)?)),
        #[cfg(not(feature = "live"))]
        SourceMode::Live => Err(SourceError::LiveUnavailable),
    }
}

/// Fetch all three collections and compose a snapshot stamped `now`.
pub fn load_snapshot(
    source: &dyn DataSource,
    range: Option<&DateRange>,
    now: DateTime<Utc>,
) -> Result<Snapshot, SourceError> {
    tracing::debug!(source = source.name(), "loading snapshot");
    let transactions = source.transactions(range)?;
    let supplier_costs = source.supplier_costs(None)?;
    let inventory = source.inventory()?;
    tracing::info!(
        source = source.name(),
        transactions = transactions.len(),
        supplier_costs = supplier_costs.len(),
        inventory = inventory.len(),
        "source data loaded"
    );
    Ok(compose_snapshot(transactions, supplier_costs, inventory, now))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_builds_sample_source() {
        let source = build_source(&SourceConfig::default()).unwrap();
        assert_eq!(source.name(), "sample");
        assert_eq!(source.transactions(None).unwrap().len(), 6);
    }

    #[test]
    fn test_missing_fixture_file_is_an_error() {
        let config = SourceConfig {
            fixture_path: Some(PathBuf::from("/nonexistent/fixture.json")),
            ..SourceConfig::default()
        };
        assert!(matches!(build_source(&config), Err(SourceError::FixtureIo { .. })));
    }

    #[test]
    fn test_load_snapshot_from_sample() {
        let now = Utc::now();
        let snap = load_snapshot(&FixtureSource::sample(), None, now).unwrap();
        assert_eq!(snap.generated_at, now);
        assert_eq!(snap.products.len(), 6);
        assert_eq!(snap.inventory.len(), 5);
    }
}
