//! HTTP data source.

use super::{DataSource, SourceError};
use crate::config::{EndpointConfig, SourceConfig};
use crate::model::{DateRange, InventoryBatch, SupplierCostRecord, Transaction};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// One collection endpoint with an optional bearer key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub url: String,
    pub api_key: Option<String>,
}

impl Endpoint {
    fn from_config(collection: &str, config: &EndpointConfig) -> Result<Self, SourceError> {
        let url = config
            .url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| SourceError::MissingEndpoint(collection.to_string()))?;
        Ok(Self {
            url: url.to_string(),
            api_key: config.api_key.clone(),
        })
    }
}

/// Collections come back either bare or wrapped in `{ "items": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListResponse<T> {
    Bare(Vec<T>),
    Wrapped { items: Vec<T> },
}

impl<T> ListResponse<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            Self::Bare(items) | Self::Wrapped { items } => items,
        }
    }
}

/// Reads each collection from its own HTTP endpoint.
pub struct HttpSource {
    client: Client,
    quotes: Endpoint,
    supplier_costs: Endpoint,
    inventory: Endpoint,
}

impl HttpSource {
    pub fn new(
        quotes: Endpoint,
        supplier_costs: Endpoint,
        inventory: Endpoint,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SourceError::Network {
                collection: "client".to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            client,
            quotes,
            supplier_costs,
            inventory,
        })
    }

    pub fn from_config(config: &SourceConfig) -> Result<Self, SourceError> {
        let endpoints = &config.endpoints;
        Self::new(
            Endpoint::from_config("quotes", &endpoints.quotes)?,
            Endpoint::from_config("supplier_costs", &endpoints.supplier_costs)?,
            Endpoint::from_config("inventory", &endpoints.inventory)?,
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn fetch<T: DeserializeOwned>(
        &self,
        collection: &str,
        endpoint: &Endpoint,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, SourceError> {
        let mut request = self
            .client
            .get(&endpoint.url)
            .header(reqwest::header::ACCEPT, "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(ref key) = endpoint.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().map_err(|e| SourceError::Network {
            collection: collection.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                collection: collection.to_string(),
                status: status.as_u16(),
            });
        }

        let body: ListResponse<T> = response.json().map_err(|e| SourceError::InvalidResponse {
            collection: collection.to_string(),
            message: e.to_string(),
        })?;
        let items = body.into_items();
        tracing::debug!(collection, count = items.len(), "fetched");
        Ok(items)
    }
}

/// Backends may return quotes in any order.
fn sort_most_recent_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
}

impl DataSource for HttpSource {
    fn name(&self) -> &str {
        "live"
    }

    fn transactions(&self, range: Option<&DateRange>) -> Result<Vec<Transaction>, SourceError> {
        let query: Vec<(&str, String)> = range
            .map(|r| vec![("start", r.start.to_string()), ("end", r.end.to_string())])
            .unwrap_or_default();
        let mut transactions: Vec<Transaction> = self.fetch("quotes", &self.quotes, &query)?;
        sort_most_recent_first(&mut transactions);
        Ok(transactions)
    }

    fn supplier_costs(&self, product_id: Option<&str>) -> Result<Vec<SupplierCostRecord>, SourceError> {
        let query: Vec<(&str, String)> = product_id
            .map(|id| vec![("productId", id.to_string())])
            .unwrap_or_default();
        self.fetch("supplier_costs", &self.supplier_costs, &query)
    }

    fn inventory(&self) -> Result<Vec<InventoryBatch>, SourceError> {
        self.fetch("inventory", &self.inventory, &[])
    }
}
