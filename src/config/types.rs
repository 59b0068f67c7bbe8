//! Configuration types for salesops-dash.
//!
//! One [`AppConfig`] covers every subcommand: where data comes from, when the
//! weekly job fires, where alerts go and how reports are rendered.

use super::defaults::{
    DEFAULT_HOUR, DEFAULT_MINUTE, DEFAULT_TICK_INTERVAL, DEFAULT_TIMEOUT_SECS, DEFAULT_TIMEZONE,
    DEFAULT_WEEKDAY,
};
use crate::alerts::DEFAULT_ALERT_CAPACITY;
use crate::reports::ReportConfig;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// It can be constructed from CLI arguments, config files, or both (with CLI
/// overriding file settings). Endpoint URLs and keys can also come from the
/// environment, see [`AppConfig::apply_env_overrides`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Where quotes, supplier costs and inventory are read from
    pub source: SourceConfig,
    /// Weekly margin-leak job timing
    pub schedule: ScheduleSettings,
    /// Alert store and delivery
    pub alerts: AlertsConfig,
    /// Dashboard rendering
    pub report: ReportConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Read data from a JSON fixture file.
    pub fn fixture_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.source.mode = SourceMode::Fixture;
        self.config.source.fixture_path = Some(path.into());
        self
    }

    /// Switch to live HTTP endpoints.
    pub const fn live(mut self) -> Self {
        self.config.source.mode = SourceMode::Live;
        self
    }

    /// Set the quotes endpoint.
    pub fn quotes_url(mut self, url: impl Into<String>) -> Self {
        self.config.source.endpoints.quotes.url = Some(url.into());
        self
    }

    /// Set the supplier costs endpoint.
    pub fn supplier_costs_url(mut self, url: impl Into<String>) -> Self {
        self.config.source.endpoints.supplier_costs.url = Some(url.into());
        self
    }

    /// Set the inventory endpoint.
    pub fn inventory_url(mut self, url: impl Into<String>) -> Self {
        self.config.source.endpoints.inventory.url = Some(url.into());
        self
    }

    /// Set the scheduler tick interval, e.g. `30s`.
    pub fn tick_interval(mut self, interval: impl Into<String>) -> Self {
        self.config.schedule.tick_interval = interval.into();
        self
    }

    /// Run the job once as soon as the scheduler starts.
    pub const fn run_on_start(mut self, enabled: bool) -> Self {
        self.config.schedule.run_on_start = enabled;
        self
    }

    /// Set the alert webhook.
    pub fn webhook_url(mut self, url: Option<String>) -> Self {
        self.config.alerts.webhook_url = url;
        self
    }

    /// Set the report output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.report.file = file;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.report.no_color = no_color;
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Source Configuration
// ============================================================================

/// Which [`DataSource`](crate::sources::DataSource) implementation to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    /// Built-in sample data, or a JSON fixture file when `fixture_path` is set
    #[default]
    Fixture,
    /// HTTP endpoints
    Live,
}

/// Data source configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SourceConfig {
    /// Source implementation
    pub mode: SourceMode,
    /// JSON fixture file with `transactions`, `supplierCosts` and `inventory`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixture_path: Option<PathBuf>,
    /// Live endpoints, one per collection
    pub endpoints: EndpointsConfig,
    /// HTTP request timeout in seconds
    #[schemars(range(min = 1))]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            mode: SourceMode::Fixture,
            fixture_path: None,
            endpoints: EndpointsConfig::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Live endpoint set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EndpointsConfig {
    pub quotes: EndpointConfig,
    pub supplier_costs: EndpointConfig,
    pub inventory: EndpointConfig,
}

/// One HTTP collection endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EndpointConfig {
    /// Collection URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Sent as `Authorization: Bearer <key>`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

// ============================================================================
// Schedule Configuration
// ============================================================================

/// When the weekly margin-leak job fires, in civil time of `timezone`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScheduleSettings {
    /// Day of week, e.g. `monday`
    pub weekday: String,
    /// Hour of day, 0-23
    #[schemars(range(max = 23))]
    pub hour: u32,
    /// Minute of hour, 0-59
    #[schemars(range(max = 59))]
    pub minute: u32,
    /// IANA time zone name
    pub timezone: String,
    /// How often the trigger is checked, e.g. `60s`
    pub tick_interval: String,
    /// Run the job once immediately when the scheduler starts
    pub run_on_start: bool,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            weekday: DEFAULT_WEEKDAY.to_string(),
            hour: DEFAULT_HOUR,
            minute: DEFAULT_MINUTE,
            timezone: DEFAULT_TIMEZONE.to_string(),
            tick_interval: DEFAULT_TICK_INTERVAL.to_string(),
            run_on_start: false,
        }
    }
}

// ============================================================================
// Alerts Configuration
// ============================================================================

/// Alert store and delivery configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AlertsConfig {
    /// Alerts kept in memory, newest first
    #[schemars(range(min = 1))]
    pub capacity: usize,
    /// POST every alert to this URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_ALERT_CAPACITY,
            webhook_url: None,
        }
    }
}
