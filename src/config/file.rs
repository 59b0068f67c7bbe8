//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery,
//! plus environment overrides for live endpoints.

use super::defaults::env;
use super::types::{AppConfig, EndpointConfig, SourceMode};
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".salesops-dash.yaml",
    ".salesops-dash.yml",
    "salesops-dash.yaml",
    "salesops-dash.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/salesops-dash/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Some(path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_in_dir(&cwd))
    {
        return Some(path);
    }

    if let Some(path) = find_git_root().and_then(|root| find_config_in_dir(&root)) {
        return Some(path);
    }

    if let Some(path) =
        user_config_dir().and_then(|dir| find_config_in_dir(&dir))
    {
        return Some(path);
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// `~/.config/salesops-dash` (platform equivalent).
#[must_use]
pub fn user_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("salesops-dash"))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml_ng::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml_ng::Error> for ConfigFileError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml_ng::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from their defaults override; this is how CLI
    /// args are layered over file config.
    pub fn merge(&mut self, other: &Self) {
        let defaults = Self::default();

        // Source config
        if other.source.mode != defaults.source.mode {
            self.source.mode = other.source.mode;
        }
        if other.source.fixture_path.is_some() {
            self.source.fixture_path.clone_from(&other.source.fixture_path);
        }
        merge_endpoint(&mut self.source.endpoints.quotes, &other.source.endpoints.quotes);
        merge_endpoint(
            &mut self.source.endpoints.supplier_costs,
            &other.source.endpoints.supplier_costs,
        );
        merge_endpoint(&mut self.source.endpoints.inventory, &other.source.endpoints.inventory);
        if other.source.timeout_secs != defaults.source.timeout_secs {
            self.source.timeout_secs = other.source.timeout_secs;
        }

        // Schedule config
        if other.schedule.weekday != defaults.schedule.weekday {
            self.schedule.weekday.clone_from(&other.schedule.weekday);
        }
        if other.schedule.hour != defaults.schedule.hour {
            self.schedule.hour = other.schedule.hour;
        }
        if other.schedule.minute != defaults.schedule.minute {
            self.schedule.minute = other.schedule.minute;
        }
        if other.schedule.timezone != defaults.schedule.timezone {
            self.schedule.timezone.clone_from(&other.schedule.timezone);
        }
        if other.schedule.tick_interval != defaults.schedule.tick_interval {
            self.schedule.tick_interval.clone_from(&other.schedule.tick_interval);
        }
        if other.schedule.run_on_start {
            self.schedule.run_on_start = true;
        }

        // Alerts config
        if other.alerts.capacity != defaults.alerts.capacity {
            self.alerts.capacity = other.alerts.capacity;
        }
        if other.alerts.webhook_url.is_some() {
            self.alerts.webhook_url.clone_from(&other.alerts.webhook_url);
        }

        // Report config
        if other.report.format != defaults.report.format {
            self.report.format = other.report.format;
        }
        if other.report.file.is_some() {
            self.report.file.clone_from(&other.report.file);
        }
        if other.report.title.is_some() {
            self.report.title.clone_from(&other.report.title);
        }
        if other.report.sort != defaults.report.sort {
            self.report.sort = other.report.sort;
        }
        if other.report.direction != defaults.report.direction {
            self.report.direction = other.report.direction;
        }
        if other.report.no_color {
            self.report.no_color = true;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }

    /// Apply `SALESOPS_*` endpoint variables from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Apply endpoint overrides from `lookup`.
    ///
    /// Empty values are ignored. A quotes URL switches a config that has no
    /// fixture file to live mode.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let endpoints = &mut self.source.endpoints;

        let pairs: [(&mut EndpointConfig, &str, &str); 3] = [
            (&mut endpoints.quotes, env::QUOTES_URL, env::QUOTES_API_KEY),
            (
                &mut endpoints.supplier_costs,
                env::SUPPLIER_COSTS_URL,
                env::SUPPLIER_COSTS_API_KEY,
            ),
            (&mut endpoints.inventory, env::INVENTORY_URL, env::INVENTORY_API_KEY),
        ];
        for (endpoint, url_key, api_key) in pairs {
            if let Some(url) = get(url_key) {
                endpoint.url = Some(url);
            }
            if let Some(key) = get(api_key) {
                endpoint.api_key = Some(key);
            }
        }

        if get(env::QUOTES_URL).is_some()
            && self.source.mode == SourceMode::Fixture
            && self.source.fixture_path.is_none()
        {
            tracing::info!("{} is set; using live endpoints", env::QUOTES_URL);
            self.source.mode = SourceMode::Live;
        }
    }
}

fn merge_endpoint(base: &mut EndpointConfig, other: &EndpointConfig) {
    if other.url.is_some() {
        base.url.clone_from(&other.url);
    }
    if other.api_key.is_some() {
        base.api_key.clone_from(&other.api_key);
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# salesops-dash configuration
# Place this file at .salesops-dash.yaml in your project root or ~/.config/salesops-dash/

{}
",
        serde_yaml_ng::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# salesops-dash configuration file
# ================================
#
# Place it at:
#   - .salesops-dash.yaml in your project root
#   - ~/.config/salesops-dash/salesops-dash.yaml for global config
#
# CLI arguments always override file settings. Endpoint URLs and keys can
# also be supplied through SALESOPS_QUOTES_URL, SALESOPS_QUOTES_API_KEY,
# SALESOPS_SUPPLIER_COSTS_URL, SALESOPS_SUPPLIER_COSTS_API_KEY,
# SALESOPS_INVENTORY_URL and SALESOPS_INVENTORY_API_KEY.

# Data source
source:
  # fixture: built-in sample data (or fixture_path); live: HTTP endpoints
  mode: fixture
  # fixture_path: ./data/fixture.json
  # endpoints:
  #   quotes:
  #     url: https://ops.example.com/api/quotes
  #     api_key: secret
  #   supplier_costs:
  #     url: https://ops.example.com/api/supplier-costs
  #   inventory:
  #     url: https://ops.example.com/api/inventory
  timeout_secs: 15

# Weekly margin-leak job
schedule:
  weekday: monday
  hour: 8
  minute: 30
  timezone: America/New_York
  tick_interval: 60s
  run_on_start: false

# Alerts
alerts:
  capacity: 100
  # webhook_url: https://hooks.example.com/margin-leaks

# Dashboard rendering
report:
  # Format: auto, summary, json, html
  format: auto
  # file: dashboard.html
  # title: Weekly Sales Ops
  # Product table order: margin, revenue, units
  sort: margin
  direction: desc
  no_color: false
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================
