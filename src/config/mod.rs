//! Configuration module for salesops-dash.
//!
//! Settings are layered: built-in defaults, then a discovered YAML file,
//! then CLI flags, then the `SALESOPS_*` endpoint variables. The merged
//! [`AppConfig`] is validated before any data source is contacted.
//!
//! # Example
//!
//! ```rust,ignore
//! use salesops_dash::config::AppConfig;
//!
//! // Sample data, Monday 08:30 New York
//! let config = AppConfig::default();
//!
//! // Live endpoints, job also runs at start-up
//! let config = AppConfig::builder()
//!     .live()
//!     .quotes_url("https://ops.example.com/api/quotes")
//!     .run_on_start(true)
//!     .build();
//!
//! // Whatever file discovery finds
//! use salesops_dash::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.salesops-dash.yaml` file in your project root or `~/.config/salesops-dash/`:
//!
//! ```yaml
//! source:
//!   mode: live
//!   endpoints:
//!     quotes:
//!       url: https://ops.example.com/api/quotes
//! schedule:
//!   weekday: monday
//!   hour: 8
//!   minute: 30
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    env, DEFAULT_HOUR, DEFAULT_MINUTE, DEFAULT_TICK_INTERVAL, DEFAULT_TIMEOUT_SECS,
    DEFAULT_TIMEZONE, DEFAULT_WEEKDAY,
};
pub use types::{
    AlertsConfig, AppConfig, AppConfigBuilder, EndpointConfig, EndpointsConfig, ScheduleSettings,
    SourceConfig, SourceMode,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, user_config_dir, ConfigFileError, CONFIG_FILE_NAMES,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.salesops-dash.yaml` config files. It can be used by editors for
/// validation and autocompletion.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
