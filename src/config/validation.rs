//! Configuration validation for salesops-dash.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AlertsConfig, AppConfig, ScheduleSettings, SourceConfig, SourceMode};
use crate::reports::ReportConfig;
use crate::schedule::parse_duration;
use crate::utils::parse_timezone;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.source.validate());
        errors.extend(self.schedule.validate());
        errors.extend(self.alerts.validate());
        errors.extend(self.report.validate());
        errors
    }
}

impl Validatable for SourceConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.mode == SourceMode::Live {
            let endpoints = [
                ("source.endpoints.quotes.url", &self.endpoints.quotes.url),
                ("source.endpoints.supplier_costs.url", &self.endpoints.supplier_costs.url),
                ("source.endpoints.inventory.url", &self.endpoints.inventory.url),
            ];
            for (field, url) in endpoints {
                match url.as_deref().map(str::trim) {
                    None | Some("") => {
                        errors.push(ConfigError::new(field, "Live mode requires an endpoint URL"));
                    }
                    Some(url) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                        errors.push(ConfigError::new(
                            field,
                            format!("Endpoint must be an http(s) URL, got '{url}'"),
                        ));
                    }
                    Some(_) => {}
                }
            }
        }

        if let Some(ref path) = self.fixture_path {
            if self.mode == SourceMode::Fixture && !path.exists() {
                errors.push(ConfigError::new(
                    "source.fixture_path",
                    format!("Fixture file does not exist: {}", path.display()),
                ));
            }
        }

        if self.timeout_secs == 0 {
            errors.push(ConfigError::new(
                "source.timeout_secs",
                "Timeout must be at least 1 second",
            ));
        }

        errors
    }
}

impl Validatable for ScheduleSettings {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.weekday.trim().parse::<chrono::Weekday>().is_err() {
            errors.push(ConfigError::new(
                "schedule.weekday",
                format!("Invalid weekday '{}'. Expected a day name such as monday", self.weekday),
            ));
        }
        if self.hour > 23 {
            errors.push(ConfigError::new(
                "schedule.hour",
                format!("Hour must be between 0 and 23, got {}", self.hour),
            ));
        }
        if self.minute > 59 {
            errors.push(ConfigError::new(
                "schedule.minute",
                format!("Minute must be between 0 and 59, got {}", self.minute),
            ));
        }
        if let Err(e) = parse_timezone(&self.timezone) {
            errors.push(ConfigError::new("schedule.timezone", e));
        }
        match parse_duration(&self.tick_interval) {
            Ok(d) if d.is_zero() => {
                errors.push(ConfigError::new("schedule.tick_interval", "Tick interval must be positive"));
            }
            Ok(_) => {}
            Err(e) => errors.push(ConfigError::new("schedule.tick_interval", e.to_string())),
        }

        errors
    }
}

impl Validatable for AlertsConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.capacity == 0 {
            errors.push(ConfigError::new(
                "alerts.capacity",
                "Alert capacity must be at least 1",
            ));
        }
        errors
    }
}

impl Validatable for ReportConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref file_path) = self.file {
            if let Some(parent) = file_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError::new(
                        "report.file",
                        format!("Parent directory does not exist: {}", parent.display()),
                    ));
                }
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.is_valid(), "{:?}", config.validate());
    }

    #[test]
    fn test_invalid_schedule() {
        let schedule = ScheduleSettings {
            weekday: "someday".to_string(),
            hour: 24,
            minute: 60,
            timezone: "Nowhere/Land".to_string(),
            tick_interval: "fast".to_string(),
            run_on_start: false,
        };
        let fields: Vec<_> = schedule.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            [
                "schedule.weekday",
                "schedule.hour",
                "schedule.minute",
                "schedule.timezone",
                "schedule.tick_interval"
            ]
        );
    }

    #[test]
    fn test_weekday_abbreviations_accepted() {
        let schedule = ScheduleSettings {
            weekday: "Fri".to_string(),
            ..ScheduleSettings::default()
        };
        assert!(schedule.is_valid());
    }

    #[test]
    fn test_zero_tick_rejected() {
        let schedule = ScheduleSettings {
            tick_interval: "0s".to_string(),
            ..ScheduleSettings::default()
        };
        assert!(!schedule.is_valid());
    }

    #[test]
    fn test_live_mode_requires_endpoints() {
        let config = AppConfig::builder()
            .live()
            .quotes_url("https://ops.example.com/quotes")
            .supplier_costs_url("ftp://nope")
            .build();
        let errors = config.source.validate();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "source.endpoints.supplier_costs.url");
        assert_eq!(errors[1].field, "source.endpoints.inventory.url");
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let alerts = AlertsConfig {
            capacity: 0,
            webhook_url: None,
        };
        assert!(!alerts.is_valid());
    }

    #[test]
    fn test_missing_output_dir() {
        let report = ReportConfig {
            file: Some(PathBuf::from("/nonexistent/dir/report.html")),
            ..ReportConfig::default()
        };
        assert_eq!(report.validate()[0].field, "report.file");
    }

    #[test]
    fn test_missing_fixture_file() {
        let config = AppConfig::builder().fixture_file("/nonexistent/fixture.json").build();
        assert_eq!(config.source.validate()[0].field, "source.fixture_path");
    }
}
