//! Default values for salesops-dash configuration.

/// Weekly job fires on this day.
pub const DEFAULT_WEEKDAY: &str = "monday";

/// Weekly job hour (civil time).
pub const DEFAULT_HOUR: u32 = 8;

/// Weekly job minute (civil time).
pub const DEFAULT_MINUTE: u32 = 30;

/// Zone the weekly job is scheduled in.
pub const DEFAULT_TIMEZONE: &str = "America/New_York";

/// How often the scheduler checks the trigger.
pub const DEFAULT_TICK_INTERVAL: &str = "60s";

/// HTTP timeout for live endpoints.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Environment variables that override endpoint settings.
pub mod env {
    pub const QUOTES_URL: &str = "SALESOPS_QUOTES_URL";
    pub const QUOTES_API_KEY: &str = "SALESOPS_QUOTES_API_KEY";
    pub const SUPPLIER_COSTS_URL: &str = "SALESOPS_SUPPLIER_COSTS_URL";
    pub const SUPPLIER_COSTS_API_KEY: &str = "SALESOPS_SUPPLIER_COSTS_API_KEY";
    pub const INVENTORY_URL: &str = "SALESOPS_INVENTORY_URL";
    pub const INVENTORY_API_KEY: &str = "SALESOPS_INVENTORY_API_KEY";
}
