//! Shared utilities.

mod clock;

pub use clock::{civil_timestamp, day_key, eastern_timestamp, parse_timezone, BUSINESS_TZ};
