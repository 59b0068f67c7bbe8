//! Civil-time helpers for the business time zone.
//!
//! Reports and the weekly trigger are defined in New York wall-clock time
//! regardless of the host's local zone. Conversions go through `chrono-tz`
//! so the offset follows daylight saving (-05:00 in winter, -04:00 in summer).

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Zone all business timestamps are expressed in.
pub const BUSINESS_TZ: Tz = chrono_tz::America::New_York;

/// RFC 3339 timestamp in `tz` at minute precision, e.g. `2025-11-03T08:30:00-05:00`.
#[must_use]
pub fn civil_timestamp(now: DateTime<Utc>, tz: Tz) -> String {
    now.with_timezone(&tz)
        .format("%Y-%m-%dT%H:%M:00%:z")
        .to_string()
}

/// [`civil_timestamp`] in [`BUSINESS_TZ`].
#[must_use]
pub fn eastern_timestamp(now: DateTime<Utc>) -> String {
    civil_timestamp(now, BUSINESS_TZ)
}

/// Calendar date of `now` in `tz`, formatted `YYYY-MM-DD`.
#[must_use]
pub fn day_key(now: DateTime<Utc>, tz: Tz) -> String {
    now.with_timezone(&tz).format("%Y-%m-%d").to_string()
}

/// Parse an IANA zone name such as `America/New_York`.
pub fn parse_timezone(name: &str) -> Result<Tz, String> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| format!("unknown time zone '{name}'"))
}
