//! Margin and score primitives.
//!
//! Every function here is total: malformed inputs (non-positive prices,
//! missing lead times, reliability above 100) fall back to floor values
//! instead of producing errors.

/// Quotes below this margin are reported as margin leaks.
pub const LEAK_THRESHOLD: f64 = 0.25;

/// Minimum acceptable margin; also used to synthesize a reference price when
/// a product has never been quoted.
pub const BASE_MARGIN_MIN: f64 = 0.30;

/// Lead times above this many days incur [`SLOW_LEAD_PENALTY`].
pub const SLOW_LEAD_DAYS: f64 = 7.0;

/// Multiplier applied to the speed score of slow suppliers.
pub const SLOW_LEAD_PENALTY: f64 = 0.85;

/// Composite weight of the margin score.
pub const MARGIN_WEIGHT: f64 = 0.45;
/// Composite weight of the speed score.
pub const SPEED_WEIGHT: f64 = 0.35;
/// Composite weight of the reliability score.
pub const RELIABILITY_WEIGHT: f64 = 0.20;

/// Fractional margin of a sale: `(price - cost) / price`.
///
/// Returns 0 when `unit_price <= 0`. The result is negative for a loss.
#[must_use]
pub fn margin_pct(unit_price: f64, landed_cost: f64) -> f64 {
    if unit_price <= 0.0 {
        return 0.0;
    }
    (unit_price - landed_cost) / unit_price
}

/// Speed score from a lead time in days.
///
/// Absent or non-positive lead times are treated as the best case (1.0).
/// Otherwise the score is `1 / lead_days`, penalized by
/// [`SLOW_LEAD_PENALTY`] above [`SLOW_LEAD_DAYS`].
#[must_use]
pub fn normalize_speed(lead_days: Option<f64>) -> f64 {
    match lead_days {
        Some(days) if days > 0.0 => {
            let speed = 1.0 / days;
            if days > SLOW_LEAD_DAYS {
                speed * SLOW_LEAD_PENALTY
            } else {
                speed
            }
        }
        _ => 1.0,
    }
}

/// Clamp into `[0, 1]`. NaN maps to 0.
#[must_use]
pub fn clamp01(x: f64) -> f64 {
    if x.is_nan() {
        return 0.0;
    }
    x.clamp(0.0, 1.0)
}

/// Weighted composite used to rank suppliers (SourceScore).
#[must_use]
pub fn source_score(margin_score: f64, speed_score: f64, reliability_score: f64) -> f64 {
    MARGIN_WEIGHT * margin_score + SPEED_WEIGHT * speed_score + RELIABILITY_WEIGHT * reliability_score
}
