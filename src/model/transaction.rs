//! Quotes / sales transactions.

use super::Region;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a quote as reported by the order system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    Draft,
    Sent,
    Accepted,
    Paid,
    Declined,
}

impl QuoteStatus {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Accepted => "accepted",
            Self::Paid => "paid",
            Self::Declined => "declined",
        }
    }
}

impl std::fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single quote line: one product, one customer, one price.
///
/// `unit_price` is the sold price per unit and `landed_cost` the aggregated
/// landed cost per unit at the time of the quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub customer: String,
    pub product_id: String,
    pub product_name: String,
    pub units: u32,
    pub unit_price: f64,
    pub landed_cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reliability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
    pub status: QuoteStatus,
}

/// The order system calls them quotes.
pub type Quote = Transaction;

impl Transaction {
    /// Revenue contributed by this line (`units × unit_price`).
    #[must_use]
    pub fn revenue(&self) -> f64 {
        f64::from(self.units) * self.unit_price
    }

    /// Cost of goods for this line (`units × landed_cost`).
    #[must_use]
    pub fn cost(&self) -> f64 {
        f64::from(self.units) * self.landed_cost
    }
}

/// Inclusive date window used to filter transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whether `date` falls within the window (both ends inclusive).
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Prices kept per customer/product history lookup.
pub const LAST_PRICES_LIMIT: usize = 3;

/// One past sale in a customer's price history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    pub date: NaiveDate,
    pub units: u32,
    pub unit_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
}

impl From<&Transaction> for PricePoint {
    fn from(tx: &Transaction) -> Self {
        Self {
            date: tx.date,
            units: tx.units,
            unit_price: tx.unit_price,
            region: tx.region,
        }
    }
}

/// What one customer recently paid for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerLastPrices {
    pub customer: String,
    pub product_id: String,
    /// Newest first, at most [`LAST_PRICES_LIMIT`] entries.
    pub prices: Vec<PricePoint>,
}

impl CustomerLastPrices {
    /// Pick the customer's latest prices for `product_id` out of `transactions`.
    ///
    /// Input order does not matter; quotes on the same date keep input order.
    #[must_use]
    pub fn from_transactions(transactions: &[Transaction], customer: &str, product_id: &str) -> Self {
        let mut matching: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| t.customer == customer && t.product_id == product_id)
            .collect();
        matching.sort_by(|a, b| b.date.cmp(&a.date));
        Self {
            customer: customer.to_string(),
            product_id: product_id.to_string(),
            prices: matching
                .into_iter()
                .take(LAST_PRICES_LIMIT)
                .map(PricePoint::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case_quote() {
        let json = r#"{
            "id": "Q-1001", "date": "2025-10-27", "customer": "CVS",
            "productId": "TRZ-10", "productName": "Tirzepatide 10mg Kit",
            "units": 10, "unitPrice": 120, "landedCost": 80,
            "leadDays": 3, "reliability": 0.92, "region": "US", "status": "paid"
        }"#;
        let q: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(q.product_id, "TRZ-10");
        assert_eq!(q.status, QuoteStatus::Paid);
        assert_eq!(q.region, Some(Region::Us));
        assert!((q.revenue() - 1200.0).abs() < 1e-9);
        assert!((q.cost() - 800.0).abs() < 1e-9);
    }

    #[test]
    fn test_optional_fields_may_be_absent() {
        let json = r#"{
            "id": "Q-1", "date": "2025-01-02", "customer": "A",
            "productId": "P", "productName": "P", "units": 0,
            "unitPrice": 0, "landedCost": 0, "status": "draft"
        }"#;
        let q: Transaction = serde_json::from_str(json).unwrap();
        assert!(q.lead_days.is_none());
        assert!(q.region.is_none());
        assert_eq!(q.revenue(), 0.0);
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
        let range = DateRange::new(d("2025-10-01"), d("2025-10-31"));
        assert!(range.contains(d("2025-10-01")));
        assert!(range.contains(d("2025-10-31")));
        assert!(!range.contains(d("2025-11-01")));
    }

    #[test]
    fn test_customer_last_prices_newest_three() {
        let quote = |id: &str, customer: &str, day: u32, price: f64| Transaction {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 10, day).unwrap(),
            customer: customer.to_string(),
            product_id: "TRZ-10".to_string(),
            product_name: "Tirzepatide 10mg Kit".to_string(),
            units: 2,
            unit_price: price,
            landed_cost: 80.0,
            lead_days: None,
            reliability: None,
            region: Some(Region::Us),
            status: QuoteStatus::Paid,
        };
        let txs = [
            quote("Q1", "CVS", 3, 112.0),
            quote("Q2", "CVS", 27, 120.0),
            quote("Q3", "Walgreens", 28, 99.0),
            quote("Q4", "CVS", 15, 115.0),
            quote("Q5", "CVS", 1, 110.0),
        ];

        let history = CustomerLastPrices::from_transactions(&txs, "CVS", "TRZ-10");
        let prices: Vec<f64> = history.prices.iter().map(|p| p.unit_price).collect();
        assert_eq!(prices, vec![120.0, 115.0, 112.0]);
        assert_eq!(history.prices[0].units, 2);

        assert!(CustomerLastPrices::from_transactions(&txs, "CVS", "EQ").prices.is_empty());
    }
}
