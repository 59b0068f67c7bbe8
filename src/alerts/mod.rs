//! Alerts and the places they are delivered to.
//!
//! Producers (the margin-leak job) build [`Alert`] values and hand them to
//! one or more [`AlertSink`]s: the in-memory [`AlertStore`], a human-readable
//! stderr log, an NDJSON stream, or a webhook (feature `live`).

mod sinks;
mod store;

pub use sinks::{build_alert_sinks, LogAlertSink, NdjsonAlertSink, SinkOptions};
#[cfg(feature = "live")]
pub use sinks::WebhookAlertSink;
pub use store::{AlertStore, SharedAlertStore, SubscriptionId, DEFAULT_ALERT_CAPACITY};

use serde::{Deserialize, Serialize};

/// What produced an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlertKind {
    MarginLeak,
    StockRisk,
}

impl AlertKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MarginLeak => "margin-leak",
            Self::StockRisk => "stock-risk",
        }
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notification raised by a background job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
    /// RFC 3339 civil timestamp of when the alert was raised.
    pub created_at: String,
    /// Detail rows backing the message, if any.
    #[serde(default)]
    pub rows: serde_json::Value,
}

/// Receiver of alert batches.
pub trait AlertSink {
    /// Deliver a batch of alerts, in the order they were raised.
    fn push_alerts(&mut self, alerts: &[Alert]) -> anyhow::Result<()>;
}

impl<S: AlertSink + ?Sized> AlertSink for Box<S> {
    fn push_alerts(&mut self, alerts: &[Alert]) -> anyhow::Result<()> {
        (**self).push_alerts(alerts)
    }
}
