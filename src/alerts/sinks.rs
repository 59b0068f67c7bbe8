//! Alert sinks: stderr log, NDJSON stream and webhook.

use super::{Alert, AlertSink};
use std::io::Write;
use std::path::PathBuf;

// ============================================================================
// Log sink: human-readable lines on stderr
// ============================================================================

pub struct LogAlertSink {
    quiet: bool,
}

impl LogAlertSink {
    #[must_use]
    pub const fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl AlertSink for LogAlertSink {
    fn push_alerts(&mut self, alerts: &[Alert]) -> anyhow::Result<()> {
        for alert in alerts {
            tracing::info!(kind = %alert.kind, "{}", alert.message);
            if !self.quiet {
                eprintln!("[{}] {}: {}", alert.created_at, alert.title, alert.message);
            }
        }
        Ok(())
    }
}

// ============================================================================
// NDJSON sink: one JSON object per alert
// ============================================================================

pub struct NdjsonAlertSink {
    writer: Box<dyn Write + Send>,
}

impl NdjsonAlertSink {
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self { writer }
    }
}

impl AlertSink for NdjsonAlertSink {
    fn push_alerts(&mut self, alerts: &[Alert]) -> anyhow::Result<()> {
        for alert in alerts {
            serde_json::to_writer(&mut self.writer, alert)?;
            self.writer.write_all(b"\n")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

// ============================================================================
// Webhook sink: HTTP POST (feature-gated)
// ============================================================================

#[cfg(feature = "live")]
pub struct WebhookAlertSink {
    url: String,
    client: reqwest::blocking::Client,
}

#[cfg(feature = "live")]
impl WebhookAlertSink {
    #[must_use]
    pub fn new(url: String) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());
        Self { url, client }
    }
}

#[cfg(feature = "live")]
impl AlertSink for WebhookAlertSink {
    fn push_alerts(&mut self, alerts: &[Alert]) -> anyhow::Result<()> {
        for alert in alerts {
            match self.client.post(&self.url).json(alert).send() {
                Ok(r) if r.status().is_success() => {}
                Ok(r) => tracing::warn!("Webhook returned status {}", r.status()),
                Err(e) => tracing::warn!("Webhook delivery failed: {e}"),
            }
        }
        // delivery problems are logged, never fatal
        Ok(())
    }
}

// ============================================================================
// Sink builder
// ============================================================================

/// Where a job's alerts should go.
#[derive(Debug, Clone, Default)]
pub struct SinkOptions {
    /// Emit NDJSON instead of human-readable lines.
    pub ndjson: bool,
    /// Append NDJSON to this file instead of stdout.
    pub output_file: Option<PathBuf>,
    pub webhook_url: Option<String>,
    pub quiet: bool,
}

/// Build alert sinks from the given options.
pub fn build_alert_sinks(options: &SinkOptions) -> anyhow::Result<Vec<Box<dyn AlertSink>>> {
    let mut sinks: Vec<Box<dyn AlertSink>> = Vec::new();

    if options.ndjson {
        let writer: Box<dyn Write + Send> = match &options.output_file {
            Some(path) => {
                let file = std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)?;
                Box::new(file)
            }
            None => Box::new(std::io::stdout()),
        };
        sinks.push(Box::new(NdjsonAlertSink::new(writer)));
    } else {
        sinks.push(Box::new(LogAlertSink::new(options.quiet)));
    }

    #[cfg(feature = "live")]
    if let Some(ref url) = options.webhook_url {
        sinks.push(Box::new(WebhookAlertSink::new(url.clone())));
    }
    #[cfg(not(feature = "live"))]
    if options.webhook_url.is_some() {
        tracing::warn!("webhook alerts require the `live` feature; ignoring webhook URL");
    }

    Ok(sinks)
}
