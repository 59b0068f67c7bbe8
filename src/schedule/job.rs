//! The margin-leak job and its single-flight guard.

use super::ScheduleError;
use crate::alerts::AlertSink;
use crate::metrics::{detect_margin_leaks, stock_risk_alert, MarginLeakReport};
use crate::sources::{load_snapshot, DataSource};
use chrono::{DateTime, Utc};
use std::sync::{Mutex, TryLockError};

/// Ensures at most one job runs at a time, even across threads.
#[derive(Debug, Default)]
pub struct JobRunner {
    running: Mutex<()>,
}

impl JobRunner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `job` unless another run holds the guard.
    pub fn run<T>(
        &self,
        job: impl FnOnce() -> Result<T, ScheduleError>,
    ) -> Result<T, ScheduleError> {
        let _guard = match self.running.try_lock() {
            Ok(guard) => guard,
            // a panicked job leaves nothing behind worth protecting
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(TryLockError::WouldBlock) => return Err(ScheduleError::JobInProgress),
        };
        job()
    }
}

/// Load a fresh snapshot, scan it for margin leaks and deliver the alerts.
///
/// The batch always carries the margin-leak alert, followed by a stockout
/// alert when any inventory line is short of its forecast. Sink failures are
/// logged and do not fail the job; a source failure does.
pub fn run_margin_leak_job(
    source: &dyn DataSource,
    sinks: &mut [Box<dyn AlertSink>],
    now: DateTime<Utc>,
) -> Result<MarginLeakReport, ScheduleError> {
    let snapshot = load_snapshot(source, None, now)?;
    let report = detect_margin_leaks(&snapshot);
    tracing::info!(
        flagged = report.total_flagged,
        at = %report.generated_at_et,
        "margin leak job finished"
    );

    let mut batch = vec![report.alert.clone()];
    if let Some(alert) = stock_risk_alert(&snapshot.stock_risks, now) {
        tracing::info!(products = snapshot.stock_risks.len(), "stockout risk");
        batch.push(alert);
    }
    for sink in sinks.iter_mut() {
        if let Err(e) = sink.push_alerts(&batch) {
            tracing::warn!("Alert sink error: {e}");
        }
    }
    Ok(report)
}
