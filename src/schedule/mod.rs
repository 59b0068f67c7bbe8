//! Weekly background job for margin-leak alerts.
//!
//! A [`WeeklyTrigger`] decides on each tick whether the job is due (Monday
//! 08:30 New York time by default, at most once per civil day). The loop in
//! [`run_schedule_loop`] drives it, runs the job through a [`JobRunner`] so
//! that runs never overlap, and fans the resulting alert out to sinks.

mod config;
mod job;
mod loop_impl;
mod trigger;

pub use config::{parse_duration, ScheduleConfig};
pub use job::{run_margin_leak_job, JobRunner};
pub use loop_impl::{run_schedule_loop, run_schedule_loop_with, ScheduleSummary};
pub use trigger::WeeklyTrigger;

use crate::sources::SourceError;

/// Errors specific to the scheduler.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ScheduleError {
    #[error("invalid interval '{0}': expected format like 30s, 5m, 1h")]
    InvalidInterval(String),

    #[error("invalid weekday '{0}'")]
    InvalidWeekday(String),

    #[error("invalid time {hour:02}:{minute:02}")]
    InvalidTime { hour: u32, minute: u32 },

    #[error("{0}")]
    InvalidTimezone(String),

    #[error("margin-leak job already running")]
    JobInProgress,

    #[error("job data fetch failed: {0}")]
    Source(#[from] SourceError),
}
