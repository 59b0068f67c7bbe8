//! Pipeline orchestration for dashboard runs.
//!
//! This module provides shared fetch → compose → render logic for the CLI
//! command handlers.

mod dashboard;
mod output;

pub use dashboard::{build_dashboard, output_dashboard, Dashboard};
pub use output::{auto_detect_format, should_use_color, write_output, OutputTarget};

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success, or leaks found without `--fail-on-leak`
    pub const SUCCESS: i32 = 0;
    /// Margin leaks were detected and `--fail-on-leak` was set
    pub const LEAKS_DETECTED: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 2;
}
