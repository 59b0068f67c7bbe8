//! Unified error types for salesops-dash.
//!
//! Module errors ([`SourceError`], [`ReportError`], [`ScheduleError`]) stay
//! specific; [`DashError`] wraps them with a context chain for the
//! orchestration layer.

use crate::reports::ReportError;
use crate::schedule::ScheduleError;
use crate::sources::SourceError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for salesops-dash operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DashError {
    /// Errors while fetching source collections
    #[error("Data source failed: {context}")]
    Source {
        context: String,
        #[source]
        source: SourceError,
    },

    /// Errors during report generation
    #[error("Report generation failed: {context}")]
    Report {
        context: String,
        #[source]
        source: ReportError,
    },

    /// Errors from the scheduled job
    #[error("Scheduled job failed: {context}")]
    Schedule {
        context: String,
        #[source]
        source: ScheduleError,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for salesops-dash operations
pub type Result<T> = std::result::Result<T, DashError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl DashError {
    /// Create a source error with context
    pub fn data_source(context: impl Into<String>, source: SourceError) -> Self {
        Self::Source {
            context: context.into(),
            source,
        }
    }

    /// Create a report error with context
    pub fn report(context: impl Into<String>, source: ReportError) -> Self {
        Self::Report {
            context: context.into(),
            source,
        }
    }

    /// Create a schedule error with context
    pub fn schedule(context: impl Into<String>, source: ScheduleError) -> Self {
        Self::Schedule {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: Some(path.into()),
            message: source.to_string(),
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

// ============================================================================
// Conversions from module error types
// ============================================================================

impl From<SourceError> for DashError {
    fn from(err: SourceError) -> Self {
        Self::data_source(String::new(), err)
    }
}

impl From<ReportError> for DashError {
    fn from(err: ReportError) -> Self {
        Self::report(String::new(), err)
    }
}

impl From<ScheduleError> for DashError {
    fn from(err: ScheduleError) -> Self {
        Self::schedule(String::new(), err)
    }
}

impl From<std::io::Error> for DashError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<crate::config::ConfigError> for DashError {
    fn from(err: crate::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings chain outermost first, so a failure reads as
/// `"rendering dashboard: fetching quotes: ..."`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<DashError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

fn add_context_to_error(err: DashError, new_ctx: &str) -> DashError {
    match err {
        DashError::Source {
            context: existing,
            source,
        } => DashError::Source {
            context: chain_context(new_ctx, &existing),
            source,
        },
        DashError::Report {
            context: existing,
            source,
        } => DashError::Report {
            context: chain_context(new_ctx, &existing),
            source,
        },
        DashError::Schedule {
            context: existing,
            source,
        } => DashError::Schedule {
            context: chain_context(new_ctx, &existing),
            source,
        },
        DashError::Io {
            path,
            message,
            source,
        } => DashError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        DashError::Config(msg) => DashError::Config(chain_context(new_ctx, &msg)),
        DashError::Validation(msg) => DashError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// `"new: existing"`, or just `new` when nothing is there yet.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_mentions_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = DashError::io("/data/fixture.json", io_err);
        assert!(err.to_string().contains("/data/fixture.json"));
    }

    #[test]
    fn test_context_chaining() {
        let initial: std::result::Result<(), SourceError> =
            Err(SourceError::MissingEndpoint("quotes".to_string()));
        let err = initial.context("fetching quotes").context("building snapshot");

        match err {
            Err(DashError::Source { context, source }) => {
                assert_eq!(context, "building snapshot: fetching quotes");
                assert!(matches!(source, SourceError::MissingEndpoint(_)));
            }
            other => panic!("expected Source error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_is_lazy() {
        let ok: std::result::Result<u8, SourceError> = Ok(1);
        let value = ok.with_context(|| -> String { panic!("must not be evaluated") });
        assert_eq!(value.unwrap(), 1);
    }

    #[test]
    fn test_config_and_validation_chain() {
        let err: Result<()> = Err(DashError::config("bad weekday"));
        match err.context("loading config") {
            Err(DashError::Config(msg)) => assert_eq!(msg, "loading config: bad weekday"),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            DashError::validation("empty").to_string(),
            "Validation failed: empty"
        );
    }
}
