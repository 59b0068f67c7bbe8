//! Output handling for rendered dashboards.
//!
//! A dashboard goes either to stdout or to a file whose extension can pick
//! the format.

use crate::error::{DashError, Result};
use crate::reports::ReportFormat;
use std::io::IsTerminal;
use std::path::PathBuf;

/// Where a rendered dashboard or leak report ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// `None` means stdout.
    #[must_use]
    pub fn from_option(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => OutputTarget::File(p),
            None => OutputTarget::Stdout,
        }
    }

    /// Stdout attached to a TTY; the only case where ANSI color is emitted.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, OutputTarget::Stdout) && std::io::stdout().is_terminal()
    }
}

/// Resolve `Auto` against the output target.
///
/// Files pick their format from the extension; stdout gets the summary.
#[must_use]
pub fn auto_detect_format(format: ReportFormat, target: &OutputTarget) -> ReportFormat {
    match target {
        OutputTarget::File(path) => format.resolve(Some(path)),
        OutputTarget::Stdout => format.resolve(None),
    }
}

/// Color is off with `--no-color` or when `NO_COLOR` is set to anything.
#[must_use]
pub fn should_use_color(no_color_flag: bool) -> bool {
    !no_color_flag && std::env::var("NO_COLOR").is_err()
}

/// Print `content` or replace the target file with it.
pub fn write_output(content: &str, target: &OutputTarget, quiet: bool) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            println!("{content}");
            Ok(())
        }
        OutputTarget::File(path) => {
            std::fs::write(path, content).map_err(|e| DashError::io(path.clone(), e))?;
            if !quiet {
                tracing::info!("Dashboard written to {}", path.display());
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_target_from_option() {
        assert_eq!(OutputTarget::from_option(None), OutputTarget::Stdout);
        let path = PathBuf::from("/tmp/dash.html");
        assert_eq!(
            OutputTarget::from_option(Some(path.clone())),
            OutputTarget::File(path)
        );
    }

    #[test]
    fn test_auto_detect_format() {
        let html = OutputTarget::File(PathBuf::from("out/dash.html"));
        assert_eq!(auto_detect_format(ReportFormat::Auto, &html), ReportFormat::Html);
        assert_eq!(auto_detect_format(ReportFormat::Json, &html), ReportFormat::Json);
        assert_eq!(
            auto_detect_format(ReportFormat::Auto, &OutputTarget::Stdout),
            ReportFormat::Summary
        );
    }

    #[test]
    fn test_should_use_color_with_flag() {
        assert!(!should_use_color(true));
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dash.txt");
        write_output("hello", &OutputTarget::File(path.clone()), true).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "hello");
    }

    #[test]
    fn test_write_output_missing_dir() {
        let target = OutputTarget::File(PathBuf::from("/nonexistent/dir/dash.txt"));
        let err = write_output("x", &target, true).unwrap_err();
        assert!(matches!(err, DashError::Io { path: Some(_), .. }));
    }
}
