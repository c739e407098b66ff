//! Error types for diagbridge-reporter.

use miette::Diagnostic;
use thiserror::Error;

/// Result type for reporting operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Failures of the reporter bridge itself. Degraded positions and missing
/// explanations are not errors.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// The compiler handed over a level code with no matching severity.
    #[error("Bad diagnostic level: {0}")]
    #[diagnostic(
        code(diagbridge::bad_level),
        help("the compiler and the reporter bridge disagree on diagnostic level codes; this is a bug")
    )]
    BadLevel(i32),
}

/// Errors that can occur while loading a bridge configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file: {0}")]
    ReadConfig(#[from] std::io::Error),

    /// Failed to parse TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    ParseToml(#[from] toml::de::Error),
}
