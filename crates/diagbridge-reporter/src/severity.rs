//! Severities of the build tool and their mapping from compiler levels.

use crate::error::{ReportError, Result};
use diagbridge_common::Level;
use std::fmt;

/// Severity of a problem as understood by the external reporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Map a raw diagnostic level code. Codes outside the known levels are a
    /// programming error and are never guessed at.
    pub fn from_level(code: i32) -> Result<Self> {
        Level::from_code(code)
            .map(Severity::from)
            .ok_or(ReportError::BadLevel(code))
    }

    /// The compiler level this severity was mapped from.
    pub fn level(self) -> Level {
        match self {
            Severity::Error => Level::Error,
            Severity::Warning => Level::Warning,
            Severity::Info => Level::Info,
        }
    }
}

impl From<Level> for Severity {
    fn from(level: Level) -> Self {
        match level {
            Level::Error => Severity::Error,
            Level::Warning => Severity::Warning,
            Level::Info => Severity::Info,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.write_str(name)
    }
}
