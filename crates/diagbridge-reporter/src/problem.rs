//! The problem record handed across to the build tool.

use crate::position::ExternalPosition;
use crate::severity::Severity;

/// A finished problem, handed to the external reporter as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    position: ExternalPosition,
    message: String,
    severity: Severity,
    rendered: String,
}

impl Problem {
    pub fn new(
        position: ExternalPosition,
        message: impl Into<String>,
        severity: Severity,
        rendered: impl Into<String>,
    ) -> Self {
        Self {
            position,
            message: message.into(),
            severity,
            rendered: rendered.into(),
        }
    }

    pub fn position(&self) -> &ExternalPosition {
        &self.position
    }

    /// The short message, without position or explanation.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// The fully rendered text, as the compiler would print it.
    pub fn rendered(&self) -> &str {
        &self.rendered
    }
}
