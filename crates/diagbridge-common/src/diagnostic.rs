//! Diagnostics as emitted by the compiler pipeline.
//!
//! Levels travel as raw integer codes, so a reporter receiving a diagnostic
//! has to classify the code itself and cope with values it does not know.

use crate::position::SourcePosition;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Warning,
    Error,
}

impl Level {
    pub const INFO: i32 = 0;
    pub const WARNING: i32 = 1;
    pub const ERROR: i32 = 2;

    pub const ALL: [Level; 3] = [Level::Error, Level::Warning, Level::Info];

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            Self::INFO => Some(Level::Info),
            Self::WARNING => Some(Level::Warning),
            Self::ERROR => Some(Level::Error),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Level::Info => Self::INFO,
            Level::Warning => Self::WARNING,
            Level::Error => Self::ERROR,
        }
    }

    /// Label used when rendering the diagnostic.
    pub fn name(self) -> &'static str {
        match self {
            Level::Info => "Info",
            Level::Warning => "Warning",
            Level::Error => "Error",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info" => Ok(Level::Info),
            "warning" | "warn" => Ok(Level::Warning),
            "error" => Ok(Level::Error),
            other => Err(format!("unknown diagnostic level: {other}")),
        }
    }
}

/// A diagnostic message: a short summary and an optional long explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    msg: String,
    explanation: Option<String>,
}

impl Message {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            explanation: None,
        }
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    pub fn msg(&self) -> &str {
        &self.msg
    }

    /// The explanation text; empty when there is none.
    pub fn explanation(&self) -> &str {
        self.explanation.as_deref().unwrap_or_default()
    }

    pub fn has_explanation(&self) -> bool {
        !self.explanation().is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    level: i32,
    msg: Message,
    pos: SourcePosition,
}

impl Diagnostic {
    /// Build a diagnostic from a raw level code. The code is not validated.
    pub fn new(level: i32, msg: Message, pos: SourcePosition) -> Self {
        Self { level, msg, pos }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self::new(Level::ERROR, Message::new(msg), SourcePosition::none())
    }

    pub fn warning(msg: impl Into<String>) -> Self {
        Self::new(Level::WARNING, Message::new(msg), SourcePosition::none())
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self::new(Level::INFO, Message::new(msg), SourcePosition::none())
    }

    pub fn with_position(mut self, pos: SourcePosition) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.msg = self.msg.with_explanation(explanation);
        self
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn msg(&self) -> &Message {
        &self.msg
    }

    pub fn pos(&self) -> &SourcePosition {
        &self.pos
    }
}
