//! Diagnostics replay files.
//!
//! A replay file is a JSON array of diagnostics against one source file:
//!
//! ```json
//! [
//!   { "level": "error", "offset": 15, "message": "type mismatch", "explanation": "..." },
//!   { "level": 1, "message": "no position" }
//! ]
//! ```
//!
//! Levels are names or raw compiler level codes. Raw codes are passed through
//! unchecked so that the reporter sees exactly what the compiler would send.

use diagbridge_common::{Diagnostic, Level, Message, Source, SourcePosition};
use miette::{IntoDiagnostic, Result, WrapErr};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LevelField {
    Code(i32),
    Name(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiagnosticRecord {
    pub level: LevelField,

    /// Offset into the source; absent for diagnostics without a position.
    #[serde(default)]
    pub offset: Option<usize>,

    pub message: String,

    #[serde(default)]
    pub explanation: Option<String>,
}

impl DiagnosticRecord {
    pub fn resolve(self, source: &Arc<dyn Source>) -> Result<Diagnostic> {
        let level = match self.level {
            LevelField::Code(code) => code,
            LevelField::Name(name) => name.parse::<Level>().map_err(|e| miette::miette!(e))?.code(),
        };

        let mut msg = Message::new(self.message);
        if let Some(explanation) = self.explanation {
            msg = msg.with_explanation(explanation);
        }

        let pos = match self.offset {
            Some(offset) => SourcePosition::new(Arc::clone(source), offset),
            None => SourcePosition::none(),
        };

        Ok(Diagnostic::new(level, msg, pos))
    }
}

/// Parse replay records from JSON text.
pub fn parse(json: &str, source: &Arc<dyn Source>) -> Result<Vec<Diagnostic>> {
    let records: Vec<DiagnosticRecord> = serde_json::from_str(json)
        .into_diagnostic()
        .wrap_err("Failed to parse diagnostics")?;

    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            record
                .resolve(source)
                .wrap_err_with(|| format!("In diagnostic #{}", i + 1))
        })
        .collect()
}

/// Load a replay file.
pub fn load(path: &Path, source: &Arc<dyn Source>) -> Result<Vec<Diagnostic>> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| miette::miette!("Failed to read {}: {}", path.display(), e))?;
    parse(&json, source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use diagbridge_common::SourceFile;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn source() -> Arc<dyn Source> {
        Arc::new(SourceFile::new("A.scala", "object A\n".to_string()))
    }

    #[test]
    fn test_parse_records() {
        let json = r#"[
            { "level": "error", "offset": 7, "message": "expected ':'", "explanation": "objects need a body" },
            { "level": 1, "message": "deprecated flag" },
            { "level": 9, "message": "from the future" }
        ]"#;

        let diagnostics = parse(json, &source()).unwrap();
        assert_eq!(diagnostics.len(), 3);

        assert_eq!(diagnostics[0].level(), Level::ERROR);
        assert_eq!(diagnostics[0].pos().point(), Some(7));
        assert_eq!(diagnostics[0].msg().explanation(), "objects need a body");

        assert_eq!(diagnostics[1].level(), Level::WARNING);
        assert!(!diagnostics[1].pos().exists());

        assert_eq!(diagnostics[2].level(), 9);
    }

    #[test]
    fn test_unknown_level_name() {
        let json = r#"[{ "level": "fatal", "message": "boom" }]"#;
        let err = parse(json, &source()).unwrap_err();
        assert!(err
            .chain()
            .any(|cause| cause.to_string().contains("unknown diagnostic level: fatal")));
    }

    #[test]
    fn test_load_file() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        writeln!(file, r#"[{{ "level": "info", "offset": 0, "message": "hi" }}]"#).unwrap();

        let diagnostics = load(file.path(), &source()).unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].level(), Level::INFO);
    }
}
