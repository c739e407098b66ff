use crate::source::{Source, SourceFile};
use std::sync::Arc;

/// Line index reported for positions whose line cannot be determined.
pub const UNKNOWN_LINE: i32 = -2;

/// A point in a source file, as produced by the compiler.
#[derive(Debug, Clone)]
pub struct SourcePosition {
    source: Arc<dyn Source>,
    point: Option<usize>,
}

impl SourcePosition {
    pub fn new(source: Arc<dyn Source>, point: usize) -> Self {
        Self {
            source,
            point: Some(point),
        }
    }

    /// A position that points nowhere.
    pub fn none() -> Self {
        Self {
            source: Arc::new(SourceFile::no_source()),
            point: None,
        }
    }

    /// Whether the position refers to an actual point. This is independent
    /// of whether its source file exists.
    pub fn exists(&self) -> bool {
        self.point.is_some()
    }

    pub fn point(&self) -> Option<usize> {
        self.point
    }

    pub fn source(&self) -> &dyn Source {
        self.source.as_ref()
    }

    /// Zero-based line index, or [`UNKNOWN_LINE`].
    pub fn line(&self) -> i32 {
        self.point
            .and_then(|point| self.source.offset_to_line(point))
            .and_then(|line| i32::try_from(line).ok())
            .unwrap_or(UNKNOWN_LINE)
    }

    /// Zero-based byte column of the point within its line.
    pub fn column(&self) -> Option<usize> {
        self.point
            .map(|point| point.saturating_sub(self.source.start_of_line(point)))
    }

    /// Raw text of the line containing the point, terminator included.
    pub fn line_content(&self) -> &str {
        match self.point {
            Some(point) => self.source.line_content(point),
            None => "",
        }
    }
}

impl Default for SourcePosition {
    fn default() -> Self {
        Self::none()
    }
}
