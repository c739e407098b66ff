use std::fmt;
use std::path::{Path, PathBuf};

/// What a diagnostic position needs to know about the file it points into.
pub trait Source: fmt::Debug + Send + Sync {
    /// Whether the file could be resolved at all.
    fn exists(&self) -> bool;

    /// The on-disk file backing this source, if there is one.
    fn file(&self) -> Option<&Path>;

    /// The path the source was registered under.
    fn path(&self) -> &str;

    /// Zero-based line index of `offset`, or `None` when the offset lies
    /// outside the content.
    fn offset_to_line(&self, offset: usize) -> Option<usize>;

    /// Offset at which the line containing `offset` begins.
    fn start_of_line(&self, offset: usize) -> usize;

    /// Raw text of the line containing `offset`, line terminator included.
    fn line_content(&self, offset: usize) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Disk,
    Virtual,
    Unresolved,
}

/// An in-memory source file with a precomputed line index.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: String,
    file: Option<PathBuf>,
    content: String,
    origin: Origin,
    line_starts: Vec<usize>,
}

impl SourceFile {
    /// A source read from `path` on disk.
    pub fn new(path: impl Into<PathBuf>, content: String) -> Self {
        let file = path.into();
        let path = file.display().to_string();
        Self::build(path, Some(file), content, Origin::Disk)
    }

    /// A source that exists but has no backing file (REPL input, generated code).
    pub fn virtual_file(name: impl Into<String>, content: String) -> Self {
        Self::build(name.into(), None, content, Origin::Virtual)
    }

    /// A source whose content is known but whose file can no longer be resolved.
    pub fn unresolved(name: impl Into<String>, content: String) -> Self {
        Self::build(name.into(), None, content, Origin::Unresolved)
    }

    /// The placeholder source of positions that point nowhere.
    pub fn no_source() -> Self {
        Self::build(String::new(), None, String::new(), Origin::Unresolved)
    }

    fn build(path: String, file: Option<PathBuf>, content: String, origin: Origin) -> Self {
        let line_starts = line_starts(&content);
        Self {
            path,
            file,
            content,
            origin,
            line_starts,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Get line and column (0-indexed) from an offset.
    pub fn line_col(&self, offset: usize) -> Option<(usize, usize)> {
        let line = self.offset_to_line(offset)?;
        Some((line, offset - self.line_starts[line]))
    }

    fn line_index(&self, offset: usize) -> usize {
        self.line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1)
    }
}

impl Source for SourceFile {
    fn exists(&self) -> bool {
        self.origin != Origin::Unresolved
    }

    fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn offset_to_line(&self, offset: usize) -> Option<usize> {
        (offset <= self.content.len()).then(|| self.line_index(offset))
    }

    fn start_of_line(&self, offset: usize) -> usize {
        self.line_starts[self.line_index(offset)]
    }

    fn line_content(&self, offset: usize) -> &str {
        if offset > self.content.len() {
            return "";
        }
        let line = self.line_index(offset);
        let start = self.line_starts[line];
        let end = self
            .line_starts
            .get(line + 1)
            .copied()
            .unwrap_or(self.content.len());
        &self.content[start..end]
    }
}

/// Offsets at which each line begins. A line ends after LF, form feed, or a
/// CR that is not the first half of CR+LF.
fn line_starts(content: &str) -> Vec<usize> {
    let bytes = content.as_bytes();
    let breaks = bytes.iter().enumerate().filter_map(|(i, &b)| {
        let is_break = match b {
            b'\n' | b'\x0c' => true,
            b'\r' => bytes.get(i + 1) != Some(&b'\n'),
            _ => false,
        };
        is_break.then_some(i + 1)
    });
    std::iter::once(0).chain(breaks).collect()
}
