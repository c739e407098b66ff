//! Translation of compiler positions into the reporter's position record.
//!
//! The compiler counts lines from zero and the reporter from one. Columns
//! ("pointers") stay zero-based. A position degrades field by field: a
//! position that points nowhere becomes [`ExternalPosition::EMPTY`], and a
//! position into a file that cannot be resolved keeps its line data but loses
//! everything tied to the file itself.

use diagbridge_common::SourcePosition;
use std::path::{Path, PathBuf};

/// A presentation-ready source position. Any field may be unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalPosition {
    /// The file on disk, when the source exists and has one.
    pub source_file: Option<PathBuf>,
    /// Path of the source, when it exists.
    pub source_path: Option<String>,
    /// One-based line number.
    pub line: Option<u32>,
    /// Text of the line, without its line terminator.
    pub line_content: Option<String>,
    /// Byte offset of the position in its source.
    pub offset: Option<usize>,
    /// Zero-based column of the position within its line, in characters.
    /// Absent when the offset lies past the end of the source.
    pub pointer: Option<usize>,
    /// Whitespace that lines a caret up under `pointer` when printed below
    /// `line_content`.
    pub pointer_space: Option<String>,
}

impl ExternalPosition {
    /// The position of a diagnostic that points nowhere.
    pub const EMPTY: ExternalPosition = ExternalPosition {
        source_file: None,
        source_path: None,
        line: None,
        line_content: None,
        offset: None,
        pointer: None,
        pointer_space: None,
    };

    /// Translate a compiler position.
    pub fn translate(pos: &SourcePosition) -> Self {
        let Some(point) = pos.point() else {
            return Self::EMPTY;
        };
        let src = pos.source();
        let raw_line = pos.line_content();
        let line_content = strip_line_terminator(raw_line).to_owned();

        let mut translated = ExternalPosition {
            line: line_number(pos.line()),
            offset: Some(point),
            ..Self::EMPTY
        };

        if src.exists() {
            translated.source_file = src.file().map(Path::to_path_buf);
            translated.source_path = Some(src.path().to_owned());

            // A point past the end of the content has no column.
            if src.offset_to_line(point).is_some() {
                let byte_col = point.saturating_sub(src.start_of_line(point));
                let pointer = char_column(raw_line, byte_col);
                translated.pointer_space = Some(pointer_space(&line_content, pointer));
                translated.pointer = Some(pointer);
            }
        }

        translated.line_content = Some(line_content);
        translated
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }
}

impl From<&SourcePosition> for ExternalPosition {
    fn from(pos: &SourcePosition) -> Self {
        Self::translate(pos)
    }
}

/// One-based line number for a zero-based line index. Negative results,
/// including the one produced by [`diagbridge_common::UNKNOWN_LINE`], are
/// unknown.
pub fn line_number(index: i32) -> Option<u32> {
    index
        .checked_add(1)
        .and_then(|line| u32::try_from(line).ok())
}

/// Remove exactly one trailing line terminator: CR+LF, LF or form feed.
pub fn strip_line_terminator(line: &str) -> &str {
    if let Some(stripped) = line.strip_suffix("\r\n") {
        stripped
    } else if let Some(stripped) = line.strip_suffix(|c: char| c == '\n' || c == '\x0c') {
        stripped
    } else {
        line
    }
}

/// Number of characters of `line` that start before `byte_col`.
fn char_column(line: &str, byte_col: usize) -> usize {
    line.char_indices()
        .take_while(|&(i, _)| i < byte_col)
        .count()
}

/// Alignment for a caret at character column `pointer`: a tab wherever the
/// line has a tab, a space everywhere else. Columns past the end of the line
/// are spaces.
pub fn pointer_space(line_content: &str, pointer: usize) -> String {
    line_content
        .chars()
        .chain(std::iter::repeat(' '))
        .take(pointer)
        .map(|c| if c == '\t' { '\t' } else { ' ' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use diagbridge_common::{Source, SourceFile, UNKNOWN_LINE};
    use std::sync::Arc;

    fn at(src: SourceFile, point: usize) -> SourcePosition {
        let src: Arc<dyn Source> = Arc::new(src);
        SourcePosition::new(src, point)
    }

    #[test]
    fn test_missing_position_is_empty() {
        let translated = ExternalPosition::translate(&SourcePosition::none());
        assert!(translated.is_empty());
        assert_eq!(translated, ExternalPosition::default());
    }

    #[test]
    fn test_tab_indented_line() {
        let src = SourceFile::new("src/Foo.scala", "object Foo\n\tfoo = 1\n".to_string());
        let start = 11;
        let translated = ExternalPosition::translate(&at(src, start + 5));

        assert_eq!(translated.source_file, Some(PathBuf::from("src/Foo.scala")));
        assert_eq!(translated.source_path.as_deref(), Some("src/Foo.scala"));
        assert_eq!(translated.line, Some(2));
        assert_eq!(translated.line_content.as_deref(), Some("\tfoo = 1"));
        assert_eq!(translated.offset, Some(16));
        assert_eq!(translated.pointer, Some(5));
        assert_eq!(translated.pointer_space.as_deref(), Some("\t    "));
    }

    #[test]
    fn test_unresolved_file_keeps_line_data() {
        let src = SourceFile::unresolved("Gone.scala", "a\nb = c\n".to_string());
        let translated = ExternalPosition::translate(&at(src, 6));

        assert_eq!(translated.source_file, None);
        assert_eq!(translated.source_path, None);
        assert_eq!(translated.pointer, None);
        assert_eq!(translated.pointer_space, None);
        assert_eq!(translated.line, Some(2));
        assert_eq!(translated.line_content.as_deref(), Some("b = c"));
        assert_eq!(translated.offset, Some(6));
    }

    #[test]
    fn test_virtual_file_has_path_but_no_file() {
        let src = SourceFile::virtual_file("<repl>", "1 + \"a\"".to_string());
        let translated = ExternalPosition::translate(&at(src, 4));

        assert_eq!(translated.source_file, None);
        assert_eq!(translated.source_path.as_deref(), Some("<repl>"));
        assert_eq!(translated.pointer, Some(4));
        assert_eq!(translated.pointer_space.as_deref(), Some("    "));
    }

    #[test]
    fn test_unknown_line_is_absent() {
        assert_eq!(line_number(UNKNOWN_LINE), None);
        assert_eq!(line_number(-1), Some(0));
        assert_eq!(line_number(0), Some(1));
        assert_eq!(line_number(41), Some(42));
        assert_eq!(line_number(i32::MAX), None);

        let src = SourceFile::new("A.scala", "abc".to_string());
        let translated = ExternalPosition::translate(&at(src, 99));
        assert_eq!(translated.line, None);
        assert_eq!(translated.offset, Some(99));
    }

    #[test]
    fn test_offset_past_end_has_no_pointer() {
        for point in [5, 99, usize::MAX] {
            let src = SourceFile::new("A.scala", "abc\n".to_string());
            let translated = ExternalPosition::translate(&at(src, point));
            assert_eq!(translated.line, None);
            assert_eq!(translated.line_content.as_deref(), Some(""));
            assert_eq!(translated.offset, Some(point));
            assert_eq!(translated.pointer, None);
            assert_eq!(translated.pointer_space, None);
            assert_eq!(translated.source_path.as_deref(), Some("A.scala"));
        }
    }

    #[test]
    fn test_offset_at_end_of_content() {
        let src = SourceFile::new("A.scala", "abc\n".to_string());
        let translated = ExternalPosition::translate(&at(src, 4));
        assert_eq!(translated.line, Some(2));
        assert_eq!(translated.line_content.as_deref(), Some(""));
        assert_eq!(translated.pointer, Some(0));
        assert_eq!(translated.pointer_space.as_deref(), Some(""));

        let src = SourceFile::new("A.scala", "abc\n".to_string());
        let translated = ExternalPosition::translate(&at(src, 3));
        assert_eq!(translated.line, Some(1));
        assert_eq!(translated.line_content.as_deref(), Some("abc"));
        assert_eq!(translated.pointer, Some(3));
        assert_eq!(translated.pointer_space.as_deref(), Some("   "));
    }

    #[test]
    fn test_pointer_counts_characters() {
        let line = "val é = \"x\"";
        let src = SourceFile::new("U.scala", format!("{line}\n"));
        let translated = ExternalPosition::translate(&at(src, 7));

        assert_eq!(translated.pointer, Some(6));
        let space = translated.pointer_space.unwrap();
        assert_eq!(space, "      ");
        assert_eq!(line.chars().nth(space.chars().count()), Some('='));
    }

    #[test]
    fn test_pointer_after_multibyte_and_tab() {
        let src = SourceFile::new("U.scala", "x\n\t→\ty = 1\n".to_string());
        // "\t→\t" is 5 bytes; 'y' is the fourth character.
        let translated = ExternalPosition::translate(&at(src, 2 + 5));
        assert_eq!(translated.pointer, Some(3));
        assert_eq!(translated.pointer_space.as_deref(), Some("\t \t"));
    }

    #[test]
    fn test_strip_line_terminator() {
        assert_eq!(strip_line_terminator("abc\r\n"), "abc");
        assert_eq!(strip_line_terminator("abc\n"), "abc");
        assert_eq!(strip_line_terminator("abc\x0c"), "abc");
        assert_eq!(strip_line_terminator("abc"), "abc");
        assert_eq!(strip_line_terminator("abc \t"), "abc \t");
        assert_eq!(strip_line_terminator("abc\r"), "abc\r");
        assert_eq!(strip_line_terminator("abc\n\n"), "abc\n");
        assert_eq!(strip_line_terminator(""), "");
    }

    #[test]
    fn test_strip_lengths() {
        for (line, removed) in [("x = 1\r\n", 2), ("x = 1\n", 1), ("x = 1\x0c", 1), ("x = 1", 0)] {
            let stripped = strip_line_terminator(line);
            assert_eq!(stripped.len(), line.len() - removed);
            assert_eq!(strip_line_terminator(stripped), stripped);
        }
    }

    #[test]
    fn test_pointer_space_mirrors_tabs() {
        let line = "\t \tif (ä)\t{";
        let chars: Vec<char> = line.chars().collect();
        for pointer in 0..=chars.len() + 2 {
            let space = pointer_space(line, pointer);
            assert_eq!(space.chars().count(), pointer);
            for (i, c) in space.chars().enumerate() {
                let is_tab = chars.get(i) == Some(&'\t');
                assert_eq!(c == '\t', is_tab, "column {i}");
                assert!(c == '\t' || c == ' ');
            }
        }
    }

    #[test]
    fn test_pointer_on_crlf_line() {
        let src = SourceFile::new("Win.scala", "a\r\n\tb\r\n".to_string());
        let translated = ExternalPosition::translate(&at(src, 4));
        assert_eq!(translated.line, Some(2));
        assert_eq!(translated.line_content.as_deref(), Some("\tb"));
        assert_eq!(translated.pointer, Some(1));
        assert_eq!(translated.pointer_space.as_deref(), Some("\t"));
    }

    #[test]
    fn test_pointer_on_crlf_line_feed() {
        let src = SourceFile::new("Win.scala", "a\r\n\tb\r\n".to_string());
        let translated = ExternalPosition::translate(&at(src, 6));
        assert_eq!(translated.line, Some(2));
        assert_eq!(translated.line_content.as_deref(), Some("\tb"));
        assert_eq!(translated.pointer, Some(3));
        assert_eq!(translated.pointer_space.as_deref(), Some("\t  "));
    }
}
