use crate::reader::{Location, Reader};
use std::fmt;
use std::sync::Arc;

/// Reader over text, yielding `char`s
///
/// The source is shared, so cloning and advancing are cheap. The offset is
/// the byte offset into the source.
#[derive(Debug, Clone)]
pub struct StrReader {
    source: Arc<str>,
    offset: usize,
}

impl StrReader {
    pub fn new(source: impl Into<Arc<str>>) -> Self {
        StrReader {
            source: source.into(),
            offset: 0,
        }
    }

    /// The whole input this reader walks over
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The input not yet consumed
    pub fn remaining(&self) -> &str {
        &self.source[self.offset..]
    }
}

impl From<&str> for StrReader {
    fn from(source: &str) -> Self {
        StrReader::new(source)
    }
}

impl Reader for StrReader {
    type Element = char;
    type Location = TextLocation;

    fn first(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn rest(&self) -> Self {
        match self.first() {
            Some(ch) => StrReader {
                source: Arc::clone(&self.source),
                offset: self.offset + ch.len_utf8(),
            },
            None => self.clone(),
        }
    }

    fn offset(&self) -> usize {
        self.offset
    }

    fn location(&self) -> TextLocation {
        TextLocation::new(Arc::clone(&self.source), self.offset)
    }
}

/// Line and column of a position in text
///
/// Lines and columns are 1-based; the column counts characters, not bytes.
#[derive(Debug, Clone)]
pub struct TextLocation {
    source: Arc<str>,
    offset: usize,
    line: usize,
    column: usize,
}

impl TextLocation {
    fn new(source: Arc<str>, offset: usize) -> Self {
        let before = &source[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        TextLocation {
            source,
            offset,
            line,
            column,
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Up to two lines of context on either side, with a pointer under the
    /// column of this location
    fn context_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        let first = self.line.saturating_sub(2).max(1);
        let last = self.line + 2;

        for (index, content) in self.source.split('\n').enumerate() {
            let number = index + 1;
            if number < first {
                continue;
            }
            if number > last {
                break;
            }
            let prefix = if number == self.line {
                format!("  > {} | ", number)
            } else {
                format!("    {} | ", number)
            };
            lines.push(format!("{}{}", prefix, content));
            if number == self.line {
                let pointer_offset = prefix.len() + self.column - 1;
                lines.push(format!("{}^--- here", " ".repeat(pointer_offset)));
            }
        }

        lines
    }
}

impl fmt::Display for TextLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl Location for TextLocation {
    fn long_description(&self) -> String {
        self.context_lines().join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let reader = StrReader::new("hello\nworld");

        assert_eq!(reader.first(), Some('h'));

        let reader = reader.rest();
        assert_eq!(reader.first(), Some('e'));
        assert_eq!(reader.offset(), 1);
    }

    #[test]
    fn test_end_of_input() {
        let mut reader = StrReader::new("ab");
        reader = reader.rest().rest();

        assert!(reader.at_end());
        assert_eq!(reader.first(), None);
        assert!(reader.read().is_none());

        // rest() at the end stays at the end
        assert_eq!(reader.rest().offset(), 2);
    }

    #[test]
    fn test_empty_input() {
        let reader = StrReader::new("");
        assert!(reader.at_end());
        assert_eq!(reader.offset(), 0);
    }

    #[test]
    fn test_multibyte_offsets() {
        let reader = StrReader::new("こん");
        let (ch, reader) = reader.read().unwrap();
        assert_eq!(ch, 'こ');
        assert_eq!(reader.offset(), 3);
        assert_eq!(reader.remaining(), "ん");
    }

    #[test]
    fn test_old_reader_stays_valid() {
        let start = StrReader::new("abcd");
        let advanced = start.rest().rest();

        assert_eq!(start.first(), Some('a'));
        assert_eq!(advanced.first(), Some('c'));
        assert!(advanced.offset() > start.offset());
    }

    #[test]
    fn test_location_line_and_column() {
        let mut reader = StrReader::new("line1\nline2");
        for _ in 0..8 {
            reader = reader.rest();
        }
        let location = reader.location();

        assert_eq!(location.line(), 2);
        assert_eq!(location.column(), 3);
        assert_eq!(location.to_string(), "2:3");
    }

    #[test]
    fn test_location_at_end_after_newline() {
        let mut reader = StrReader::new("hello\n");
        for _ in 0..6 {
            reader = reader.rest();
        }
        let location = reader.location();

        assert_eq!(location.line(), 2);
        assert_eq!(location.column(), 1);
    }

    #[test]
    fn test_long_description_points_at_column() {
        let mut reader = StrReader::new("first\nsecond\nthird");
        for _ in 0..9 {
            reader = reader.rest();
        }
        let description = reader.location().long_description();

        assert!(description.contains("  > 2 | second"));
        assert!(description.contains("    1 | first"));
        assert!(description.contains("    3 | third"));

        let pointer = description
            .lines()
            .find(|line| line.contains("^--- here"))
            .unwrap();
        let marker = "  > 2 | ";
        assert_eq!(pointer.find('^').unwrap(), marker.len() + 3);
    }

    #[test]
    fn test_long_description_empty_source() {
        let reader = StrReader::new("");
        let description = reader.location().long_description();
        assert!(description.contains("^--- here"));
    }
}
