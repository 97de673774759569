use std::fmt;

/// Represents a location in the source text.
///
/// Parsers track progress as a plain byte offset; a `Position` is only
/// computed when a diagnostic needs a human-readable location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed, counted in characters)
    pub column: usize,
    /// Byte offset from the start of the input
    pub offset: usize,
}

impl Position {
    /// Creates a new position at the start of the input.
    pub fn new() -> Self {
        Self {
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    /// Creates a position with the given values.
    pub fn at(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// Computes the line and column of a byte offset in `text`.
    ///
    /// Offsets past the end (the end-of-input sentinel) are reported one
    /// column after the last character.
    pub fn locate(text: &str, offset: usize) -> Self {
        let end = offset.min(text.len());
        let mut position = Self::new();
        for ch in text[..end].chars() {
            if ch == '\n' {
                position.line += 1;
                position.column = 1;
            } else {
                position.column += 1;
            }
        }
        if offset > text.len() {
            position.column += 1;
        }
        position.offset = offset;
        position
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}
