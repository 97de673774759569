use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// The text consumed between two cursors over the same input.
///
/// A slice shares the `Arc<str>` buffer of the `Source` it came from, so
/// recognizing a span of input never copies it.
#[derive(Clone)]
pub struct TextSlice {
    buffer: Arc<str>,
    start: usize,
    end: usize,
}

impl TextSlice {
    /// Creates a slice of `buffer` covering the byte range `start..end`.
    pub fn new(buffer: Arc<str>, start: usize, end: usize) -> Self {
        assert!(
            start <= end && end <= buffer.len(),
            "text slice {start}..{end} is out of bounds for input of length {}",
            buffer.len()
        );
        Self { buffer, start, end }
    }

    /// Returns the start offset.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Returns the end offset.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Returns the slice as a string slice.
    pub fn as_str(&self) -> &str {
        &self.buffer[self.start..self.end]
    }
}

impl Deref for TextSlice {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl AsRef<str> for TextSlice {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TextSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for TextSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{}..{}", self.as_str(), self.start, self.end)
    }
}

impl PartialEq<&str> for TextSlice {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq for TextSlice {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end && self.as_str() == other.as_str()
    }
}

impl Eq for TextSlice {}
