use crate::{Position, TextSlice};
use std::any::Any;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// An immutable cursor over the input text.
///
/// Advancing never mutates a `Source`; it returns a new one sharing the same
/// buffer. The offset ranges over `0..=len + 1`, where `len + 1` is the
/// sentinel position produced by consuming end of input.
///
/// A source may carry an opaque user state. Equality compares the text and
/// the offset only.
#[derive(Clone)]
pub struct Source {
    text: Arc<str>,
    offset: usize,
    user_state: Option<Rc<dyn Any>>,
}

impl Source {
    /// Creates a source positioned at the start of `text`.
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self {
            text: text.into(),
            offset: 0,
            user_state: None,
        }
    }

    /// Creates a source positioned at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is past the end-of-input sentinel or does not fall
    /// on a character boundary.
    pub fn at(text: impl Into<Arc<str>>, offset: usize) -> Self {
        Self::new(text).moved_to(offset)
    }

    /// Returns the whole input text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the shared input buffer.
    pub fn buffer(&self) -> Arc<str> {
        Arc::clone(&self.text)
    }

    /// Returns the current byte offset.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the length of the whole input in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns true if the whole input is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns true if no characters are left.
    pub fn is_eof(&self) -> bool {
        self.offset >= self.text.len()
    }

    /// Returns the unconsumed input. Empty at and past end of input.
    pub fn remaining(&self) -> &str {
        self.text.get(self.offset..).unwrap_or("")
    }

    /// Returns the next character without advancing.
    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Returns a source `bytes` further along the input.
    ///
    /// # Panics
    ///
    /// Panics if the result would be out of range; see [`Source::at`].
    pub fn advance(&self, bytes: usize) -> Self {
        self.moved_to(self.offset + bytes)
    }

    /// Returns a source at `offset` over the same input, keeping the user state.
    ///
    /// # Panics
    ///
    /// Panics if the result would be out of range; see [`Source::at`].
    pub fn moved_to(&self, offset: usize) -> Self {
        let len = self.text.len();
        assert!(
            offset <= len + 1,
            "source offset {offset} is out of range for input of length {len}"
        );
        assert!(
            offset > len || self.text.is_char_boundary(offset),
            "source offset {offset} is not on a character boundary"
        );
        Self {
            text: Arc::clone(&self.text),
            offset,
            user_state: self.user_state.clone(),
        }
    }

    /// Returns the line and column of the current offset.
    pub fn position(&self) -> Position {
        Position::locate(&self.text, self.offset)
    }

    /// Returns the text between this source and a later one.
    pub fn slice_to(&self, end: &Source) -> TextSlice {
        let len = self.text.len();
        let start = self.offset.min(len);
        let end = end.offset.clamp(start, len);
        TextSlice::new(Arc::clone(&self.text), start, end)
    }

    /// Returns the user state if one of type `U` is attached.
    pub fn user_state<U: 'static>(&self) -> Option<&U> {
        self.user_state.as_deref().and_then(|state| state.downcast_ref())
    }

    /// Returns a copy of this source carrying `state`.
    pub fn with_user_state<U: 'static>(&self, state: U) -> Self {
        self.with_shared_state(Rc::new(state))
    }

    /// Returns a copy of this source carrying an already shared state.
    pub fn with_shared_state(&self, state: Rc<dyn Any>) -> Self {
        Self {
            text: Arc::clone(&self.text),
            offset: self.offset,
            user_state: Some(state),
        }
    }
}

impl PartialEq for Source {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset
            && (Arc::ptr_eq(&self.text, &other.text) || self.text == other.text)
    }
}

impl Eq for Source {}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Source")
            .field("offset", &self.offset)
            .field("remaining", &self.remaining())
            .finish()
    }
}

impl From<&str> for Source {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Source {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<&Source> for Source {
    fn from(source: &Source) -> Self {
        source.clone()
    }
}
