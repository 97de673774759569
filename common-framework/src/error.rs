use crate::Position;
use thiserror::Error;

/// A failed parse as reported to the caller of a grammar.
///
/// Carries where the deepest unrecovered failure happened and its rendered
/// message; no partial value survives a failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{position}: {message}")]
pub struct ParseError {
    pub position: Position,
    pub message: String,
}

impl ParseError {
    pub fn new(position: Position, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}
