use thiserror::Error;

/// A language definition that cannot produce a coherent set of token parsers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("block comment start {0:?} has no matching end marker")]
    UnpairedCommentStart(String),

    #[error("block comment end {0:?} has no matching start marker")]
    UnpairedCommentEnd(String),

    #[error("comment markers must not be empty")]
    EmptyCommentMarker,

    #[error("nested comments require block comment markers")]
    NestedWithoutBlockComments,

    #[error("reserved name {0:?} is not a valid identifier")]
    InvalidReservedName(String),

    #[error("reserved operator {0:?} is not a valid operator")]
    InvalidReservedOp(String),
}
