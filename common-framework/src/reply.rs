use crate::{Message, ParseError, Source};

/// The outcome of running a parser against a [`Source`].
///
/// A failure keeps the source where it happened. Comparing its offset with
/// the offset the parser started from tells whether the parser consumed
/// input before failing, which is what `choice` uses to decide whether to
/// try the next alternative.
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok { value: T, rest: Source },
    Err { at: Source, message: Message },
}

impl<T> Reply<T> {
    pub fn ok(value: T, rest: Source) -> Self {
        Reply::Ok { value, rest }
    }

    pub fn err(at: Source, message: impl Into<Message>) -> Self {
        Reply::Err {
            at,
            message: message.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Reply::Ok { .. })
    }

    pub fn is_err(&self) -> bool {
        !self.is_ok()
    }

    /// The source after a success, or the failure point.
    pub fn source(&self) -> &Source {
        match self {
            Reply::Ok { rest, .. } => rest,
            Reply::Err { at, .. } => at,
        }
    }

    pub fn offset(&self) -> usize {
        self.source().offset()
    }

    /// Returns true if the reply moved past `start`.
    pub fn consumed_from(&self, start: &Source) -> bool {
        self.offset() != start.offset()
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Reply::Ok { value, .. } => Some(value),
            Reply::Err { .. } => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Reply::Ok { value, .. } => Some(value),
            Reply::Err { .. } => None,
        }
    }

    /// Renders the failure message, if this is a failure.
    pub fn message(&self) -> Option<String> {
        match self {
            Reply::Ok { .. } => None,
            Reply::Err { message, .. } => Some(message.render()),
        }
    }

    pub fn map<U, F>(self, f: F) -> Reply<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Reply::Ok { value, rest } => Reply::Ok {
                value: f(value),
                rest,
            },
            Reply::Err { at, message } => Reply::Err { at, message },
        }
    }

    /// Converts the reply into a `Result`, rendering the failure message.
    pub fn into_result(self) -> Result<T, ParseError> {
        match self {
            Reply::Ok { value, .. } => Ok(value),
            Reply::Err { at, message } => Err(ParseError::new(at.position(), message.render())),
        }
    }
}

impl<T: PartialEq> PartialEq for Reply<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Reply::Ok { value: a, rest: r }, Reply::Ok { value: b, rest: s }) => a == b && r == s,
            (Reply::Err { at: a, message: m }, Reply::Err { at: b, message: n }) => {
                a == b && m == n
            }
            _ => false,
        }
    }
}
