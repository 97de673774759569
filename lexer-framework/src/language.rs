use crate::error::ConfigError;
use common_framework::message::Predicate;
use parser_framework::{satisfy, Parser};
use serde::Deserialize;
use std::fmt;
use std::rc::Rc;

/// A set of characters, used to describe identifier and operator characters.
///
/// Every variant except [`CharClass::Custom`] can be read from configuration
/// files:
///
/// ```json
/// { "any": [ "alphabetic", { "one_of": "_" } ] }
/// ```
#[derive(Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharClass {
    Alphabetic,
    Alphanumeric,
    Numeric,
    Whitespace,
    OneOf(String),
    Any(Vec<CharClass>),
    #[serde(skip_deserializing)]
    Custom(Predicate),
}

impl CharClass {
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(char) -> bool + 'static,
    {
        CharClass::Custom(Rc::new(predicate))
    }

    pub fn matches(&self, c: char) -> bool {
        match self {
            CharClass::Alphabetic => c.is_alphabetic(),
            CharClass::Alphanumeric => c.is_alphanumeric(),
            CharClass::Numeric => c.is_numeric(),
            CharClass::Whitespace => c.is_whitespace(),
            CharClass::OneOf(chars) => chars.contains(c),
            CharClass::Any(classes) => classes.iter().any(|class| class.matches(c)),
            CharClass::Custom(predicate) => predicate(c),
        }
    }

    /// A parser consuming one character of this class.
    pub fn parser(&self) -> Parser<char> {
        let class = self.clone();
        satisfy(move |c| class.matches(c))
    }
}

impl fmt::Debug for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharClass::Alphabetic => f.write_str("Alphabetic"),
            CharClass::Alphanumeric => f.write_str("Alphanumeric"),
            CharClass::Numeric => f.write_str("Numeric"),
            CharClass::Whitespace => f.write_str("Whitespace"),
            CharClass::OneOf(chars) => f.debug_tuple("OneOf").field(chars).finish(),
            CharClass::Any(classes) => f.debug_tuple("Any").field(classes).finish(),
            CharClass::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

const OPERATOR_CHARS: &str = ":!#$%&*+./<=>?@\\^|-~";

/// The lexical structure of a language.
///
/// A definition is built once, usually from one of the presets with
/// struct-update syntax, and handed to [`TokenParser::new`](crate::TokenParser::new).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LanguageDef {
    /// Marker opening a block comment, such as `/*`.
    pub comment_start: Option<String>,
    /// Marker closing a block comment, such as `*/`.
    pub comment_end: Option<String>,
    /// Marker starting a comment that runs to the end of the line.
    pub comment_line: Option<String>,
    /// Whether block comments nest.
    pub nested_comments: bool,
    pub ident_start: CharClass,
    pub ident_letter: CharClass,
    pub op_start: CharClass,
    pub op_letter: CharClass,
    pub reserved_names: Vec<String>,
    pub reserved_op_names: Vec<String>,
    /// Whether reserved names must match case exactly.
    pub case_sensitive: bool,
}

impl Default for LanguageDef {
    /// A definition without comments or reserved words.
    fn default() -> Self {
        Self {
            comment_start: None,
            comment_end: None,
            comment_line: None,
            nested_comments: false,
            ident_start: CharClass::Any(vec![
                CharClass::Alphabetic,
                CharClass::OneOf("_".to_string()),
            ]),
            ident_letter: CharClass::Any(vec![
                CharClass::Alphanumeric,
                CharClass::OneOf("_'".to_string()),
            ]),
            op_start: CharClass::OneOf(OPERATOR_CHARS.to_string()),
            op_letter: CharClass::OneOf(OPERATOR_CHARS.to_string()),
            reserved_names: Vec::new(),
            reserved_op_names: Vec::new(),
            case_sensitive: true,
        }
    }
}

impl LanguageDef {
    /// `/* ... */` block comments, which do not nest, and `//` line comments.
    pub fn java_style() -> Self {
        Self {
            comment_start: Some("/*".to_string()),
            comment_end: Some("*/".to_string()),
            comment_line: Some("//".to_string()),
            ..Self::default()
        }
    }

    /// Nested `{- ... -}` block comments and `--` line comments.
    pub fn haskell_style() -> Self {
        Self {
            comment_start: Some("{-".to_string()),
            comment_end: Some("-}".to_string()),
            comment_line: Some("--".to_string()),
            nested_comments: true,
            ..Self::default()
        }
    }

    pub fn with_reserved_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_reserved_op_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved_op_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Makes reserved names match regardless of case.
    pub fn case_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        self
    }

    /// The block comment markers, when both are configured.
    pub fn block_comment(&self) -> Option<(&str, &str)> {
        match (&self.comment_start, &self.comment_end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    pub fn is_identifier(&self, name: &str) -> bool {
        let mut chars = name.chars();
        chars.next().is_some_and(|c| self.ident_start.matches(c))
            && chars.all(|c| self.ident_letter.matches(c))
    }

    pub fn is_operator(&self, name: &str) -> bool {
        let mut chars = name.chars();
        chars.next().is_some_and(|c| self.op_start.matches(c))
            && chars.all(|c| self.op_letter.matches(c))
    }

    /// Checks that the definition describes a usable lexical structure.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match (&self.comment_start, &self.comment_end) {
            (Some(start), None) => return Err(ConfigError::UnpairedCommentStart(start.clone())),
            (None, Some(end)) => return Err(ConfigError::UnpairedCommentEnd(end.clone())),
            _ => {}
        }
        let markers = [&self.comment_start, &self.comment_end, &self.comment_line];
        if markers.iter().any(|marker| marker.as_deref() == Some("")) {
            return Err(ConfigError::EmptyCommentMarker);
        }
        if self.nested_comments && self.block_comment().is_none() {
            return Err(ConfigError::NestedWithoutBlockComments);
        }
        if let Some(name) = self.reserved_names.iter().find(|n| !self.is_identifier(n)) {
            return Err(ConfigError::InvalidReservedName(name.clone()));
        }
        if let Some(op) = self.reserved_op_names.iter().find(|op| !self.is_operator(op)) {
            return Err(ConfigError::InvalidReservedOp(op.clone()));
        }
        Ok(())
    }
}
