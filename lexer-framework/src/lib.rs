//! Lexer Framework
//!
//! Generates token parsers from a [`LanguageDef`]: white space and comment
//! skipping, identifiers and operators with their reserved forms, character,
//! string and number literals, and bracket and separator helpers. Every
//! token parser skips the white space that follows it.

pub mod error;
mod ident;
pub mod language;
mod literal;
pub mod number;
mod space;
pub mod token;

pub use error::ConfigError;
pub use language::{CharClass, LanguageDef};
pub use number::Number;
pub use token::{make_token_parser, TokenParser};
