//! Common Framework
//!
//! The cursor and result model shared by parser-framework and lexer-framework.

pub mod error;
pub mod message;
pub mod position;
pub mod reply;
pub mod source;
pub mod text_slice;

pub use error::ParseError;
pub use message::Message;
pub use position::Position;
pub use reply::Reply;
pub use source::Source;
pub use text_slice::TextSlice;
