//! Parsers that look at the input directly.

use crate::Parser;
use common_framework::message::Predicate;
use common_framework::{Message, Position, Reply, Source, TextSlice};
use regex::Regex;
use std::any::Any;
use std::rc::Rc;

/// Matches `literal` exactly, yielding it.
pub fn string(literal: &str) -> Parser<String> {
    let literal: Rc<str> = Rc::from(literal);
    Parser::new("string", move |input| {
        if input.remaining().starts_with(&*literal) {
            Reply::ok(literal.to_string(), input.advance(literal.len()))
        } else {
            Reply::err(input.clone(), Message::Literal(Rc::clone(&literal)))
        }
    })
}

/// Matches `literal` ignoring case, yielding the text as it appears in the input.
pub fn string_no_case(literal: &str) -> Parser<String> {
    let literal: Rc<str> = Rc::from(literal);
    let folded = literal.to_lowercase();
    let width = literal.chars().count();
    Parser::new("string_no_case", move |input| {
        let remaining = input.remaining();
        let end = remaining
            .char_indices()
            .nth(width)
            .map_or(remaining.len(), |(index, _)| index);
        let candidate = &remaining[..end];
        if candidate.chars().count() == width && candidate.to_lowercase() == folded {
            Reply::ok(candidate.to_string(), input.advance(end))
        } else {
            Reply::err(input.clone(), Message::Literal(Rc::clone(&literal)))
        }
    })
}

/// Matches the regular expression `pattern` at the current position.
///
/// Only a match that starts exactly at the cursor counts; a match further
/// along the input is a failure.
pub fn pattern(pattern: &str) -> Result<Parser<String>, regex::Error> {
    let regex = Regex::new(&format!("^(?:{pattern})"))?;
    let source: Rc<str> = Rc::from(pattern);
    Ok(Parser::new("pattern", move |input| {
        match regex.find(input.remaining()) {
            Some(found) if found.start() == 0 => {
                Reply::ok(found.as_str().to_string(), input.advance(found.end()))
            }
            _ => Reply::err(input.clone(), Message::Pattern(Rc::clone(&source))),
        }
    }))
}

/// Consumes one character accepted by `predicate`.
pub fn satisfy<F>(predicate: F) -> Parser<char>
where
    F: Fn(char) -> bool + 'static,
{
    let predicate: Predicate = Rc::new(predicate);
    Parser::new("satisfy", move |input| match input.peek() {
        Some(c) if predicate(c) => Reply::ok(c, input.advance(c.len_utf8())),
        _ => Reply::err(input.clone(), Message::Satisfying(Rc::clone(&predicate))),
    })
}

/// Succeeds without consuming input, yielding `value`.
pub fn pure<T>(value: T) -> Parser<T>
where
    T: Clone + 'static,
{
    Parser::new("pure", move |input| Reply::ok(value.clone(), input.clone()))
}

/// Succeeds without consuming input.
pub fn empty() -> Parser<()> {
    pure(())
}

/// Always fails with `message`, consuming nothing.
pub fn fail<T: 'static>(message: &str) -> Parser<T> {
    let message = Message::text(message);
    Parser::new("fail", move |input| Reply::err(input.clone(), message.clone()))
}

/// Always fails, reporting `what` as unexpected.
pub fn unexpected<T: 'static>(what: &str) -> Parser<T> {
    let message = Message::unexpected(what);
    Parser::new("unexpected", move |input| {
        Reply::err(input.clone(), message.clone())
    })
}

/// Succeeds only at the exact end of input, stepping onto the sentinel position.
pub fn eof() -> Parser<()> {
    Parser::new("eof", |input| {
        if input.offset() == input.len() {
            Reply::ok((), input.advance(1))
        } else {
            Reply::err(input.clone(), Message::expected("end of input"))
        }
    })
}

/// Yields the current position without consuming input.
pub fn position() -> Parser<Position> {
    Parser::new("position", |input| Reply::ok(input.position(), input.clone()))
}

/// Runs `parser` and yields the text it consumed instead of its value.
pub fn recognize<T: 'static>(parser: Parser<T>) -> Parser<TextSlice> {
    Parser::new("recognize", move |input| match parser.parse(input) {
        Reply::Ok { rest, .. } => Reply::ok(input.slice_to(&rest), rest),
        Reply::Err { at, message } => Reply::Err { at, message },
    })
}

/// Yields a clone of the user state, if one of type `U` is attached.
pub fn get_state<U>() -> Parser<Option<U>>
where
    U: Clone + 'static,
{
    Parser::new("get_state", |input| {
        Reply::ok(input.user_state::<U>().cloned(), input.clone())
    })
}

/// Replaces the user state carried by the source.
pub fn put_state<U: 'static>(state: U) -> Parser<()> {
    let state: Rc<dyn Any> = Rc::new(state);
    Parser::new("put_state", move |input: &Source| {
        Reply::ok((), input.with_shared_state(Rc::clone(&state)))
    })
}

/// Matches the character `expected`.
pub fn char_(expected: char) -> Parser<char> {
    let message = Message::deferred(move || format!("expected {expected:?}"));
    Parser::new("char", move |input| match input.peek() {
        Some(c) if c == expected => Reply::ok(c, input.advance(c.len_utf8())),
        _ => Reply::err(input.clone(), message.clone()),
    })
}

/// Consumes any single character.
pub fn any_char() -> Parser<char> {
    satisfy(|_| true).label("any character")
}

/// Consumes one of the characters in `chars`.
pub fn one_of(chars: &str) -> Parser<char> {
    let chars = chars.to_string();
    satisfy(move |c| chars.contains(c))
}

/// Consumes a character not in `chars`.
pub fn none_of(chars: &str) -> Parser<char> {
    let chars = chars.to_string();
    satisfy(move |c| !chars.contains(c))
}

/// Consumes one space, tab, carriage return or line feed.
pub fn space() -> Parser<char> {
    satisfy(|c| matches!(c, ' ' | '\t' | '\r' | '\n')).label("space")
}

/// Skips any run of spaces.
pub fn spaces() -> Parser<()> {
    crate::combinator::skip_many(space())
}

pub fn newline() -> Parser<char> {
    char_('\n').label("new-line")
}

pub fn digit() -> Parser<char> {
    satisfy(|c| c.is_ascii_digit()).label("digit")
}

pub fn hex_digit() -> Parser<char> {
    satisfy(|c| c.is_ascii_hexdigit()).label("hexadecimal digit")
}

pub fn oct_digit() -> Parser<char> {
    satisfy(|c| c.is_digit(8)).label("octal digit")
}

pub fn letter() -> Parser<char> {
    satisfy(char::is_alphabetic).label("letter")
}

pub fn alpha_num() -> Parser<char> {
    satisfy(char::is_alphanumeric).label("letter or digit")
}
