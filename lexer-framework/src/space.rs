//! White space and comment skipping.

use crate::language::LanguageDef;
use parser_framework::{
    choice, satisfy, skip_many, skip_many1, string, Message, Parser, Reply, Source,
};

/// Skips any mix of blanks, line comments and block comments.
pub(crate) fn white_space(def: &LanguageDef) -> Parser<()> {
    let mut skippers = vec![skip_many1(satisfy(|c| matches!(c, ' ' | '\t' | '\r' | '\n')))];
    if let Some(marker) = &def.comment_line {
        skippers.push(line_comment(marker));
    }
    if let Some((start, end)) = def.block_comment() {
        skippers.push(block_comment(start, end, def.nested_comments));
    }
    skip_many(choice(skippers)).named("white space")
}

/// From `marker` up to, not including, the end of the line.
fn line_comment(marker: &str) -> Parser<()> {
    string(marker).ignore_then(skip_many(satisfy(|c| c != '\n')))
}

/// From `start` to the matching `end`.
///
/// Inside the comment, `end` closes one level, `start` opens another when
/// `nested` is set, and anything else is skipped. Reaching the end of input
/// first is a failure there.
fn block_comment(start: &str, end: &str, nested: bool) -> Parser<()> {
    let open = string(start);
    let (start, end) = (start.to_string(), end.to_string());
    Parser::new("block comment", move |input| {
        let mut current = match open.parse(input) {
            Reply::Ok { rest, .. } => rest,
            Reply::Err { at, message } => return Reply::Err { at, message },
        };
        let mut depth = 1usize;
        loop {
            let remaining = current.remaining();
            if remaining.starts_with(end.as_str()) {
                current = current.advance(end.len());
                depth -= 1;
                if depth == 0 {
                    return Reply::ok((), current);
                }
            } else if nested && remaining.starts_with(start.as_str()) {
                current = current.advance(start.len());
                depth += 1;
            } else {
                match current.peek() {
                    Some(c) => current = current.advance(c.len_utf8()),
                    None => return unterminated(current),
                }
            }
        }
    })
}

fn unterminated(at: Source) -> Reply<()> {
    Reply::err(at, Message::expected("end of comment"))
}
