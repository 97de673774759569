//! Character and string literals.

use crate::token::TokenParser;
use parser_framework::{between, char_, choice, many, satisfy, skip_many1, space, Parser};

impl TokenParser {
    /// A character in single quotes, such as `'a'` or `'\n'`.
    pub fn char_literal(&self) -> Parser<char> {
        let letter = satisfy(|c| c != '\'' && c != '\\');
        let escaped = char_('\\').ignore_then(escape_code());
        let literal = between(
            char_('\''),
            char_('\'').label("end of character"),
            letter.or(escaped),
        );
        self.lexeme(literal.label("character"))
    }

    /// A string in double quotes.
    ///
    /// Besides the escape codes a string may contain a gap: a backslash,
    /// white space, and another backslash. Gaps let a literal continue on
    /// the next line and contribute nothing to the value.
    pub fn string_literal(&self) -> Parser<String> {
        let letter = satisfy(|c| c != '"' && c != '\\').map(Some);
        let gap = skip_many1(space()).ignore_then(char_('\\')).to(None);
        let escaped = char_('\\')
            .ignore_then(choice(vec![escape_code().map(Some), gap]).label("escape code"));
        let body = many(letter.or(escaped))
            .map(|chars| chars.into_iter().flatten().collect::<String>());
        let literal = between(char_('"'), char_('"').label("end of string"), body);
        self.lexeme(literal.label("literal string"))
    }
}

/// The character after a backslash and the character it stands for.
const ESCAPES: [(char, char); 7] = [
    ('r', '\r'),
    ('n', '\n'),
    ('t', '\t'),
    ('0', '\0'),
    ('\\', '\\'),
    ('"', '"'),
    ('\'', '\''),
];

fn escape_code() -> Parser<char> {
    let codes = ESCAPES
        .iter()
        .map(|&(code, value)| char_(code).to(value))
        .collect();
    choice(codes).label("escape code")
}
