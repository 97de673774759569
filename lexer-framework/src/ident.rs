//! Identifiers, operators and the reserved words among them.

use crate::token::{fold_case, TokenParser};
use parser_framework::{
    attempt, not_followed_by, recognize, skip_many, string, string_no_case, Message, Parser,
    Reply,
};
use std::rc::Rc;

impl TokenParser {
    /// An identifier that is not a reserved name.
    ///
    /// A reserved name fails with `reserved word "name"` without consuming
    /// input, so it can still be tried as a keyword.
    pub fn identifier(&self) -> Parser<String> {
        let def = Rc::clone(&self.def);
        let word = word(
            self.def.ident_start.parser(),
            self.def.ident_letter.parser(),
            "identifier",
        );
        let reserved = Rc::clone(&self.reserved_names);
        let checked = Parser::new("identifier", move |input| match word.parse(input) {
            Reply::Ok { value, .. } if reserved.contains(&fold_case(&def, &value)) => Reply::err(
                input.clone(),
                Message::text(format!("reserved word {value:?}")),
            ),
            reply => reply,
        });
        self.lexeme(checked)
    }

    /// The reserved name `name`, not followed by another identifier character.
    ///
    /// `reserved("if")` does not match the start of `iffy`.
    pub fn reserved(&self, name: &str) -> Parser<String> {
        let word = if self.def.case_sensitive {
            string(name)
        } else {
            string_no_case(name)
        };
        let boundary =
            not_followed_by(self.def.ident_letter.parser()).label(&format!("end of {name:?}"));
        self.lexeme(attempt(word.then_ignore(boundary)).named(name))
    }

    /// An operator that is not a reserved operator.
    pub fn operator(&self) -> Parser<String> {
        let word = word(
            self.def.op_start.parser(),
            self.def.op_letter.parser(),
            "operator",
        );
        let reserved = Rc::clone(&self.reserved_ops);
        let checked = Parser::new("operator", move |input| match word.parse(input) {
            Reply::Ok { value, .. } if reserved.contains(&value) => Reply::err(
                input.clone(),
                Message::text(format!("reserved operator {value:?}")),
            ),
            reply => reply,
        });
        self.lexeme(checked)
    }

    /// The reserved operator `name`, not followed by another operator character.
    pub fn reserved_op(&self, name: &str) -> Parser<String> {
        let boundary =
            not_followed_by(self.def.op_letter.parser()).label(&format!("end of {name:?}"));
        self.lexeme(attempt(string(name).then_ignore(boundary)).named(name))
    }

    pub fn is_reserved_name(&self, name: &str) -> bool {
        self.reserved_names.contains(&fold_case(&self.def, name))
    }
}

/// One `start` character followed by any number of `letter` characters.
fn word(start: Parser<char>, letter: Parser<char>, what: &str) -> Parser<String> {
    recognize(start.then(skip_many(letter)))
        .map(|slice| slice.to_string())
        .label(what)
}
