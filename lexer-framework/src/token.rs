use crate::error::ConfigError;
use crate::language::LanguageDef;
use crate::space;
use parser_framework::{between, eof, sep_by, sep_by1, string, Parser};
use std::collections::HashSet;
use std::rc::Rc;

/// The token parsers of one language.
///
/// Every token parser skips the white space and comments that follow it, so
/// a grammar only has to skip leading white space once, see
/// [`TokenParser::complete`].
#[derive(Debug, Clone)]
pub struct TokenParser {
    pub(crate) def: Rc<LanguageDef>,
    pub(crate) reserved_names: Rc<HashSet<String>>,
    pub(crate) reserved_ops: Rc<HashSet<String>>,
    white_space: Parser<()>,
}

/// Builds the token parsers for `def`.
pub fn make_token_parser(def: LanguageDef) -> Result<TokenParser, ConfigError> {
    TokenParser::new(def)
}

impl TokenParser {
    pub fn new(def: LanguageDef) -> Result<Self, ConfigError> {
        def.validate()?;
        let reserved_names = def
            .reserved_names
            .iter()
            .map(|name| fold_case(&def, name))
            .collect();
        let reserved_ops = def.reserved_op_names.iter().cloned().collect();
        let white_space = space::white_space(&def);
        log::debug!(
            "token parser built with {} reserved names and {} reserved operators",
            def.reserved_names.len(),
            def.reserved_op_names.len()
        );
        Ok(Self {
            def: Rc::new(def),
            reserved_names: Rc::new(reserved_names),
            reserved_ops: Rc::new(reserved_ops),
            white_space,
        })
    }

    pub fn language(&self) -> &LanguageDef {
        &self.def
    }

    /// Skips blanks and comments.
    pub fn white_space(&self) -> Parser<()> {
        self.white_space.clone()
    }

    /// Runs `parser`, then skips the white space after it.
    pub fn lexeme<T: 'static>(&self, parser: Parser<T>) -> Parser<T> {
        let name = parser.name().to_string();
        parser.then_ignore(self.white_space()).named(&name)
    }

    /// Matches `name` as a token.
    pub fn symbol(&self, name: &str) -> Parser<String> {
        self.lexeme(string(name))
    }

    /// Runs `parser` over the whole input: leading white space, `parser`,
    /// then the end of input.
    pub fn complete<T: 'static>(&self, parser: Parser<T>) -> Parser<T> {
        self.white_space()
            .ignore_then(parser)
            .then_ignore(eof())
    }

    pub fn parens<T: 'static>(&self, parser: Parser<T>) -> Parser<T> {
        between(self.symbol("("), self.symbol(")"), parser)
    }

    pub fn braces<T: 'static>(&self, parser: Parser<T>) -> Parser<T> {
        between(self.symbol("{"), self.symbol("}"), parser)
    }

    pub fn angles<T: 'static>(&self, parser: Parser<T>) -> Parser<T> {
        between(self.symbol("<"), self.symbol(">"), parser)
    }

    pub fn brackets<T: 'static>(&self, parser: Parser<T>) -> Parser<T> {
        between(self.symbol("["), self.symbol("]"), parser)
    }

    pub fn semi(&self) -> Parser<String> {
        self.symbol(";")
    }

    pub fn comma(&self) -> Parser<String> {
        self.symbol(",")
    }

    pub fn dot(&self) -> Parser<String> {
        self.symbol(".")
    }

    pub fn colon(&self) -> Parser<String> {
        self.symbol(":")
    }

    /// Zero or more `parser`, separated by semicolons.
    pub fn semi_sep<T: 'static>(&self, parser: Parser<T>) -> Parser<Vec<T>> {
        sep_by(parser, self.semi())
    }

    pub fn semi_sep1<T: 'static>(&self, parser: Parser<T>) -> Parser<Vec<T>> {
        sep_by1(parser, self.semi())
    }

    /// Zero or more `parser`, separated by commas.
    pub fn comma_sep<T: 'static>(&self, parser: Parser<T>) -> Parser<Vec<T>> {
        sep_by(parser, self.comma())
    }

    pub fn comma_sep1<T: 'static>(&self, parser: Parser<T>) -> Parser<Vec<T>> {
        sep_by1(parser, self.comma())
    }
}

/// The form a reserved name is compared in.
pub(crate) fn fold_case(def: &LanguageDef, name: &str) -> String {
    if def.case_sensitive {
        name.to_string()
    } else {
        name.to_lowercase()
    }
}
