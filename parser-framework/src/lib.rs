//! Parser Framework
//!
//! Parser combinators with committed choice: alternatives are only retried
//! after a failure that consumed no input, unless a parser is wrapped in
//! [`attempt`]. Grammars are assembled from the primitives and combinators
//! here, optionally with an operator table through
//! [`build_expression_parser`], and run once with [`parse`].

pub mod combinator;
pub mod expr;
pub mod parser;
pub mod primitives;
pub mod sequence;

pub use combinator::{
    attempt, between, chainl1, chainr1, choice, count, end_by, end_by1, label, lazy, look_ahead,
    many, many1, many_till, not_followed_by, option, optional, recursive, repeat, sep_by, sep_by1,
    sep_end_by, sep_end_by1, skip_many, skip_many1,
};
pub use common_framework::{Message, ParseError, Position, Reply, Source, TextSlice};
pub use expr::{build_expression_parser, Assoc, BinaryOp, Operator, OperatorTable, UnaryOp};
pub use parser::{parse, Parser};
pub use primitives::{
    alpha_num, any_char, char_, digit, empty, eof, fail, get_state, hex_digit, letter, newline,
    none_of, oct_digit, one_of, pattern, position, pure, put_state, recognize, satisfy, space,
    spaces, string, string_no_case, unexpected,
};
pub use sequence::{sequence, Halt, Steps};
