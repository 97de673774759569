//! Operator-precedence expression parsers.
//!
//! [`build_expression_parser`] takes a table of operator levels and a term
//! parser and produces a parser for whole expressions. Each level becomes a
//! parser whose operands are the expressions of the next tighter level, so
//! precedence is climbed one level at a time.
//!
//! Mixing associativities at one level is reported rather than guessed:
//! `a + b ^ c` where `+` is left and `^` right associative at the same level
//! fails with an "ambiguous use" message after consuming the offending
//! operator.

use crate::combinator::{choice, consumed, fold_right};
use crate::Parser;
use common_framework::{Message, Reply, Source};
use std::rc::Rc;

pub type UnaryOp<T> = Rc<dyn Fn(T) -> T>;
pub type BinaryOp<T> = Rc<dyn Fn(T, T) -> T>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Assoc {
    Left,
    Right,
    None,
}

impl Assoc {
    fn ambiguity(self) -> &'static str {
        match self {
            Assoc::Left => "ambiguous use of a left associative operator",
            Assoc::Right => "ambiguous use of a right associative operator",
            Assoc::None => "ambiguous use of a non associative operator",
        }
    }
}

/// One entry of an operator table: the operator's fixity and the parser that
/// recognizes it and yields its semantic function.
pub enum Operator<T> {
    Infix(Parser<BinaryOp<T>>, Assoc),
    Prefix(Parser<UnaryOp<T>>),
    Postfix(Parser<UnaryOp<T>>),
}

impl<T: 'static> Operator<T> {
    /// An infix operator recognized by `op`, combining operands with `f`.
    pub fn binary<U, F>(op: Parser<U>, assoc: Assoc, f: F) -> Self
    where
        U: 'static,
        F: Fn(T, T) -> T + 'static,
    {
        let f: BinaryOp<T> = Rc::new(f);
        Operator::Infix(op.map(move |_| Rc::clone(&f)), assoc)
    }

    pub fn prefix<U, F>(op: Parser<U>, f: F) -> Self
    where
        U: 'static,
        F: Fn(T) -> T + 'static,
    {
        let f: UnaryOp<T> = Rc::new(f);
        Operator::Prefix(op.map(move |_| Rc::clone(&f)))
    }

    pub fn postfix<U, F>(op: Parser<U>, f: F) -> Self
    where
        U: 'static,
        F: Fn(T) -> T + 'static,
    {
        let f: UnaryOp<T> = Rc::new(f);
        Operator::Postfix(op.map(move |_| Rc::clone(&f)))
    }
}

impl<T> Clone for Operator<T> {
    fn clone(&self) -> Self {
        match self {
            Operator::Infix(op, assoc) => Operator::Infix(op.clone(), *assoc),
            Operator::Prefix(op) => Operator::Prefix(op.clone()),
            Operator::Postfix(op) => Operator::Postfix(op.clone()),
        }
    }
}

/// Operator levels, from the loosest binding level to the tightest.
pub type OperatorTable<T> = Vec<Vec<Operator<T>>>;

/// Builds an expression parser from `table` over `term`.
///
/// The last level of the table binds tightest and wraps `term` directly; each
/// earlier level uses the parser of the level after it as its operand.
pub fn build_expression_parser<T: 'static>(table: OperatorTable<T>, term: Parser<T>) -> Parser<T> {
    table
        .into_iter()
        .rev()
        .fold(term, |term, operators| Level::new(operators, term).into_parser())
}

/// What probing for an operator found.
enum Probe<U> {
    Found(U, Source),
    Absent,
    Failed(Source, Message),
}

fn probe<U: 'static>(op: Option<&Parser<U>>, input: &Source) -> Probe<U> {
    let Some(op) = op else {
        return Probe::Absent;
    };
    match op.parse(input) {
        Reply::Ok { value, rest } => Probe::Found(value, rest),
        Reply::Err { at, .. } if !consumed(&at, input) => Probe::Absent,
        Reply::Err { at, message } => Probe::Failed(at, message),
    }
}

/// The operators of one precedence level, grouped by fixity.
struct Level<T> {
    right: Option<Parser<BinaryOp<T>>>,
    left: Option<Parser<BinaryOp<T>>>,
    non: Option<Parser<BinaryOp<T>>>,
    prefix: Option<Parser<UnaryOp<T>>>,
    postfix: Option<Parser<UnaryOp<T>>>,
    term: Parser<T>,
}

impl<T: 'static> Level<T> {
    fn new(operators: Vec<Operator<T>>, term: Parser<T>) -> Self {
        let (mut right, mut left, mut non) = (Vec::new(), Vec::new(), Vec::new());
        let (mut prefix, mut postfix) = (Vec::new(), Vec::new());
        for operator in operators {
            match operator {
                Operator::Infix(op, Assoc::Right) => right.push(op),
                Operator::Infix(op, Assoc::Left) => left.push(op),
                Operator::Infix(op, Assoc::None) => non.push(op),
                Operator::Prefix(op) => prefix.push(op),
                Operator::Postfix(op) => postfix.push(op),
            }
        }
        Self {
            right: group(right),
            left: group(left),
            non: group(non),
            prefix: group(prefix),
            postfix: group(postfix),
            term,
        }
    }

    fn into_parser(self) -> Parser<T> {
        Parser::new("expression", move |input| self.parse(input))
    }

    fn infix(&self, assoc: Assoc) -> Option<&Parser<BinaryOp<T>>> {
        match assoc {
            Assoc::Left => self.left.as_ref(),
            Assoc::Right => self.right.as_ref(),
            Assoc::None => self.non.as_ref(),
        }
    }

    fn parse(&self, input: &Source) -> Reply<T> {
        let (x, rest) = match self.operand(input) {
            Reply::Ok { value, rest } => (value, rest),
            Reply::Err { at, message } => return Reply::Err { at, message },
        };
        for assoc in [Assoc::Right, Assoc::Left, Assoc::None] {
            match probe(self.infix(assoc), &rest) {
                Probe::Found(op, after) => return self.chain(assoc, x, op, after),
                Probe::Failed(at, message) => return Reply::Err { at, message },
                Probe::Absent => {}
            }
        }
        Reply::ok(x, rest)
    }

    /// An operand of this level: at most one prefix operator, the inherited
    /// term, then at most one postfix operator.
    fn operand(&self, input: &Source) -> Reply<T> {
        let (pre, start) = match probe(self.prefix.as_ref(), input) {
            Probe::Found(f, rest) => (Some(f), rest),
            Probe::Absent => (None, input.clone()),
            Probe::Failed(at, message) => return Reply::Err { at, message },
        };
        let (x, rest) = match self.term.parse(&start) {
            Reply::Ok { value, rest } => (value, rest),
            Reply::Err { at, message } => return Reply::Err { at, message },
        };
        let x = match pre {
            Some(f) => f(x),
            None => x,
        };
        match probe(self.postfix.as_ref(), &rest) {
            Probe::Found(f, after) => Reply::ok(f(x), after),
            Probe::Absent => Reply::ok(x, rest),
            Probe::Failed(at, message) => Reply::Err { at, message },
        }
    }

    /// Continues after `first op` has been read, following `assoc`.
    fn chain(&self, assoc: Assoc, first: T, op: BinaryOp<T>, after: Source) -> Reply<T> {
        let mut operands = vec![first];
        let mut operators = vec![op];
        let mut current = after;
        loop {
            let (y, rest) = match self.operand(&current) {
                Reply::Ok { value, rest } => (value, rest),
                Reply::Err { at, message } => return Reply::Err { at, message },
            };
            current = rest;
            match assoc {
                Assoc::Left => {
                    let lhs = operands.pop();
                    let combine = operators.pop();
                    if let (Some(lhs), Some(combine)) = (lhs, combine) {
                        operands.push(combine(lhs, y));
                    }
                }
                Assoc::Right | Assoc::None => operands.push(y),
            }
            if assoc != Assoc::None {
                match probe(self.infix(assoc), &current) {
                    Probe::Found(op, after) => {
                        operators.push(op);
                        current = after;
                        continue;
                    }
                    Probe::Failed(at, message) => return Reply::Err { at, message },
                    Probe::Absent => {}
                }
            }
            if let Some(failure) = self.conflict(assoc, &current) {
                return failure;
            }
            let value = fold_right(operands, operators, |f, x, y| f(x, y));
            return Reply::ok(value, current);
        }
    }

    /// Fails if an infix operator that may not follow a chain of `assoc`
    /// operators comes next.
    ///
    /// A non-associative operator may not be followed by any infix operator
    /// of its level; left and right chains may not be continued by an
    /// operator of another associativity.
    fn conflict(&self, assoc: Assoc, input: &Source) -> Option<Reply<T>> {
        let conflicting = [Assoc::Left, Assoc::Right, Assoc::None]
            .into_iter()
            .filter(|&other| assoc == Assoc::None || other != assoc);
        for other in conflicting {
            match probe(self.infix(other), input) {
                Probe::Found(_, after) => {
                    log::debug!("{} at offset {}", other.ambiguity(), input.offset());
                    return Some(Reply::err(after, Message::text(other.ambiguity())));
                }
                Probe::Failed(at, message) => return Some(Reply::Err { at, message }),
                Probe::Absent => {}
            }
        }
        None
    }
}

fn group<U: 'static>(mut parsers: Vec<Parser<U>>) -> Option<Parser<U>> {
    match parsers.len() {
        0 => None,
        1 => parsers.pop(),
        _ => Some(choice(parsers)),
    }
}
