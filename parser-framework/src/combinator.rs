//! Combinators that build parsers out of other parsers.
//!
//! Backtracking is committed: an alternative is only tried when the previous
//! one failed without consuming input. [`attempt`] is the explicit opt-in for
//! backtracking past consumed input.

use crate::Parser;
use common_framework::{Message, Reply, Source};
use once_cell::unsync::OnceCell;
use std::rc::{Rc, Weak};

/// Tries each parser in order, moving on only after a failure that consumed
/// no input.
///
/// A failure after consumption is returned as is; later alternatives never
/// run. If every alternative fails cleanly, the last failure is returned.
pub fn choice<T: 'static>(parsers: Vec<Parser<T>>) -> Parser<T> {
    Parser::new("choice", move |input| {
        let mut last = None;
        for parser in &parsers {
            match parser.parse(input) {
                Reply::Err { at, message } if !consumed(&at, input) => last = Some((at, message)),
                reply => return reply,
            }
        }
        match last {
            Some((at, message)) => Reply::Err { at, message },
            None => Reply::err(input.clone(), Message::text("no alternatives to choose from")),
        }
    })
}

/// Rewinds any failure of `parser` to the starting position, so an enclosing
/// [`choice`] treats it as a failure without consumption.
pub fn attempt<T: 'static>(parser: Parser<T>) -> Parser<T> {
    let name = format!("attempt({})", parser.name());
    Parser::new(&name, move |input| match parser.parse(input) {
        Reply::Err { message, .. } => Reply::Err {
            at: input.clone(),
            message,
        },
        ok => ok,
    })
}

/// Runs `parser` and, on success, rewinds to the starting position.
///
/// Failures pass through unchanged, consumption included.
pub fn look_ahead<T: 'static>(parser: Parser<T>) -> Parser<T> {
    Parser::new("look_ahead", move |input| match parser.parse(input) {
        Reply::Ok { value, .. } => Reply::ok(value, input.clone()),
        err => err,
    })
}

/// Succeeds without consuming input exactly when `parser` fails here.
pub fn not_followed_by<T: 'static>(parser: Parser<T>) -> Parser<()> {
    let message = Message::unexpected(parser.name());
    Parser::new("not_followed_by", move |input| match parser.parse(input) {
        Reply::Ok { .. } => Reply::err(input.clone(), message.clone()),
        Reply::Err { .. } => Reply::ok((), input.clone()),
    })
}

/// Replaces the message of a failure that consumed no input with
/// `expected <what>`. Failures after consumption keep their own message.
pub fn label<T: 'static>(what: &str, parser: Parser<T>) -> Parser<T> {
    let message = Message::expected(what);
    let name = parser.name().to_string();
    Parser::new(&name, move |input| match parser.parse(input) {
        Reply::Err { at, .. } if !consumed(&at, input) => Reply::Err {
            at,
            message: message.clone(),
        },
        reply => reply,
    })
}

/// Defers building a parser until it first runs, then reuses it.
///
/// Lets a grammar rule refer to itself, directly or through other rules,
/// without recursing forever while the grammar is being built.
pub fn lazy<T, F>(build: F) -> Parser<T>
where
    T: 'static,
    F: Fn() -> Parser<T> + 'static,
{
    let cell: OnceCell<Parser<T>> = OnceCell::new();
    Parser::new("lazy", move |input| cell.get_or_init(&build).parse(input))
}

/// Builds a self-referential parser.
///
/// `define` receives a handle standing for the parser being defined and
/// returns its definition. The handle refers to the definition weakly, so no
/// reference cycle is created.
///
/// # Panics
///
/// Running a handle after the returned parser has been dropped panics.
pub fn recursive<T, F>(define: F) -> Parser<T>
where
    T: 'static,
    F: FnOnce(Parser<T>) -> Parser<T>,
{
    let cell: Rc<OnceCell<Parser<T>>> = Rc::new(OnceCell::new());
    let weak: Weak<OnceCell<Parser<T>>> = Rc::downgrade(&cell);
    let handle = Parser::new("recursive", move |input| {
        let definition = match weak.upgrade().and_then(|cell| cell.get().cloned()) {
            Some(parser) => parser,
            None => panic!("recursive parser used after its definition was dropped"),
        };
        definition.parse(input)
    });
    let definition = define(handle);
    let name = definition.name().to_string();
    let _ = cell.set(definition);
    Parser::new(&name, move |input| match cell.get() {
        Some(parser) => parser.parse(input),
        None => unreachable!("definition is set before the parser is returned"),
    })
}

/// Runs `parser`, yielding `default` if it fails without consuming input.
pub fn option<T>(default: T, parser: Parser<T>) -> Parser<T>
where
    T: Clone + 'static,
{
    parser.or(crate::primitives::pure(default))
}

/// Runs `parser`, yielding `None` if it fails without consuming input.
pub fn optional<T: 'static>(parser: Parser<T>) -> Parser<Option<T>> {
    parser
        .map(Some)
        .or(Parser::new("none", |input| Reply::ok(None, input.clone())))
}

/// Runs `open`, `parser` and `close`, yielding the value of `parser`.
pub fn between<O, C, T>(open: Parser<O>, close: Parser<C>, parser: Parser<T>) -> Parser<T>
where
    O: 'static,
    C: 'static,
    T: 'static,
{
    open.ignore_then(parser).then_ignore(close)
}

/// Runs `parser` between `min` and `max` times (`None` is unbounded).
///
/// A failure without consumption ends the repetition; it is only reported if
/// fewer than `min` values were collected. A failure after consumption is
/// always reported.
///
/// # Panics
///
/// Panics at construction if `min > max`, and while parsing if `max` is
/// unbounded and `parser` succeeds without consuming input, which would
/// otherwise loop forever.
pub fn repeat<T: 'static>(min: usize, max: Option<usize>, parser: Parser<T>) -> Parser<Vec<T>> {
    if let Some(max) = max {
        assert!(min <= max, "repeat: minimum {min} exceeds maximum {max}");
    }
    Parser::new("repeat", move |input| {
        let mut values = Vec::new();
        let mut current = input.clone();
        loop {
            if max.is_some_and(|max| values.len() >= max) {
                return Reply::ok(values, current);
            }
            match parser.parse(&current) {
                Reply::Ok { value, rest } => {
                    if max.is_none() && !consumed(&rest, &current) {
                        empty_loop(&parser, &current);
                    }
                    values.push(value);
                    current = rest;
                }
                Reply::Err { at, message } => {
                    if consumed(&at, &current) || values.len() < min {
                        return Reply::Err { at, message };
                    }
                    return Reply::ok(values, current);
                }
            }
        }
    })
}

/// Runs `parser` exactly `n` times.
pub fn count<T: 'static>(n: usize, parser: Parser<T>) -> Parser<Vec<T>> {
    repeat(n, Some(n), parser)
}

/// Runs `parser` zero or more times.
pub fn many<T: 'static>(parser: Parser<T>) -> Parser<Vec<T>> {
    repeat(0, None, parser)
}

/// Runs `parser` one or more times.
pub fn many1<T: 'static>(parser: Parser<T>) -> Parser<Vec<T>> {
    repeat(1, None, parser)
}

pub fn skip_many<T: 'static>(parser: Parser<T>) -> Parser<()> {
    many(parser).map(|_| ())
}

pub fn skip_many1<T: 'static>(parser: Parser<T>) -> Parser<()> {
    many1(parser).map(|_| ())
}

/// One or more `parser`, separated by `sep`.
pub fn sep_by1<T, S>(parser: Parser<T>, sep: Parser<S>) -> Parser<Vec<T>>
where
    T: 'static,
    S: 'static,
{
    parser
        .clone()
        .then(many(sep.ignore_then(parser)))
        .map(|(first, rest)| prepend(first, rest))
}

/// Zero or more `parser`, separated by `sep`.
pub fn sep_by<T, S>(parser: Parser<T>, sep: Parser<S>) -> Parser<Vec<T>>
where
    T: 'static,
    S: 'static,
{
    optional(sep_by1(parser, sep)).map(Option::unwrap_or_default)
}

/// One or more `parser`, each terminated by `sep`.
pub fn end_by1<T, S>(parser: Parser<T>, sep: Parser<S>) -> Parser<Vec<T>>
where
    T: 'static,
    S: 'static,
{
    many1(parser.then_ignore(sep))
}

/// Zero or more `parser`, each terminated by `sep`.
pub fn end_by<T, S>(parser: Parser<T>, sep: Parser<S>) -> Parser<Vec<T>>
where
    T: 'static,
    S: 'static,
{
    many(parser.then_ignore(sep))
}

/// One or more `parser`, separated and optionally terminated by `sep`.
pub fn sep_end_by1<T, S>(parser: Parser<T>, sep: Parser<S>) -> Parser<Vec<T>>
where
    T: 'static,
    S: 'static,
{
    Parser::new("sep_end_by1", move |input| {
        let mut values = Vec::new();
        let mut current = input.clone();
        loop {
            let start = current.clone();
            match parser.parse(&current) {
                Reply::Ok { value, rest } => {
                    values.push(value);
                    current = rest;
                }
                Reply::Err { at, message } => {
                    if values.is_empty() || consumed(&at, &current) {
                        return Reply::Err { at, message };
                    }
                    return Reply::ok(values, current);
                }
            }
            match sep.parse(&current) {
                Reply::Ok { rest, .. } => {
                    if !consumed(&rest, &start) {
                        empty_loop(&parser, &start);
                    }
                    current = rest;
                }
                Reply::Err { at, message } => {
                    if consumed(&at, &current) {
                        return Reply::Err { at, message };
                    }
                    return Reply::ok(values, current);
                }
            }
        }
    })
}

/// Zero or more `parser`, separated and optionally terminated by `sep`.
pub fn sep_end_by<T, S>(parser: Parser<T>, sep: Parser<S>) -> Parser<Vec<T>>
where
    T: 'static,
    S: 'static,
{
    optional(sep_end_by1(parser, sep)).map(Option::unwrap_or_default)
}

/// Runs `parser` until `end` succeeds, yielding the values of `parser`.
pub fn many_till<T, E>(parser: Parser<T>, end: Parser<E>) -> Parser<Vec<T>>
where
    T: 'static,
    E: 'static,
{
    Parser::new("many_till", move |input| {
        let mut values = Vec::new();
        let mut current = input.clone();
        loop {
            match end.parse(&current) {
                Reply::Ok { rest, .. } => return Reply::ok(values, rest),
                Reply::Err { at, message } if consumed(&at, &current) => {
                    return Reply::Err { at, message }
                }
                Reply::Err { .. } => {}
            }
            match parser.parse(&current) {
                Reply::Ok { value, rest } => {
                    if !consumed(&rest, &current) {
                        empty_loop(&parser, &current);
                    }
                    values.push(value);
                    current = rest;
                }
                Reply::Err { at, message } => return Reply::Err { at, message },
            }
        }
    })
}

/// One or more `term` separated by `op`, combined left to right.
pub fn chainl1<T, F>(term: Parser<T>, op: Parser<F>) -> Parser<T>
where
    T: 'static,
    F: Fn(T, T) -> T + 'static,
{
    Parser::new("chainl1", move |input| {
        let (mut acc, mut current) = match term.parse(input) {
            Reply::Ok { value, rest } => (value, rest),
            Reply::Err { at, message } => return Reply::Err { at, message },
        };
        loop {
            let combine = match op.parse(&current) {
                Reply::Ok { value, rest } => {
                    current = rest;
                    value
                }
                Reply::Err { at, message } if consumed(&at, &current) => {
                    return Reply::Err { at, message }
                }
                Reply::Err { .. } => return Reply::ok(acc, current),
            };
            match term.parse(&current) {
                Reply::Ok { value, rest } => {
                    acc = combine(acc, value);
                    current = rest;
                }
                Reply::Err { at, message } => return Reply::Err { at, message },
            }
        }
    })
}

/// One or more `term` separated by `op`, combined right to left.
pub fn chainr1<T, F>(term: Parser<T>, op: Parser<F>) -> Parser<T>
where
    T: 'static,
    F: Fn(T, T) -> T + 'static,
{
    Parser::new("chainr1", move |input| {
        let (first, mut current) = match term.parse(input) {
            Reply::Ok { value, rest } => (value, rest),
            Reply::Err { at, message } => return Reply::Err { at, message },
        };
        let mut operands = vec![first];
        let mut operators = Vec::new();
        loop {
            match op.parse(&current) {
                Reply::Ok { value, rest } => {
                    operators.push(value);
                    current = rest;
                }
                Reply::Err { at, message } if consumed(&at, &current) => {
                    return Reply::Err { at, message }
                }
                Reply::Err { .. } => break,
            }
            match term.parse(&current) {
                Reply::Ok { value, rest } => {
                    operands.push(value);
                    current = rest;
                }
                Reply::Err { at, message } => return Reply::Err { at, message },
            }
        }
        Reply::ok(fold_right(operands, operators, |f, x, y| f(x, y)), current)
    })
}

/// Folds `x0 op1 x1 op2 x2 ...` as `x0 op1 (x1 op2 (x2 ...))`.
///
/// `operands` holds one more element than `operators`.
pub(crate) fn fold_right<T, F, C>(mut operands: Vec<T>, mut operators: Vec<F>, combine: C) -> T
where
    C: Fn(F, T, T) -> T,
{
    let mut acc = match operands.pop() {
        Some(last) => last,
        None => unreachable!("a chain always has at least one operand"),
    };
    while let (Some(operator), Some(lhs)) = (operators.pop(), operands.pop()) {
        acc = combine(operator, lhs, acc);
    }
    acc
}

pub(crate) fn consumed(after: &Source, start: &Source) -> bool {
    after.offset() != start.offset()
}

fn empty_loop<T: 'static>(parser: &Parser<T>, at: &Source) -> ! {
    log::error!(
        "`{}` succeeded without consuming input at offset {} inside an unbounded repetition",
        parser.name(),
        at.offset()
    );
    panic!(
        "unbounded repetition of `{}` accepts empty input at offset {}",
        parser.name(),
        at.offset()
    )
}

fn prepend<T>(first: T, mut rest: Vec<T>) -> Vec<T> {
    rest.insert(0, first);
    rest
}
