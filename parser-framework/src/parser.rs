use common_framework::{Reply, Source};
use std::fmt;
use std::rc::Rc;

/// A parser producing values of type `T`.
///
/// A parser is an immutable, cheaply clonable function from a [`Source`] to a
/// [`Reply`]. Combinators never modify the parsers they are given; they wrap
/// them in new ones.
pub struct Parser<T> {
    name: Rc<str>,
    run: Rc<dyn Fn(&Source) -> Reply<T>>,
}

impl<T> Clone for Parser<T> {
    fn clone(&self) -> Self {
        Self {
            name: Rc::clone(&self.name),
            run: Rc::clone(&self.run),
        }
    }
}

impl<T> fmt::Debug for Parser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser").field("name", &self.name).finish()
    }
}

impl<T: 'static> Parser<T> {
    /// Creates a parser from a function over sources.
    pub fn new<F>(name: &str, run: F) -> Self
    where
        F: Fn(&Source) -> Reply<T> + 'static,
    {
        Self {
            name: Rc::from(name),
            run: Rc::new(run),
        }
    }

    /// Returns the parser's name, used in diagnostics and `Debug` output.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the same parser under a different name.
    pub fn named(self, name: &str) -> Self {
        Self {
            name: Rc::from(name),
            run: self.run,
        }
    }

    /// Runs the parser at `input`.
    pub fn parse(&self, input: &Source) -> Reply<T> {
        (self.run)(input)
    }

    /// Transforms a successful value.
    pub fn map<U, F>(self, f: F) -> Parser<U>
    where
        U: 'static,
        F: Fn(T) -> U + 'static,
    {
        let name = Rc::clone(&self.name);
        Parser::new(&name, move |input| self.parse(input).map(&f))
    }

    /// Replaces a successful value with `value`.
    pub fn to<U>(self, value: U) -> Parser<U>
    where
        U: Clone + 'static,
    {
        self.map(move |_| value.clone())
    }

    /// Runs `self`, then the parser `f` builds from its value.
    pub fn and_then<U, F>(self, f: F) -> Parser<U>
    where
        U: 'static,
        F: Fn(T) -> Parser<U> + 'static,
    {
        Parser::new("and_then", move |input| match self.parse(input) {
            Reply::Ok { value, rest } => f(value).parse(&rest),
            Reply::Err { at, message } => Reply::Err { at, message },
        })
    }

    /// Runs `self` then `next`, keeping both values.
    pub fn then<U: 'static>(self, next: Parser<U>) -> Parser<(T, U)> {
        Parser::new("then", move |input| match self.parse(input) {
            Reply::Ok { value, rest } => next.parse(&rest).map(|second| (value, second)),
            Reply::Err { at, message } => Reply::Err { at, message },
        })
    }

    /// Runs `self` then `next`, keeping the value of `self`.
    pub fn then_ignore<U: 'static>(self, next: Parser<U>) -> Parser<T> {
        self.then(next).map(|(value, _)| value)
    }

    /// Runs `self` then `next`, keeping the value of `next`.
    pub fn ignore_then<U: 'static>(self, next: Parser<U>) -> Parser<U> {
        self.then(next).map(|(_, value)| value)
    }

    /// Tries `other` if `self` fails without consuming input.
    pub fn or(self, other: Parser<T>) -> Parser<T> {
        crate::combinator::choice(vec![self, other])
    }

    /// Turns a failure after consumption into a failure at the start.
    pub fn attempt(self) -> Parser<T> {
        crate::combinator::attempt(self)
    }

    /// Names what the parser expects when it fails without consuming input.
    pub fn label(self, expected: &str) -> Parser<T> {
        crate::combinator::label(expected, self)
    }

    /// Runs the parser without consuming input on success.
    pub fn look_ahead(self) -> Parser<T> {
        crate::combinator::look_ahead(self)
    }
}

/// Runs `parser` over `input`, which is either text or an existing source.
pub fn parse<T, I>(parser: &Parser<T>, input: I) -> Reply<T>
where
    T: 'static,
    I: Into<Source>,
{
    let source = input.into();
    log::trace!("running `{}` at offset {}", parser.name(), source.offset());
    let reply = parser.parse(&source);
    match &reply {
        Reply::Ok { rest, .. } => {
            log::trace!("`{}` succeeded at offset {}", parser.name(), rest.offset())
        }
        Reply::Err { at, .. } => {
            log::trace!("`{}` failed at offset {}", parser.name(), at.offset())
        }
    }
    reply
}

