use std::fmt;
use std::rc::Rc;

/// A character predicate shared between a parser and the messages it produces.
pub type Predicate = Rc<dyn Fn(char) -> bool>;

/// A failure diagnostic that is rendered only when someone asks for it.
///
/// Failing parsers build a `Message` from data they already hold, such as a
/// shared literal or predicate. Nothing is formatted until [`Message::render`].
#[derive(Clone)]
pub enum Message {
    /// A fixed message, rendered as is.
    Text(Rc<str>),
    /// Renders as `expected <what>`.
    Expected(Rc<str>),
    /// Renders as `unexpected <what>`.
    Unexpected(Rc<str>),
    /// Renders as `expected "<literal>"`.
    Literal(Rc<str>),
    /// Renders as `expected text matching /<pattern>/`.
    Pattern(Rc<str>),
    /// Renders the printable ASCII characters accepted by the predicate.
    Satisfying(Predicate),
    /// An arbitrary rendering closure.
    Deferred(Rc<dyn Fn() -> String>),
}

impl Message {
    pub fn text(text: impl Into<Rc<str>>) -> Self {
        Message::Text(text.into())
    }

    pub fn expected(what: impl Into<Rc<str>>) -> Self {
        Message::Expected(what.into())
    }

    pub fn unexpected(what: impl Into<Rc<str>>) -> Self {
        Message::Unexpected(what.into())
    }

    pub fn deferred<F>(render: F) -> Self
    where
        F: Fn() -> String + 'static,
    {
        Message::Deferred(Rc::new(render))
    }

    /// Forces the message into its human-readable form.
    pub fn render(&self) -> String {
        match self {
            Message::Text(text) => text.to_string(),
            Message::Expected(what) => format!("expected {what}"),
            Message::Unexpected(what) => format!("unexpected {what}"),
            Message::Literal(literal) => format!("expected {:?}", &**literal),
            Message::Pattern(pattern) => format!("expected text matching /{pattern}/"),
            Message::Satisfying(predicate) => {
                let accepted: String = (' '..='~').filter(|&c| predicate(c)).collect();
                if accepted.is_empty() {
                    "expected a character satisfying the predicate".to_string()
                } else {
                    format!("expected one of {accepted:?}")
                }
            }
            Message::Deferred(render) => render(),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Message({:?})", self.render())
    }
}

impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        self.render() == other.render()
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::text(text)
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_render_variants() {
        assert_eq!(Message::text("boom").render(), "boom");
        assert_eq!(Message::expected("identifier").render(), "expected identifier");
        assert_eq!(Message::unexpected("'}'").render(), "unexpected '}'");
        assert_eq!(Message::Literal(Rc::from("let")).render(), "expected \"let\"");
        assert_eq!(
            Message::Pattern(Rc::from("[0-9]+")).render(),
            "expected text matching /[0-9]+/"
        );
    }

    #[test]
    fn test_satisfying_enumerates_printable_ascii() {
        let message = Message::Satisfying(Rc::new(|c: char| c.is_ascii_digit()));
        assert_eq!(message.render(), "expected one of \"0123456789\"");

        let nothing = Message::Satisfying(Rc::new(|c: char| c == 'λ'));
        assert_eq!(
            nothing.render(),
            "expected a character satisfying the predicate"
        );
    }

    #[test]
    fn test_deferred_runs_only_when_rendered() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let message = Message::deferred(move || {
            counter.set(counter.get() + 1);
            "late".to_string()
        });
        let copy = message.clone();
        assert_eq!(calls.get(), 0);
        assert_eq!(copy.to_string(), "late");
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_equality_compares_rendered_text() {
        assert_eq!(Message::expected("x"), Message::text("expected x"));
        assert_ne!(Message::expected("x"), Message::expected("y"));
    }
}
