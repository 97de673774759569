use crate::Parser;
use common_framework::{Message, Reply, Source};

/// Marker returned by [`Steps`] once the sequence has failed.
///
/// It can only be obtained from a failing step, so `?` on a step result is
/// the way to stop a sequence body early.
#[derive(Debug)]
pub struct Halt(());

/// The step function handed to a [`sequence`] body.
///
/// Threads the source through each step. After the first failure every
/// further step is a no-op returning [`Halt`].
pub struct Steps {
    current: Source,
    failure: Option<(Source, Message)>,
}

impl Steps {
    /// Runs `parser` at the current position and advances past what it consumed.
    pub fn run<U: 'static>(&mut self, parser: &Parser<U>) -> Result<U, Halt> {
        if self.failure.is_some() {
            return Err(Halt(()));
        }
        match parser.parse(&self.current) {
            Reply::Ok { value, rest } => {
                self.current = rest;
                Ok(value)
            }
            Reply::Err { at, message } => {
                self.failure = Some((at, message));
                Err(Halt(()))
            }
        }
    }

    /// Fails the sequence at the current position.
    pub fn fail(&mut self, message: impl Into<Message>) -> Halt {
        if self.failure.is_none() {
            self.failure = Some((self.current.clone(), message.into()));
        }
        Halt(())
    }

    /// The source the next step will run at.
    pub fn source(&self) -> &Source {
        &self.current
    }
}

/// Builds a parser from a body that runs steps in order.
///
/// ```ignore
/// let assignment = sequence(move |s| {
///     let name = s.run(&identifier)?;
///     s.run(&equals)?;
///     let value = s.run(&expression)?;
///     Ok(Assignment { name, value })
/// });
/// ```
///
/// The first failing step fails the whole parser with that step's failure,
/// even if the body carries on and returns `Ok`.
pub fn sequence<T, F>(body: F) -> Parser<T>
where
    T: 'static,
    F: Fn(&mut Steps) -> Result<T, Halt> + 'static,
{
    Parser::new("sequence", move |input| {
        let mut steps = Steps {
            current: input.clone(),
            failure: None,
        };
        let outcome = body(&mut steps);
        match (outcome, steps.failure) {
            (_, Some((at, message))) => Reply::Err { at, message },
            (Ok(value), None) => Reply::ok(value, steps.current),
            (Err(_), None) => unreachable!("a halt is only handed out after a failure"),
        }
    })
}
