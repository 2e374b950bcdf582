//! Per-token callbacks fired by the parser's match primitive
//!
//! The parser never prints anything itself. Attach an observer to see every
//! token as it is accepted, in consumption order.

use crate::tokens::SpannedToken;
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

pub trait TokenObserver {
    /// Called once for each token the parser consumes
    fn on_consume(&mut self, token: &SpannedToken);
}

impl<F> TokenObserver for F
where
    F: FnMut(&SpannedToken),
{
    fn on_consume(&mut self, token: &SpannedToken) {
        self(token)
    }
}

/// Writes each consumed lexeme on its own line
pub struct EchoObserver<W: Write = std::io::Stdout> {
    out: W,
}

impl EchoObserver {
    pub fn stdout() -> Self {
        Self {
            out: std::io::stdout(),
        }
    }
}

impl Default for EchoObserver {
    fn default() -> Self {
        Self::stdout()
    }
}

impl<W: Write> EchoObserver<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TokenObserver for EchoObserver<W> {
    fn on_consume(&mut self, token: &SpannedToken) {
        // Echo is best effort; a closed stdout must not fail the parse
        let _ = writeln!(self.out, "{}", token.value.lexeme);
    }
}

/// Records consumed lexemes in consumption order
///
/// Clones share one buffer. Keep a clone before handing the recorder to a
/// parser and read it back once parsing stops.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    lexemes: Rc<RefCell<Vec<String>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lexemes(&self) -> Vec<String> {
        self.lexemes.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.lexemes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexemes.borrow().is_empty()
    }
}

impl TokenObserver for RecordingObserver {
    fn on_consume(&mut self, token: &SpannedToken) {
        self.lexemes.borrow_mut().push(token.value.lexeme.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{Token, TokenKind};
    use crate::utils::{Position, Span, Spanned};

    fn spanned(lexeme: &str) -> SpannedToken {
        Spanned::new(
            Token::new(TokenKind::Identifier, lexeme),
            Span::single(Position::start()),
        )
    }

    #[test]
    fn test_echo_writes_one_line_per_token() {
        let mut echo = EchoObserver::new(Vec::new());
        echo.on_consume(&spanned("main"));
        echo.on_consume(&spanned("x"));
        assert_eq!(String::from_utf8(echo.into_inner()).unwrap(), "main\nx\n");
    }

    #[test]
    fn test_closure_observer() {
        let mut seen = Vec::new();
        {
            let mut observer = |token: &SpannedToken| seen.push(token.value.lexeme.clone());
            observer.on_consume(&spanned("a"));
            observer.on_consume(&spanned("b"));
        }
        assert_eq!(seen, vec!["a", "b"]);
    }

    #[test]
    fn test_recording_clones_share_buffer() {
        let recorder = RecordingObserver::new();
        let mut attached = recorder.clone();
        assert!(recorder.is_empty());

        attached.on_consume(&spanned("int"));
        attached.on_consume(&spanned("main"));
        assert_eq!(recorder.len(), 2);
        assert_eq!(recorder.lexemes(), vec!["int", "main"]);
    }
}
