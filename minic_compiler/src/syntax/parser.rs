//! Concrete parser over a scanned [`TokenStream`]
//!
//! The grammar itself lives in `grammar::builders`; this type supplies the
//! cursor, the nesting guard, the observer hook and logging.

use crate::config::compile_time::syntax::*;
use crate::config::runtime::SyntaxPreferences;
use crate::grammar::ast::nodes::Assignment;
use crate::grammar::builders::{atomic::Parser, blocks::parse_program, expressions};
use crate::logging::codes;
use crate::syntax::error::{SyntaxError, SyntaxResult};
use crate::syntax::observer::{EchoObserver, TokenObserver};
use crate::tokens::{Token, TokenStream};
use crate::utils::Span;
use crate::{log_debug, log_error, log_timed};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// What an accepted program looked like
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseSummary {
    pub functions: usize,
    pub tokens_consumed: usize,
    /// Deepest block (or parenthesis) nesting reached
    pub max_depth: usize,
}

pub struct MiniCParser {
    tokens: TokenStream,
    depth: usize,
    max_depth: usize,
    deepest: usize,
    consumed: usize,
    observer: Option<Box<dyn TokenObserver>>,
    preferences: SyntaxPreferences,
}

impl MiniCParser {
    /// A parser without an observer, whatever the echo preference says
    pub fn new(tokens: TokenStream) -> Self {
        log_debug!("Creating MiniC parser", "tokens" => tokens.len());

        Self {
            tokens,
            depth: 0,
            max_depth: MAX_PARSE_DEPTH,
            deepest: 0,
            consumed: 0,
            observer: None,
            preferences: SyntaxPreferences::default(),
        }
    }

    /// Apply preferences; `echo_consumed_tokens` attaches an [`EchoObserver`]
    /// unless an observer is already set
    pub fn with_preferences(mut self, preferences: SyntaxPreferences) -> Self {
        if preferences.echo_consumed_tokens && self.observer.is_none() {
            self.observer = Some(Box::new(EchoObserver::stdout()));
        }
        self.preferences = preferences;
        self
    }

    pub fn with_observer(mut self, observer: impl TokenObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Override the block nesting limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Accept the whole token stream as a program, or return the first error
    pub fn parse(&mut self) -> SyntaxResult<ParseSummary> {
        let start = Instant::now();
        log_debug!("Starting syntax analysis", "tokens" => self.tokens.len());

        match parse_program(self) {
            Ok(functions) => {
                let summary = self.summary(functions);
                log_timed!(codes::success::SYNTAX_VALIDATION_PASSED,
                    "Syntax analysis completed",
                    start = start,
                    "functions" => summary.functions,
                    "tokens" => summary.tokens_consumed,
                    "max_depth" => summary.max_depth
                );
                Ok(summary)
            }
            Err(error) => {
                self.log_failure(&error);
                Err(error)
            }
        }
    }

    /// Build an expression tree for a single `ID = Expression` statement.
    /// Parentheses are bounded by the expression depth limit.
    pub fn parse_assignment_tree(&mut self) -> SyntaxResult<Assignment> {
        let block_limit = self.max_depth;
        self.max_depth = MAX_EXPRESSION_DEPTH;
        let result = expressions::parse_assignment_tree(self);
        self.max_depth = block_limit;

        if let Err(error) = &result {
            self.log_failure(error);
        }
        result
    }

    pub fn position(&self) -> usize {
        self.tokens.position()
    }

    pub fn tokens(&self) -> &TokenStream {
        &self.tokens
    }

    /// Give back the observer, e.g. to inspect what it recorded
    pub fn take_observer(&mut self) -> Option<Box<dyn TokenObserver>> {
        self.observer.take()
    }

    fn summary(&self, functions: usize) -> ParseSummary {
        ParseSummary {
            functions,
            tokens_consumed: self.consumed,
            max_depth: self.deepest,
        }
    }

    fn log_failure(&self, error: &SyntaxError) {
        log_error!(error.error_code(), "Syntax analysis failed",
            span = error.span(),
            "error" => error,
            "position" => self.tokens.position()
        );
    }
}

impl Parser for MiniCParser {
    fn current_token(&self) -> Option<&Token> {
        self.tokens.current_token()
    }

    fn advance(&mut self) -> Option<Token> {
        let spanned = self.tokens.advance()?;
        if let Some(observer) = self.observer.as_mut() {
            observer.on_consume(spanned);
        }
        self.consumed += 1;
        Some(spanned.value.clone())
    }

    fn current_span(&self) -> Span {
        self.tokens.span_or_end()
    }

    fn enter_nested(&mut self) -> SyntaxResult<()> {
        if self.depth >= self.max_depth {
            return Err(SyntaxError::max_depth_exceeded(
                self.depth + 1,
                self.max_depth,
                self.current_span(),
            ));
        }
        self.depth += 1;
        self.deepest = self.deepest.max(self.depth);
        Ok(())
    }

    fn exit_nested(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn enter_production(&mut self, name: &'static str) {
        if self.preferences.trace_productions {
            log_debug!("Entering production",
                "production" => name,
                "position" => self.tokens.position()
            );
        }
    }
}
