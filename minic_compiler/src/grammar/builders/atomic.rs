//! Parser seam and single-token builders
//!
//! Every grammar production is written against the [`Parser`] trait so the
//! productions stay independent of how tokens are stored, logged, or echoed.

use crate::grammar::keywords::Keyword;
use crate::syntax::error::{SyntaxError, SyntaxResult};
use crate::tokens::{Token, TokenKind};
use crate::utils::Span;

/// What the grammar productions need from a parser
pub trait Parser {
    // === BASIC NAVIGATION ===
    fn current_token(&self) -> Option<&Token>;

    /// Consume the current token unconditionally, returning it
    fn advance(&mut self) -> Option<Token>;

    /// Span of the current token, or the end-of-file location once exhausted
    fn current_span(&self) -> Span;

    // === NESTING ===
    /// Called before a nested block or parenthesis; fails past the depth limit
    fn enter_nested(&mut self) -> SyntaxResult<()>;
    fn exit_nested(&mut self);

    /// Hook invoked at the start of every production
    fn enter_production(&mut self, _name: &'static str) {}

    // === PROVIDED ===
    fn current_kind(&self) -> Option<TokenKind> {
        self.current_token().map(|token| token.kind)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == Some(kind)
    }

    fn is_at_end(&self) -> bool {
        self.current_token().is_none()
    }

    /// The match primitive: consume the current token if it has `kind`.
    /// On mismatch nothing is consumed and the caller decides on the error.
    fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Like [`Parser::match_kind`], for a whole category of kinds
    fn match_where(&mut self, predicate: fn(TokenKind) -> bool) -> Option<Token> {
        match self.current_kind() {
            Some(kind) if predicate(kind) => self.advance(),
            _ => None,
        }
    }

    /// The error primitive: report the offending token, or end of file
    fn error(&self, expected: &str) -> SyntaxError {
        match self.current_token() {
            Some(token) => SyntaxError::unexpected_token(expected, &token.lexeme, self.current_span()),
            None => SyntaxError::unexpected_end_of_input(expected, self.current_span()),
        }
    }
}

// === EXPECTATION BUILDERS ===

/// Consume a token of `kind` or fail citing `label`
pub fn expect(parser: &mut dyn Parser, kind: TokenKind, label: &str) -> SyntaxResult<()> {
    if parser.match_kind(kind) {
        Ok(())
    } else {
        Err(parser.error(label))
    }
}

pub fn expect_where(
    parser: &mut dyn Parser,
    predicate: fn(TokenKind) -> bool,
    label: &str,
) -> SyntaxResult<Token> {
    match parser.match_where(predicate) {
        Some(token) => Ok(token),
        None => Err(parser.error(label)),
    }
}

/// Any keyword; the grammar does not restrict which one names a type
pub fn parse_type_keyword(parser: &mut dyn Parser, label: &str) -> SyntaxResult<Keyword> {
    match parser.current_kind().and_then(TokenKind::as_keyword) {
        Some(keyword) => {
            parser.advance();
            Ok(keyword)
        }
        None => Err(parser.error(label)),
    }
}

pub fn parse_identifier(parser: &mut dyn Parser, label: &str) -> SyntaxResult<String> {
    let token = expect_where(parser, |kind| kind == TokenKind::Identifier, label)?;
    Ok(token.lexeme)
}

pub fn parse_number(parser: &mut dyn Parser) -> SyntaxResult<i64> {
    let token = expect_where(parser, |kind| kind == TokenKind::Number, "Number")?;
    Ok(token.value.unwrap_or_default())
}

/// `ID | Number`
pub fn parse_operand(parser: &mut dyn Parser) -> SyntaxResult<Token> {
    expect_where(parser, TokenKind::is_operand, "ID or Number")
}

/// `= += -= *= /=`
pub fn parse_assign_op(parser: &mut dyn Parser) -> SyntaxResult<TokenKind> {
    expect_where(parser, TokenKind::is_assign_op, "Assignment operator").map(|t| t.kind)
}

/// `+ - * /`
pub fn parse_arith_op(parser: &mut dyn Parser) -> SyntaxResult<TokenKind> {
    expect_where(parser, TokenKind::is_arith_op, "Operator").map(|t| t.kind)
}

/// `< <= == > >= !=`
pub fn parse_compare_op(parser: &mut dyn Parser) -> SyntaxResult<TokenKind> {
    expect_where(parser, TokenKind::is_compare_op, "Comparison operator").map(|t| t.kind)
}

/// `(ArithOp (ID|Number))*` up to, not including, the terminating semicolon
pub fn parse_arith_continuation(parser: &mut dyn Parser) -> SyntaxResult<usize> {
    let mut pairs = 0;
    while !parser.check(TokenKind::Semicolon) && !parser.is_at_end() {
        parse_arith_op(parser)?;
        parse_operand(parser)?;
        pairs += 1;
    }
    Ok(pairs)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::lexical::tokenize;
    use crate::tokens::TokenStream;

    /// Minimal [`Parser`] over a scanned stream, with a fixed depth limit
    pub struct StreamParser {
        pub tokens: TokenStream,
        pub depth: usize,
        pub max_depth: usize,
        pub consumed: Vec<String>,
    }

    impl StreamParser {
        pub fn new(source: &str) -> Self {
            Self {
                tokens: tokenize(source).unwrap(),
                depth: 0,
                max_depth: 4,
                consumed: Vec::new(),
            }
        }
    }

    impl Parser for StreamParser {
        fn current_token(&self) -> Option<&Token> {
            self.tokens.current_token()
        }

        fn advance(&mut self) -> Option<Token> {
            let token = self.tokens.advance().map(|t| t.value.clone())?;
            self.consumed.push(token.lexeme.clone());
            Some(token)
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
            Ok(())
        }

        fn exit_nested(&mut self) {
            self.depth -= 1;
        }
    }
}
