//! Syntax errors raised by the grammar productions
//!
//! Parsing is fail-fast: the first error aborts the whole parse and is
//! propagated unchanged to the caller.

use crate::logging::{codes, Code};
use crate::utils::Span;

pub type SyntaxResult<T> = Result<T, SyntaxError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyntaxError {
    #[error("Expected {expected}, got '{found}'")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    /// `span` is the zero-width location just past the last token
    #[error("Expected {expected}, but reached end of file")]
    UnexpectedEndOfInput { expected: String, span: Span },

    #[error("Unexpected keyword '{keyword}'")]
    UnexpectedKeyword { keyword: String, span: Span },

    #[error("Nesting depth {depth} exceeds the maximum of {max}")]
    MaxDepthExceeded { depth: usize, max: usize, span: Span },
}

impl SyntaxError {
    pub fn unexpected_token(expected: &str, found: &str, span: Span) -> Self {
        Self::UnexpectedToken {
            expected: expected.to_string(),
            found: found.to_string(),
            span,
        }
    }

    pub fn unexpected_end_of_input(expected: &str, span: Span) -> Self {
        Self::UnexpectedEndOfInput {
            expected: expected.to_string(),
            span,
        }
    }

    pub fn unexpected_keyword(keyword: &str, span: Span) -> Self {
        Self::UnexpectedKeyword {
            keyword: keyword.to_string(),
            span,
        }
    }

    pub fn max_depth_exceeded(depth: usize, max: usize, span: Span) -> Self {
        Self::MaxDepthExceeded { depth, max, span }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::UnexpectedToken { .. } => codes::syntax::UNEXPECTED_TOKEN,
            Self::UnexpectedEndOfInput { .. } => codes::syntax::UNEXPECTED_END_OF_INPUT,
            Self::UnexpectedKeyword { .. } => codes::syntax::UNEXPECTED_KEYWORD,
            Self::MaxDepthExceeded { .. } => codes::syntax::MAX_RECURSION_DEPTH,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::UnexpectedToken { span, .. }
            | Self::UnexpectedEndOfInput { span, .. }
            | Self::UnexpectedKeyword { span, .. }
            | Self::MaxDepthExceeded { span, .. } => *span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Position;

    fn span_at(line: u32, column: u32) -> Span {
        Span::single(Position::new(0, line, column))
    }

    #[test]
    fn test_messages() {
        let error = SyntaxError::unexpected_token("Number", "x", span_at(1, 20));
        assert_eq!(error.to_string(), "Expected Number, got 'x'");

        let error = SyntaxError::unexpected_end_of_input("}", span_at(1, 12));
        assert_eq!(error.to_string(), "Expected }, but reached end of file");

        let error = SyntaxError::unexpected_keyword("while", span_at(2, 3));
        assert_eq!(error.to_string(), "Unexpected keyword 'while'");
    }

    #[test]
    fn test_codes_and_spans() {
        let span = span_at(3, 4);
        let errors = [
            (
                SyntaxError::unexpected_token("ID", "1", span),
                codes::syntax::UNEXPECTED_TOKEN,
            ),
            (
                SyntaxError::unexpected_end_of_input("Semicolon", span),
                codes::syntax::UNEXPECTED_END_OF_INPUT,
            ),
            (
                SyntaxError::unexpected_keyword("const", span),
                codes::syntax::UNEXPECTED_KEYWORD,
            ),
            (
                SyntaxError::max_depth_exceeded(9, 8, span),
                codes::syntax::MAX_RECURSION_DEPTH,
            ),
        ];

        for (error, code) in errors {
            assert_eq!(error.error_code(), code);
            assert_eq!(error.span(), span);
        }
    }
}
