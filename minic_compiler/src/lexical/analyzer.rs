//! Single-pass scanner producing an immutable token stream
//!
//! Whitespace and comments are elided before each token; line and column
//! tracking continues through both so positions after a multi-line comment
//! stay accurate. Resource limits come from the compile-time constants.

use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::tokens::{
    classify_operator_symbol, classify_punctuation, classify_word, Token, TokenClass, TokenKind,
    TokenStream,
};
use crate::utils::{Position, Span, Spanned};
use crate::{log_debug, log_error, log_success};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexerError {
    #[error("Invalid character '{character}'")]
    InvalidCharacter { character: char, position: Position },

    /// `position` is where the comment was opened
    #[error("Unclosed multi-line comment")]
    UnterminatedComment { position: Position },

    #[error("Invalid number '{literal}': {reason}")]
    InvalidNumber {
        literal: String,
        reason: &'static str,
        position: Position,
    },

    #[error("Identifier too long: {length} characters (max {max})")]
    IdentifierTooLong {
        length: usize,
        max: usize,
        position: Position,
    },

    #[error("Comment too long: {length} characters (max {max})")]
    CommentTooLong {
        length: usize,
        max: usize,
        position: Position,
    },

    #[error("Too many tokens: {count} (max {max})")]
    TooManyTokens { count: usize, max: usize },
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::InvalidCharacter { .. } => codes::lexical::INVALID_CHARACTER,
            LexerError::UnterminatedComment { .. } => codes::lexical::UNTERMINATED_COMMENT,
            LexerError::InvalidNumber { .. } => codes::lexical::INVALID_NUMBER,
            LexerError::IdentifierTooLong { .. } => codes::lexical::IDENTIFIER_TOO_LONG,
            LexerError::CommentTooLong { .. } => codes::lexical::COMMENT_TOO_LONG,
            LexerError::TooManyTokens { .. } => codes::lexical::TOO_MANY_TOKENS,
        }
    }

    /// Where scanning stopped; `None` for limits that are not tied to a character
    pub fn position(&self) -> Option<Position> {
        match self {
            LexerError::InvalidCharacter { position, .. }
            | LexerError::UnterminatedComment { position }
            | LexerError::InvalidNumber { position, .. }
            | LexerError::IdentifierTooLong { position, .. }
            | LexerError::CommentTooLong { position, .. } => Some(*position),
            LexerError::TooManyTokens { .. } => None,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub keyword_tokens: usize,
    pub identifier_tokens: usize,
    pub number_tokens: usize,
    pub operator_tokens: usize,
    pub punctuation_tokens: usize,
    pub comments_elided: usize,
    pub max_comment_length: usize,
    pub lines_scanned: u32,

    /// Operator lexeme histogram, only filled with detailed metrics enabled
    pub operator_usage: BTreeMap<String, usize>,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, token: &Token, preferences: &LexicalPreferences) {
        self.total_tokens += 1;

        match token.kind.class() {
            TokenClass::Keyword => self.keyword_tokens += 1,
            TokenClass::Identifier => self.identifier_tokens += 1,
            TokenClass::Literal => self.number_tokens += 1,
            TokenClass::Punctuation => self.punctuation_tokens += 1,
            TokenClass::Operator => {
                self.operator_tokens += 1;
                if preferences.collect_detailed_metrics {
                    *self
                        .operator_usage
                        .entry(token.lexeme.clone())
                        .or_insert(0) += 1;
                }
            }
        }
    }

    pub(crate) fn record_comment(&mut self, length: usize) {
        self.comments_elided += 1;
        self.max_comment_length = self.max_comment_length.max(length);
    }
}

/// Scanner over one source text.
///
/// ```
/// use minic_compiler::lexical::LexicalAnalyzer;
///
/// let mut analyzer = LexicalAnalyzer::new("a+=0x1F;");
/// let tokens = analyzer.tokenize().unwrap();
/// assert_eq!(tokens.lexemes(), vec!["a", "+=", "0x1F", ";"]);
/// assert_eq!(tokens.tokens()[2].value.value, Some(31));
/// ```
pub struct LexicalAnalyzer<'a> {
    source: &'a str,
    position: Position,
    metrics: LexicalMetrics,
    preferences: LexicalPreferences,
}

impl<'a> LexicalAnalyzer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::with_preferences(source, LexicalPreferences::default())
    }

    pub fn with_preferences(source: &'a str, preferences: LexicalPreferences) -> Self {
        Self {
            source,
            position: Position::start(),
            metrics: LexicalMetrics::default(),
            preferences,
        }
    }

    /// Scan the whole source, stopping at the first lexical error
    pub fn tokenize(&mut self) -> Result<TokenStream, LexerError> {
        self.position = Position::start();
        self.metrics = LexicalMetrics::default();

        log_debug!("Starting lexical analysis",
            "bytes" => self.source.len(),
            "max_tokens_allowed" => MAX_TOKEN_COUNT
        );

        match self.scan_all() {
            Ok(tokens) => {
                self.metrics.lines_scanned = self.position.line;
                let stream = TokenStream::with_end(tokens, self.position);

                log_success!(codes::success::TOKENIZATION_COMPLETE,
                    "Lexical analysis completed successfully",
                    "token_count" => stream.len(),
                    "lines" => self.metrics.lines_scanned,
                    "comments" => self.metrics.comments_elided
                );

                if self.preferences.collect_detailed_metrics {
                    log_debug!("Lexical metrics",
                        "keywords" => self.metrics.keyword_tokens,
                        "identifiers" => self.metrics.identifier_tokens,
                        "numbers" => self.metrics.number_tokens,
                        "operators" => self.metrics.operator_tokens,
                        "punctuation" => self.metrics.punctuation_tokens,
                        "max_comment_length" => self.metrics.max_comment_length,
                        "operator_usage" => format!("{:?}", self.metrics.operator_usage)
                    );
                }

                Ok(stream)
            }
            Err(error) => {
                let message = error.to_string();
                match error.position() {
                    Some(position) => log_error!(error.error_code(), &message,
                        span = Span::single(position),
                        "line" => position.line,
                        "column" => position.column,
                        "tokens_processed" => self.metrics.total_tokens
                    ),
                    None => log_error!(error.error_code(), &message,
                        "tokens_processed" => self.metrics.total_tokens
                    ),
                }
                Err(error)
            }
        }
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    // ========================================================================
    // Scanning
    // ========================================================================

    fn scan_all(&mut self) -> Result<Vec<Spanned<Token>>, LexerError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_trivia()?;
            let Some(ch) = self.peek() else {
                break;
            };

            if tokens.len() >= MAX_TOKEN_COUNT {
                return Err(LexerError::TooManyTokens {
                    count: tokens.len() + 1,
                    max: MAX_TOKEN_COUNT,
                });
            }

            let start = self.position;
            let token = if ch.is_alphabetic() {
                self.scan_word(start)?
            } else if ch.is_ascii_digit() {
                self.scan_number(start)?
            } else if let Some(kind) = self.scan_operator() {
                Token::new(kind, self.lexeme_from(start))
            } else if let Some(kind) = classify_punctuation(ch) {
                self.bump();
                Token::new(kind, self.lexeme_from(start))
            } else {
                return Err(LexerError::InvalidCharacter {
                    character: ch,
                    position: start,
                });
            };

            self.metrics.record_token(&token, &self.preferences);
            tokens.push(Spanned::new(token, Span::new(start, self.position)));
        }

        Ok(tokens)
    }

    /// Skip whitespace and comments until the next token or end of input
    fn skip_trivia(&mut self) -> Result<(), LexerError> {
        loop {
            match (self.peek(), self.peek_second()) {
                (Some(ch), _) if ch.is_whitespace() => {
                    self.bump();
                }
                (Some('/'), Some('/')) => self.skip_line_comment()?,
                (Some('/'), Some('*')) => self.skip_block_comment()?,
                _ => return Ok(()),
            }
        }
    }

    /// `//` through the end of the line, newline included
    fn skip_line_comment(&mut self) -> Result<(), LexerError> {
        let start = self.position;
        self.bump();
        self.bump();

        while let Some(ch) = self.bump() {
            if ch == '\n' {
                break;
            }
        }

        self.finish_comment(start)
    }

    fn skip_block_comment(&mut self) -> Result<(), LexerError> {
        let start = self.position;
        self.bump();
        self.bump();

        loop {
            match (self.peek(), self.peek_second()) {
                (Some('*'), Some('/')) => {
                    self.bump();
                    self.bump();
                    return self.finish_comment(start);
                }
                (Some(_), _) => {
                    self.bump();
                }
                (None, _) => return Err(LexerError::UnterminatedComment { position: start }),
            }
        }
    }

    fn finish_comment(&mut self, start: Position) -> Result<(), LexerError> {
        let length = self.lexeme_from(start).chars().count();
        if length > MAX_COMMENT_LENGTH {
            return Err(LexerError::CommentTooLong {
                length,
                max: MAX_COMMENT_LENGTH,
                position: start,
            });
        }

        self.metrics.record_comment(length);
        if self.preferences.log_comment_elision {
            log_debug!("Comment elided",
                "span" => Span::new(start, self.position),
                "length" => length
            );
        }
        Ok(())
    }

    /// Identifier or keyword: alphabetic start, then alphanumerics and `_`
    fn scan_word(&mut self, start: Position) -> Result<Token, LexerError> {
        self.bump();
        self.bump_while(|ch| ch.is_alphanumeric() || ch == '_');

        let word = self.lexeme_from(start);
        let length = word.chars().count();
        if length > MAX_IDENTIFIER_LENGTH {
            return Err(LexerError::IdentifierTooLong {
                length,
                max: MAX_IDENTIFIER_LENGTH,
                position: start,
            });
        }

        Ok(classify_word(word))
    }

    /// `0x`/`0X` hex, leading `0` octal, decimal otherwise.
    ///
    /// Scanning stops at the first character that is not a digit of the
    /// radix, so `123abc` yields a number followed by an identifier.
    fn scan_number(&mut self, start: Position) -> Result<Token, LexerError> {
        let first = self.bump();

        let (digits_start, radix) = match (first, self.peek()) {
            (Some('0'), Some('x' | 'X')) => {
                self.bump();
                let digits_start = self.position.offset;
                self.bump_while(|ch| ch.is_ascii_hexdigit());
                (digits_start, 16)
            }
            (Some('0'), Some(ch)) if ch.is_ascii_digit() => {
                let digits_start = self.position.offset;
                self.bump_while(|ch| ch.is_ascii_digit());
                (digits_start, 8)
            }
            _ => {
                self.bump_while(|ch| ch.is_ascii_digit());
                (start.offset, 10)
            }
        };

        let lexeme = self.lexeme_from(start);
        let digits = &self.source[digits_start..self.position.offset];
        let invalid = |reason| LexerError::InvalidNumber {
            literal: lexeme.to_string(),
            reason,
            position: start,
        };

        if digits.is_empty() {
            return Err(invalid("missing hexadecimal digits"));
        }
        if radix == 8 && digits.contains(['8', '9']) {
            return Err(invalid("digit out of range for octal literal"));
        }

        let value =
            i64::from_str_radix(digits, radix).map_err(|_| invalid("value does not fit in 64 bits"))?;

        Ok(Token::number(lexeme, value))
    }

    /// Maximal munch: the two-character form wins over its one-character prefix
    fn scan_operator(&mut self) -> Option<TokenKind> {
        let rest = &self.source[self.position.offset..];
        let mut chars = rest.chars();
        let first = chars.next()?;

        if let Some(second) = chars.next() {
            let pair_len = first.len_utf8() + second.len_utf8();
            if let Some(kind) = classify_operator_symbol(&rest[..pair_len]) {
                self.bump();
                self.bump();
                return Some(kind);
            }
        }

        let kind = classify_operator_symbol(&rest[..first.len_utf8()])?;
        self.bump();
        Some(kind)
    }

    // ========================================================================
    // Character cursor
    // ========================================================================

    fn peek(&self) -> Option<char> {
        self.source[self.position.offset..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.source[self.position.offset..].chars().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position = self.position.advance(ch);
        Some(ch)
    }

    fn bump_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&predicate) {
            self.bump();
        }
    }

    fn lexeme_from(&self, start: Position) -> &'a str {
        &self.source[start.offset..self.position.offset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::keywords::Keyword;
    use assert_matches::assert_matches;

    fn scan(source: &str) -> TokenStream {
        LexicalAnalyzer::new(source)
            .tokenize()
            .unwrap_or_else(|e| panic!("{:?} should scan: {}", source, e))
    }

    fn scan_err(source: &str) -> LexerError {
        match LexicalAnalyzer::new(source).tokenize() {
            Ok(tokens) => panic!("{:?} should fail, got {:?}", source, tokens.lexemes()),
            Err(error) => error,
        }
    }

    fn number_value(source: &str) -> Option<i64> {
        let tokens = scan(source);
        assert_eq!(tokens.len(), 1, "{:?}", tokens.lexemes());
        tokens.tokens()[0].value.value
    }

    #[test]
    fn test_radix_decoding() {
        assert_eq!(number_value("0x2A"), Some(42));
        assert_eq!(number_value("0x1F"), Some(31));
        assert_eq!(number_value("0XfF"), Some(255));
        assert_eq!(number_value("017"), Some(15));
        assert_eq!(number_value("9"), Some(9));
        assert_eq!(number_value("0"), Some(0));
        assert_eq!(number_value("00"), Some(0));
    }

    #[test]
    fn test_number_keeps_raw_lexeme() {
        let tokens = scan("017");
        let token = &tokens.tokens()[0].value;
        assert_eq!(token.kind, TokenKind::Number);
        assert_eq!(token.lexeme, "017");
        assert_eq!(token.value, Some(15));
    }

    #[test]
    fn test_invalid_numbers() {
        assert_matches!(scan_err("0x;"), LexerError::InvalidNumber { literal, .. } if literal == "0x");
        assert_matches!(scan_err("019"), LexerError::InvalidNumber { literal, .. } if literal == "019");
        assert_matches!(
            scan_err("99999999999999999999"),
            LexerError::InvalidNumber { reason: "value does not fit in 64 bits", .. }
        );
    }

    #[test]
    fn test_digits_then_letters_split() {
        let tokens = scan("123abc");
        assert_eq!(tokens.kinds(), vec![TokenKind::Number, TokenKind::Identifier]);
        assert_eq!(tokens.lexemes(), vec!["123", "abc"]);
    }

    #[test]
    fn test_maximal_munch() {
        let tokens = scan("a+=1");
        assert_eq!(
            tokens.kinds(),
            vec![TokenKind::Identifier, TokenKind::AddAssign, TokenKind::Number]
        );

        let tokens = scan("i++ <= == != && || ! -- -");
        assert_eq!(
            tokens.kinds(),
            vec![
                TokenKind::Identifier,
                TokenKind::Increment,
                TokenKind::LessEqual,
                TokenKind::Equal,
                TokenKind::NotEqual,
                TokenKind::And,
                TokenKind::Or,
                TokenKind::Not,
                TokenKind::Decrement,
                TokenKind::Minus,
            ]
        );
    }

    #[test]
    fn test_lone_ampersand_is_invalid() {
        assert_matches!(
            scan_err("a & b"),
            LexerError::InvalidCharacter { character: '&', position } if position.column == 3
        );
    }

    #[test]
    fn test_keywords_and_identifiers() {
        let tokens = scan("int main return_value Return");
        assert_eq!(
            tokens.kinds(),
            vec![
                TokenKind::Keyword(Keyword::Int),
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Identifier,
            ]
        );
    }

    #[test]
    fn test_underscore_cannot_start_identifier() {
        assert_matches!(
            scan_err("_x"),
            LexerError::InvalidCharacter { character: '_', .. }
        );
    }

    #[test]
    fn test_punctuation() {
        let tokens = scan("( ) { } [ ] ; , \"");
        assert!(tokens
            .iter()
            .all(|t| t.value.kind.class() == TokenClass::Punctuation));
        assert_eq!(tokens.len(), 9);
    }

    #[test]
    fn test_comments_are_transparent() {
        let with_comment = scan("int/*c*/ x=1;");
        let without = scan("int x=1;");
        assert_eq!(with_comment.kinds(), without.kinds());
        assert_eq!(with_comment.lexemes(), without.lexemes());
    }

    #[test]
    fn test_positions_after_comments() {
        let tokens = scan("// header\nint /* a\n  b */ x");
        let spans: Vec<_> = tokens
            .iter()
            .map(|t| (t.span.start.line, t.span.start.column))
            .collect();
        assert_eq!(spans, vec![(2, 1), (3, 8)]);
    }

    #[test]
    fn test_tab_counts_one_column() {
        let tokens = scan("\tx");
        assert_eq!(tokens.tokens()[0].span.start.column, 2);
    }

    #[test]
    fn test_unterminated_comment_reports_opening() {
        let error = scan_err("int main(){ /* return 1; }");
        assert_eq!(error.to_string(), "Unclosed multi-line comment");
        assert_matches!(
            error,
            LexerError::UnterminatedComment { position } if position.line == 1 && position.column == 13
        );
    }

    #[test]
    fn test_invalid_character_position() {
        let error = scan_err("int x;\n  y = @;");
        assert_eq!(error.to_string(), "Invalid character '@'");
        assert_eq!(error.position().map(|p| (p.line, p.column)), Some((2, 7)));
        assert_eq!(error.error_code(), codes::lexical::INVALID_CHARACTER);
    }

    #[test]
    fn test_slash_operators_are_not_comments() {
        let tokens = scan("x /= 2 / y");
        assert_eq!(
            tokens.kinds(),
            vec![
                TokenKind::Identifier,
                TokenKind::DivAssign,
                TokenKind::Number,
                TokenKind::Slash,
                TokenKind::Identifier,
            ]
        );
    }

    #[test]
    fn test_identifier_length_limit() {
        let long = "a".repeat(MAX_IDENTIFIER_LENGTH + 1);
        assert_matches!(
            scan_err(&long),
            LexerError::IdentifierTooLong { length, .. } if length == MAX_IDENTIFIER_LENGTH + 1
        );
    }

    #[test]
    fn test_empty_and_blank_sources() {
        assert!(scan("").is_empty());
        assert!(scan("  \n\t// only a comment").is_empty());
    }

    #[test]
    fn test_metrics() {
        let preferences = LexicalPreferences {
            collect_detailed_metrics: true,
            log_comment_elision: false,
        };
        let mut analyzer =
            LexicalAnalyzer::with_preferences("int x = 1 + 2; /* c */\nx += 3;", preferences);
        analyzer.tokenize().unwrap();

        let metrics = analyzer.metrics();
        assert_eq!(metrics.total_tokens, 11);
        assert_eq!(metrics.keyword_tokens, 1);
        assert_eq!(metrics.identifier_tokens, 2);
        assert_eq!(metrics.number_tokens, 3);
        assert_eq!(metrics.operator_tokens, 3);
        assert_eq!(metrics.punctuation_tokens, 2);
        assert_eq!(metrics.comments_elided, 1);
        assert_eq!(metrics.lines_scanned, 2);
        assert_eq!(metrics.operator_usage.get("+="), Some(&1));
    }
}
