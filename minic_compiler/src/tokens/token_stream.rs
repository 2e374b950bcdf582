use crate::tokens::token::{Token, TokenKind};
use crate::utils::{Position, Span, Spanned};

pub type SpannedToken = Spanned<Token>;

/// The scanner's finished output
///
/// Tokens are fixed once built. The parser reads them through a cursor
/// that only moves forward and never passes `len()`. There is no EOF
/// token: the cursor sitting at `len()` is the end of input, and
/// [`TokenStream::span_or_end`] then points just past the last character
/// scanned.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<SpannedToken>,
    cursor: usize,
    end: Position,
}

impl TokenStream {
    /// End of input is taken to be the end of the last token
    pub fn new(tokens: Vec<SpannedToken>) -> Self {
        let end = tokens.last().map_or_else(Position::start, |t| t.span.end);
        Self::with_end(tokens, end)
    }

    /// `end` is where scanning stopped, after any trailing comments
    pub fn with_end(tokens: Vec<SpannedToken>, end: Position) -> Self {
        Self {
            tokens,
            cursor: 0,
            end,
        }
    }

    pub fn current(&self) -> Option<&SpannedToken> {
        self.tokens.get(self.cursor)
    }

    pub fn current_token(&self) -> Option<&Token> {
        self.current().map(|t| &t.value)
    }

    /// Step past the current token and return it; `None` once exhausted
    pub fn advance(&mut self) -> Option<&SpannedToken> {
        let token = self.tokens.get(self.cursor)?;
        self.cursor += 1;
        Some(token)
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor == self.tokens.len()
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Span of the current token, or an empty span at the end position
    pub fn span_or_end(&self) -> Span {
        match self.current() {
            Some(token) => token.span,
            None => Span::new(self.end, self.end),
        }
    }

    pub fn tokens(&self) -> &[SpannedToken] {
        &self.tokens
    }

    /// All tokens from the start, regardless of the cursor
    pub fn iter(&self) -> std::slice::Iter<'_, SpannedToken> {
        self.tokens.iter()
    }

    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|t| t.value.kind).collect()
    }

    pub fn lexemes(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.value.lexeme.as_str()).collect()
    }

    pub fn into_tokens(self) -> Vec<SpannedToken> {
        self.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::keywords::Keyword;

    /// `return 5;` laid out on one line
    fn sample() -> TokenStream {
        let at = |offset: usize| Position::new(offset, 1, offset as u32 + 1);
        TokenStream::with_end(
            vec![
                Spanned::new(Token::keyword(Keyword::Return), Span::new(at(0), at(6))),
                Spanned::new(Token::number("5", 5), Span::new(at(7), at(8))),
                Spanned::new(Token::new(TokenKind::Semicolon, ";"), Span::new(at(8), at(9))),
            ],
            at(10),
        )
    }

    #[test]
    fn test_cursor_moves_forward_only() {
        let mut stream = sample();
        assert_eq!((stream.len(), stream.position()), (3, 0));

        let consumed = stream.advance().map(|t| t.value.lexeme.clone());
        assert_eq!(consumed.as_deref(), Some("return"));
        assert_eq!(stream.current_token().map(|t| t.kind), Some(TokenKind::Number));

        stream.advance();
        stream.advance();
        assert!(stream.is_at_end());
        assert!(stream.advance().is_none());
        assert_eq!(stream.position(), 3);
    }

    #[test]
    fn test_end_span_after_last_token() {
        let mut stream = sample();
        assert_eq!(stream.span_or_end().start.column, 1);
        while stream.advance().is_some() {}

        let span = stream.span_or_end();
        assert!(span.is_empty());
        assert_eq!(span.start.column, 11);
    }

    #[test]
    fn test_empty_stream_ends_at_start() {
        let stream = TokenStream::new(Vec::new());
        assert!(stream.is_empty());
        assert!(stream.is_at_end());
        assert_eq!(stream.span_or_end().start, Position::start());
    }

    #[test]
    fn test_iter_ignores_cursor() {
        let mut stream = sample();
        stream.advance();
        stream.advance();

        let columns: Vec<u32> = stream.iter().map(|t| t.span.start.column).collect();
        assert_eq!(columns, vec![1, 8, 9]);
        assert_eq!(stream.position(), 2);
    }

    #[test]
    fn test_new_ends_after_last_token() {
        let stream = TokenStream::new(sample().into_tokens());
        assert_eq!(stream.lexemes(), vec!["return", "5", ";"]);
        assert_eq!(stream.span_or_end(), stream.tokens()[0].span);

        let mut exhausted = stream.clone();
        while exhausted.advance().is_some() {}
        assert_eq!(exhausted.span_or_end().start.offset, 9);
    }
}
