//! Token kinds and the classifier tables that assign them
//!
//! The kind of every token is fixed at scan time from its lexeme and
//! leading character class. The parser only ever switches on [`TokenKind`]
//! and never compares lexeme strings.
use crate::grammar::keywords::Keyword;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Keyword(Keyword),
    Identifier,
    /// Integer literal; the decoded value lives on [`Token::value`]
    Number,

    // Punctuation
    LeftParen,    // (
    RightParen,   // )
    LeftBrace,    // {
    RightBrace,   // }
    LeftBracket,  // [
    RightBracket, // ]
    Semicolon,    // ;
    Comma,        // ,
    Quote,        // "

    // Assignment operators
    Assign,    // =
    AddAssign, // +=
    SubAssign, // -=
    MulAssign, // *=
    DivAssign, // /=
    ModAssign, // %=

    // Comparison operators
    Equal,        // ==
    NotEqual,     // !=
    Less,         // <
    LessEqual,    // <=
    Greater,      // >
    GreaterEqual, // >=

    // Arithmetic operators
    Plus,    // +
    Minus,   // -
    Star,    // *
    Slash,   // /
    Percent, // %

    Increment, // ++
    Decrement, // --

    // Logical operators, tokenized but not used by any production
    And, // &&
    Or,  // ||
    Not, // !
}

impl TokenKind {
    /// Every operator kind; spellings come from [`TokenKind::symbol`]
    pub const OPERATORS: [TokenKind; 22] = [
        Self::Assign,
        Self::AddAssign,
        Self::SubAssign,
        Self::MulAssign,
        Self::DivAssign,
        Self::ModAssign,
        Self::Equal,
        Self::NotEqual,
        Self::Less,
        Self::LessEqual,
        Self::Greater,
        Self::GreaterEqual,
        Self::Plus,
        Self::Minus,
        Self::Star,
        Self::Slash,
        Self::Percent,
        Self::Increment,
        Self::Decrement,
        Self::And,
        Self::Or,
        Self::Not,
    ];

    pub const PUNCTUATION: [TokenKind; 9] = [
        Self::LeftParen,
        Self::RightParen,
        Self::LeftBrace,
        Self::RightBrace,
        Self::LeftBracket,
        Self::RightBracket,
        Self::Semicolon,
        Self::Comma,
        Self::Quote,
    ];

    /// `= += -= *= /=`; `%=` scans but is not an assignment operator of the grammar
    pub fn is_assign_op(self) -> bool {
        matches!(
            self,
            Self::Assign | Self::AddAssign | Self::SubAssign | Self::MulAssign | Self::DivAssign
        )
    }

    /// `+ - * /`
    pub fn is_arith_op(self) -> bool {
        matches!(self, Self::Plus | Self::Minus | Self::Star | Self::Slash)
    }

    pub fn is_compare_op(self) -> bool {
        matches!(
            self,
            Self::Less
                | Self::LessEqual
                | Self::Equal
                | Self::Greater
                | Self::GreaterEqual
                | Self::NotEqual
        )
    }

    /// `++` or `--`
    pub fn is_step_op(self) -> bool {
        matches!(self, Self::Increment | Self::Decrement)
    }

    /// Identifier or number, the only operands the grammar allows
    pub fn is_operand(self) -> bool {
        matches!(self, Self::Identifier | Self::Number)
    }

    pub fn as_keyword(self) -> Option<Keyword> {
        match self {
            Self::Keyword(keyword) => Some(keyword),
            _ => None,
        }
    }

    pub fn class(self) -> TokenClass {
        match self {
            Self::Keyword(_) => TokenClass::Keyword,
            Self::Identifier => TokenClass::Identifier,
            Self::Number => TokenClass::Literal,
            Self::LeftParen
            | Self::RightParen
            | Self::LeftBrace
            | Self::RightBrace
            | Self::LeftBracket
            | Self::RightBracket
            | Self::Semicolon
            | Self::Comma
            | Self::Quote => TokenClass::Punctuation,
            _ => TokenClass::Operator,
        }
    }

    /// Fixed spelling for punctuation and operators
    pub fn symbol(self) -> Option<&'static str> {
        let symbol = match self {
            Self::Keyword(keyword) => return Some(keyword.as_str()),
            Self::Identifier | Self::Number => return None,
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::LeftBrace => "{",
            Self::RightBrace => "}",
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::Semicolon => ";",
            Self::Comma => ",",
            Self::Quote => "\"",
            Self::Assign => "=",
            Self::AddAssign => "+=",
            Self::SubAssign => "-=",
            Self::MulAssign => "*=",
            Self::DivAssign => "/=",
            Self::ModAssign => "%=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Increment => "++",
            Self::Decrement => "--",
            Self::And => "&&",
            Self::Or => "||",
            Self::Not => "!",
        };
        Some(symbol)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier => f.write_str("ID"),
            Self::Number => f.write_str("Number"),
            other => f.write_str(other.symbol().unwrap_or("?")),
        }
    }
}

/// Coarse token categories, used for metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TokenClass {
    Keyword,
    Identifier,
    Literal,
    Operator,
    Punctuation,
}

impl TokenClass {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Identifier => "identifier",
            Self::Literal => "literal",
            Self::Operator => "operator",
            Self::Punctuation => "punctuation",
        }
    }
}

/// A scanned token: kind, raw lexeme, and decoded value for numbers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    /// Always `Some` for [`TokenKind::Number`], `None` otherwise
    pub value: Option<i64>,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            value: None,
        }
    }

    pub fn keyword(keyword: Keyword) -> Self {
        Self::new(TokenKind::Keyword(keyword), keyword.as_str())
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        Self::new(TokenKind::Identifier, name)
    }

    pub fn number(lexeme: impl Into<String>, value: i64) -> Self {
        Self {
            kind: TokenKind::Number,
            lexeme: lexeme.into(),
            value: Some(value),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lexeme)
    }
}

// === CLASSIFICATION FUNCTIONS ===

/// Keyword if the word is reserved, identifier otherwise
pub fn classify_word(word: &str) -> Token {
    match Keyword::from_str(word) {
        Some(keyword) => Token::keyword(keyword),
        None => Token::identifier(word),
    }
}

/// One- or two-character operator lookup
pub fn classify_operator_symbol(symbol: &str) -> Option<TokenKind> {
    TokenKind::OPERATORS
        .into_iter()
        .find(|kind| kind.symbol() == Some(symbol))
}

/// Single-character punctuation lookup, independent of the operator table
pub fn classify_punctuation(ch: char) -> Option<TokenKind> {
    let mut buf = [0u8; 4];
    let symbol: &str = ch.encode_utf8(&mut buf);
    TokenKind::PUNCTUATION
        .into_iter()
        .find(|kind| kind.symbol() == Some(symbol))
}
