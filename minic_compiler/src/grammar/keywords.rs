//! Reserved words of MiniC
//!
//! Keywords are matched exactly and case-sensitively; `Int` and `INT` are
//! ordinary identifiers.
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    Const,
    Else,
    If,
    Int,
    Return,
    Void,
    While,
    True,
    False,
    For,
}

impl Keyword {
    /// Every keyword, in table order
    pub const ALL: [Keyword; 10] = [
        Self::Const,
        Self::Else,
        Self::If,
        Self::Int,
        Self::Return,
        Self::Void,
        Self::While,
        Self::True,
        Self::False,
        Self::For,
    ];

    /// Exact source spelling
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Const => "const",
            Self::Else => "else",
            Self::If => "if",
            Self::Int => "int",
            Self::Return => "return",
            Self::Void => "void",
            Self::While => "while",
            Self::True => "true",
            Self::False => "false",
            Self::For => "for",
        }
    }

    /// Exact, case-sensitive lookup against [`Keyword::as_str`]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|keyword| keyword.as_str() == s)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
