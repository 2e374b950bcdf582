//! Where things are in a MiniC source file
//!
//! Lines and columns start at 1. Anything but `\n` moves one column to the
//! right, tabs included, so a reported column is the scanner's own count.
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Byte index into the source
    pub offset: usize,
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Before the first character
    pub fn start() -> Self {
        Self::new(0, 1, 1)
    }

    /// Where the scanner stands after reading `ch`
    pub fn advance(self, ch: char) -> Self {
        let offset = self.offset + ch.len_utf8();
        if ch == '\n' {
            Self::new(offset, self.line + 1, 1)
        } else {
            Self::new(offset, self.line, self.column + 1)
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Half-open range `[start, end)` of source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(start.offset <= end.offset);
        Self { start, end }
    }

    /// One ASCII character wide, used for scanner errors
    pub fn single(at: Position) -> Self {
        Self::new(at, Position::new(at.offset + 1, at.line, at.column + 1))
    }

    /// Covers both `self` and `other`
    pub fn merge(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.start.line == self.end.line {
            true => write!(f, "{}-{}", self.start, self.end.column),
            false => write!(f, "{}-{}", self.start, self.end),
        }
    }
}

/// `value` together with where it was read
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Spanned<T> {
    pub value: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(value: T, span: Span) -> Self {
        Self { value, span }
    }
}

impl<T: fmt::Display> fmt::Display for Spanned<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

/// Source text kept around after a failed run so the bad line can be shown
#[derive(Debug, Clone)]
pub struct SourceMap {
    source: String,
}

impl SourceMap {
    pub fn new(source: String) -> Self {
        Self { source }
    }

    fn line(&self, number: u32) -> Option<&str> {
        let index = (number as usize).checked_sub(1)?;
        self.source
            .split('\n')
            .nth(index)
            .map(|line| line.trim_end_matches('\r'))
    }

    /// `message`, a `-->` location line, then the source line with carets
    /// under the span
    pub fn format_error(&self, span: &Span, message: &str) -> String {
        let mut out = format!("error: {}\n  --> {}\n", message, span.start);

        let Some(text) = self.line(span.start.line) else {
            return out;
        };

        let gutter = span.start.line.to_string();
        let blank = " ".repeat(gutter.len());
        let lead = span.start.column.saturating_sub(1) as usize;
        let width = if span.end.line == span.start.line {
            span.end.column.saturating_sub(span.start.column) as usize
        } else {
            text.chars().count().saturating_sub(lead)
        };

        out.push_str(&format!("{} |\n{} | {}\n", blank, gutter, text));
        out.push_str(&format!(
            "{} | {}{}\n",
            blank,
            " ".repeat(lead),
            "^".repeat(width.max(1))
        ));
        out
    }
}
