//! Structured diagnostics handed to whatever presents them

use crate::logging::Code;
use crate::utils::Position;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    Lexical,
    Syntax,
    File,
    Internal,
}

impl DiagnosticKind {
    /// Prefix used when printing, as in `Syntax Error: ...`
    pub fn label(&self) -> &'static str {
        match self {
            Self::Lexical => "Lexical",
            Self::Syntax => "Syntax",
            Self::File => "File",
            Self::Internal => "Internal",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Syntax => 1,
            Self::Lexical => 2,
            Self::File => 3,
            Self::Internal => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
    pub code: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: String, code: Code) -> Self {
        Self {
            kind,
            message,
            line: None,
            column: None,
            code: code.as_str().to_string(),
        }
    }

    pub fn at(mut self, position: Position) -> Self {
        self.line = Some(position.line);
        self.column = Some(position.column);
        self
    }

    /// `Syntax Error: Line 1, Column 20: Expected Number, got 'x'`
    pub fn headline(&self) -> String {
        format!("{} Error: {}", self.kind.label(), self)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// `Line L, Column C: message`, dropping whatever location is unknown
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, self.column) {
            (Some(line), Some(column)) => {
                write!(f, "Line {}, Column {}: {}", line, column, self.message)
            }
            (Some(line), None) => write!(f, "Line {}: {}", line, self.message),
            _ => f.write_str(&self.message),
        }
    }
}
