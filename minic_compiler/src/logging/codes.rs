//! Codes carried by every log event
//!
//! `E0xx` file access, `E1xx` scanning, `E2xx` parsing, `E3xx` expression
//! evaluation, `E9xx` internal, `I0xx` milestones. The `W`, `I000` and `D`
//! codes mark uncoded warnings, info and debug events.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

pub const GENERIC_WARNING: Code = Code::new("W000");
pub const GENERIC_INFO: Code = Code::new("I000");
pub const GENERIC_DEBUG: Code = Code::new("D000");

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

#[derive(Debug)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E001");
    pub const PERMISSION_DENIED: Code = Code::new("E002");
    pub const FILE_TOO_LARGE: Code = Code::new("E003");
    pub const INVALID_ENCODING: Code = Code::new("E004");
    pub const IO_ERROR: Code = Code::new("E005");
}

pub mod lexical {
    use super::Code;

    pub const INVALID_CHARACTER: Code = Code::new("E100");
    pub const UNTERMINATED_COMMENT: Code = Code::new("E101");
    pub const INVALID_NUMBER: Code = Code::new("E102");
    pub const IDENTIFIER_TOO_LONG: Code = Code::new("E103");
    pub const TOO_MANY_TOKENS: Code = Code::new("E104");
    pub const COMMENT_TOO_LONG: Code = Code::new("E105");
}

pub mod syntax {
    use super::Code;

    pub const UNEXPECTED_TOKEN: Code = Code::new("E200");
    pub const UNEXPECTED_END_OF_INPUT: Code = Code::new("E201");
    pub const UNEXPECTED_KEYWORD: Code = Code::new("E202");
    pub const MAX_RECURSION_DEPTH: Code = Code::new("E203");
}

pub mod expression {
    use super::Code;

    pub const UNDEFINED_VARIABLE: Code = Code::new("E300");
    pub const DIVISION_BY_ZERO: Code = Code::new("E301");
    pub const ARITHMETIC_OVERFLOW: Code = Code::new("E302");
}

pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("E900");
    pub const INITIALIZATION_FAILURE: Code = Code::new("E901");
}

pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I001");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I010");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const SYNTAX_VALIDATION_PASSED: Code = Code::new("I030");
    pub const PIPELINE_COMPLETE: Code = Code::new("I040");
}

macro_rules! metadata_table {
    ($(($code:literal, $category:literal, $severity:ident, $description:literal, $action:literal)),* $(,)?) => {
        const METADATA: &[ErrorMetadata] = &[$(ErrorMetadata {
            code: $code,
            category: $category,
            severity: Severity::$severity,
            description: $description,
            recommended_action: $action,
        }),*];
    };
}

metadata_table![
    ("E001", "FileProcessing", Medium, "Source file not found", "Check the path passed on the command line"),
    ("E002", "FileProcessing", Medium, "Source file not readable", "Check file permissions"),
    ("E003", "FileProcessing", High, "Source file exceeds the configured size limit", "Split the program or rebuild with a larger max_file_size"),
    ("E004", "FileProcessing", Medium, "Source file is not valid UTF-8", "Re-save the file as UTF-8 or ASCII"),
    ("E005", "FileProcessing", Medium, "I/O failure while reading the source file", "Retry; check the filesystem"),
    ("E100", "Lexical", High, "Character is not part of the language", "Remove or replace the character"),
    ("E101", "Lexical", High, "Multi-line comment is never closed", "Add the closing */"),
    ("E102", "Lexical", High, "Numeric literal is malformed or out of range", "Check the radix prefix and digits"),
    ("E103", "Lexical", Medium, "Identifier exceeds the configured length limit", "Use a shorter name"),
    ("E104", "Lexical", High, "Source produces more tokens than the configured limit", "Split the program"),
    ("E105", "Lexical", Medium, "Comment exceeds the configured length limit", "Shorten the comment"),
    ("E200", "Syntax", High, "Token does not fit the grammar at this point", "Fix the construct named in the message"),
    ("E201", "Syntax", High, "Input ended in the middle of a construct", "Complete the construct named in the message"),
    ("E202", "Syntax", High, "Keyword cannot begin a statement", "Only int declarations, if, for and assignments may appear in a block"),
    ("E203", "Syntax", Critical, "Blocks nested deeper than the configured limit", "Flatten the nesting"),
    ("E300", "Expression", Medium, "Identifier has no value in the evaluation environment", "Bind the identifier before evaluating"),
    ("E301", "Expression", Medium, "Division by zero", "Guard the divisor"),
    ("E302", "Expression", Medium, "Arithmetic overflow", "Use smaller operands"),
    ("E900", "System", Critical, "Internal compiler error", "File a bug report with the input that triggered it"),
    ("E901", "System", Critical, "Logging or configuration failed to initialize", "Check MINIC_* environment variables"),
    ("I001", "System", Low, "Logging initialized", "None"),
    ("I010", "FileProcessing", Low, "Source file read", "None"),
    ("I020", "Lexical", Low, "Scanning completed", "None"),
    ("I030", "Syntax", Low, "Program is syntactically correct", "None"),
    ("I040", "Pipeline", Low, "Pipeline completed", "None"),
];

pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    METADATA.iter().find(|metadata| metadata.code == code)
}

/// "General" for codes without metadata
pub fn get_category(code: &str) -> &'static str {
    get_error_metadata(code).map_or("General", |metadata| metadata.category)
}
