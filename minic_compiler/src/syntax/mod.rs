//! Syntax analysis: accept or reject a [`TokenStream`] as a MiniC program
//!
//! The parser is a pure acceptor. It builds no tree and stops at the first
//! mismatch. The optional assignment-tree utility is the only entry point
//! that produces a structure.

pub mod error;
pub mod observer;
pub mod parser;

pub use error::{SyntaxError, SyntaxResult};
pub use observer::{EchoObserver, RecordingObserver, TokenObserver};
pub use parser::{MiniCParser, ParseSummary};

use crate::config::compile_time::syntax::{MAX_EXPRESSION_DEPTH, MAX_PARSE_DEPTH};
use crate::grammar::ast::nodes::Assignment;
use crate::tokens::TokenStream;

/// Parse a whole program with default preferences
pub fn parse_tokens(tokens: TokenStream) -> SyntaxResult<ParseSummary> {
    MiniCParser::new(tokens).parse()
}

/// Parse exactly one `ID = Expression` statement into a tree
pub fn parse_assignment_tree(tokens: TokenStream) -> SyntaxResult<Assignment> {
    MiniCParser::new(tokens).parse_assignment_tree()
}

/// Check that every syntax error code is registered, then log the limits
pub fn init_syntax_logging() -> Result<(), String> {
    let syntax_codes = [
        crate::logging::codes::syntax::UNEXPECTED_TOKEN,
        crate::logging::codes::syntax::UNEXPECTED_END_OF_INPUT,
        crate::logging::codes::syntax::UNEXPECTED_KEYWORD,
        crate::logging::codes::syntax::MAX_RECURSION_DEPTH,
    ];

    if let Some(missing) = syntax_codes
        .iter()
        .find(|code| crate::logging::codes::get_error_metadata(code.as_str()).is_none())
    {
        return Err(format!(
            "Syntax error code {} not found in metadata registry",
            missing.as_str()
        ));
    }

    crate::log_debug!("Syntax limits initialized",
        "max_parse_depth" => MAX_PARSE_DEPTH,
        "max_expression_depth" => MAX_EXPRESSION_DEPTH
    );
    Ok(())
}
