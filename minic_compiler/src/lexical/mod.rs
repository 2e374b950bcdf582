//! Lexical analysis: source text to [`TokenStream`]
//!
//! The whole input is scanned before the parser runs. The first lexical
//! error ends the scan and no partial stream is handed back.

pub mod analyzer;

use crate::config::compile_time::lexical::{
    MAX_COMMENT_LENGTH, MAX_IDENTIFIER_LENGTH, MAX_TOKEN_COUNT,
};
use crate::logging::codes::{self, lexical};
use crate::tokens::TokenStream;

pub use analyzer::{LexerError, LexicalAnalyzer, LexicalMetrics};

/// Scan `source` with preferences read from the environment
pub fn tokenize(source: &str) -> Result<TokenStream, LexerError> {
    LexicalAnalyzer::new(source).tokenize()
}

pub fn init_lexical_analysis_logging() -> Result<(), String> {
    let unregistered = [
        lexical::INVALID_CHARACTER,
        lexical::UNTERMINATED_COMMENT,
        lexical::INVALID_NUMBER,
        lexical::IDENTIFIER_TOO_LONG,
        lexical::TOO_MANY_TOKENS,
        lexical::COMMENT_TOO_LONG,
    ]
    .into_iter()
    .find(|code| codes::get_error_metadata(code.as_str()).is_none());

    if let Some(code) = unregistered {
        return Err(format!("Lexical error code {} has no metadata", code));
    }

    crate::log_debug!("Lexical limits loaded",
        "max_identifier_length" => MAX_IDENTIFIER_LENGTH,
        "max_comment_length" => MAX_COMMENT_LENGTH,
        "max_token_count" => MAX_TOKEN_COUNT
    );
    Ok(())
}
