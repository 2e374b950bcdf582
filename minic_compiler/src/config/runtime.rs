//! Preferences read from `MINIC_*` environment variables
//!
//! These only change what gets reported. Whether a program is accepted
//! depends on the compiled-in limits alone.

use crate::logging::LogLevel;
use serde::{Deserialize, Serialize};
use std::env;

/// Read a boolean preference, falling back to `default` when unset or unparsable
fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| parse_flag(&v))
        .unwrap_or(default)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileProcessorPreferences {
    /// Log read timings and file metadata after each successful read
    pub enable_performance_logging: bool,

    /// Emit a warning for files above the large-file threshold
    pub warn_on_large_files: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            enable_performance_logging: env_flag(env_vars::ENABLE_PERFORMANCE_LOGGING, true),
            warn_on_large_files: env_flag(env_vars::WARN_ON_LARGE_FILES, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexicalPreferences {
    /// Collect per-category token counts during scanning
    pub collect_detailed_metrics: bool,

    /// Debug-log every elided comment with its span
    pub log_comment_elision: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            collect_detailed_metrics: env_flag(env_vars::LEXER_METRICS, false),
            log_comment_elision: env_flag(env_vars::LEXER_LOG_COMMENTS, false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntaxPreferences {
    /// Print each token as the parser consumes it
    pub echo_consumed_tokens: bool,

    /// Debug-log entry into every grammar production
    pub trace_productions: bool,
}

impl Default for SyntaxPreferences {
    fn default() -> Self {
        Self {
            echo_consumed_tokens: env_flag(env_vars::SYNTAX_ECHO_TOKENS, false),
            trace_productions: env_flag(env_vars::SYNTAX_TRACE, false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Emit log events as JSON lines instead of plain text
    pub use_structured_logging: bool,

    /// Write log events to the console at all
    pub enable_console_logging: bool,

    pub min_log_level: LogLevel,

    /// Print the per-file cargo-style summary at exit
    pub enable_cargo_style_output: bool,

    /// Attach the current file path to every event
    pub include_file_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_flag(env_vars::LOGGING_USE_STRUCTURED, false),
            enable_console_logging: env_flag(env_vars::LOGGING_ENABLE_CONSOLE, false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| LogLevel::parse(&v))
                .unwrap_or(LogLevel::Info),
            enable_cargo_style_output: env_flag(env_vars::LOGGING_CARGO_STYLE, true),
            include_file_context: env_flag(env_vars::LOGGING_INCLUDE_FILE_CONTEXT, true),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub file_processor: FileProcessorPreferences,
    pub lexical: LexicalPreferences,
    pub syntax: SyntaxPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Snapshot every preference from the environment
    pub fn from_env() -> Self {
        Self::default()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // File Processor
    pub const ENABLE_PERFORMANCE_LOGGING: &str = "MINIC_ENABLE_PERFORMANCE_LOGGING";
    pub const WARN_ON_LARGE_FILES: &str = "MINIC_WARN_ON_LARGE_FILES";

    // Lexical
    pub const LEXER_METRICS: &str = "MINIC_LEXER_METRICS";
    pub const LEXER_LOG_COMMENTS: &str = "MINIC_LEXER_LOG_COMMENTS";

    // Syntax
    pub const SYNTAX_ECHO_TOKENS: &str = "MINIC_ECHO_TOKENS";
    pub const SYNTAX_TRACE: &str = "MINIC_SYNTAX_TRACE";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "MINIC_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "MINIC_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "MINIC_LOGGING_MIN_LEVEL";
    pub const LOGGING_CARGO_STYLE: &str = "MINIC_LOGGING_CARGO_STYLE";
    pub const LOGGING_INCLUDE_FILE_CONTEXT: &str = "MINIC_LOGGING_INCLUDE_FILE_CONTEXT";
}
