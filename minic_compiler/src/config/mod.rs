//! Configuration for the MiniC compiler
//!
//! Limits are compile-time constants generated by `build.rs` from
//! `config/<profile>.toml`. User preferences are read at runtime from
//! `MINIC_*` environment variables (see [`runtime`]).

include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

pub use runtime::RuntimeConfig;

/// Build information and configuration metadata
pub mod build_info {
    /// Configuration profile selected when the crate was built
    pub fn profile() -> &'static str {
        option_env!("MINIC_BUILD_PROFILE").unwrap_or("development")
    }

    /// Configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("MINIC_CONFIG_DIR").unwrap_or("config")
    }

    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}

/// One-line summary of the active limits, printed by `minic --show-config`
pub fn limits_summary() -> String {
    use compile_time::{file_processing, lexical, syntax};

    format!(
        "profile={} max_file_size={} max_identifier_length={} max_token_count={} max_parse_depth={} max_expression_depth={}",
        build_info::profile(),
        file_processing::MAX_FILE_SIZE,
        lexical::MAX_IDENTIFIER_LENGTH,
        lexical::MAX_TOKEN_COUNT,
        syntax::MAX_PARSE_DEPTH,
        syntax::MAX_EXPRESSION_DEPTH,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_limits_are_positive() {
        assert!(compile_time::file_processing::MAX_FILE_SIZE > 0);
        assert!(compile_time::lexical::MAX_IDENTIFIER_LENGTH > 0);
        assert!(compile_time::syntax::MAX_PARSE_DEPTH > 0);
        assert!(
            compile_time::logging::MAX_LOG_EVENTS_PER_FILE
                <= compile_time::logging::LOG_BUFFER_SIZE
        );
    }

    #[test]
    fn test_limits_summary_mentions_profile() {
        let summary = limits_summary();
        assert!(summary.contains(build_info::profile()));
        assert!(summary.contains("max_parse_depth="));
    }
}
