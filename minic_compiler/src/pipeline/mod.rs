//! Scan then parse, in two strict phases
//!
//! Scanning finishes before the parser sees a single token. Either stage's
//! first error ends the run and comes back as a [`PipelineError`].

mod diagnostic;
mod error;
pub mod output;
mod result;
mod validation;

pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use error::PipelineError;
pub use output::PipelineOutput;
pub use result::PipelineResult;
pub use validation::validate_pipeline;

use crate::config::runtime::RuntimeConfig;
use crate::file_processor::{FileMetadata, FileProcessor};
use crate::lexical::LexicalAnalyzer;
use crate::logging;
use crate::syntax::MiniCParser;
use std::path::Path;
use std::time::Instant;

/// Check source text with preferences from the environment
pub fn process_source(source: &str) -> Result<PipelineResult, PipelineError> {
    process_source_with_config(source, &RuntimeConfig::from_env())
}

pub fn process_source_with_config(
    source: &str,
    config: &RuntimeConfig,
) -> Result<PipelineResult, PipelineError> {
    let result = run_stages(source, config, None)?;
    result.log_success("<source>");
    Ok(result)
}

/// Read, scan and parse one file
pub fn process_file(file_path: impl AsRef<Path>) -> Result<PipelineResult, PipelineError> {
    process_file_with_config(file_path, &RuntimeConfig::from_env())
}

pub fn process_file_with_config(
    file_path: impl AsRef<Path>,
    config: &RuntimeConfig,
) -> Result<PipelineResult, PipelineError> {
    let path = file_path.as_ref();

    logging::with_file_context(path.to_path_buf(), || {
        crate::log_info!("Starting MiniC pipeline", "file" => path.display());

        let file_result = FileProcessor::from_preferences(&config.file_processor).process_file(path)?;
        let result = run_stages(&file_result.source, config, Some(file_result.metadata))?;

        result.log_success(&path.display().to_string());
        Ok(result)
    })
}

fn run_stages(
    source: &str,
    config: &RuntimeConfig,
    file_metadata: Option<FileMetadata>,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();

    // Stage 1: lexical analysis, to completion
    let mut analyzer = LexicalAnalyzer::with_preferences(source, config.lexical.clone());
    let tokens = analyzer.tokenize()?;
    let lexing_duration = start_time.elapsed();
    let lexical_metrics = analyzer.metrics().clone();
    let token_count = tokens.len();

    // Stage 2: syntax analysis over the finished stream
    let parse_start = Instant::now();
    let parse_summary = MiniCParser::new(tokens)
        .with_preferences(config.syntax.clone())
        .parse()?;
    let parsing_duration = parse_start.elapsed();

    Ok(PipelineResult {
        file_metadata,
        line_count: source.lines().count(),
        lexical_metrics,
        parse_summary,
        token_count,
        lexing_duration,
        parsing_duration,
        processing_duration: start_time.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::runtime::SyntaxPreferences;
    use crate::lexical::LexerError;
    use crate::syntax::SyntaxError;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    fn quiet_config() -> RuntimeConfig {
        let mut config = RuntimeConfig::default();
        config.syntax = SyntaxPreferences {
            echo_consumed_tokens: false,
            trace_productions: false,
        };
        config
    }

    fn check(source: &str) -> Result<PipelineResult, PipelineError> {
        process_source_with_config(source, &quiet_config())
    }

    #[test]
    fn test_accepts_program() {
        let result = check("int main(){\n  int x = 1 + 2 * 3;\n  return 0;\n}\n").unwrap();
        assert_eq!(result.parse_summary.functions, 1);
        assert_eq!(result.token_count, 18);
        assert_eq!(result.line_count, 4);
        assert!(result.file_metadata.is_none());
    }

    #[test]
    fn test_unterminated_comment_is_lexical() {
        let error = check("int main(){ /* return 1; }").unwrap_err();
        assert_matches!(
            error,
            PipelineError::LexicalAnalysis(LexerError::UnterminatedComment { .. })
        );
        assert_eq!(error.exit_code(), 2);

        let diagnostic = error.diagnostic();
        assert_eq!(diagnostic.kind, DiagnosticKind::Lexical);
        assert_eq!(
            diagnostic.headline(),
            "Lexical Error: Line 1, Column 13: Unclosed multi-line comment"
        );
    }

    #[test]
    fn test_lexical_error_stops_before_parsing() {
        // The stray `}` would be a syntax error, but scanning fails first
        let error = check("} int main(){ x = 1 $ 2; }").unwrap_err();
        assert_matches!(
            error,
            PipelineError::LexicalAnalysis(LexerError::InvalidCharacter { character: '$', .. })
        );
    }

    #[test]
    fn test_syntax_diagnostic() {
        let error = check("int main(){ return x; }").unwrap_err();
        assert_matches!(error, PipelineError::SyntaxAnalysis(SyntaxError::UnexpectedToken { .. }));
        assert_eq!(error.exit_code(), 1);
        assert_eq!(
            error.diagnostic().headline(),
            "Syntax Error: Line 1, Column 20: Expected Number, got 'x'"
        );
    }

    #[test]
    fn test_end_of_file_diagnostic_has_position() {
        let error = check("int main(){\n  int x = 1;\n").unwrap_err();
        let diagnostic = error.diagnostic();
        assert_eq!(diagnostic.message, "Expected }, but reached end of file");
        assert!(diagnostic.line.is_some());
        assert!(diagnostic.column.is_some());
    }

    #[test]
    fn test_process_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("input.txt");
        fs::write(&path, "void main(){ for(int i=0;i<5;i++){ i += 2; } }").unwrap();

        let result = process_file_with_config(&path, &quiet_config()).unwrap();
        let metadata = result.file_metadata.unwrap();
        assert_eq!(metadata.path, path);
        assert_eq!(metadata.line_count, 1);
    }

    #[test]
    fn test_missing_file_is_file_error() {
        let dir = tempdir().unwrap();
        let error = process_file_with_config(dir.path().join("input.txt"), &quiet_config())
            .unwrap_err();

        assert_eq!(error.kind(), DiagnosticKind::File);
        assert_eq!(error.exit_code(), 3);
        assert!(error.diagnostic().line.is_none());
        assert!(error.diagnostic().headline().starts_with("File Error: File not found"));
    }

    #[test]
    fn test_output_json() {
        let outcome = check("int main(){}");
        let output = PipelineOutput::from_outcome("inline", &outcome);
        assert!(output.success);
        assert_eq!(output.functions, Some(1));

        let outcome = check("int main(){");
        let output = PipelineOutput::from_outcome("inline", &outcome);
        let json: serde_json::Value = serde_json::from_str(&output.to_json().unwrap()).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["diagnostic"]["kind"], "Syntax");
    }

    #[test]
    fn test_internal_error() {
        let error = PipelineError::pipeline_error("token stream handed over twice");
        assert_eq!(error.exit_code(), 4);
        assert_eq!(error.diagnostic().headline(), "Internal Error: token stream handed over twice");
    }

    #[test]
    fn test_validate_pipeline() {
        assert!(validate_pipeline().is_ok());
    }
}
