use crate::file_processor::FileMetadata;
use crate::lexical::LexicalMetrics;
use crate::syntax::ParseSummary;
use std::time::Duration;

/// Everything learned from a source that scanned and parsed cleanly
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// `None` when the source did not come from a file
    pub file_metadata: Option<FileMetadata>,
    pub lexical_metrics: LexicalMetrics,
    pub parse_summary: ParseSummary,
    pub token_count: usize,
    pub line_count: usize,
    pub lexing_duration: Duration,
    pub parsing_duration: Duration,
    pub processing_duration: Duration,
}

impl PipelineResult {
    pub fn log_success(&self, origin: &str) {
        crate::log_success!(
            crate::logging::codes::success::PIPELINE_COMPLETE,
            "Code is syntactically correct",
            "source" => origin,
            "functions" => self.parse_summary.functions,
            "tokens" => self.token_count,
            "lines" => self.line_count,
            "lexing_ms" => format!("{:.3}", self.lexing_duration.as_secs_f64() * 1000.0),
            "parsing_ms" => format!("{:.3}", self.parsing_duration.as_secs_f64() * 1000.0),
            "duration_ms" => format!("{:.3}", self.processing_duration.as_secs_f64() * 1000.0)
        );
    }
}
