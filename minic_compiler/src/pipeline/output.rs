use crate::pipeline::{Diagnostic, PipelineError, PipelineResult};
use serde::{Deserialize, Serialize};

/// Machine-readable outcome for one input, printed by `minic --json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub file: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub functions: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<Diagnostic>,
}

impl PipelineOutput {
    pub fn from_outcome(file: &str, outcome: &Result<PipelineResult, PipelineError>) -> Self {
        match outcome {
            Ok(result) => Self {
                file: file.to_string(),
                success: true,
                functions: Some(result.parse_summary.functions),
                tokens: Some(result.token_count),
                diagnostic: None,
            },
            Err(error) => Self {
                file: file.to_string(),
                success: false,
                functions: None,
                tokens: None,
                diagnostic: Some(error.diagnostic()),
            },
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
