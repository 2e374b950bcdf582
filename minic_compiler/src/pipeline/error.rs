use crate::file_processor::FileProcessorError;
use crate::lexical::LexerError;
use crate::logging::{codes, Code};
use crate::pipeline::diagnostic::{Diagnostic, DiagnosticKind};
use crate::syntax::SyntaxError;
use crate::utils::Span;

/// The single diagnostic that stopped the pipeline
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Lexical analysis failed: {0}")]
    LexicalAnalysis(#[from] LexerError),

    #[error("Syntax analysis failed: {0}")]
    SyntaxAnalysis(#[from] SyntaxError),

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },
}

impl PipelineError {
    pub fn pipeline_error(message: &str) -> Self {
        Self::Pipeline {
            message: message.to_string(),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        match self {
            Self::FileProcessing(_) => DiagnosticKind::File,
            Self::LexicalAnalysis(_) => DiagnosticKind::Lexical,
            Self::SyntaxAnalysis(_) => DiagnosticKind::Syntax,
            Self::Pipeline { .. } => DiagnosticKind::Internal,
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::FileProcessing(e) => e.error_code(),
            Self::LexicalAnalysis(e) => e.error_code(),
            Self::SyntaxAnalysis(e) => e.error_code(),
            Self::Pipeline { .. } => codes::system::INTERNAL_ERROR,
        }
    }

    /// Process exit status for this failure
    pub fn exit_code(&self) -> i32 {
        self.kind().exit_code()
    }

    /// Source location of the failure, when it has one
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::LexicalAnalysis(e) => e.position().map(Span::single),
            Self::SyntaxAnalysis(e) => Some(e.span()),
            Self::FileProcessing(_) | Self::Pipeline { .. } => None,
        }
    }

    pub fn diagnostic(&self) -> Diagnostic {
        let code = self.error_code();
        match self {
            Self::FileProcessing(e) => Diagnostic::new(DiagnosticKind::File, e.to_string(), code),
            Self::LexicalAnalysis(e) => {
                let diagnostic = Diagnostic::new(DiagnosticKind::Lexical, e.to_string(), code);
                match e.position() {
                    Some(position) => diagnostic.at(position),
                    None => diagnostic,
                }
            }
            Self::SyntaxAnalysis(e) => {
                Diagnostic::new(DiagnosticKind::Syntax, e.to_string(), code).at(e.span().start)
            }
            Self::Pipeline { message } => {
                Diagnostic::new(DiagnosticKind::Internal, message.clone(), code)
            }
        }
    }
}
