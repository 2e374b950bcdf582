//! MiniC scanner and recursive-descent syntax checker
//!
//! Source text is scanned to completion into a [`tokens::TokenStream`], then
//! parsed against the MiniC grammar. The first lexical or syntax error ends
//! the run and is reported as a positioned [`pipeline::Diagnostic`].

pub mod config;
pub mod file_processor;
pub mod grammar;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod pipeline;
pub mod syntax;
pub mod tokens;
pub mod utils;

pub use lexical::{tokenize, LexerError};
pub use pipeline::{
    process_file, process_source, Diagnostic, DiagnosticKind, PipelineError, PipelineResult,
};
pub use syntax::{parse_tokens, MiniCParser, SyntaxError};

pub use pipeline::output::PipelineOutput;
