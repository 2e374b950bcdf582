//! Process-wide logging for the scanner, parser and CLI
//!
//! Events go through the `log_*!` macros. Until [`init_global_logging`]
//! runs there is no sink, so library callers and unit tests stay silent.
//! Errors and warnings raised inside [`with_file_context`] are also kept
//! per file for the closing cargo-style summary.

pub mod codes;
pub mod collector;
pub mod config;
pub mod events;
pub mod macros;
pub mod sinks;

use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::OnceLock;

pub use codes::Code;
pub use collector::{ErrorCollector, ProcessingSummary};
pub use events::{LogEvent, LogLevel};
pub use sinks::{ConsoleLogger, JsonLogger, Logger, LoggingService, MemoryLogger};

static SERVICE: OnceLock<LoggingService> = OnceLock::new();
static COLLECTOR: OnceLock<ErrorCollector> = OnceLock::new();

thread_local! {
    static CURRENT_FILE: RefCell<Option<PathBuf>> = const { RefCell::new(None) };
}

/// Create the sinks named by the runtime preferences
///
/// Call [`config::init_runtime_preferences`] first, otherwise the defaults
/// apply. A second call fails.
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config()?;

    SERVICE
        .set(LoggingService::from_preferences())
        .map_err(|_| "Global logger already initialized".to_string())?;
    let _ = COLLECTOR.set(ErrorCollector::new());

    crate::log_success!(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Logging initialized",
        "min_level" => config::get_min_log_level().as_str()
    );
    Ok(())
}

/// Whether `log_debug!` should bother rendering its context
pub fn debug_enabled() -> bool {
    SERVICE
        .get()
        .is_some_and(|service| service.accepts(LogLevel::Debug))
}

/// Run `f` with `file_path` as this thread's current file
pub fn with_file_context<F, R>(file_path: PathBuf, f: F) -> R
where
    F: FnOnce() -> R,
{
    if let Some(collector) = COLLECTOR.get() {
        collector.open_file(&file_path);
    }

    let previous = CURRENT_FILE.with(|current| current.replace(Some(file_path)));
    let result = f();
    CURRENT_FILE.with(|current| *current.borrow_mut() = previous);
    result
}

pub fn current_file() -> Option<PathBuf> {
    CURRENT_FILE.with(|current| current.borrow().clone())
}

/// Entry point for every macro
#[doc(hidden)]
pub fn emit(mut event: LogEvent, context: Vec<(&str, String)>) {
    for (key, value) in context {
        event = event.with_context(key, &value);
    }

    let file = current_file();
    if config::include_file_context() {
        if let Some(path) = &file {
            event = event.with_context("file", &path.display().to_string());
        }
    }

    if matches!(event.level, LogLevel::Error | LogLevel::Warning) {
        if let (Some(path), Some(collector)) = (&file, COLLECTOR.get()) {
            collector.record(path, event.clone());
        }
    }

    if let Some(service) = SERVICE.get() {
        service.log_event(event);
    }
}

pub fn get_processing_summary() -> ProcessingSummary {
    COLLECTOR
        .get()
        .map(ErrorCollector::summary)
        .unwrap_or_default()
}

/// Print the grouped diagnostics to stderr when cargo-style output is on
pub fn print_cargo_style_summary() {
    if !config::use_cargo_style_output() {
        return;
    }
    if let Some(collector) = COLLECTOR.get() {
        eprint!("{}", collector.render());
    }
}
