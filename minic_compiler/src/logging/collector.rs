//! Errors and warnings grouped by source file, printed after the run

use super::codes;
use super::events::{LogEvent, LogLevel};
use crate::config::compile_time::logging::{MAX_ERROR_COLLECTION, MAX_LOG_EVENTS_PER_FILE};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Default)]
struct FileLog {
    events: Vec<LogEvent>,
    dropped: usize,
}

impl FileLog {
    fn count(&self, level: LogLevel) -> usize {
        self.events.iter().filter(|e| e.level == level).count()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessingSummary {
    pub total_files: usize,
    pub failed_files: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
    pub elapsed: Duration,
}

impl ProcessingSummary {
    pub fn passed_files(&self) -> usize {
        self.total_files - self.failed_files
    }
}

pub struct ErrorCollector {
    files: Mutex<BTreeMap<PathBuf, FileLog>>,
    started: Instant,
}

impl Default for ErrorCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self {
            files: Mutex::new(BTreeMap::new()),
            started: Instant::now(),
        }
    }

    fn files(&self) -> MutexGuard<'_, BTreeMap<PathBuf, FileLog>> {
        self.files
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// A file with no events still counts as checked
    pub fn open_file(&self, path: &Path) {
        self.files().entry(path.to_path_buf()).or_default();
    }

    /// Keep `event` unless the per-file or global cap is reached
    pub fn record(&self, path: &Path, event: LogEvent) {
        let mut files = self.files();
        let kept: usize = files.values().map(|log| log.events.len()).sum();
        let log = files.entry(path.to_path_buf()).or_default();

        if kept >= MAX_ERROR_COLLECTION || log.events.len() >= MAX_LOG_EVENTS_PER_FILE {
            log.dropped += 1;
        } else {
            log.events.push(event);
        }
    }

    pub fn summary(&self) -> ProcessingSummary {
        let files = self.files();
        let mut summary = ProcessingSummary {
            total_files: files.len(),
            elapsed: self.started.elapsed(),
            ..ProcessingSummary::default()
        };

        for log in files.values() {
            let errors = log.count(LogLevel::Error);
            summary.total_errors += errors;
            summary.total_warnings += log.count(LogLevel::Warning);
            if errors > 0 {
                summary.failed_files += 1;
            }
        }
        summary
    }

    /// `error[E200]: ...` blocks per file, then a one-line tally
    pub fn render(&self) -> String {
        let mut out = String::new();

        for (path, log) in self.files().iter() {
            if log.events.is_empty() {
                continue;
            }

            let _ = writeln!(out, "Checking {}...", path.display());
            let errors = log.events.iter().filter(|e| e.level == LogLevel::Error);
            let warnings = log.events.iter().filter(|e| e.level == LogLevel::Warning);
            for event in errors.chain(warnings) {
                render_event(&mut out, path, event);
            }
            if log.dropped > 0 {
                let _ = writeln!(out, "  ... {} more not shown", log.dropped);
            }
            out.push('\n');
        }

        let summary = self.summary();
        let _ = write!(
            out,
            "Checked {} file(s): {} passed, {} failed",
            summary.total_files,
            summary.passed_files(),
            summary.failed_files
        );
        if summary.total_warnings > 0 {
            let _ = write!(out, ", {} warning(s)", summary.total_warnings);
        }
        let _ = writeln!(out, " in {:.2}s", summary.elapsed.as_secs_f64());
        out
    }
}

fn render_event(out: &mut String, path: &Path, event: &LogEvent) {
    let label = match event.level {
        LogLevel::Error => "error",
        _ => "warning",
    };
    let _ = writeln!(out, "{}[{}]: {}", label, event.code, event.message);

    if let Some(span) = &event.span {
        let _ = writeln!(
            out,
            "  --> {}:{}:{}",
            path.display(),
            span.start.line,
            span.start.column
        );
    }

    for (key, value) in event.context.iter().filter(|(key, _)| *key != "file") {
        let _ = writeln!(out, "  = {}: {}", key, value);
    }

    if event.level == LogLevel::Error {
        if let Some(metadata) = codes::get_error_metadata(event.code.as_str()) {
            let _ = writeln!(out, "  = help: {}", metadata.recommended_action);
        }
    }
}
