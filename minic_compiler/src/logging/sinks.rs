//! Where log events end up

use super::config;
use super::events::{LogEvent, LogLevel};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Drops events above `min_level`, hands the rest to every sink
pub struct LoggingService {
    sinks: Vec<Arc<dyn Logger>>,
    min_level: LogLevel,
}

impl LoggingService {
    pub fn new(min_level: LogLevel) -> Self {
        Self {
            sinks: Vec::new(),
            min_level,
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn Logger>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Console output in text or JSON form, or nothing at all
    pub fn from_preferences() -> Self {
        let service = Self::new(config::get_min_log_level());

        match (
            config::use_console_logging(),
            config::use_structured_logging(),
        ) {
            (false, _) => service,
            (true, false) => service.with_sink(Arc::new(ConsoleLogger)),
            (true, true) => service.with_sink(Arc::new(JsonLogger)),
        }
    }

    pub fn accepts(&self, level: LogLevel) -> bool {
        level <= self.min_level && !self.sinks.is_empty()
    }

    pub fn log_event(&self, event: LogEvent) {
        if self.accepts(event.level) {
            for sink in &self.sinks {
                sink.log(&event);
            }
        }
    }
}

/// Errors on stderr, everything else on stdout
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, event: &LogEvent) {
        if event.level == LogLevel::Error {
            eprintln!("{}", event.format());
        } else {
            println!("{}", event.format());
        }
    }
}

/// One JSON object per line on stderr
pub struct JsonLogger;

impl Logger for JsonLogger {
    fn log(&self, event: &LogEvent) {
        match event.format_json() {
            Ok(json) => eprintln!("{}", json),
            Err(_) => eprintln!("{}", event.format()),
        }
    }
}

/// Keeps the most recent events in memory, bounded by the log buffer size
#[derive(Default)]
pub struct MemoryLogger {
    events: Mutex<VecDeque<LogEvent>>,
}

impl MemoryLogger {
    fn lock(&self) -> MutexGuard<'_, VecDeque<LogEvent>> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.lock().iter().cloned().collect()
    }

    pub fn codes(&self) -> Vec<&'static str> {
        self.lock().iter().map(|event| event.code.as_str()).collect()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, event: &LogEvent) {
        let mut events = self.lock();
        if events.len() >= config::get_error_buffer_size() {
            events.pop_front();
        }
        events.push_back(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_level_filter() {
        let memory = Arc::new(MemoryLogger::default());
        let service = LoggingService::new(LogLevel::Warning).with_sink(memory.clone());

        service.log_event(LogEvent::debug("entering block"));
        service.log_event(LogEvent::info("scanning"));
        service.log_event(LogEvent::warning("large file"));
        service.log_event(LogEvent::error(
            codes::lexical::UNTERMINATED_COMMENT,
            "Unclosed multi-line comment",
        ));

        assert_eq!(memory.codes(), vec!["W000", "E101"]);
    }

    #[test]
    fn test_every_sink_sees_the_event() {
        let first = Arc::new(MemoryLogger::default());
        let second = Arc::new(MemoryLogger::default());
        let service = LoggingService::new(LogLevel::Info)
            .with_sink(first.clone())
            .with_sink(second.clone());

        service.log_event(LogEvent::success(
            codes::success::SYNTAX_VALIDATION_PASSED,
            "Program is syntactically correct",
        ));

        assert_eq!(first.events().len(), 1);
        assert_eq!(second.codes(), vec!["I030"]);
    }

    #[test]
    fn test_no_sinks_accepts_nothing() {
        let service = LoggingService::new(LogLevel::Debug);
        assert!(!service.accepts(LogLevel::Error));
    }

    #[test]
    fn test_memory_logger_is_bounded() {
        let memory = MemoryLogger::default();
        let limit = config::get_error_buffer_size();
        for i in 0..limit + 3 {
            memory.log(&LogEvent::info(&format!("event {}", i)));
        }

        let events = memory.events();
        assert_eq!(events.len(), limit);
        assert_eq!(events[0].message, "event 3");
    }
}
