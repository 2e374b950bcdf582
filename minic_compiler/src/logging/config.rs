//! Logging switches
//!
//! Sizes are compiled in. Level and output format come from the
//! [`LoggingPreferences`] installed at startup, or their defaults.

use crate::config::compile_time::logging::{
    LOG_BUFFER_SIZE, MAX_ERROR_COLLECTION, MAX_LOG_EVENTS_PER_FILE, MAX_LOG_MESSAGE_LENGTH,
};
use crate::config::runtime::LoggingPreferences;
use crate::logging::events::LogLevel;
use std::sync::OnceLock;

static PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Must run before [`super::init_global_logging`] to have any effect
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    PREFERENCES
        .set(preferences)
        .map_err(|_| "Logging preferences already installed".to_string())
}

fn preferences() -> &'static LoggingPreferences {
    PREFERENCES.get_or_init(LoggingPreferences::default)
}

pub fn get_min_log_level() -> LogLevel {
    preferences().min_log_level
}

pub fn use_structured_logging() -> bool {
    preferences().use_structured_logging
}

pub fn use_console_logging() -> bool {
    preferences().enable_console_logging
}

pub fn use_cargo_style_output() -> bool {
    preferences().enable_cargo_style_output
}

pub fn include_file_context() -> bool {
    preferences().include_file_context
}

pub fn get_error_buffer_size() -> usize {
    LOG_BUFFER_SIZE
}

/// Reject limit combinations a custom build profile could introduce
pub fn validate_config() -> Result<(), String> {
    let problem = if LOG_BUFFER_SIZE == 0 {
        Some("log_buffer_size must be positive".to_string())
    } else if MAX_LOG_EVENTS_PER_FILE > LOG_BUFFER_SIZE {
        Some("max_log_events_per_file exceeds log_buffer_size".to_string())
    } else if MAX_ERROR_COLLECTION == 0 {
        Some("max_error_collection must be positive".to_string())
    } else if MAX_LOG_MESSAGE_LENGTH < 80 {
        Some(format!(
            "max_log_message_length too small: {}",
            MAX_LOG_MESSAGE_LENGTH
        ))
    } else {
        None
    };

    match problem {
        Some(problem) => Err(format!("Invalid logging limits: {}", problem)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipped_limits_are_valid() {
        assert_eq!(validate_config(), Ok(()));
    }

    #[test]
    fn test_preferences_fall_back_to_defaults() {
        let defaults = LoggingPreferences::default();
        assert_eq!(use_cargo_style_output(), defaults.enable_cargo_style_output);
        assert_eq!(include_file_context(), defaults.include_file_context);
    }
}
