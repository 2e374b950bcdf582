//! `log_*!` macros
//!
//! Context is written as `"key" => value` pairs after the message. Values
//! only need `Display` and are formatted at the call site.

/// Render `"key" => value` pairs into owned strings
#[doc(hidden)]
#[macro_export]
macro_rules! __log_context {
    ($($key:expr => $value:expr),*) => {
        ::std::vec![$(($key, ::std::format!("{}", $value))),*]
    };
}

/// Error event; `span = ...` attaches a source location
#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr, span = $span:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::logging::emit(
            $crate::logging::LogEvent::error($code, $message).with_span($span),
            $crate::__log_context!($($key => $value),*),
        )
    };

    ($code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::logging::emit(
            $crate::logging::LogEvent::error($code, $message),
            $crate::__log_context!($($key => $value),*),
        )
    };
}

#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::logging::emit(
            $crate::logging::LogEvent::success($code, $message),
            $crate::__log_context!($($key => $value),*),
        )
    };
}

#[macro_export]
macro_rules! log_info {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::logging::emit(
            $crate::logging::LogEvent::info($message),
            $crate::__log_context!($($key => $value),*),
        )
    };
}

/// Warnings are also kept for the per-file summary
#[macro_export]
macro_rules! log_warning {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::logging::emit(
            $crate::logging::LogEvent::warning($message),
            $crate::__log_context!($($key => $value),*),
        )
    };
}

/// Context is not even formatted unless debug output is on
#[macro_export]
macro_rules! log_debug {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        if $crate::logging::debug_enabled() {
            $crate::logging::emit(
                $crate::logging::LogEvent::debug($message),
                $crate::__log_context!($($key => $value),*),
            )
        }
    };
}

/// Success event with the elapsed time of `$start` attached as `duration_ms`
#[macro_export]
macro_rules! log_timed {
    ($code:expr, $message:expr, start = $start:expr) => {
        $crate::log_success!($code, $message,
            "duration_ms" => format!("{:.3}", $start.elapsed().as_secs_f64() * 1000.0)
        )
    };

    ($code:expr, $message:expr, start = $start:expr, $($key:expr => $value:expr),+ $(,)?) => {
        $crate::log_success!($code, $message,
            "duration_ms" => format!("{:.3}", $start.elapsed().as_secs_f64() * 1000.0),
            $($key => $value),+
        )
    };
}
