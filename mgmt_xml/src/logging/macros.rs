//! Logging macros
//!
//! Context values are any `Display` type, written as `"key" => value` pairs.
//! Every macro builds a [`LogEvent`](crate::logging::LogEvent) and hands it
//! to [`dispatch`](crate::logging::dispatch), so all of them are no-ops until
//! global logging is initialized.

#[doc(hidden)]
#[macro_export]
macro_rules! __log_with_context {
    ($event:expr $(, $key:expr => $value:expr)*) => {{
        #[allow(unused_mut)]
        let mut event = $event;
        $(
            event = event.with_context($key, &format!("{}", $value));
        )*
        $crate::logging::dispatch(event)
    }};
}

/// Log an error code, optionally at a document position
#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr, position = $position:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__log_with_context!(
            $crate::logging::LogEvent::error($code, $message).with_position($position)
            $(, $key => $value)*
        )
    };
    ($code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__log_with_context!(
            $crate::logging::LogEvent::error($code, $message)
            $(, $key => $value)*
        )
    };
}

#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__log_with_context!(
            $crate::logging::LogEvent::success($code, $message)
            $(, $key => $value)*
        )
    };
}

#[macro_export]
macro_rules! log_info {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__log_with_context!(
            $crate::logging::LogEvent::info($message)
            $(, $key => $value)*
        )
    };
}

#[macro_export]
macro_rules! log_warning {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__log_with_context!(
            $crate::logging::LogEvent::warning($message)
            $(, $key => $value)*
        )
    };
}

/// Debug events skip formatting entirely unless the level is enabled
#[macro_export]
macro_rules! log_debug {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        if $crate::logging::config::get_min_log_level() >= $crate::logging::LogLevel::Debug {
            $crate::__log_with_context!(
                $crate::logging::LogEvent::debug($message)
                $(, $key => $value)*
            )
        }
    };
}

/// Success event carrying the elapsed time as `duration_ms`
#[macro_export]
macro_rules! log_performance {
    ($code:expr, $message:expr, duration = $duration:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::log_success!($code, $message,
            "duration_ms" => format!("{:.2}", $duration.as_secs_f64() * 1000.0)
            $(, $key => $value)*
        )
    };
}
