//! Log sinks and the level-filtering service
//!
//! Standard output belongs to the command list, so every built-in sink that
//! prints writes to standard error.

use super::codes::Code;
use super::config;
use super::events::{LogEvent, LogLevel};
use std::sync::{Arc, Mutex, MutexGuard};

/// Destination for translator events
pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Drops events below its minimum level and forwards the rest
pub struct LoggingService {
    logger: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    pub fn new(logger: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self { logger, min_level }
    }

    /// Pick the sink from the runtime logging preferences
    pub fn from_preferences() -> Self {
        let min_level = config::get_min_log_level();
        let logger: Arc<dyn Logger> = if !config::use_console_logging() {
            Arc::new(MemoryLogger::new())
        } else if config::use_structured_logging() {
            Arc::new(StructuredLogger)
        } else {
            Arc::new(ConsoleLogger)
        };
        Self::new(logger, min_level)
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    pub fn log_event(&self, event: LogEvent) {
        if self.enabled(event.level) {
            self.logger.log(&event);
        }
    }
}

/// One text line per event on stderr
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, event: &LogEvent) {
        eprintln!("{}", event.format());
    }
}

/// One JSON object per event on stderr
pub struct StructuredLogger;

impl Logger for StructuredLogger {
    fn log(&self, event: &LogEvent) {
        let line = event.format_json().unwrap_or_else(|_| event.format());
        eprintln!("{}", line);
    }
}

/// Keeps the most recent events in memory, bounded by the error buffer size
#[derive(Default)]
pub struct MemoryLogger {
    events: Mutex<Vec<LogEvent>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogEvent>> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.lock().clone()
    }

    /// Codes of every recorded event, oldest first
    pub fn codes(&self) -> Vec<Code> {
        self.lock().iter().map(|e| e.code).collect()
    }

    pub fn has_code(&self, code: Code) -> bool {
        self.lock().iter().any(|e| e.code == code)
    }

    pub fn errors(&self) -> Vec<LogEvent> {
        self.lock().iter().filter(|e| e.is_error()).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl Logger for MemoryLogger {
    fn log(&self, event: &LogEvent) {
        let mut events = self.lock();
        let capacity = config::get_error_buffer_size().max(1);
        if events.len() >= capacity {
            let excess = events.len() + 1 - capacity;
            events.drain(..excess);
        }
        events.push(event.clone());
    }
}

pub fn create_configured_service() -> LoggingService {
    LoggingService::from_preferences()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;
    use crate::utils::Position;

    #[test]
    fn test_memory_logger_records_translator_codes() {
        let logger = MemoryLogger::new();
        logger.log(&LogEvent::success(codes::success::SECURITY_REALM_TRANSLATED, "realm R"));
        logger.log(
            &LogEvent::error(codes::required::MISSING_REQUIRED_ATTRIBUTE, "Missing name")
                .with_position(Position::new(42, 3, 7)),
        );

        assert_eq!(logger.len(), 2);
        assert_eq!(
            logger.codes(),
            vec![codes::success::SECURITY_REALM_TRANSLATED, codes::required::MISSING_REQUIRED_ATTRIBUTE]
        );
        let errors = logger.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].category(), "Required");

        logger.clear();
        assert!(logger.is_empty());
    }

    #[test]
    fn test_service_filters_by_level() {
        let logger = Arc::new(MemoryLogger::new());
        let service = LoggingService::new(logger.clone(), LogLevel::Error);

        service.log_event(LogEvent::debug("reading attributes"));
        service.log_event(LogEvent::success(codes::success::MANAGEMENT_TRANSLATED, "done"));
        service.log_event(LogEvent::error(codes::system::INTERNAL_ERROR, "boom"));

        assert_eq!(logger.codes(), vec![codes::system::INTERNAL_ERROR]);
        assert!(!service.enabled(LogLevel::Info));
    }

    #[test]
    fn test_service_at_debug_passes_success_events() {
        let logger = Arc::new(MemoryLogger::new());
        let service = LoggingService::new(logger.clone(), LogLevel::Debug);

        service.log_event(LogEvent::success(codes::success::PIPELINE_COMPLETE, "Done"));

        assert!(logger.has_code(codes::success::PIPELINE_COMPLETE));
    }

    #[test]
    fn test_printing_sinks_accept_events() {
        let event = LogEvent::error(codes::grammar::UNEXPECTED_ATTRIBUTE, "bogus attribute")
            .with_context("attribute", "bogus");
        ConsoleLogger.log(&event);
        StructuredLogger.log(&event);
    }
}
