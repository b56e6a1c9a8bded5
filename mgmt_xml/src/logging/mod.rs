//! Global logging module for the management translator
//!
//! Provides thread-safe global logging with document-aware error collection,
//! cargo-style error reporting, and a small macro interface.

pub mod codes;
pub mod collector;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use collector::{DocumentContext, ErrorCollector, ProcessingSummary};
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();
static GLOBAL_ERROR_COLLECTOR: OnceLock<Arc<ErrorCollector>> = OnceLock::new();

thread_local! {
    static DOCUMENT_CONTEXT: RefCell<Option<DocumentContext>> = const { RefCell::new(None) };
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging system
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;

    let logging_service = Arc::new(service::create_configured_service());
    init_global_logging_with_service(logging_service.clone())?;

    for code in ["ERR001", "E005", "E020", "E040", "E060", "E080"] {
        if codes::get_description(code) == "Unknown error" {
            return Err(format!("Missing metadata for error code: {}", code));
        }
    }

    logging_service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));

    Ok(())
}

/// Initialize with a caller-supplied service
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized")?;

    GLOBAL_ERROR_COLLECTOR
        .set(Arc::new(ErrorCollector::new()))
        .map_err(|_| "Global error collector already initialized")?;

    Ok(())
}

/// Check if global logging is initialized
pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some() && GLOBAL_ERROR_COLLECTOR.get().is_some()
}

// ============================================================================
// GLOBAL ACCESS
// ============================================================================

/// Safe access to global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

/// Safe access to global error collector
pub fn try_get_global_error_collector() -> Option<&'static ErrorCollector> {
    GLOBAL_ERROR_COLLECTOR
        .get()
        .map(|collector| collector.as_ref())
}

// ============================================================================
// DOCUMENT CONTEXT MANAGEMENT
// ============================================================================

/// Set document context for current thread
pub fn set_document_context(document_path: PathBuf, document_id: usize) {
    let context = DocumentContext::new(document_path, document_id);

    if let Some(collector) = try_get_global_error_collector() {
        collector.record_document_context(context.clone());
    }

    DOCUMENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = Some(context);
    });
}

/// Clear document context for current thread
pub fn clear_document_context() {
    DOCUMENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = None;
    });
}

/// Execute function with document context
pub fn with_document_context<F, R>(document_path: PathBuf, document_id: usize, f: F) -> R
where
    F: FnOnce() -> R,
{
    set_document_context(document_path, document_id);
    let result = f();
    clear_document_context();
    result
}

/// Get current document context (used by macros)
pub fn get_current_document_context() -> Option<DocumentContext> {
    DOCUMENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

fn attach_document_context(mut event: LogEvent) -> LogEvent {
    if !config::include_document_context() {
        return event;
    }
    if let Some(document_ctx) = get_current_document_context() {
        event = event.with_context("document", &document_ctx.document_path.display().to_string());
        event = event.with_context("document_id", &document_ctx.document_id.to_string());
    }
    event
}

// ============================================================================
// DISPATCH
// ============================================================================

/// Send an event to the global service, recording errors and warnings
/// against the current document. Does nothing before initialization.
pub fn dispatch(event: LogEvent) {
    let event = attach_document_context(event);
    let record = event.is_error() || event.is_warning();

    if let Some(logger) = try_get_global_logger() {
        logger.log_event(event.clone());
    }

    if record {
        if let (Some(document_ctx), Some(collector)) =
            (get_current_document_context(), try_get_global_error_collector())
        {
            collector.record_event(&document_ctx.document_path, event);
        }
    }
}

// ============================================================================
// SUMMARY
// ============================================================================

/// Render collected errors in cargo style
pub fn cargo_style_summary() -> Option<String> {
    try_get_global_error_collector().map(collector::format_cargo_style_errors)
}
