//! Error collector for document processing with cargo-style output
//!
//! Events are grouped per document so a run over several documents reports
//! each one separately.

use super::events::LogEvent;
use crate::config::compile_time::logging::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

// ============================================================================
// DOCUMENT CONTEXT
// ============================================================================

/// Context information for the document being translated
#[derive(Debug, Clone)]
pub struct DocumentContext {
    pub document_path: PathBuf,
    pub document_id: usize,
    pub start_time: Instant,
}

impl DocumentContext {
    pub fn new(document_path: PathBuf, document_id: usize) -> Self {
        Self {
            document_path,
            document_id,
            start_time: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

// ============================================================================
// PROCESSING SUMMARY
// ============================================================================

/// Summary of processing results across documents
#[derive(Debug, Clone, Default)]
pub struct ProcessingSummary {
    pub total_documents: usize,
    pub successful_documents: usize,
    pub failed_documents: usize,
    pub documents_with_warnings: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
    pub total_processing_time: Duration,
    pub average_document_time: Duration,
}

impl ProcessingSummary {
    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.total_warnings > 0
    }
}

// ============================================================================
// ERROR COLLECTOR
// ============================================================================

/// Thread-safe error collector keyed by document path
pub struct ErrorCollector {
    document_events: Mutex<BTreeMap<PathBuf, Vec<LogEvent>>>,
    document_contexts: Mutex<BTreeMap<PathBuf, DocumentContext>>,
    processing_start: Instant,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self {
            document_events: Mutex::new(BTreeMap::new()),
            document_contexts: Mutex::new(BTreeMap::new()),
            processing_start: Instant::now(),
        }
    }

    /// Record an event for a specific document
    pub fn record_event(&self, document_path: &Path, event: LogEvent) {
        let mut events = lock(&self.document_events);
        let max_events = MAX_LOG_EVENTS_PER_DOCUMENT;

        let document_events = events.entry(document_path.to_path_buf()).or_default();

        if document_events.len() < max_events {
            document_events.push(event);
        } else if document_events.len() == max_events {
            document_events.push(LogEvent::warning(&format!(
                "Too many events for document (limit: {})",
                max_events
            )));
        }
    }

    /// Record document processing context
    pub fn record_document_context(&self, context: DocumentContext) {
        lock(&self.document_contexts).insert(context.document_path.clone(), context);
    }

    /// Get all events for a specific document
    pub fn get_document_events(&self, document_path: &Path) -> Vec<LogEvent> {
        lock(&self.document_events)
            .get(document_path)
            .cloned()
            .unwrap_or_default()
    }

    pub fn document_has_errors(&self, document_path: &Path) -> bool {
        lock(&self.document_events)
            .get(document_path)
            .map(|events| events.iter().any(|e| e.is_error()))
            .unwrap_or(false)
    }

    /// Get all document events (for cargo-style output)
    pub fn get_all_document_events(&self) -> BTreeMap<PathBuf, Vec<LogEvent>> {
        lock(&self.document_events).clone()
    }

    /// Get processing summary
    pub fn get_summary(&self) -> ProcessingSummary {
        let events = lock(&self.document_events);
        let contexts = lock(&self.document_contexts);

        let mut summary = ProcessingSummary {
            total_documents: events.len(),
            total_processing_time: self.processing_start.elapsed(),
            ..ProcessingSummary::default()
        };

        let mut total_document_time = Duration::new(0, 0);
        let mut timed_documents: u32 = 0;

        for (document_path, document_events) in events.iter() {
            let has_errors = document_events.iter().any(|e| e.is_error());
            let has_warnings = document_events.iter().any(|e| e.is_warning());

            if has_errors {
                summary.failed_documents += 1;
            } else if has_warnings {
                summary.documents_with_warnings += 1;
            } else {
                summary.successful_documents += 1;
            }

            summary.total_errors += document_events.iter().filter(|e| e.is_error()).count();
            summary.total_warnings += document_events.iter().filter(|e| e.is_warning()).count();

            if let Some(context) = contexts.get(document_path) {
                total_document_time += context.elapsed();
                timed_documents += 1;
            }
        }

        if timed_documents > 0 {
            summary.average_document_time = total_document_time / timed_documents;
        }

        summary
    }

    /// Get events at or above the given severity
    pub fn get_events_by_severity(&self, min_severity: &str) -> Vec<(PathBuf, LogEvent)> {
        let events = lock(&self.document_events);
        let mut filtered = Vec::new();

        for (path, document_events) in events.iter() {
            for event in document_events {
                let include = match (min_severity, event.severity()) {
                    ("Critical", "Critical") => true,
                    ("High", "Critical" | "High") => true,
                    ("Medium", "Critical" | "High" | "Medium") => true,
                    ("Low", _) => true,
                    _ => false,
                };

                if include {
                    filtered.push((path.clone(), event.clone()));
                }
            }
        }

        filtered
    }

    /// Clear all collected data
    pub fn clear(&self) {
        lock(&self.document_events).clear();
        lock(&self.document_contexts).clear();
    }

    /// Get total event count across all documents
    pub fn total_event_count(&self) -> usize {
        lock(&self.document_events).values().map(|v| v.len()).sum()
    }

    /// Get capacity information (current, max, fraction used)
    pub fn get_capacity_info(&self) -> (usize, usize, f64) {
        let current = self.total_event_count();
        let max = LOG_BUFFER_SIZE;
        let fraction = if max > 0 {
            current as f64 / max as f64
        } else {
            0.0
        };
        (current, max, fraction)
    }
}

impl Default for ErrorCollector {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// CARGO-STYLE FORMATTING
// ============================================================================

/// Format errors in cargo-style output
pub fn format_cargo_style_errors(collector: &ErrorCollector) -> String {
    let mut output = String::new();

    for (document_path, events) in &collector.get_all_document_events() {
        let reportable: Vec<_> = events
            .iter()
            .filter(|e| e.is_error() || e.is_warning())
            .collect();
        if reportable.is_empty() {
            continue;
        }

        output.push_str(&format!("Checking {}...\n", document_path.display()));

        for event in reportable {
            let location = event
                .position
                .as_ref()
                .map(|p| format!(" --> {}:{}:{}", document_path.display(), p.line, p.column))
                .unwrap_or_default();
            let label = if event.is_error() { "error" } else { "warning" };

            output.push_str(&format!(
                "{}[{}]: {}{}\n",
                label,
                event.code.as_str(),
                event.message,
                location
            ));

            if event.is_error() {
                output.push_str(&format!(
                    "  = severity: {}, category: {}\n",
                    event.severity(),
                    event.category()
                ));
            }

            let mut keys: Vec<_> = event
                .context
                .keys()
                .filter(|k| k.as_str() != "document" && k.as_str() != "document_id")
                .collect();
            keys.sort();
            for key in keys {
                output.push_str(&format!("  = {}: {}\n", key, event.context[key]));
            }

            if event.is_error() {
                let action = event.recommended_action();
                if action != "No specific action available" {
                    output.push_str(&format!("  = help: {}\n", action));
                }
            }
        }

        output.push('\n');
    }

    let summary = collector.get_summary();
    if summary.total_errors > 0 {
        output.push_str(&format!("\nTotal errors: {}\n", summary.total_errors));
    }
    if summary.total_warnings > 0 {
        output.push_str(&format!("Total warnings: {}\n", summary.total_warnings));
    }

    output
}
