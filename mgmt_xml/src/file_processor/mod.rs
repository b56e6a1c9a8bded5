//! Loading management documents from disk

mod processor;

use crate::config::runtime::DocumentPreferences;
use crate::log_debug;
pub use processor::{
    process_file, FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError,
};

/// Create a file processor from runtime preferences
pub fn create_processor_from_preferences(prefs: &DocumentPreferences) -> FileProcessor {
    FileProcessor::from_preferences(prefs)
}

/// Confirm every file processing code is registered (startup check)
pub fn init_file_processor_logging() -> Result<(), String> {
    use crate::config::compile_time::document::PERFORMANCE_LOG_BUFFER_SIZE;
    use crate::logging::codes;

    let registered = [
        codes::file_processing::FILE_NOT_FOUND,
        codes::file_processing::INVALID_EXTENSION,
        codes::file_processing::FILE_TOO_LARGE,
        codes::file_processing::EMPTY_FILE,
        codes::file_processing::PERMISSION_DENIED,
        codes::file_processing::INVALID_ENCODING,
        codes::file_processing::IO_ERROR,
        codes::file_processing::INVALID_PATH,
    ];

    for code in &registered {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "File processor error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    log_debug!("File processor compile-time configuration loaded",
        "max_document_size" => FileProcessor::max_document_size(),
        "perf_buffer_size" => PERFORMANCE_LOG_BUFFER_SIZE);
    Ok(())
}
