//! Document loading with compile-time size limits

use crate::config::compile_time::document::{
    LARGE_DOCUMENT_THRESHOLD, MAX_DOCUMENT_SIZE, MAX_LINE_COUNT,
};
use crate::config::runtime::DocumentPreferences;
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};
use std::fs;
use std::path::{Path, PathBuf};

/// Errors raised before a document reaches the translator
#[derive(Debug, Clone, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid file extension: expected .xml, found {extension:?}")]
    InvalidExtension { extension: Option<String> },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("File is empty")]
    EmptyFile,

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid UTF-8 encoding in file: {path}")]
    InvalidEncoding { path: String },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },

    #[error("Invalid file path: {path}")]
    InvalidPath { path: String },

    #[error("File exceeds maximum line count: {lines} (max: {max_lines})")]
    TooManyLines { lines: usize, max_lines: usize },
}

impl FileProcessorError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            FileProcessorError::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            FileProcessorError::InvalidExtension { .. } => {
                codes::file_processing::INVALID_EXTENSION
            }
            FileProcessorError::FileTooLarge { .. } | FileProcessorError::TooManyLines { .. } => {
                codes::file_processing::FILE_TOO_LARGE
            }
            FileProcessorError::EmptyFile => codes::file_processing::EMPTY_FILE,
            FileProcessorError::PermissionDenied { .. } => {
                codes::file_processing::PERMISSION_DENIED
            }
            FileProcessorError::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
            FileProcessorError::IoError { .. } => codes::file_processing::IO_ERROR,
            FileProcessorError::InvalidPath { .. } => codes::file_processing::INVALID_PATH,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }
}

/// What was learned about a document file before reading it
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Canonical file path
    pub path: PathBuf,
    pub size: u64,
    /// Lowercased extension, if any
    pub extension: Option<String>,
    /// Filled in once the content has been read
    pub line_count: usize,
    pub is_xml_file: bool,
    pub modified: Option<std::time::SystemTime>,
}

impl FileMetadata {
    pub fn human_readable_size(&self) -> String {
        human_readable(self.size)
    }

    pub fn is_large_document(&self) -> bool {
        self.size > LARGE_DOCUMENT_THRESHOLD
    }
}

fn human_readable(size: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut scaled = size as f64;
    let mut unit_index = 0;

    while scaled >= 1024.0 && unit_index < UNITS.len() - 1 {
        scaled /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", size, UNITS[0])
    } else {
        format!("{:.2} {}", scaled, UNITS[unit_index])
    }
}

/// Document source plus metadata
#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    pub source: String,
    pub metadata: FileMetadata,
    pub processing_duration: std::time::Duration,
}

impl FileProcessingResult {
    pub fn char_count(&self) -> usize {
        self.source.chars().count()
    }

    /// Only whitespace
    pub fn is_effectively_empty(&self) -> bool {
        self.source.trim().is_empty()
    }
}

/// Loads management documents from disk.
///
/// Size and line limits are compile-time constants; the fields here are
/// runtime preferences only.
#[derive(Debug, Clone)]
pub struct FileProcessor {
    pub require_xml_extension: bool,
    pub enable_performance_logging: bool,
}

impl FileProcessor {
    pub fn new() -> Self {
        Self {
            require_xml_extension: false,
            enable_performance_logging: true,
        }
    }

    pub fn from_preferences(prefs: &DocumentPreferences) -> Self {
        Self {
            require_xml_extension: prefs.require_xml_extension,
            enable_performance_logging: prefs.enable_performance_logging,
        }
    }

    pub fn with_xml_extension_required(mut self, required: bool) -> Self {
        self.require_xml_extension = required;
        self
    }

    pub fn max_document_size() -> u64 {
        MAX_DOCUMENT_SIZE
    }

    /// Read a document and collect its metadata
    pub fn process_file(
        &self,
        file_path: &str,
    ) -> Result<FileProcessingResult, FileProcessorError> {
        let start_time = std::time::Instant::now();

        log_debug!("Starting file processing", "file" => file_path);

        let path = self.validate_path(file_path)?;
        let mut metadata = self.get_metadata(&path)?;
        self.validate_file(&metadata, file_path)?;
        let source = self.read_file(&path, file_path)?;

        let line_count = source.lines().count();
        if line_count > MAX_LINE_COUNT {
            let error = FileProcessorError::TooManyLines {
                lines: line_count,
                max_lines: MAX_LINE_COUNT,
            };
            log_error!(error.error_code(), "Document exceeds maximum line count",
                "file" => file_path,
                "lines" => line_count,
                "max_lines" => MAX_LINE_COUNT);
            return Err(error);
        }
        metadata.line_count = line_count;

        let result = FileProcessingResult {
            source,
            metadata,
            processing_duration: start_time.elapsed(),
        };
        self.log_processing_success(&result, file_path);
        Ok(result)
    }

    fn log_processing_success(&self, result: &FileProcessingResult, file_path: &str) {
        let duration_str = format!("{:.2}", result.processing_duration.as_secs_f64() * 1000.0);

        if self.enable_performance_logging {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File processed successfully with performance metrics",
                "file" => file_path,
                "size_bytes" => result.metadata.size,
                "size_human" => result.metadata.human_readable_size(),
                "lines" => result.metadata.line_count,
                "chars" => result.char_count(),
                "duration_ms" => duration_str,
                "is_large_document" => result.metadata.is_large_document()
            );
        } else {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File processed successfully",
                "file" => file_path,
                "size_bytes" => result.metadata.size,
                "lines" => result.metadata.line_count
            );
        }
    }

    fn validate_path(&self, file_path: &str) -> Result<PathBuf, FileProcessorError> {
        if file_path.is_empty() {
            let error = FileProcessorError::InvalidPath {
                path: file_path.to_string(),
            };
            log_error!(error.error_code(), "Empty file path provided");
            return Err(error);
        }

        let path = Path::new(file_path);

        if !path.exists() {
            let error = FileProcessorError::FileNotFound {
                path: file_path.to_string(),
            };
            log_error!(error.error_code(), "File not found", "path" => file_path);
            return Err(error);
        }

        if !path.is_file() {
            let error = FileProcessorError::InvalidPath {
                path: file_path.to_string(),
            };
            log_error!(error.error_code(), "Path is not a file", "path" => file_path);
            return Err(error);
        }

        path.canonicalize().map_err(|e| {
            let error = FileProcessorError::IoError {
                message: format!("Failed to resolve path '{}': {}", file_path, e),
            };
            log_error!(error.error_code(), "Failed to canonicalize path",
                "path" => file_path,
                "io_error" => e);
            error
        })
    }

    fn get_metadata(&self, path: &Path) -> Result<FileMetadata, FileProcessorError> {
        let metadata = fs::metadata(path).map_err(|e| {
            let path_str = path.display().to_string();
            match e.kind() {
                std::io::ErrorKind::PermissionDenied => {
                    let error = FileProcessorError::PermissionDenied { path: path_str };
                    log_error!(error.error_code(), "Permission denied accessing file",
                        "path" => path.display());
                    error
                }
                _ => {
                    let error = FileProcessorError::IoError {
                        message: format!("Failed to read metadata for '{}': {}", path_str, e),
                    };
                    log_error!(error.error_code(), "Failed to read file metadata",
                        "path" => path.display(),
                        "io_error" => e);
                    error
                }
            }
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|s| s.to_lowercase());
        let is_xml_file = extension.as_deref() == Some("xml");

        let file_metadata = FileMetadata {
            path: path.to_path_buf(),
            size: metadata.len(),
            extension,
            line_count: 0,
            is_xml_file,
            modified: metadata.modified().ok(),
        };

        log_debug!("File metadata collected",
            "size_bytes" => file_metadata.size,
            "size_human" => file_metadata.human_readable_size(),
            "extension" => file_metadata.extension.as_deref().unwrap_or("none"),
            "is_large_document" => file_metadata.is_large_document());

        Ok(file_metadata)
    }

    fn validate_file(
        &self,
        metadata: &FileMetadata,
        file_path: &str,
    ) -> Result<(), FileProcessorError> {
        if metadata.size > MAX_DOCUMENT_SIZE {
            let error = FileProcessorError::FileTooLarge {
                size: metadata.size,
                max_size: MAX_DOCUMENT_SIZE,
            };
            log_error!(error.error_code(), "Document exceeds compile-time maximum size",
                "file" => file_path,
                "size_human" => metadata.human_readable_size(),
                "limit_human" => human_readable(MAX_DOCUMENT_SIZE));
            return Err(error);
        }

        if metadata.size == 0 {
            let error = FileProcessorError::EmptyFile;
            log_error!(error.error_code(), "File is empty", "file" => file_path);
            return Err(error);
        }

        if self.require_xml_extension && !metadata.is_xml_file {
            let error = FileProcessorError::InvalidExtension {
                extension: metadata.extension.clone(),
            };
            log_error!(error.error_code(), "File does not have required .xml extension",
                "file" => file_path,
                "extension" => metadata.extension.as_deref().unwrap_or("none"));
            return Err(error);
        }

        Ok(())
    }

    fn read_file(&self, path: &Path, file_path: &str) -> Result<String, FileProcessorError> {
        fs::read_to_string(path).map_err(|e| {
            let path_str = path.display().to_string();
            let error = match e.kind() {
                std::io::ErrorKind::PermissionDenied => {
                    FileProcessorError::PermissionDenied { path: path_str }
                }
                std::io::ErrorKind::InvalidData => {
                    FileProcessorError::InvalidEncoding { path: path_str }
                }
                _ => FileProcessorError::IoError {
                    message: format!("Failed to read file '{}': {}", path_str, e),
                },
            };
            log_error!(error.error_code(), "Failed to read document",
                "file" => file_path,
                "io_error" => e);
            error
        })
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a document with default preferences
pub fn process_file(file_path: &str) -> Result<FileProcessingResult, FileProcessorError> {
    FileProcessor::new().process_file(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    const DOCUMENT: &str = "<management xmlns=\"urn:jboss:domain:4.0\">\n</management>\n";

    #[test]
    fn test_process_valid_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("host.xml");
        fs::write(&file_path, DOCUMENT).unwrap();

        let result = FileProcessor::new()
            .process_file(file_path.to_str().unwrap())
            .unwrap();
        assert_eq!(result.metadata.line_count, 2);
        assert!(result.metadata.is_xml_file);
        assert_eq!(result.char_count(), DOCUMENT.chars().count());
        assert!(!result.is_effectively_empty());
    }

    #[test]
    fn test_file_not_found() {
        assert_matches!(
            FileProcessor::new().process_file("missing.xml"),
            Err(FileProcessorError::FileNotFound { .. })
        );
        assert_matches!(
            FileProcessor::new().process_file(""),
            Err(FileProcessorError::InvalidPath { .. })
        );
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = tempdir().unwrap();
        assert_matches!(
            FileProcessor::new().process_file(dir.path().to_str().unwrap()),
            Err(FileProcessorError::InvalidPath { .. })
        );
    }

    #[test]
    fn test_document_size_limit() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("large.xml");
        fs::write(&file_path, "a".repeat((MAX_DOCUMENT_SIZE + 1) as usize)).unwrap();

        assert_matches!(
            FileProcessor::new().process_file(file_path.to_str().unwrap()),
            Err(FileProcessorError::FileTooLarge { size, max_size }) => {
                assert!(size > MAX_DOCUMENT_SIZE);
                assert_eq!(max_size, MAX_DOCUMENT_SIZE);
            }
        );
    }

    #[test]
    fn test_extension_requirement() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("host.cfg");
        fs::write(&file_path, DOCUMENT).unwrap();
        let path = file_path.to_str().unwrap();

        assert!(FileProcessor::new().process_file(path).is_ok());
        assert_matches!(
            FileProcessor::new()
                .with_xml_extension_required(true)
                .process_file(path),
            Err(FileProcessorError::InvalidExtension { extension: Some(ext) }) if ext == "cfg"
        );
    }

    #[test]
    fn test_empty_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("empty.xml");
        fs::write(&file_path, "").unwrap();

        assert_matches!(
            process_file(file_path.to_str().unwrap()),
            Err(FileProcessorError::EmptyFile)
        );
    }

    #[test]
    fn test_invalid_encoding() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("latin1.xml");
        fs::write(&file_path, [0x3c, 0xff, 0xfe, 0x3e]).unwrap();

        assert_matches!(
            process_file(file_path.to_str().unwrap()),
            Err(FileProcessorError::InvalidEncoding { .. })
        );
    }

    #[test]
    fn test_error_metadata() {
        let error = FileProcessorError::FileNotFound {
            path: "host.xml".to_string(),
        };
        assert_eq!(error.error_code().as_str(), "E005");
        assert!(error.requires_halt());

        let lines = FileProcessorError::TooManyLines {
            lines: 10,
            max_lines: 5,
        };
        assert_eq!(lines.error_code(), codes::file_processing::FILE_TOO_LARGE);
    }

    #[test]
    fn test_human_readable_size() {
        assert_eq!(human_readable(512), "512 B");
        assert_eq!(human_readable(2048), "2.00 KB");
        assert_eq!(human_readable(3 * 1024 * 1024), "3.00 MB");
    }
}
