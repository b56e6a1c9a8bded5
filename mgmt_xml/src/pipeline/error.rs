use crate::file_processor::FileProcessorError;
use crate::logging::{codes, Code};
use crate::parsing::ParseError;
use crate::reader::ReaderError;

/// Pipeline processing errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Document is malformed: {0}")]
    Reader(#[from] ReaderError),

    #[error("Translation failed: {0}")]
    Translation(#[from] ParseError),

    #[error("Unsupported management namespace: {}", .namespace.as_deref().unwrap_or("none"))]
    UnsupportedNamespace { namespace: Option<String> },

    #[error("No management element found under root '{root}'")]
    MissingManagementElement { root: String },
}

impl PipelineError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::FileProcessing(e) => e.error_code(),
            Self::Reader(e) => e.error_code(),
            Self::Translation(e) => e.error_code(),
            Self::UnsupportedNamespace { .. } => codes::grammar::UNSUPPORTED_NAMESPACE,
            Self::MissingManagementElement { .. } => codes::grammar::MISSING_ROOT_ELEMENT,
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
}
