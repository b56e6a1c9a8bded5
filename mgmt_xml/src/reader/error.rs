//! Errors raised while tokenizing a management document

use crate::logging::{codes, Code};
use crate::utils::Position;

pub type ReaderResult<T> = Result<T, ReaderError>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ReaderError {
    #[error("Malformed document: {message} at {position}")]
    Malformed { message: String, position: Position },

    #[error("Unexpected content '{content}' at {position}")]
    UnexpectedContent { content: String, position: Position },

    #[error("Element nesting depth {depth} exceeds maximum {max} at {position}")]
    NestingTooDeep {
        depth: usize,
        max: usize,
        position: Position,
    },

    #[error("Element '{element}' has {count} attributes, maximum is {max} at {position}")]
    TooManyAttributes {
        element: String,
        count: usize,
        max: usize,
        position: Position,
    },

    #[error("Unexpected end of document inside '{element}' at {position}")]
    UnexpectedEndOfDocument { element: String, position: Position },
}

impl ReaderError {
    pub fn malformed(message: impl Into<String>, position: Position) -> Self {
        Self::Malformed {
            message: message.into(),
            position,
        }
    }

    pub fn unexpected_content(content: &str, position: Position) -> Self {
        // Keep diagnostics readable when a whole paragraph of text is misplaced
        let mut shown: String = content.chars().take(40).collect();
        if shown.len() < content.len() {
            shown.push_str("...");
        }
        Self::UnexpectedContent {
            content: shown,
            position,
        }
    }

    /// Get error code for global logging system
    pub fn error_code(&self) -> Code {
        match self {
            Self::Malformed { .. } => codes::reader::MALFORMED_DOCUMENT,
            Self::UnexpectedContent { .. } => codes::reader::UNEXPECTED_CONTENT,
            Self::NestingTooDeep { .. } => codes::reader::NESTING_TOO_DEEP,
            Self::TooManyAttributes { .. } => codes::reader::TOO_MANY_ATTRIBUTES,
            Self::UnexpectedEndOfDocument { .. } => codes::reader::UNEXPECTED_END_OF_DOCUMENT,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            Self::Malformed { position, .. }
            | Self::UnexpectedContent { position, .. }
            | Self::NestingTooDeep { position, .. }
            | Self::TooManyAttributes { position, .. }
            | Self::UnexpectedEndOfDocument { position, .. } => *position,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }
}
