//! Translation errors with global logging integration
//!
//! Every variant names the offending construct and, where a set of names is
//! involved, the complete set, so a configuration can be fixed in one pass.

use crate::logging::{codes, Code};
use crate::model::CapacityError;
use crate::reader::ReaderError;
use crate::utils::Position;

pub type ParseResult<T> = Result<T, ParseError>;

/// Failure category a [`ParseError`] belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An element, attribute or namespace not legal at this position
    UnexpectedConstruct,
    /// Required attributes, elements or a required choice are absent
    MissingRequired,
    /// A singleton or exclusive alternative occurred twice
    DuplicateOrExclusive,
    /// A value failed its type or enumeration constraint
    InvalidValue,
    /// The requested direction is not implemented
    Unsupported,
    /// The document itself could not be tokenized
    Malformed,
    /// A compile-time resource limit was reached
    LimitExceeded,
}

const COMMAND_LIST: &str = "Command list";

fn join(names: &[String]) -> String {
    names.join(", ")
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ParseError {
    #[error("Unexpected element '{element}' at {position}")]
    UnexpectedElement { element: String, position: Position },

    #[error("Unexpected attribute '{attribute}' on '{element}' at {position}")]
    UnexpectedAttribute {
        attribute: String,
        element: String,
        position: Position,
    },

    #[error("Element '{element}' is in namespace '{found}', expected '{expected}' at {position}")]
    UnexpectedNamespace {
        element: String,
        found: String,
        expected: String,
        position: Position,
    },

    #[error("Unexpected content '{content}' at {position}")]
    UnexpectedContent { content: String, position: Position },

    #[error("Missing required attribute(s) {} on '{element}' at {position}", join(.attributes))]
    MissingRequiredAttributes {
        element: String,
        attributes: Vec<String>,
        position: Position,
    },

    #[error("Missing required element(s) {} at {position}", join(.elements))]
    MissingRequiredElement {
        elements: Vec<String>,
        position: Position,
    },

    #[error("Missing one of {} at {position}", join(.alternatives))]
    MissingOneOf {
        alternatives: Vec<String>,
        position: Position,
    },

    #[error("Duplicate element '{element}' at {position}")]
    DuplicateElement { element: String, position: Position },

    #[error("Duplicate {element} name '{name}' at {position}")]
    DuplicateName {
        element: String,
        name: String,
        position: Position,
    },

    #[error("Element '{element}' conflicts with an earlier element; only one of {} is allowed at {position}", join(.alternatives))]
    ExclusiveViolation {
        element: String,
        alternatives: Vec<String>,
        position: Position,
    },

    #[error("Invalid value '{value}' for attribute '{attribute}': {reason} at {position}")]
    InvalidAttributeValue {
        attribute: String,
        value: String,
        reason: String,
        allowed: Vec<String>,
        position: Position,
    },

    #[error("Unsupported operation: {operation}")]
    Unsupported { operation: String },

    #[error("{what} limit of {max} exceeded")]
    LimitExceeded { what: String, max: usize },

    #[error(transparent)]
    Reader(ReaderError),
}

impl From<ReaderError> for ParseError {
    fn from(error: ReaderError) -> Self {
        match error {
            ReaderError::UnexpectedContent { content, position } => {
                Self::UnexpectedContent { content, position }
            }
            other => Self::Reader(other),
        }
    }
}

impl From<CapacityError> for ParseError {
    fn from(error: CapacityError) -> Self {
        Self::LimitExceeded {
            what: COMMAND_LIST.to_string(),
            max: error.max,
        }
    }
}

impl ParseError {
    pub fn unexpected_element(element: &str, position: Position) -> Self {
        Self::UnexpectedElement {
            element: element.to_string(),
            position,
        }
    }

    pub fn unexpected_attribute(attribute: &str, element: &str, position: Position) -> Self {
        Self::UnexpectedAttribute {
            attribute: attribute.to_string(),
            element: element.to_string(),
            position,
        }
    }

    pub fn missing_required_element(elements: &[&str], position: Position) -> Self {
        Self::MissingRequiredElement {
            elements: elements.iter().map(|e| e.to_string()).collect(),
            position,
        }
    }

    pub fn missing_one_of(alternatives: &[&str], position: Position) -> Self {
        Self::MissingOneOf {
            alternatives: alternatives.iter().map(|e| e.to_string()).collect(),
            position,
        }
    }

    pub fn duplicate_element(element: &str, position: Position) -> Self {
        Self::DuplicateElement {
            element: element.to_string(),
            position,
        }
    }

    pub fn duplicate_name(element: &str, name: &str, position: Position) -> Self {
        Self::DuplicateName {
            element: element.to_string(),
            name: name.to_string(),
            position,
        }
    }

    pub fn exclusive_violation(element: &str, alternatives: &[&str], position: Position) -> Self {
        Self::ExclusiveViolation {
            element: element.to_string(),
            alternatives: alternatives.iter().map(|e| e.to_string()).collect(),
            position,
        }
    }

    pub fn unsupported(operation: &str) -> Self {
        Self::Unsupported {
            operation: operation.to_string(),
        }
    }

    /// Taxonomy bucket of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnexpectedElement { .. }
            | Self::UnexpectedAttribute { .. }
            | Self::UnexpectedNamespace { .. }
            | Self::UnexpectedContent { .. } => ErrorKind::UnexpectedConstruct,
            Self::MissingRequiredAttributes { .. }
            | Self::MissingRequiredElement { .. }
            | Self::MissingOneOf { .. } => ErrorKind::MissingRequired,
            Self::DuplicateElement { .. }
            | Self::DuplicateName { .. }
            | Self::ExclusiveViolation { .. } => ErrorKind::DuplicateOrExclusive,
            Self::InvalidAttributeValue { .. } => ErrorKind::InvalidValue,
            Self::Unsupported { .. } => ErrorKind::Unsupported,
            Self::LimitExceeded { .. } => ErrorKind::LimitExceeded,
            Self::Reader(ReaderError::NestingTooDeep { .. })
            | Self::Reader(ReaderError::TooManyAttributes { .. }) => ErrorKind::LimitExceeded,
            Self::Reader(_) => ErrorKind::Malformed,
        }
    }

    /// Get error code for global logging system
    pub fn error_code(&self) -> Code {
        match self {
            Self::UnexpectedElement { .. } => codes::grammar::UNEXPECTED_ELEMENT,
            Self::UnexpectedAttribute { .. } => codes::grammar::UNEXPECTED_ATTRIBUTE,
            Self::UnexpectedNamespace { .. } => codes::grammar::UNEXPECTED_NAMESPACE,
            Self::UnexpectedContent { .. } => codes::reader::UNEXPECTED_CONTENT,
            Self::MissingRequiredAttributes { .. } => codes::required::MISSING_REQUIRED_ATTRIBUTE,
            Self::MissingRequiredElement { .. } => codes::required::MISSING_REQUIRED_ELEMENT,
            Self::MissingOneOf { .. } => codes::required::MISSING_ONE_OF,
            Self::DuplicateElement { .. } => codes::cardinality::DUPLICATE_ELEMENT,
            Self::DuplicateName { .. } => codes::cardinality::DUPLICATE_NAME,
            Self::ExclusiveViolation { .. } => codes::cardinality::EXCLUSIVE_VIOLATION,
            Self::InvalidAttributeValue { .. } => codes::value::INVALID_ATTRIBUTE_VALUE,
            Self::Unsupported { .. } => codes::unsupported::UNSUPPORTED_OPERATION,
            Self::LimitExceeded { what, .. } if what == COMMAND_LIST => {
                codes::limits::OPERATION_LIMIT_EXCEEDED
            }
            Self::LimitExceeded { .. } => codes::limits::LIST_LIMIT_EXCEEDED,
            Self::Reader(error) => error.error_code(),
        }
    }

    /// Document location, when the error is tied to one
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::UnexpectedElement { position, .. }
            | Self::UnexpectedAttribute { position, .. }
            | Self::UnexpectedNamespace { position, .. }
            | Self::UnexpectedContent { position, .. }
            | Self::MissingRequiredAttributes { position, .. }
            | Self::MissingRequiredElement { position, .. }
            | Self::MissingOneOf { position, .. }
            | Self::DuplicateElement { position, .. }
            | Self::DuplicateName { position, .. }
            | Self::ExclusiveViolation { position, .. }
            | Self::InvalidAttributeValue { position, .. } => Some(*position),
            Self::Reader(error) => Some(error.position()),
            Self::Unsupported { .. } | Self::LimitExceeded { .. } => None,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    pub fn recommended_action(&self) -> &'static str {
        codes::get_action(self.error_code().as_str())
    }
}
