//! Consolidated error codes and classification system
//!
//! Single source of truth for all error codes, their metadata, and classification functions.
//! Translation codes follow the five failure families of the management parser: unexpected
//! construct (E04x), missing required (E06x), duplicate/exclusive (E08x), invalid value (E10x)
//! and unsupported operation (E12x).

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const INVALID_EXTENSION: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const EMPTY_FILE: Code = Code::new("E008");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
}

/// Document reader error codes
pub mod reader {
    use super::Code;

    pub const MALFORMED_DOCUMENT: Code = Code::new("E020");
    pub const UNEXPECTED_CONTENT: Code = Code::new("E021");
    pub const NESTING_TOO_DEEP: Code = Code::new("E022");
    pub const TOO_MANY_ATTRIBUTES: Code = Code::new("E023");
    pub const UNEXPECTED_END_OF_DOCUMENT: Code = Code::new("E024");
}

/// Unexpected construct error codes
pub mod grammar {
    use super::Code;

    pub const UNEXPECTED_ELEMENT: Code = Code::new("E040");
    pub const UNEXPECTED_ATTRIBUTE: Code = Code::new("E041");
    pub const UNEXPECTED_NAMESPACE: Code = Code::new("E042");
    pub const UNSUPPORTED_NAMESPACE: Code = Code::new("E043");
    pub const MISSING_ROOT_ELEMENT: Code = Code::new("E044");
}

/// Missing required error codes
pub mod required {
    use super::Code;

    pub const MISSING_REQUIRED_ATTRIBUTE: Code = Code::new("E060");
    pub const MISSING_REQUIRED_ELEMENT: Code = Code::new("E061");
    pub const MISSING_ONE_OF: Code = Code::new("E062");
}

/// Duplicate and mutual-exclusion error codes
pub mod cardinality {
    use super::Code;

    pub const DUPLICATE_ELEMENT: Code = Code::new("E080");
    pub const EXCLUSIVE_VIOLATION: Code = Code::new("E081");
    pub const DUPLICATE_NAME: Code = Code::new("E082");
}

/// Invalid value error codes
pub mod value {
    use super::Code;

    pub const INVALID_ATTRIBUTE_VALUE: Code = Code::new("E100");
}

/// Unsupported operation error codes
pub mod unsupported {
    use super::Code;

    pub const UNSUPPORTED_OPERATION: Code = Code::new("E120");
}

/// Resource limit error codes
pub mod limits {
    use super::Code;

    pub const OPERATION_LIMIT_EXCEEDED: Code = Code::new("E140");
    pub const LIST_LIMIT_EXCEEDED: Code = Code::new("E141");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    // General success codes
    pub const OPERATION_COMPLETED_SUCCESSFULLY: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");

    // File processing success codes
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");

    // Reader success codes
    pub const DOCUMENT_OPENED: Code = Code::new("I020");

    // Translation success codes
    pub const MANAGEMENT_TRANSLATED: Code = Code::new("I040");
    pub const SECURITY_REALM_TRANSLATED: Code = Code::new("I041");
    pub const OUTBOUND_CONNECTION_TRANSLATED: Code = Code::new("I042");
    pub const DELEGATE_HANDLED: Code = Code::new("I043");

    // Pipeline success codes
    pub const PIPELINE_COMPLETE: Code = Code::new("I060");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

/// Initialize and get the error registry
fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let mut registry = HashMap::new();

        // System errors
        registry.insert(
            "ERR001",
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Critical internal system error",
                "Contact system administrator or file bug report",
            ),
        );
        registry.insert(
            "ERR002",
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "System initialization failed",
                "Check logging configuration and environment",
            ),
        );

        // File processing errors
        registry.insert(
            "E005",
            ErrorMetadata::new(
                "E005",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Configuration document not found",
                "Check the document path",
            ),
        );
        registry.insert(
            "E006",
            ErrorMetadata::new(
                "E006",
                "FileProcessing",
                Severity::Low,
                false,
                true,
                "Document does not have the .xml extension",
                "Rename the document or disable MGMT_REQUIRE_XML_EXTENSION",
            ),
        );
        registry.insert(
            "E007",
            ErrorMetadata::new(
                "E007",
                "FileProcessing",
                Severity::High,
                false,
                true,
                "Document exceeds compile-time size or line limits",
                "Split the document or rebuild with a larger profile limit",
            ),
        );
        registry.insert(
            "E008",
            ErrorMetadata::new(
                "E008",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Document is empty",
                "Provide a document with a management element",
            ),
        );
        registry.insert(
            "E009",
            ErrorMetadata::new(
                "E009",
                "FileProcessing",
                Severity::High,
                false,
                true,
                "Permission denied reading document",
                "Check file permissions",
            ),
        );
        registry.insert(
            "E010",
            ErrorMetadata::new(
                "E010",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Document is not valid UTF-8",
                "Re-encode the document as UTF-8",
            ),
        );
        registry.insert(
            "E011",
            ErrorMetadata::new(
                "E011",
                "FileProcessing",
                Severity::High,
                true,
                true,
                "I/O error reading document",
                "Retry or check the underlying storage",
            ),
        );
        registry.insert(
            "E012",
            ErrorMetadata::new(
                "E012",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Invalid document path",
                "Provide a path to a regular file",
            ),
        );

        // Reader errors
        registry.insert(
            "E020",
            ErrorMetadata::new(
                "E020",
                "Reader",
                Severity::High,
                false,
                true,
                "Document is not well-formed XML",
                "Fix the XML syntax at the reported position",
            ),
        );
        registry.insert(
            "E021",
            ErrorMetadata::new(
                "E021",
                "Reader",
                Severity::Medium,
                false,
                true,
                "Text content where only elements are allowed",
                "Remove the stray text",
            ),
        );
        registry.insert(
            "E022",
            ErrorMetadata::new(
                "E022",
                "Reader",
                Severity::High,
                false,
                true,
                "Element nesting exceeds compile-time depth limit",
                "Flatten the document or rebuild with a larger profile limit",
            ),
        );
        registry.insert(
            "E023",
            ErrorMetadata::new(
                "E023",
                "Reader",
                Severity::High,
                false,
                true,
                "Element carries more attributes than allowed",
                "Remove unneeded attributes",
            ),
        );
        registry.insert(
            "E024",
            ErrorMetadata::new(
                "E024",
                "Reader",
                Severity::High,
                false,
                true,
                "Document ended inside an open element",
                "Close every open element",
            ),
        );

        // Unexpected construct errors
        registry.insert(
            "E040",
            ErrorMetadata::new(
                "E040",
                "Grammar",
                Severity::Medium,
                false,
                true,
                "Element is not legal at this position",
                "Remove the element or move it to a valid parent",
            ),
        );
        registry.insert(
            "E041",
            ErrorMetadata::new(
                "E041",
                "Grammar",
                Severity::Medium,
                false,
                true,
                "Attribute is not legal on this element",
                "Remove the attribute or check its spelling",
            ),
        );
        registry.insert(
            "E042",
            ErrorMetadata::new(
                "E042",
                "Grammar",
                Severity::Medium,
                false,
                true,
                "Element is in a different namespace than the document",
                "Use the document's management namespace",
            ),
        );
        registry.insert(
            "E043",
            ErrorMetadata::new(
                "E043",
                "Grammar",
                Severity::High,
                false,
                true,
                "Management namespace version is not supported",
                "Use a 4.x management namespace",
            ),
        );
        registry.insert(
            "E044",
            ErrorMetadata::new(
                "E044",
                "Grammar",
                Severity::High,
                false,
                true,
                "Document has no management root element",
                "Wrap the configuration in a management element",
            ),
        );

        // Missing required errors
        registry.insert(
            "E060",
            ErrorMetadata::new(
                "E060",
                "Required",
                Severity::Medium,
                false,
                true,
                "Required attributes are missing",
                "Add every listed attribute",
            ),
        );
        registry.insert(
            "E061",
            ErrorMetadata::new(
                "E061",
                "Required",
                Severity::Medium,
                false,
                true,
                "Required child element is missing",
                "Add the listed element",
            ),
        );
        registry.insert(
            "E062",
            ErrorMetadata::new(
                "E062",
                "Required",
                Severity::Medium,
                false,
                true,
                "None of the required alternatives is present",
                "Add exactly one of the listed elements",
            ),
        );

        // Cardinality errors
        registry.insert(
            "E080",
            ErrorMetadata::new(
                "E080",
                "Cardinality",
                Severity::Medium,
                false,
                true,
                "Element may appear at most once",
                "Remove the repeated element",
            ),
        );
        registry.insert(
            "E081",
            ErrorMetadata::new(
                "E081",
                "Cardinality",
                Severity::Medium,
                false,
                true,
                "Mutually exclusive alternatives used together",
                "Keep only one of the listed alternatives",
            ),
        );
        registry.insert(
            "E082",
            ErrorMetadata::new(
                "E082",
                "Cardinality",
                Severity::Medium,
                false,
                true,
                "Name already used by a sibling resource",
                "Rename one of the resources",
            ),
        );

        // Value errors
        registry.insert(
            "E100",
            ErrorMetadata::new(
                "E100",
                "Value",
                Severity::Medium,
                false,
                true,
                "Attribute value is not valid",
                "Use one of the accepted values or a value of the right type",
            ),
        );

        // Unsupported
        registry.insert(
            "E120",
            ErrorMetadata::new(
                "E120",
                "Unsupported",
                Severity::High,
                false,
                true,
                "Operation is not supported by this grammar version",
                "Use a writer for a newer management schema",
            ),
        );

        // Limits
        registry.insert(
            "E140",
            ErrorMetadata::new(
                "E140",
                "Limits",
                Severity::High,
                false,
                true,
                "Document produces more operations than allowed",
                "Split the document or rebuild with a larger profile limit",
            ),
        );
        registry.insert(
            "E141",
            ErrorMetadata::new(
                "E141",
                "Limits",
                Severity::Medium,
                false,
                true,
                "List attribute holds more items than allowed",
                "Shorten the list",
            ),
        );

        // Success codes
        registry.insert(
            "I001",
            ErrorMetadata::new(
                "I001",
                "Success",
                Severity::Low,
                true,
                false,
                "Operation completed successfully",
                "No action required",
            ),
        );
        registry.insert(
            "I004",
            ErrorMetadata::new(
                "I004",
                "Success",
                Severity::Low,
                true,
                false,
                "System initialization completed",
                "No action required",
            ),
        );
        registry.insert(
            "I006",
            ErrorMetadata::new(
                "I006",
                "FileProcessing",
                Severity::Low,
                true,
                false,
                "Document loaded successfully",
                "Document ready for translation",
            ),
        );
        registry.insert(
            "I020",
            ErrorMetadata::new(
                "I020",
                "Reader",
                Severity::Low,
                true,
                false,
                "Document reader positioned on the management element",
                "No action required",
            ),
        );
        registry.insert(
            "I040",
            ErrorMetadata::new(
                "I040",
                "Translation",
                Severity::Low,
                true,
                false,
                "Management element translated",
                "Operations ready for the executor",
            ),
        );
        registry.insert(
            "I041",
            ErrorMetadata::new(
                "I041",
                "Translation",
                Severity::Low,
                true,
                false,
                "Security realm translated",
                "No action required",
            ),
        );
        registry.insert(
            "I042",
            ErrorMetadata::new(
                "I042",
                "Translation",
                Severity::Low,
                true,
                false,
                "Outbound connection translated",
                "No action required",
            ),
        );
        registry.insert(
            "I043",
            ErrorMetadata::new(
                "I043",
                "Translation",
                Severity::Low,
                true,
                false,
                "Element handled by the management delegate",
                "No action required",
            ),
        );
        registry.insert(
            "I060",
            ErrorMetadata::new(
                "I060",
                "Pipeline",
                Severity::Low,
                true,
                false,
                "Translation pipeline completed",
                "No action required",
            ),
        );

        registry
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from error code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for error code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for error code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category from error code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}
