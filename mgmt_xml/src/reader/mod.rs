//! Document cursor consumed by the management translators
//!
//! The translators never see raw XML events. They pull start and end tags
//! through [`DocumentReader`], read the attribute set of the current start
//! tag, and ask for element text where the grammar carries character data.

pub mod error;
mod xml;

pub use error::{ReaderError, ReaderResult};
pub use xml::XmlStreamReader;

use crate::utils::Position;

/// Kind of tag the cursor is positioned on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Start,
    End,
    EndOfDocument,
}

/// One attribute of the current start tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    /// Namespace URI, `None` for unqualified attributes
    pub namespace: Option<String>,
    pub local_name: String,
    pub value: String,
}

impl XmlAttribute {
    pub fn new(local_name: &str, value: &str) -> Self {
        Self {
            namespace: None,
            local_name: local_name.to_string(),
            value: value.to_string(),
        }
    }

    pub fn is_unqualified(&self) -> bool {
        self.namespace.is_none()
    }
}

/// Pull cursor over a hierarchical management document
pub trait DocumentReader {
    /// Advance to the next start or end tag.
    ///
    /// Comments, processing instructions and whitespace are skipped. Any
    /// other character data between tags is an error.
    fn next_tag(&mut self) -> ReaderResult<Tag>;

    /// Local name of the element the cursor is on
    fn local_name(&self) -> &str;

    /// Namespace URI of the element the cursor is on
    fn namespace(&self) -> Option<&str>;

    /// Attributes of the current start tag, namespace declarations excluded
    fn attributes(&self) -> &[XmlAttribute];

    /// Read the text of the current element and move to its end tag
    fn element_text(&mut self) -> ReaderResult<String>;

    /// Move past the end tag of the current element, ignoring its content
    fn skip_element(&mut self) -> ReaderResult<()>;

    /// Location of the current tag
    fn location(&self) -> Position;

    /// Number of elements currently open
    fn depth(&self) -> usize;
}
