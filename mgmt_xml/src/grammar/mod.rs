//! Vocabulary of the 4.x management grammar

pub mod attribute;
pub mod element;
pub mod namespace;

pub use attribute::Attribute;
pub use element::Element;
pub use namespace::Namespace;
