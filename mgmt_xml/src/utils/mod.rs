//! Shared primitive types used by the reader, the parser and logging.

pub mod span;

pub use span::{Position, SourceMap};
