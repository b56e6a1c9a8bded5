//! Management XML translator
//!
//! Reads the `management` section of a 4.x server, host or domain
//! configuration document, validates it against the management grammar and
//! emits the ordered list of `add` commands that recreates the described
//! management resources.

#[macro_use]
pub mod logging;

pub mod config;
pub mod file_processor;
pub mod grammar;
pub mod model;
pub mod parsing;
pub mod pipeline;
pub mod reader;
pub mod schema;
pub mod utils;

// Re-export key types for library consumers
pub use grammar::Namespace;
pub use model::{Operation, OperationList, ParamValue, PathAddress};
pub use parsing::{DefaultDelegate, ManagementXml, ManagementXmlDelegate, ParseError};
pub use pipeline::output::PipelineOutput;
pub use pipeline::{PipelineError, PipelineResult, TranslationOptions};
