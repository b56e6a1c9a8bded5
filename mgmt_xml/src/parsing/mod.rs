//! Management element translation
//!
//! [`ManagementXml`] walks a `management` element through a
//! [`DocumentReader`](crate::reader::DocumentReader) and appends one `add`
//! command per configured resource. Each construct has its own translator
//! module; categories that other subsystems may own are first offered to a
//! [`ManagementXmlDelegate`].

pub mod delegate;
pub mod error;
pub mod management;
pub mod tracker;
pub mod utils;

mod authentication;
mod authorization;
mod connections;
mod identities;
mod ldap;
mod properties;
mod realm;

#[cfg(test)]
mod test_support;

pub use delegate::{DefaultDelegate, ManagementXmlDelegate};
pub use error::{ErrorKind, ParseError, ParseResult};
pub use management::ManagementXml;
pub use properties::parse_properties;
