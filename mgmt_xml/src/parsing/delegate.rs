//! First-refusal hooks for management categories owned elsewhere

use super::error::ParseResult;
use crate::model::{OperationList, PathAddress};
use crate::reader::DocumentReader;

/// Handler offered each delegated category before the built-in translator.
///
/// Every method receives the reader positioned on the category's start tag.
/// Returning `Ok(true)` means the delegate consumed the element through its
/// end tag and appended its commands to `list`. Returning `Ok(false)` means
/// it declined and has not consumed any input.
pub trait ManagementXmlDelegate {
    fn parse_security_realms(
        &mut self,
        _reader: &mut dyn DocumentReader,
        _address: &PathAddress,
        _list: &mut OperationList,
    ) -> ParseResult<bool> {
        Ok(false)
    }

    fn parse_outbound_connections(
        &mut self,
        _reader: &mut dyn DocumentReader,
        _address: &PathAddress,
        _list: &mut OperationList,
    ) -> ParseResult<bool> {
        Ok(false)
    }

    fn parse_management_interfaces(
        &mut self,
        _reader: &mut dyn DocumentReader,
        _address: &PathAddress,
        _list: &mut OperationList,
    ) -> ParseResult<bool> {
        Ok(false)
    }

    fn parse_audit_log(
        &mut self,
        _reader: &mut dyn DocumentReader,
        _address: &PathAddress,
        _list: &mut OperationList,
    ) -> ParseResult<bool> {
        Ok(false)
    }

    fn parse_access_control(
        &mut self,
        _reader: &mut dyn DocumentReader,
        _address: &PathAddress,
        _list: &mut OperationList,
    ) -> ParseResult<bool> {
        Ok(false)
    }
}

/// Declines every category
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultDelegate;

impl ManagementXmlDelegate for DefaultDelegate {}
