//! Fragment translation helpers for unit tests

use super::delegate::{DefaultDelegate, ManagementXmlDelegate};
use super::error::ParseResult;
use super::management::ManagementXml;
use crate::grammar::Namespace;
use crate::model::{OperationList, PathAddress};
use crate::reader::{DocumentReader, Tag, XmlStreamReader};

pub const NAMESPACE: Namespace = Namespace::Domain4_0;

/// Wrap children of `management` in a 4.0 management element
pub fn wrap(fragment: &str) -> String {
    format!(
        r#"<management xmlns="{}">{}</management>"#,
        NAMESPACE.uri(),
        fragment
    )
}

pub fn translate(fragment: &str) -> ParseResult<OperationList> {
    translate_with(fragment, DefaultDelegate, false).0
}

/// Translate with a custom delegate, handing the delegate back for inspection
pub fn translate_with<D: ManagementXmlDelegate>(
    fragment: &str,
    delegate: D,
    require_native_interface: bool,
) -> (ParseResult<OperationList>, D) {
    let source = wrap(fragment);
    let mut reader = XmlStreamReader::new(&source);
    assert_eq!(reader.next_tag().expect("management start tag"), Tag::Start);

    let mut xml = ManagementXml::with_delegate(NAMESPACE, delegate);
    let mut list = OperationList::new();
    let result = xml
        .parse_management(&mut reader, &PathAddress::root(), &mut list, require_native_interface)
        .map(|_| list);
    (result, xml.into_delegate())
}

pub fn address_strings(list: &OperationList) -> Vec<String> {
    list.iter().map(|o| o.address.to_string()).collect()
}

/// Every command whose address is an ancestor of another appears first
pub fn assert_parent_before_child(list: &OperationList) {
    let operations = list.as_slice();
    for (i, later) in operations.iter().enumerate() {
        for earlier_candidate in &operations[i + 1..] {
            assert!(
                !earlier_candidate.address.is_strict_prefix_of(&later.address),
                "{} must precede {}",
                earlier_candidate.address,
                later.address
            );
        }
    }
}
