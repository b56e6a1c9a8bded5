//! Entry point for the `management` element of a 4.x document

use super::connections::parse_outbound_connections;
use super::delegate::{DefaultDelegate, ManagementXmlDelegate};
use super::error::{ParseError, ParseResult};
use super::realm::parse_security_realms;
use super::tracker::ElementSet;
use super::utils::{
    attributes, next_element, require_no_attributes, require_no_content, unexpected_attribute,
    unexpected_element,
};
use crate::grammar::{Attribute, Element, Namespace};
use crate::logging::codes;
use crate::model::{keys, Operation, OperationList, PathAddress};
use crate::reader::DocumentReader;
use crate::schema::AttributeDefinition;
use crate::{log_debug, log_success};

const MAX_HISTORY: AttributeDefinition = AttributeDefinition::int("max-history").with_min(0);

/// Translator for one management grammar version.
///
/// Categories that other subsystems may own are offered to the delegate
/// first; see [`ManagementXmlDelegate`].
#[derive(Debug)]
pub struct ManagementXml<D: ManagementXmlDelegate = DefaultDelegate> {
    namespace: Namespace,
    delegate: D,
}

impl ManagementXml<DefaultDelegate> {
    pub fn new(namespace: Namespace) -> Self {
        Self::with_delegate(namespace, DefaultDelegate)
    }
}

impl<D: ManagementXmlDelegate> ManagementXml<D> {
    pub fn with_delegate(namespace: Namespace, delegate: D) -> Self {
        Self {
            namespace,
            delegate,
        }
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    pub fn into_delegate(self) -> D {
        self.delegate
    }

    /// Translate the `management` element the reader is positioned on.
    ///
    /// Commands are appended to `list` only when the whole element is valid;
    /// on error `list` is left exactly as it was.
    pub fn parse_management(
        &mut self,
        reader: &mut dyn DocumentReader,
        address: &PathAddress,
        list: &mut OperationList,
        require_native_interface: bool,
    ) -> ParseResult<()> {
        require_no_attributes(reader)?;

        let namespace = self.namespace;
        let management = address.append(keys::CORE_SERVICE, keys::MANAGEMENT);
        let mut local = OperationList::new();
        let mut seen = ElementSet::empty();

        log_debug!("Translating management element", "namespace" => namespace);

        while let Some(element) = next_element(reader, namespace)? {
            match element {
                Element::SecurityRealms => {
                    seen.require_once(element, reader.location())?;
                    if self.delegate.parse_security_realms(reader, &management, &mut local)? {
                        delegate_handled(element);
                    } else {
                        parse_security_realms(reader, namespace, &management, &mut local)?;
                    }
                }
                Element::OutboundConnections => {
                    seen.require_once(element, reader.location())?;
                    if self.delegate.parse_outbound_connections(reader, &management, &mut local)? {
                        delegate_handled(element);
                    } else {
                        parse_outbound_connections(reader, namespace, &management, &mut local)?;
                    }
                }
                Element::ManagementInterfaces => {
                    seen.require_once(element, reader.location())?;
                    if !self.delegate.parse_management_interfaces(reader, &management, &mut local)? {
                        return Err(unexpected_element(reader));
                    }
                    delegate_handled(element);
                }
                Element::AuditLog => {
                    if !self.delegate.parse_audit_log(reader, &management, &mut local)? {
                        return Err(unexpected_element(reader));
                    }
                    delegate_handled(element);
                }
                Element::AccessControl => {
                    if !self.delegate.parse_access_control(reader, &management, &mut local)? {
                        return Err(unexpected_element(reader));
                    }
                    delegate_handled(element);
                }
                Element::ConfigurationChanges => {
                    seen.require_once(element, reader.location())?;
                    local.push(parse_configuration_changes(reader, &management)?)?;
                }
                _ => return Err(unexpected_element(reader)),
            }
        }

        if require_native_interface && !seen.contains(Element::ManagementInterfaces) {
            return Err(ParseError::missing_required_element(
                &[Element::ManagementInterfaces.local_name()],
                reader.location(),
            ));
        }

        let count = local.len();
        list.extend_from(local)?;

        log_success!(
            codes::success::MANAGEMENT_TRANSLATED,
            "Management element translated",
            "namespace" => namespace,
            "operations" => count
        );
        Ok(())
    }

    /// Serializing a management model back to XML is not available for this
    /// grammar version.
    pub fn write_management<W: std::io::Write>(
        &self,
        _writer: &mut W,
        _model: &serde_json::Value,
        _marshall_interfaces: bool,
    ) -> ParseResult<()> {
        Err(ParseError::unsupported("write_management"))
    }
}

fn delegate_handled(element: Element) {
    log_success!(
        codes::success::DELEGATE_HANDLED,
        "Delegate handled management category",
        "element" => element
    );
}

fn parse_configuration_changes(
    reader: &mut dyn DocumentReader,
    management: &PathAddress,
) -> ParseResult<Operation> {
    let position = reader.location();
    let mut operation =
        Operation::add(management.append(keys::SERVICE, keys::CONFIGURATION_CHANGES));

    for (attribute, value) in attributes(reader)? {
        match attribute {
            Attribute::MaxHistory => {
                MAX_HISTORY.parse_and_set(&value, attribute, &mut operation.params, position)?
            }
            other => return Err(unexpected_attribute(reader, other)),
        }
    }
    require_no_content(reader)?;
    Ok(operation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParamValue;
    use crate::parsing::test_support::{address_strings, translate, translate_with, wrap};
    use crate::reader::{Tag, XmlStreamReader};
    use assert_matches::assert_matches;

    /// Accepts `management-interfaces` and `audit-log`
    #[derive(Default)]
    struct InterfacesDelegate {
        handled: Vec<&'static str>,
    }

    impl ManagementXmlDelegate for InterfacesDelegate {
        fn parse_management_interfaces(
            &mut self,
            reader: &mut dyn DocumentReader,
            address: &PathAddress,
            list: &mut OperationList,
        ) -> ParseResult<bool> {
            reader.skip_element()?;
            list.push(Operation::add(address.append("management-interface", "http-interface")))?;
            self.handled.push("management-interfaces");
            Ok(true)
        }

        fn parse_audit_log(
            &mut self,
            reader: &mut dyn DocumentReader,
            _address: &PathAddress,
            _list: &mut OperationList,
        ) -> ParseResult<bool> {
            reader.skip_element()?;
            self.handled.push("audit-log");
            Ok(true)
        }
    }

    #[test]
    fn test_configuration_changes() {
        let list = translate(r#"<configuration-changes max-history="10"/>"#).unwrap();
        assert_eq!(
            address_strings(&list),
            vec!["/core-service=management/service=configuration-changes"]
        );
        assert_eq!(list.as_slice()[0].param("max-history"), Some(&ParamValue::Int(10)));

        assert_matches!(
            translate(r#"<configuration-changes max-history="-1"/>"#),
            Err(ParseError::InvalidAttributeValue { .. })
        );
    }

    #[test]
    fn test_singleton_categories() {
        for fragment in [
            "<security-realms/><security-realms/>",
            "<outbound-connections/><outbound-connections/>",
            "<configuration-changes/><configuration-changes/>",
        ] {
            assert_matches!(translate(fragment), Err(ParseError::DuplicateElement { .. }));
        }

        let (result, _) = translate_with(
            "<management-interfaces/><management-interfaces/>",
            InterfacesDelegate::default(),
            false,
        );
        assert_matches!(result, Err(ParseError::DuplicateElement { .. }));
    }

    #[test]
    fn test_declined_delegate_only_categories_fail() {
        for fragment in ["<management-interfaces/>", "<audit-log/>", "<access-control/>"] {
            assert_matches!(translate(fragment), Err(ParseError::UnexpectedElement { .. }));
        }
    }

    #[test]
    fn test_delegate_handles_interfaces() {
        let (result, delegate) = translate_with(
            r#"<audit-log><logger/></audit-log>
               <management-interfaces><http-interface/></management-interfaces>"#,
            InterfacesDelegate::default(),
            true,
        );
        let list = result.unwrap();
        assert_eq!(delegate.handled, vec!["audit-log", "management-interfaces"]);
        assert_eq!(
            address_strings(&list),
            vec!["/core-service=management/management-interface=http-interface"]
        );
    }

    #[test]
    fn test_native_interface_requirement() {
        let (result, _) =
            translate_with("<configuration-changes/>", InterfacesDelegate::default(), true);
        assert_matches!(
            result,
            Err(ParseError::MissingRequiredElement { ref elements, .. }) if elements == &["management-interfaces"]
        );

        let (result, _) =
            translate_with("<configuration-changes/>", InterfacesDelegate::default(), false);
        assert!(result.is_ok());
    }

    #[test]
    fn test_failed_parse_leaves_list_untouched() {
        let source = wrap(
            r#"<configuration-changes/>
               <security-realms><security-realm name="R"><bogus/></security-realm></security-realms>"#,
        );
        let mut reader = XmlStreamReader::new(&source);
        assert_eq!(reader.next_tag().unwrap(), Tag::Start);

        let earlier = Operation::add(PathAddress::root().append("subsystem", "logging"));
        let mut list = OperationList::new();
        list.push(earlier.clone()).unwrap();

        let result = ManagementXml::new(Namespace::Domain4_0).parse_management(
            &mut reader,
            &PathAddress::root(),
            &mut list,
            false,
        );
        assert_matches!(result, Err(ParseError::UnexpectedElement { .. }));
        assert_eq!(list.as_slice(), &[earlier]);
    }

    #[test]
    fn test_appends_after_existing_entries() {
        let source = wrap("<configuration-changes/>");
        let mut reader = XmlStreamReader::new(&source);
        assert_eq!(reader.next_tag().unwrap(), Tag::Start);

        let base = PathAddress::root().append("host", "primary");
        let mut list = OperationList::new();
        list.push(Operation::add(base.clone())).unwrap();

        ManagementXml::new(Namespace::Domain4_0)
            .parse_management(&mut reader, &base, &mut list, false)
            .unwrap();
        assert_eq!(
            address_strings(&list),
            vec![
                "/host=primary",
                "/host=primary/core-service=management/service=configuration-changes",
            ]
        );
    }

    #[test]
    fn test_foreign_namespace_child() {
        assert_matches!(
            translate(r#"<configuration-changes xmlns="urn:jboss:domain:1.7"/>"#),
            Err(ParseError::UnexpectedNamespace { .. })
        );
    }

    #[test]
    fn test_write_is_unsupported() {
        let xml = ManagementXml::new(Namespace::Domain4_1);
        let mut out = Vec::new();
        assert_matches!(
            xml.write_management(&mut out, &serde_json::Value::Null, true),
            Err(ParseError::Unsupported { .. })
        );
        assert!(out.is_empty());
    }
}
