//! `security-realms` translation

use super::authentication::parse_authentication;
use super::authorization::parse_authorization;
use super::error::ParseResult;
use super::identities::parse_server_identities;
use super::tracker::{ElementSet, NameSet};
use super::utils::{
    next_element, require_no_attributes, require_no_content, require_single_attribute,
    unexpected_element,
};
use crate::grammar::{Attribute, Element, Namespace};
use crate::logging::codes;
use crate::model::{keys, Operation, OperationList, PathAddress};
use crate::reader::DocumentReader;
use crate::log_success;

pub fn parse_security_realms(
    reader: &mut dyn DocumentReader,
    namespace: Namespace,
    management: &PathAddress,
    list: &mut OperationList,
) -> ParseResult<()> {
    require_no_attributes(reader)?;

    let mut names = NameSet::new();
    while let Some(element) = next_element(reader, namespace)? {
        match element {
            Element::SecurityRealm => {
                parse_security_realm(reader, namespace, management, list, &mut names)?
            }
            _ => return Err(unexpected_element(reader)),
        }
    }
    Ok(())
}

/// Translate one realm.
///
/// The realm command collects `map-groups-to-roles` from its authorization
/// child, so the commands of its children are held until the realm closes
/// and appended after the realm's own command.
fn parse_security_realm(
    reader: &mut dyn DocumentReader,
    namespace: Namespace,
    management: &PathAddress,
    list: &mut OperationList,
    names: &mut NameSet,
) -> ParseResult<()> {
    let position = reader.location();
    let name = require_single_attribute(reader, Attribute::Name)?;
    names.claim(Element::SecurityRealm, &name, position)?;

    let address = management.append(keys::SECURITY_REALM, &name);
    let mut realm = Operation::add(address.clone());
    let mut children = OperationList::new();
    let mut seen = ElementSet::empty();

    while let Some(element) = next_element(reader, namespace)? {
        match element {
            Element::PlugIns => {
                seen.require_once(element, reader.location())?;
                parse_plug_ins(reader, namespace, &address, &mut children)?;
            }
            Element::ServerIdentities => {
                seen.require_once(element, reader.location())?;
                parse_server_identities(reader, namespace, &address, &mut children)?;
            }
            Element::Authentication => {
                seen.require_once(element, reader.location())?;
                parse_authentication(reader, namespace, &address, &mut children)?;
            }
            Element::Authorization => {
                seen.require_once(element, reader.location())?;
                if let Some(map_groups_to_roles) =
                    parse_authorization(reader, namespace, &address, &mut children)?
                {
                    realm.params.set(Attribute::MapGroupsToRoles.local_name(), map_groups_to_roles);
                }
            }
            _ => return Err(unexpected_element(reader)),
        }
    }

    let count = children.len() + 1;
    list.push(realm)?;
    list.extend_from(children)?;

    log_success!(
        codes::success::SECURITY_REALM_TRANSLATED,
        "Security realm translated",
        "realm" => &name,
        "operations" => count
    );
    Ok(())
}

fn parse_plug_ins(
    reader: &mut dyn DocumentReader,
    namespace: Namespace,
    realm: &PathAddress,
    list: &mut OperationList,
) -> ParseResult<()> {
    require_no_attributes(reader)?;

    let mut modules = NameSet::new();
    while let Some(element) = next_element(reader, namespace)? {
        match element {
            Element::PlugIn => {
                let position = reader.location();
                let module = require_single_attribute(reader, Attribute::Module)?;
                modules.claim(Element::PlugIn, &module, position)?;
                require_no_content(reader)?;
                list.push(Operation::add(realm.append(keys::PLUG_IN, &module)))?;
            }
            _ => return Err(unexpected_element(reader)),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::model::ParamValue;
    use crate::parsing::error::ParseError;
    use crate::parsing::test_support::{address_strings, assert_parent_before_child, translate};
    use assert_matches::assert_matches;

    const REALM: &str = "/core-service=management/security-realm=R";

    fn realm(body: &str) -> String {
        format!(
            r#"<security-realms><security-realm name="R">{}</security-realm></security-realms>"#,
            body
        )
    }

    #[test]
    fn test_empty_realm() {
        let list = translate(&realm("")).unwrap();
        assert_eq!(address_strings(&list), vec![REALM]);
        assert!(list.as_slice()[0].params.is_empty());
    }

    #[test]
    fn test_realm_children_in_any_order() {
        let list = translate(&realm(
            r#"<authorization map-groups-to-roles="false">
                 <properties path="roles.properties"/>
               </authorization>
               <authentication>
                 <properties path="users.properties" relative-to="jboss.server.config.dir"/>
               </authentication>
               <server-identities><secret value="c2VjcmV0"/></server-identities>
               <plug-ins><plug-in module="org.example.auth"/></plug-ins>"#,
        ))
        .unwrap();

        assert_eq!(
            address_strings(&list),
            vec![
                REALM.to_string(),
                format!("{}/authorization=properties", REALM),
                format!("{}/authentication=properties", REALM),
                format!("{}/server-identity=secret", REALM),
                format!("{}/plug-in=org.example.auth", REALM),
            ]
        );
        assert_eq!(
            list.as_slice()[0].param("map-groups-to-roles"),
            Some(&ParamValue::Boolean(false))
        );
        assert_parent_before_child(&list);
    }

    #[test]
    fn test_realm_children_at_most_once() {
        assert_matches!(
            translate(&realm("<authentication/><authentication/>")),
            Err(ParseError::DuplicateElement { ref element, .. }) if element == "authentication"
        );
    }

    #[test]
    fn test_realm_requires_only_name() {
        assert_matches!(
            translate(r#"<security-realms><security-realm/></security-realms>"#),
            Err(ParseError::MissingRequiredAttributes { .. })
        );
        assert_matches!(
            translate(r#"<security-realms><security-realm name="R" x="1"/></security-realms>"#),
            Err(ParseError::UnexpectedAttribute { .. })
        );
    }

    #[test]
    fn test_duplicate_realm_and_module_names() {
        assert_matches!(
            translate(
                r#"<security-realms>
                     <security-realm name="R"/><security-realm name="R"/>
                   </security-realms>"#
            ),
            Err(ParseError::DuplicateName { ref name, .. }) if name == "R"
        );
        assert_matches!(
            translate(&realm(r#"<plug-ins><plug-in module="m"/><plug-in module="m"/></plug-ins>"#)),
            Err(ParseError::DuplicateName { .. })
        );
    }

    #[test]
    fn test_multiple_realms_keep_document_order() {
        let list = translate(
            r#"<security-realms>
                 <security-realm name="A"/>
                 <security-realm name="B"><authentication><local default-user="$local"/></authentication></security-realm>
               </security-realms>"#,
        )
        .unwrap();
        assert_eq!(
            address_strings(&list),
            vec![
                "/core-service=management/security-realm=A",
                "/core-service=management/security-realm=B",
                "/core-service=management/security-realm=B/authentication=local",
            ]
        );
    }
}
