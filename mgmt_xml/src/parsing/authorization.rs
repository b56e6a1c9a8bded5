//! Realm `authorization` translation

use super::authentication::{parse_plug_in_source, parse_properties_file};
use super::error::ParseResult;
use super::ldap::parse_ldap_authorization;
use super::tracker::ElementSet;
use super::utils::{attributes, next_element, unexpected_attribute, unexpected_element};
use crate::grammar::{Attribute, Element, Namespace};
use crate::model::{keys, OperationList, ParamValue, PathAddress};
use crate::reader::DocumentReader;
use crate::schema::AttributeDefinition;

const SOURCES: &[Element] = &[Element::Properties, Element::PlugIn, Element::Ldap];

const MAP_GROUPS_TO_ROLES: AttributeDefinition =
    AttributeDefinition::boolean("map-groups-to-roles");

/// Translate the realm's group source.
///
/// At most one source may be given; an empty block only carries
/// `map-groups-to-roles`. That value belongs on the realm command and is
/// handed back to the caller.
pub fn parse_authorization(
    reader: &mut dyn DocumentReader,
    namespace: Namespace,
    realm: &PathAddress,
    list: &mut OperationList,
) -> ParseResult<Option<ParamValue>> {
    let position = reader.location();
    let mut map_groups_to_roles = None;

    for (attribute, value) in attributes(reader)? {
        match attribute {
            Attribute::MapGroupsToRoles => {
                map_groups_to_roles = Some(MAP_GROUPS_TO_ROLES.parse(&value, attribute, position)?)
            }
            other => return Err(unexpected_attribute(reader, other)),
        }
    }

    let mut seen = ElementSet::empty();
    while let Some(element) = next_element(reader, namespace)? {
        let child_position = reader.location();
        match element {
            Element::Properties => {
                seen.require_exclusive(element, SOURCES, child_position)?;
                let address = realm.append(keys::AUTHORIZATION, keys::PROPERTIES);
                list.push(parse_properties_file(reader, address, false)?)?;
            }
            Element::PlugIn => {
                seen.require_exclusive(element, SOURCES, child_position)?;
                let address = realm.append(keys::AUTHORIZATION, keys::PLUG_IN);
                parse_plug_in_source(reader, namespace, address, list, false)?;
            }
            Element::Ldap => {
                seen.require_exclusive(element, SOURCES, child_position)?;
                parse_ldap_authorization(reader, namespace, realm, list)?;
            }
            _ => return Err(unexpected_element(reader)),
        }
    }

    Ok(map_groups_to_roles)
}

#[cfg(test)]
mod tests {
    use crate::model::ParamValue;
    use crate::parsing::error::ParseError;
    use crate::parsing::test_support::{address_strings, translate};
    use assert_matches::assert_matches;

    const REALM: &str = "/core-service=management/security-realm=R";

    fn authorization(attributes: &str, body: &str) -> String {
        format!(
            r#"<security-realms><security-realm name="R">
                 <authorization {}>{}</authorization>
               </security-realm></security-realms>"#,
            attributes, body
        )
    }

    #[test]
    fn test_plug_in_authorization() {
        let list = translate(&authorization(
            r#"map-groups-to-roles="${roles.map:true}""#,
            r#"<plug-in name="Sample"><properties><property name="a" value="b"/></properties></plug-in>"#,
        ))
        .unwrap();

        assert_eq!(
            address_strings(&list),
            vec![
                REALM.to_string(),
                format!("{}/authorization=plug-in", REALM),
                format!("{}/authorization=plug-in/property=a", REALM),
            ]
        );
        assert_eq!(
            list.as_slice()[0].param("map-groups-to-roles"),
            Some(&ParamValue::Expression("${roles.map:true}".to_string()))
        );
    }

    #[test]
    fn test_empty_authorization_sets_realm_parameter() {
        let list = translate(&authorization(r#"map-groups-to-roles="false""#, "")).unwrap();
        assert_eq!(address_strings(&list), vec![REALM.to_string()]);
        assert_eq!(
            list.as_slice()[0].param("map-groups-to-roles"),
            Some(&ParamValue::Boolean(false))
        );

        let list = translate(&authorization("", "")).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.as_slice()[0].param("map-groups-to-roles"), None);
    }

    #[test]
    fn test_authorization_allows_one_source() {
        assert_matches!(
            translate(&authorization(
                "",
                r#"<properties path="roles.properties"/><plug-in name="Sample"/>"#
            )),
            Err(ParseError::ExclusiveViolation { ref element, .. }) if element == "plug-in"
        );
    }

    #[test]
    fn test_authorization_attributes_are_narrower() {
        assert_matches!(
            translate(&authorization("", r#"<properties path="roles.properties" plain-text="true"/>"#)),
            Err(ParseError::UnexpectedAttribute { .. })
        );
        assert_matches!(
            translate(&authorization("", r#"<plug-in name="Sample" mechanism="PLAIN"/>"#)),
            Err(ParseError::UnexpectedAttribute { .. })
        );
        assert_matches!(
            translate(&authorization(r#"map-groups-to-roles="maybe""#, r#"<properties path="p"/>"#)),
            Err(ParseError::InvalidAttributeValue { .. })
        );
    }
}
