//! `outbound-connections` and directory connection translation

use super::error::ParseResult;
use super::properties::parse_properties;
use super::tracker::{ElementSet, NameSet};
use super::utils::{
    attributes, next_element, require_no_attributes, unexpected_attribute, unexpected_element,
};
use crate::grammar::{Attribute, Element, Namespace};
use crate::logging::codes;
use crate::model::{keys, Operation, OperationList, Parameters, PathAddress};
use crate::reader::DocumentReader;
use crate::schema::{AttributeDefinition, RequiredAttributes};
use crate::log_success;

const URL: AttributeDefinition = AttributeDefinition::string("url");
const SEARCH_DN: AttributeDefinition = AttributeDefinition::string("search-dn");
const SEARCH_CREDENTIAL: AttributeDefinition = AttributeDefinition::string("search-credential");
const SECURITY_REALM: AttributeDefinition = AttributeDefinition::string("security-realm");
const INITIAL_CONTEXT_FACTORY: AttributeDefinition =
    AttributeDefinition::string("initial-context-factory");
const REFERRALS: AttributeDefinition =
    AttributeDefinition::enumerated("referrals", &["IGNORE", "FOLLOW", "THROW"]);
const HANDLES_REFERRALS_FOR: AttributeDefinition =
    AttributeDefinition::list("handles-referrals-for");

pub fn parse_outbound_connections(
    reader: &mut dyn DocumentReader,
    namespace: Namespace,
    management: &PathAddress,
    list: &mut OperationList,
) -> ParseResult<()> {
    require_no_attributes(reader)?;

    let mut names = NameSet::new();
    while let Some(element) = next_element(reader, namespace)? {
        match element {
            Element::Ldap => {
                parse_ldap_connection(reader, namespace, management, list, &mut names)?
            }
            _ => return Err(unexpected_element(reader)),
        }
    }
    Ok(())
}

fn parse_ldap_connection(
    reader: &mut dyn DocumentReader,
    namespace: Namespace,
    management: &PathAddress,
    list: &mut OperationList,
    names: &mut NameSet,
) -> ParseResult<()> {
    let position = reader.location();
    let mut required = RequiredAttributes::new(&[Attribute::Name, Attribute::Url]);
    let mut name = String::new();
    let mut params = Parameters::default();

    for (attribute, value) in attributes(reader)? {
        required.seen(attribute);
        let definition = match attribute {
            Attribute::Name => {
                name = value;
                continue;
            }
            Attribute::Url => URL,
            Attribute::SearchDn => SEARCH_DN,
            Attribute::SearchCredential => SEARCH_CREDENTIAL,
            Attribute::SecurityRealm => SECURITY_REALM,
            Attribute::InitialContextFactory => INITIAL_CONTEXT_FACTORY,
            Attribute::Referrals => REFERRALS,
            Attribute::HandlesReferralsFor => HANDLES_REFERRALS_FOR,
            other => return Err(unexpected_attribute(reader, other)),
        };
        definition.parse_and_set(&value, attribute, &mut params, position)?;
    }
    required.finish(reader.local_name(), position)?;
    names.claim(Element::Ldap, &name, position)?;

    let address = management.append(keys::LDAP_CONNECTION, &name);
    let mut operation = Operation::add(address.clone());
    operation.params = params;
    list.push(operation)?;

    let mut seen = ElementSet::empty();
    while let Some(element) = next_element(reader, namespace)? {
        match element {
            Element::Properties => {
                seen.require_once(element, reader.location())?;
                parse_properties(reader, namespace, &address, list, true)?;
            }
            _ => return Err(unexpected_element(reader)),
        }
    }

    log_success!(
        codes::success::OUTBOUND_CONNECTION_TRANSLATED,
        "Outbound connection translated",
        "connection" => &name
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::model::ParamValue;
    use crate::parsing::error::ParseError;
    use crate::parsing::test_support::{address_strings, translate};
    use assert_matches::assert_matches;

    #[test]
    fn test_connection_with_referral_list() {
        let list = translate(
            r#"<outbound-connections>
                 <ldap name="ldap1" url="ldap://host"
                       handles-referrals-for="ldap://r1 ldap://r2"/>
               </outbound-connections>"#,
        )
        .unwrap();

        assert_eq!(list.len(), 1);
        let operation = &list.as_slice()[0];
        assert_eq!(operation.address.to_string(), "/core-service=management/ldap-connection=ldap1");
        assert_eq!(operation.param("url"), Some(&ParamValue::string("ldap://host")));
        assert_eq!(
            operation.param("handles-referrals-for"),
            Some(&ParamValue::List(vec![
                ParamValue::string("ldap://r1"),
                ParamValue::string("ldap://r2"),
            ]))
        );
    }

    #[test]
    fn test_connection_properties_follow_connection() {
        let list = translate(
            r#"<outbound-connections>
                 <ldap name="ldap1" url="ldap://host" search-dn="cn=search" referrals="FOLLOW">
                   <properties>
                     <property name="timeout" value="5000"/>
                   </properties>
                 </ldap>
               </outbound-connections>"#,
        )
        .unwrap();

        assert_eq!(
            address_strings(&list),
            vec![
                "/core-service=management/ldap-connection=ldap1",
                "/core-service=management/ldap-connection=ldap1/property=timeout",
            ]
        );
        assert_eq!(list.as_slice()[0].param("referrals"), Some(&ParamValue::string("FOLLOW")));
    }

    #[test]
    fn test_missing_name_and_url_reported_together() {
        let err = translate(r#"<outbound-connections><ldap search-dn="x"/></outbound-connections>"#)
            .unwrap_err();
        assert_matches!(err, ParseError::MissingRequiredAttributes { attributes, .. } => {
            assert_eq!(attributes, vec!["name", "url"]);
        });
    }

    #[test]
    fn test_invalid_referrals_mode() {
        assert_matches!(
            translate(
                r#"<outbound-connections><ldap name="a" url="ldap://h" referrals="ASK"/></outbound-connections>"#
            ),
            Err(ParseError::InvalidAttributeValue { ref allowed, .. }) if allowed.len() == 3
        );
    }

    #[test]
    fn test_duplicate_connection_name() {
        assert_matches!(
            translate(
                r#"<outbound-connections>
                     <ldap name="a" url="ldap://h"/>
                     <ldap name="a" url="ldap://other"/>
                   </outbound-connections>"#
            ),
            Err(ParseError::DuplicateName { .. })
        );
    }

    #[test]
    fn test_second_properties_block() {
        assert_matches!(
            translate(
                r#"<outbound-connections>
                     <ldap name="a" url="ldap://h"><properties/><properties/></ldap>
                   </outbound-connections>"#
            ),
            Err(ParseError::DuplicateElement { .. })
        );
    }

    #[test]
    fn test_only_ldap_connections() {
        assert_matches!(
            translate(r#"<outbound-connections><jdbc name="a"/></outbound-connections>"#),
            Err(ParseError::UnexpectedElement { ref element, .. }) if element == "jdbc"
        );
    }
}
