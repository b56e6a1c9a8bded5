//! Directory backed authentication and authorization
//!
//! The owner commands here are completed only after their filter child is
//! read, while an optional `cache` child comes before that filter. Caches are
//! therefore parsed into a [`PendingOperation`] with a relative address and
//! resolved against the owner once the owner's command has been appended.

use super::error::{ParseError, ParseResult};
use super::tracker::ElementSet;
use super::utils::{
    attributes, next_element, read_string_attribute_element, require_no_attributes,
    require_no_content, require_single_attribute, unexpected_attribute, unexpected_element,
};
use crate::grammar::{Attribute, Element, Namespace};
use crate::model::{keys, Operation, OperationList, Parameters, PathAddress, PendingOperation};
use crate::reader::DocumentReader;
use crate::schema::{AttributeDefinition, RequiredAttributes};
use crate::utils::Position;

// ============================================================================
// ATTRIBUTE DEFINITIONS
// ============================================================================

const SEARCH_MODES: &[&str] = &["SIMPLE", "DISTINGUISHED"];

const CONNECTION: AttributeDefinition = AttributeDefinition::string("connection");
const BASE_DN: AttributeDefinition = AttributeDefinition::string("base-dn");
const RECURSIVE: AttributeDefinition = AttributeDefinition::boolean("recursive");
const USER_DN: AttributeDefinition = AttributeDefinition::string("user-dn");
const ALLOW_EMPTY_PASSWORDS: AttributeDefinition =
    AttributeDefinition::boolean("allow-empty-passwords");
const USERNAME_LOAD: AttributeDefinition = AttributeDefinition::string("username-load");
const ADVANCED_FILTER: AttributeDefinition = AttributeDefinition::string("advanced-filter");
const USERNAME_ATTRIBUTE: AttributeDefinition = AttributeDefinition::string("username-attribute");

const CACHE_TYPE: AttributeDefinition =
    AttributeDefinition::enumerated("type", &[keys::BY_SEARCH_TIME, keys::BY_ACCESS_TIME]).literal();
const EVICTION_TIME: AttributeDefinition = AttributeDefinition::int("eviction-time").with_min(1);
const CACHE_FAILURES: AttributeDefinition = AttributeDefinition::boolean("cache-failures");
const MAX_CACHE_SIZE: AttributeDefinition = AttributeDefinition::int("max-cache-size").with_min(0);

const FORCE: AttributeDefinition = AttributeDefinition::boolean("force");
const USER_DN_ATTRIBUTE: AttributeDefinition = AttributeDefinition::string("user-dn-attribute");
const FILTER_ATTRIBUTE: AttributeDefinition = AttributeDefinition::string("attribute");
const FILTER: AttributeDefinition = AttributeDefinition::string("filter");

const GROUP_NAME: AttributeDefinition = AttributeDefinition::enumerated("group-name", SEARCH_MODES);
const ITERATIVE: AttributeDefinition = AttributeDefinition::boolean("iterative");
const GROUP_DN_ATTRIBUTE: AttributeDefinition = AttributeDefinition::string("group-dn-attribute");
const GROUP_NAME_ATTRIBUTE: AttributeDefinition =
    AttributeDefinition::string("group-name-attribute");
const SEARCH_BY: AttributeDefinition = AttributeDefinition::enumerated("search-by", SEARCH_MODES);
const PREFER_ORIGINAL_CONNECTION: AttributeDefinition =
    AttributeDefinition::boolean("prefer-original-connection");
const PRINCIPAL_ATTRIBUTE: AttributeDefinition = AttributeDefinition::string("principal-attribute");
const GROUP_ATTRIBUTE: AttributeDefinition = AttributeDefinition::string("group-attribute");
const SKIP_MISSING_GROUPS: AttributeDefinition = AttributeDefinition::boolean("skip-missing-groups");

const AUTHENTICATION_FILTERS: &[Element] = &[Element::AdvancedFilter, Element::UsernameFilter];
const USER_SEARCH_FILTERS: &[Element] = &[
    Element::UsernameIsDn,
    Element::UsernameFilter,
    Element::AdvancedFilter,
];
const GROUP_SEARCH_FILTERS: &[Element] = &[Element::GroupToPrincipal, Element::PrincipalToGroup];

fn names(elements: &[Element]) -> Vec<&'static str> {
    elements.iter().map(|e| e.local_name()).collect()
}

// ============================================================================
// FILTER CHOICE
// ============================================================================

/// Tracks the optional leading `cache` and the one filter that must follow it
struct FilterChoice {
    alternatives: &'static [Element],
    cache: Option<PendingOperation>,
    filter: Option<Element>,
}

impl FilterChoice {
    fn new(alternatives: &'static [Element]) -> Self {
        Self {
            alternatives,
            cache: None,
            filter: None,
        }
    }

    /// Classify the next child; `Ok(true)` when it is one of the filters.
    ///
    /// Nothing may follow the filter: a second filter is an exclusive
    /// violation and anything else is unexpected. A `cache` child is
    /// consumed here.
    fn accept(&mut self, reader: &mut dyn DocumentReader, element: Element) -> ParseResult<bool> {
        let is_filter = self.alternatives.contains(&element);

        if self.filter.is_some() {
            if is_filter {
                return Err(ParseError::exclusive_violation(
                    element.local_name(),
                    &names(self.alternatives),
                    reader.location(),
                ));
            }
            return Err(unexpected_element(reader));
        }

        if is_filter {
            self.filter = Some(element);
            return Ok(true);
        }

        if element == Element::Cache {
            if self.cache.is_some() {
                return Err(ParseError::duplicate_element(
                    element.local_name(),
                    reader.location(),
                ));
            }
            self.cache = Some(parse_cache(reader)?);
            return Ok(false);
        }

        Err(unexpected_element(reader))
    }

    /// Fail when no filter was given, naming every alternative
    fn finish(&self, position: Position) -> ParseResult<()> {
        match self.filter {
            Some(_) => Ok(()),
            None => Err(ParseError::missing_one_of(&names(self.alternatives), position)),
        }
    }

    /// Append the owner and then its cache, resolved against the owner
    fn emit(self, owner: Operation, list: &mut OperationList) -> ParseResult<()> {
        let address = owner.address.clone();
        list.push(owner)?;
        if let Some(cache) = self.cache {
            list.push(cache.resolve(&address))?;
        }
        Ok(())
    }
}

/// Translate a `cache` element into a command addressed relative to its owner
pub fn parse_cache(reader: &mut dyn DocumentReader) -> ParseResult<PendingOperation> {
    let position = reader.location();
    let mut kind = keys::BY_SEARCH_TIME.to_string();
    let mut params = Parameters::default();

    for (attribute, value) in attributes(reader)? {
        let definition = match attribute {
            Attribute::Type => {
                if let Some(parsed) = CACHE_TYPE.parse(&value, attribute, position)?.as_str() {
                    kind = parsed.to_string();
                }
                continue;
            }
            Attribute::EvictionTime => EVICTION_TIME,
            Attribute::CacheFailures => CACHE_FAILURES,
            Attribute::MaxCacheSize => MAX_CACHE_SIZE,
            other => return Err(unexpected_attribute(reader, other)),
        };
        definition.parse_and_set(&value, attribute, &mut params, position)?;
    }
    require_no_content(reader)?;

    let mut pending = PendingOperation::new(PathAddress::root().append(keys::CACHE, &kind));
    pending.params = params;
    Ok(pending)
}

// ============================================================================
// AUTHENTICATION
// ============================================================================

pub fn parse_ldap_authentication(
    reader: &mut dyn DocumentReader,
    namespace: Namespace,
    realm: &PathAddress,
    list: &mut OperationList,
) -> ParseResult<()> {
    let position = reader.location();
    let mut operation = Operation::add(realm.append(keys::AUTHENTICATION, keys::LDAP));
    let mut required = RequiredAttributes::new(&[Attribute::Connection, Attribute::BaseDn]);

    for (attribute, value) in attributes(reader)? {
        required.seen(attribute);
        let definition = match attribute {
            Attribute::Connection => CONNECTION,
            Attribute::BaseDn => BASE_DN,
            Attribute::Recursive => RECURSIVE,
            Attribute::UserDn => USER_DN,
            Attribute::AllowEmptyPasswords => ALLOW_EMPTY_PASSWORDS,
            Attribute::UsernameLoad => USERNAME_LOAD,
            other => return Err(unexpected_attribute(reader, other)),
        };
        definition.parse_and_set(&value, attribute, &mut operation.params, position)?;
    }
    required.finish(reader.local_name(), position)?;

    let mut choice = FilterChoice::new(AUTHENTICATION_FILTERS);
    while let Some(element) = next_element(reader, namespace)? {
        if !choice.accept(reader, element)? {
            continue;
        }
        let filter_position = reader.location();
        let (definition, attribute) = match element {
            Element::AdvancedFilter => (ADVANCED_FILTER, Attribute::Filter),
            _ => (USERNAME_ATTRIBUTE, Attribute::Attribute),
        };
        let value = read_string_attribute_element(reader, attribute)?;
        definition.parse_and_set(&value, attribute, &mut operation.params, filter_position)?;
    }
    choice.finish(reader.location())?;
    choice.emit(operation, list)
}

// ============================================================================
// AUTHORIZATION
// ============================================================================

pub fn parse_ldap_authorization(
    reader: &mut dyn DocumentReader,
    namespace: Namespace,
    realm: &PathAddress,
    list: &mut OperationList,
) -> ParseResult<()> {
    let position = reader.location();
    let address = realm.append(keys::AUTHORIZATION, keys::LDAP);
    let mut operation = Operation::add(address.clone());
    let mut required = RequiredAttributes::new(&[Attribute::Connection]);

    for (attribute, value) in attributes(reader)? {
        required.seen(attribute);
        match attribute {
            Attribute::Connection => {
                CONNECTION.parse_and_set(&value, attribute, &mut operation.params, position)?
            }
            other => return Err(unexpected_attribute(reader, other)),
        }
    }
    required.finish(reader.local_name(), position)?;
    list.push(operation)?;

    let mut seen = ElementSet::empty();
    while let Some(element) = next_element(reader, namespace)? {
        match element {
            Element::UsernameToDn => {
                seen.require_once(element, reader.location())?;
                parse_username_to_dn(reader, namespace, &address, list)?;
            }
            Element::GroupSearch => {
                seen.require_once(element, reader.location())?;
                parse_group_search(reader, namespace, &address, list)?;
            }
            _ => return Err(unexpected_element(reader)),
        }
    }
    Ok(())
}

fn parse_username_to_dn(
    reader: &mut dyn DocumentReader,
    namespace: Namespace,
    ldap: &PathAddress,
    list: &mut OperationList,
) -> ParseResult<()> {
    let position = reader.location();
    let mut params = Parameters::default();

    for (attribute, value) in attributes(reader)? {
        match attribute {
            Attribute::Force => FORCE.parse_and_set(&value, attribute, &mut params, position)?,
            other => return Err(unexpected_attribute(reader, other)),
        }
    }

    let mut choice = FilterChoice::new(USER_SEARCH_FILTERS);
    while let Some(element) = next_element(reader, namespace)? {
        if !choice.accept(reader, element)? {
            continue;
        }
        match element {
            Element::UsernameIsDn => {
                require_no_attributes(reader)?;
                require_no_content(reader)?;
            }
            _ => parse_user_search(reader, element, &mut params)?,
        }
    }
    choice.finish(reader.location())?;

    let filter = choice.filter.unwrap_or(Element::UsernameIsDn);
    let mut operation = Operation::add(ldap.append(keys::USERNAME_TO_DN, filter.local_name()));
    operation.params = params;
    choice.emit(operation, list)
}

/// `username-filter` or `advanced-filter` under `username-to-dn`
fn parse_user_search(
    reader: &mut dyn DocumentReader,
    filter: Element,
    params: &mut Parameters,
) -> ParseResult<()> {
    let position = reader.location();
    let mut required = if filter == Element::AdvancedFilter {
        RequiredAttributes::new(&[Attribute::BaseDn, Attribute::Filter])
    } else {
        RequiredAttributes::new(&[Attribute::BaseDn])
    };

    for (attribute, value) in attributes(reader)? {
        required.seen(attribute);
        let definition = match attribute {
            Attribute::BaseDn => BASE_DN,
            Attribute::Recursive => RECURSIVE,
            Attribute::UserDnAttribute => USER_DN_ATTRIBUTE,
            Attribute::Attribute if filter == Element::UsernameFilter => FILTER_ATTRIBUTE,
            Attribute::Filter if filter == Element::AdvancedFilter => FILTER,
            other => return Err(unexpected_attribute(reader, other)),
        };
        definition.parse_and_set(&value, attribute, params, position)?;
    }
    required.finish(reader.local_name(), position)?;
    require_no_content(reader)
}

fn parse_group_search(
    reader: &mut dyn DocumentReader,
    namespace: Namespace,
    ldap: &PathAddress,
    list: &mut OperationList,
) -> ParseResult<()> {
    let position = reader.location();
    let mut params = Parameters::default();

    for (attribute, value) in attributes(reader)? {
        let definition = match attribute {
            Attribute::GroupName => GROUP_NAME,
            Attribute::Iterative => ITERATIVE,
            Attribute::GroupDnAttribute => GROUP_DN_ATTRIBUTE,
            Attribute::GroupNameAttribute => GROUP_NAME_ATTRIBUTE,
            other => return Err(unexpected_attribute(reader, other)),
        };
        definition.parse_and_set(&value, attribute, &mut params, position)?;
    }

    let mut choice = FilterChoice::new(GROUP_SEARCH_FILTERS);
    while let Some(element) = next_element(reader, namespace)? {
        if !choice.accept(reader, element)? {
            continue;
        }
        match element {
            Element::GroupToPrincipal => {
                parse_group_to_principal(reader, namespace, &mut params)?
            }
            _ => parse_principal_to_group(reader, &mut params)?,
        }
    }
    choice.finish(reader.location())?;

    let filter = choice.filter.unwrap_or(Element::PrincipalToGroup);
    let mut operation = Operation::add(ldap.append(keys::GROUP_SEARCH, filter.local_name()));
    operation.params = params;
    choice.emit(operation, list)
}

fn parse_group_to_principal(
    reader: &mut dyn DocumentReader,
    namespace: Namespace,
    params: &mut Parameters,
) -> ParseResult<()> {
    let position = reader.location();
    let mut required = RequiredAttributes::new(&[Attribute::BaseDn]);

    for (attribute, value) in attributes(reader)? {
        required.seen(attribute);
        let definition = match attribute {
            Attribute::BaseDn => BASE_DN,
            Attribute::Recursive => RECURSIVE,
            Attribute::SearchBy => SEARCH_BY,
            Attribute::PreferOriginalConnection => PREFER_ORIGINAL_CONNECTION,
            other => return Err(unexpected_attribute(reader, other)),
        };
        definition.parse_and_set(&value, attribute, params, position)?;
    }
    required.finish(reader.local_name(), position)?;

    let mut seen = ElementSet::empty();
    while let Some(element) = next_element(reader, namespace)? {
        match element {
            Element::MembershipFilter => {
                let filter_position = reader.location();
                seen.require_once(element, filter_position)?;
                let value = require_single_attribute(reader, Attribute::PrincipalAttribute)?;
                require_no_content(reader)?;
                PRINCIPAL_ATTRIBUTE.parse_and_set(
                    &value,
                    Attribute::PrincipalAttribute,
                    params,
                    filter_position,
                )?;
            }
            _ => return Err(unexpected_element(reader)),
        }
    }
    Ok(())
}

fn parse_principal_to_group(
    reader: &mut dyn DocumentReader,
    params: &mut Parameters,
) -> ParseResult<()> {
    let position = reader.location();
    for (attribute, value) in attributes(reader)? {
        let definition = match attribute {
            Attribute::GroupAttribute => GROUP_ATTRIBUTE,
            Attribute::PreferOriginalConnection => PREFER_ORIGINAL_CONNECTION,
            Attribute::SkipMissingGroups => SKIP_MISSING_GROUPS,
            other => return Err(unexpected_attribute(reader, other)),
        };
        definition.parse_and_set(&value, attribute, params, position)?;
    }
    require_no_content(reader)
}

#[cfg(test)]
mod tests {
    use crate::model::{ParamValue, PathAddress};
    use crate::parsing::error::ParseError;
    use crate::parsing::test_support::{address_strings, assert_parent_before_child, translate};
    use assert_matches::assert_matches;

    const REALM: &str = "/core-service=management/security-realm=Realm1";

    fn authentication(body: &str) -> String {
        format!(
            r#"<security-realms><security-realm name="Realm1">
                 <authentication>{}</authentication>
               </security-realm></security-realms>"#,
            body
        )
    }

    fn authorization(body: &str) -> String {
        format!(
            r#"<security-realms><security-realm name="Realm1">
                 <authorization><ldap connection="ldap1">{}</ldap></authorization>
               </security-realm></security-realms>"#,
            body
        )
    }

    #[test]
    fn test_simple_filter_without_cache_yields_two_commands() {
        let list = translate(&authentication(
            r#"<ldap connection="ldap1" base-dn="dc=example,dc=com">
                 <username-filter attribute="uid"/>
               </ldap>"#,
        ))
        .unwrap();

        assert_eq!(
            address_strings(&list),
            vec![REALM.to_string(), format!("{}/authentication=ldap", REALM)]
        );
        let ldap = &list.as_slice()[1];
        assert_eq!(ldap.param("username-attribute"), Some(&ParamValue::string("uid")));
        assert_eq!(ldap.param("base-dn"), Some(&ParamValue::string("dc=example,dc=com")));
    }

    #[test]
    fn test_cache_before_filter_is_resolved_against_owner() {
        let list = translate(&authentication(
            r#"<ldap connection="ldap1" base-dn="dc=example,dc=com" recursive="true">
                 <cache type="by-access-time" eviction-time="300" max-cache-size="10"/>
                 <advanced-filter filter="(&amp;(uid={0})(objectClass=person))"/>
               </ldap>"#,
        ))
        .unwrap();

        let owner = PathAddress::root()
            .append("core-service", "management")
            .append("security-realm", "Realm1")
            .append("authentication", "ldap");
        assert_eq!(list.len(), 3);
        assert_eq!(list.as_slice()[1].address, owner);
        assert_eq!(
            list.as_slice()[1].param("advanced-filter"),
            Some(&ParamValue::string("(&(uid={0})(objectClass=person))"))
        );
        let cache = &list.as_slice()[2];
        assert_eq!(cache.address, owner.append("cache", "by-access-time"));
        assert_eq!(cache.param("eviction-time"), Some(&ParamValue::Int(300)));
        assert_eq!(cache.param("max-cache-size"), Some(&ParamValue::Int(10)));
        assert_parent_before_child(&list);
    }

    #[test]
    fn test_cache_defaults_to_search_time() {
        let list = translate(&authentication(
            r#"<ldap connection="ldap1" base-dn="dc=x"><cache/><username-filter attribute="uid"/></ldap>"#,
        ))
        .unwrap();
        assert_eq!(
            list.as_slice()[2].address.to_string(),
            format!("{}/authentication=ldap/cache=by-search-time", REALM)
        );
    }

    #[test]
    fn test_invalid_cache_type_names_both_kinds() {
        let err = translate(&authentication(
            r#"<ldap connection="ldap1" base-dn="dc=x">
                 <cache type="by-nothing"/><username-filter attribute="uid"/>
               </ldap>"#,
        ))
        .unwrap_err();
        assert_matches!(err, ParseError::InvalidAttributeValue { attribute, allowed, .. } => {
            assert_eq!(attribute, "type");
            assert_eq!(allowed, vec!["by-search-time", "by-access-time"]);
        });
    }

    #[test]
    fn test_authentication_filter_is_required() {
        assert_matches!(
            translate(&authentication(r#"<ldap connection="ldap1" base-dn="dc=x"><cache/></ldap>"#)),
            Err(ParseError::MissingOneOf { ref alternatives, .. })
                if alternatives == &["advanced-filter", "username-filter"]
        );
    }

    #[test]
    fn test_two_authentication_filters_are_exclusive() {
        assert_matches!(
            translate(&authentication(
                r#"<ldap connection="ldap1" base-dn="dc=x">
                     <username-filter attribute="uid"/>
                     <advanced-filter filter="(uid={0})"/>
                   </ldap>"#
            )),
            Err(ParseError::ExclusiveViolation { .. })
        );
    }

    #[test]
    fn test_cache_after_filter_is_unexpected() {
        assert_matches!(
            translate(&authentication(
                r#"<ldap connection="ldap1" base-dn="dc=x">
                     <username-filter attribute="uid"/><cache/>
                   </ldap>"#
            )),
            Err(ParseError::UnexpectedElement { ref element, .. }) if element == "cache"
        );
    }

    #[test]
    fn test_ldap_authentication_required_attributes() {
        assert_matches!(
            translate(&authentication(r#"<ldap><username-filter attribute="uid"/></ldap>"#)),
            Err(ParseError::MissingRequiredAttributes { ref attributes, .. })
                if attributes == &["connection", "base-dn"]
        );
    }

    #[test]
    fn test_username_to_dn_address_follows_filter() {
        let list = translate(&authorization(
            r#"<username-to-dn force="true">
                 <cache eviction-time="60"/>
                 <username-filter base-dn="ou=users" attribute="uid" recursive="false"/>
               </username-to-dn>
               <group-search group-name="SIMPLE" iterative="true">
                 <principal-to-group group-attribute="memberOf" skip-missing-groups="true"/>
               </group-search>"#,
        ))
        .unwrap();

        let ldap = format!("{}/authorization=ldap", REALM);
        assert_eq!(
            address_strings(&list),
            vec![
                REALM.to_string(),
                ldap.clone(),
                format!("{}/username-to-dn=username-filter", ldap),
                format!("{}/username-to-dn=username-filter/cache=by-search-time", ldap),
                format!("{}/group-search=principal-to-group", ldap),
            ]
        );
        let user_search = &list.as_slice()[2];
        assert_eq!(user_search.param("force"), Some(&ParamValue::Boolean(true)));
        assert_eq!(user_search.param("attribute"), Some(&ParamValue::string("uid")));
        let group_search = &list.as_slice()[4];
        assert_eq!(group_search.param("group-name"), Some(&ParamValue::string("SIMPLE")));
        assert_eq!(group_search.param("group-attribute"), Some(&ParamValue::string("memberOf")));
        assert_parent_before_child(&list);
    }

    #[test]
    fn test_username_is_dn_and_group_to_principal() {
        let list = translate(&authorization(
            r#"<username-to-dn><username-is-dn/></username-to-dn>
               <group-search>
                 <cache type="by-access-time"/>
                 <group-to-principal base-dn="ou=groups" search-by="DISTINGUISHED">
                   <membership-filter principal-attribute="member"/>
                 </group-to-principal>
               </group-search>"#,
        ))
        .unwrap();

        let ldap = format!("{}/authorization=ldap", REALM);
        assert_eq!(
            address_strings(&list)[2..],
            [
                format!("{}/username-to-dn=username-is-dn", ldap),
                format!("{}/group-search=group-to-principal", ldap),
                format!("{}/group-search=group-to-principal/cache=by-access-time", ldap),
            ]
        );
        assert_eq!(
            list.as_slice()[3].param("principal-attribute"),
            Some(&ParamValue::string("member"))
        );
    }

    #[test]
    fn test_two_user_search_filters_never_emit() {
        let err = translate(&authorization(
            r#"<username-to-dn>
                 <username-is-dn/>
                 <username-filter base-dn="ou=users" attribute="uid"/>
               </username-to-dn>"#,
        ))
        .unwrap_err();
        assert_matches!(err, ParseError::ExclusiveViolation { alternatives, .. } => {
            assert_eq!(alternatives, vec!["username-is-dn", "username-filter", "advanced-filter"]);
        });
    }

    #[test]
    fn test_group_search_requires_a_filter() {
        assert_matches!(
            translate(&authorization("<group-search/>")),
            Err(ParseError::MissingOneOf { ref alternatives, .. })
                if alternatives == &["group-to-principal", "principal-to-group"]
        );
    }

    #[test]
    fn test_advanced_user_search_requires_filter() {
        assert_matches!(
            translate(&authorization(
                r#"<username-to-dn><advanced-filter base-dn="ou=users"/></username-to-dn>"#
            )),
            Err(ParseError::MissingRequiredAttributes { ref attributes, .. }) if attributes == &["filter"]
        );
    }

    #[test]
    fn test_attribute_is_only_for_username_filter() {
        assert_matches!(
            translate(&authorization(
                r#"<username-to-dn><advanced-filter base-dn="b" filter="f" attribute="uid"/></username-to-dn>"#
            )),
            Err(ParseError::UnexpectedAttribute { ref attribute, .. }) if attribute == "attribute"
        );
    }

    #[test]
    fn test_authorization_children_once_each() {
        assert_matches!(
            translate(&authorization(
                r#"<group-search><principal-to-group/></group-search>
                   <group-search><principal-to-group/></group-search>"#
            )),
            Err(ParseError::DuplicateElement { .. })
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        const ATTRIBUTES: &[(&str, &str)] = &[
            ("connection", "ldap1"),
            ("base-dn", "dc=example,dc=com"),
            ("recursive", "true"),
            ("user-dn", "dn"),
            ("allow-empty-passwords", "false"),
            ("username-load", "uid"),
        ];

        fn ldap_with(attributes: &[(&str, &str)]) -> String {
            let rendered: Vec<String> = attributes
                .iter()
                .map(|(name, value)| format!(r#"{}="{}""#, name, value))
                .collect();
            authentication(&format!(
                r#"<ldap {}><username-filter attribute="uid"/></ldap>"#,
                rendered.join(" ")
            ))
        }

        proptest! {
            #[test]
            fn prop_attribute_order_does_not_matter(
                shuffled in Just(ATTRIBUTES.to_vec()).prop_shuffle()
            ) {
                let expected = translate(&ldap_with(ATTRIBUTES)).unwrap();
                let actual = translate(&ldap_with(&shuffled)).unwrap();
                prop_assert_eq!(expected.as_slice(), actual.as_slice());
            }

            #[test]
            fn prop_missing_required_attributes_are_all_named(
                drop_connection in any::<bool>(),
                drop_base_dn in any::<bool>(),
            ) {
                prop_assume!(drop_connection || drop_base_dn);

                let kept: Vec<(&str, &str)> = ATTRIBUTES
                    .iter()
                    .copied()
                    .filter(|(name, _)| {
                        !(drop_connection && *name == "connection")
                            && !(drop_base_dn && *name == "base-dn")
                    })
                    .collect();
                let mut expected = Vec::new();
                if drop_connection {
                    expected.push("connection".to_string());
                }
                if drop_base_dn {
                    expected.push("base-dn".to_string());
                }

                match translate(&ldap_with(&kept)) {
                    Err(ParseError::MissingRequiredAttributes { attributes, .. }) => {
                        prop_assert_eq!(attributes, expected)
                    }
                    other => prop_assert!(false, "unexpected result {:?}", other),
                }
            }
        }
    }
}
