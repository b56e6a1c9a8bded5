//! Realm `authentication` translation

use super::error::{ParseError, ParseResult};
use super::identities::parse_key_material;
use super::ldap::parse_ldap_authentication;
use super::properties::parse_properties;
use super::tracker::{ElementSet, NameSet};
use super::utils::{
    attributes, next_element, require_no_attributes, require_no_content,
    require_single_attribute, unexpected_attribute, unexpected_element,
};
use crate::grammar::{Attribute, Element, Namespace};
use crate::model::{keys, Operation, OperationList, ParamValue, PathAddress};
use crate::reader::DocumentReader;
use crate::schema::{is_expression, AttributeDefinition, RequiredAttributes};

/// Username/password sources; a realm authenticates against at most one
const USERNAME_PASSWORD_SOURCES: &[Element] = &[
    Element::Jaas,
    Element::Ldap,
    Element::Properties,
    Element::Users,
    Element::PlugIn,
];

const MECHANISMS: &[&str] = &["DIGEST", "PLAIN"];

const DEFAULT_USER: AttributeDefinition = AttributeDefinition::string("default-user");
const ALLOWED_USERS: AttributeDefinition = AttributeDefinition::string("allowed-users");
const SKIP_GROUP_LOADING: AttributeDefinition = AttributeDefinition::boolean("skip-group-loading");
const REMOVE_REALM: AttributeDefinition = AttributeDefinition::boolean("remove-realm");
const JAAS_NAME: AttributeDefinition = AttributeDefinition::string("name");
const ASSIGN_GROUPS: AttributeDefinition = AttributeDefinition::boolean("assign-groups");
const PATH: AttributeDefinition = AttributeDefinition::string("path");
const RELATIVE_TO: AttributeDefinition = AttributeDefinition::string("relative-to");
const PLAIN_TEXT: AttributeDefinition = AttributeDefinition::boolean("plain-text");
const PLUG_IN_NAME: AttributeDefinition = AttributeDefinition::string("name");
const MECHANISM: AttributeDefinition = AttributeDefinition::enumerated("mechanism", MECHANISMS);

pub fn parse_authentication(
    reader: &mut dyn DocumentReader,
    namespace: Namespace,
    realm: &PathAddress,
    list: &mut OperationList,
) -> ParseResult<()> {
    require_no_attributes(reader)?;

    let mut seen = ElementSet::empty();
    while let Some(element) = next_element(reader, namespace)? {
        let position = reader.location();
        match element {
            Element::Truststore => {
                seen.require_once(element, position)?;
                let mut operation =
                    Operation::add(realm.append(keys::AUTHENTICATION, keys::TRUSTSTORE));
                parse_key_material(reader, &mut operation.params, false)?;
                list.push(operation)?;
            }
            Element::Local => {
                seen.require_once(element, position)?;
                list.push(parse_local(reader, realm)?)?;
            }
            Element::Kerberos => {
                seen.require_once(element, position)?;
                list.push(parse_kerberos(reader, realm)?)?;
            }
            Element::Jaas => {
                seen.require_exclusive(element, USERNAME_PASSWORD_SOURCES, position)?;
                list.push(parse_jaas(reader, realm)?)?;
            }
            Element::Ldap => {
                seen.require_exclusive(element, USERNAME_PASSWORD_SOURCES, position)?;
                parse_ldap_authentication(reader, namespace, realm, list)?;
            }
            Element::Properties => {
                seen.require_exclusive(element, USERNAME_PASSWORD_SOURCES, position)?;
                let address = realm.append(keys::AUTHENTICATION, keys::PROPERTIES);
                list.push(parse_properties_file(reader, address, true)?)?;
            }
            Element::Users => {
                seen.require_exclusive(element, USERNAME_PASSWORD_SOURCES, position)?;
                parse_users(reader, namespace, realm, list)?;
            }
            Element::PlugIn => {
                seen.require_exclusive(element, USERNAME_PASSWORD_SOURCES, position)?;
                let address = realm.append(keys::AUTHENTICATION, keys::PLUG_IN);
                parse_plug_in_source(reader, namespace, address, list, true)?;
            }
            _ => return Err(unexpected_element(reader)),
        }
    }
    Ok(())
}

fn parse_local(reader: &mut dyn DocumentReader, realm: &PathAddress) -> ParseResult<Operation> {
    let position = reader.location();
    let mut operation = Operation::add(realm.append(keys::AUTHENTICATION, keys::LOCAL));

    for (attribute, value) in attributes(reader)? {
        let definition = match attribute {
            Attribute::DefaultUser => DEFAULT_USER,
            Attribute::AllowedUsers => ALLOWED_USERS,
            Attribute::SkipGroupLoading => SKIP_GROUP_LOADING,
            other => return Err(unexpected_attribute(reader, other)),
        };
        definition.parse_and_set(&value, attribute, &mut operation.params, position)?;
    }
    require_no_content(reader)?;
    Ok(operation)
}

fn parse_kerberos(reader: &mut dyn DocumentReader, realm: &PathAddress) -> ParseResult<Operation> {
    let position = reader.location();
    let mut operation = Operation::add(realm.append(keys::AUTHENTICATION, keys::KERBEROS));

    for (attribute, value) in attributes(reader)? {
        match attribute {
            Attribute::RemoveRealm => {
                REMOVE_REALM.parse_and_set(&value, attribute, &mut operation.params, position)?
            }
            other => return Err(unexpected_attribute(reader, other)),
        }
    }
    require_no_content(reader)?;
    Ok(operation)
}

fn parse_jaas(reader: &mut dyn DocumentReader, realm: &PathAddress) -> ParseResult<Operation> {
    let position = reader.location();
    let mut operation = Operation::add(realm.append(keys::AUTHENTICATION, keys::JAAS));
    let mut required = RequiredAttributes::new(&[Attribute::Name]);

    for (attribute, value) in attributes(reader)? {
        required.seen(attribute);
        let definition = match attribute {
            Attribute::Name => JAAS_NAME,
            Attribute::AssignGroups => ASSIGN_GROUPS,
            other => return Err(unexpected_attribute(reader, other)),
        };
        definition.parse_and_set(&value, attribute, &mut operation.params, position)?;
    }
    required.finish(reader.local_name(), position)?;
    require_no_content(reader)?;
    Ok(operation)
}

/// A `properties` file reference; `plain-text` exists only for authentication.
pub(super) fn parse_properties_file(
    reader: &mut dyn DocumentReader,
    address: PathAddress,
    allow_plain_text: bool,
) -> ParseResult<Operation> {
    let position = reader.location();
    let mut operation = Operation::add(address);
    let mut required = RequiredAttributes::new(&[Attribute::Path]);

    for (attribute, value) in attributes(reader)? {
        required.seen(attribute);
        let definition = match attribute {
            Attribute::Path => PATH,
            Attribute::RelativeTo => RELATIVE_TO,
            Attribute::PlainText if allow_plain_text => PLAIN_TEXT,
            other => return Err(unexpected_attribute(reader, other)),
        };
        definition.parse_and_set(&value, attribute, &mut operation.params, position)?;
    }
    required.finish(reader.local_name(), position)?;
    require_no_content(reader)?;
    Ok(operation)
}

/// A `plug-in` source: the command, then its optional `properties`.
///
/// `mechanism` is only accepted for authentication.
pub(super) fn parse_plug_in_source(
    reader: &mut dyn DocumentReader,
    namespace: Namespace,
    address: PathAddress,
    list: &mut OperationList,
    allow_mechanism: bool,
) -> ParseResult<()> {
    let position = reader.location();
    let mut operation = Operation::add(address.clone());
    let mut required = RequiredAttributes::new(&[Attribute::Name]);

    for (attribute, value) in attributes(reader)? {
        required.seen(attribute);
        let definition = match attribute {
            Attribute::Name => PLUG_IN_NAME,
            Attribute::Mechanism if allow_mechanism => MECHANISM,
            other => return Err(unexpected_attribute(reader, other)),
        };
        definition.parse_and_set(&value, attribute, &mut operation.params, position)?;
    }
    required.finish(reader.local_name(), position)?;
    list.push(operation)?;

    let mut seen = ElementSet::empty();
    while let Some(element) = next_element(reader, namespace)? {
        match element {
            Element::Properties => {
                seen.require_once(element, reader.location())?;
                parse_properties(reader, namespace, &address, list, false)?;
            }
            _ => return Err(unexpected_element(reader)),
        }
    }
    Ok(())
}

fn parse_users(
    reader: &mut dyn DocumentReader,
    namespace: Namespace,
    realm: &PathAddress,
    list: &mut OperationList,
) -> ParseResult<()> {
    require_no_attributes(reader)?;

    let address = realm.append(keys::AUTHENTICATION, keys::USERS);
    list.push(Operation::add(address.clone()))?;

    let mut usernames = NameSet::new();
    while let Some(element) = next_element(reader, namespace)? {
        match element {
            Element::User => {
                let position = reader.location();
                let username = require_single_attribute(reader, Attribute::Username)?;
                usernames.claim(Element::User, &username, position)?;
                list.push(parse_user(reader, namespace, &address, &username)?)?;
            }
            _ => return Err(unexpected_element(reader)),
        }
    }
    Ok(())
}

/// A `user` entry; its single `password` child carries the secret as text
fn parse_user(
    reader: &mut dyn DocumentReader,
    namespace: Namespace,
    users: &PathAddress,
    username: &str,
) -> ParseResult<Operation> {
    let mut password = None;

    while let Some(element) = next_element(reader, namespace)? {
        match element {
            Element::Password => {
                if password.is_some() {
                    return Err(ParseError::duplicate_element(
                        element.local_name(),
                        reader.location(),
                    ));
                }
                require_no_attributes(reader)?;
                password = Some(reader.element_text()?.trim().to_string());
            }
            _ => return Err(unexpected_element(reader)),
        }
    }

    let password = match password {
        Some(password) if !password.is_empty() => password,
        _ => {
            return Err(ParseError::missing_required_element(
                &[Element::Password.local_name()],
                reader.location(),
            ))
        }
    };

    let value = if is_expression(&password) {
        ParamValue::Expression(password)
    } else {
        ParamValue::String(password)
    };
    let mut operation = Operation::add(users.append(keys::USER, username));
    operation.params.set("password", value);
    Ok(operation)
}
