//! `server-identities` and key material translation

use super::error::ParseResult;
use super::tracker::ElementSet;
use super::utils::{
    attributes, next_element, require_no_attributes, require_no_content,
    require_single_attribute, unexpected_attribute, unexpected_element,
};
use crate::grammar::{Attribute, Element, Namespace};
use crate::model::{keys, Operation, OperationList, Parameters, PathAddress};
use crate::reader::DocumentReader;
use crate::schema::{AttributeDefinition, RequiredAttributes};

const SECRET_VALUE: AttributeDefinition = AttributeDefinition::string("value");
const PROTOCOL: AttributeDefinition = AttributeDefinition::string("protocol");
const ENABLED_CIPHER_SUITES: AttributeDefinition =
    AttributeDefinition::list("enabled-cipher-suites");
const ENABLED_PROTOCOLS: AttributeDefinition = AttributeDefinition::list("enabled-protocols");

const KEYSTORE_PROVIDER: AttributeDefinition = AttributeDefinition::string("keystore-provider");
const KEYSTORE_PATH: AttributeDefinition = AttributeDefinition::string("keystore-path");
const KEYSTORE_RELATIVE_TO: AttributeDefinition =
    AttributeDefinition::string("keystore-relative-to");
const KEYSTORE_PASSWORD: AttributeDefinition = AttributeDefinition::string("keystore-password");
const ALIAS: AttributeDefinition = AttributeDefinition::string("alias");
const KEY_PASSWORD: AttributeDefinition = AttributeDefinition::string("key-password");
const GENERATE_SELF_SIGNED_CERTIFICATE_HOST: AttributeDefinition =
    AttributeDefinition::string("generate-self-signed-certificate-host");

const KEYTAB_PATH: AttributeDefinition = AttributeDefinition::string("path");
const KEYTAB_RELATIVE_TO: AttributeDefinition = AttributeDefinition::string("relative-to");
const FOR_HOSTS: AttributeDefinition = AttributeDefinition::list("for-hosts");
const DEBUG: AttributeDefinition = AttributeDefinition::boolean("debug");

pub fn parse_server_identities(
    reader: &mut dyn DocumentReader,
    namespace: Namespace,
    realm: &PathAddress,
    list: &mut OperationList,
) -> ParseResult<()> {
    require_no_attributes(reader)?;

    let mut seen = ElementSet::empty();
    while let Some(element) = next_element(reader, namespace)? {
        match element {
            Element::Secret => {
                seen.require_once(element, reader.location())?;
                list.push(parse_secret(reader, realm)?)?;
            }
            Element::Ssl => {
                seen.require_once(element, reader.location())?;
                list.push(parse_ssl(reader, namespace, realm)?)?;
            }
            Element::Kerberos => {
                seen.require_once(element, reader.location())?;
                parse_kerberos_identity(reader, namespace, realm, list)?;
            }
            _ => return Err(unexpected_element(reader)),
        }
    }
    Ok(())
}

fn parse_secret(reader: &mut dyn DocumentReader, realm: &PathAddress) -> ParseResult<Operation> {
    let position = reader.location();
    let value = require_single_attribute(reader, Attribute::Value)?;
    require_no_content(reader)?;

    let mut operation = Operation::add(realm.append(keys::SERVER_IDENTITY, keys::SECRET));
    SECRET_VALUE.parse_and_set(&value, Attribute::Value, &mut operation.params, position)?;
    Ok(operation)
}

/// The ssl command carries the parameters of its `engine` and `keystore`
/// children, so it is returned only after both were read.
fn parse_ssl(
    reader: &mut dyn DocumentReader,
    namespace: Namespace,
    realm: &PathAddress,
) -> ParseResult<Operation> {
    let position = reader.location();
    let mut operation = Operation::add(realm.append(keys::SERVER_IDENTITY, keys::SSL));

    for (attribute, value) in attributes(reader)? {
        match attribute {
            Attribute::Protocol => {
                PROTOCOL.parse_and_set(&value, attribute, &mut operation.params, position)?
            }
            other => return Err(unexpected_attribute(reader, other)),
        }
    }

    let mut seen = ElementSet::empty();
    while let Some(element) = next_element(reader, namespace)? {
        match element {
            Element::Engine => {
                seen.require_once(element, reader.location())?;
                parse_engine(reader, &mut operation.params)?;
            }
            Element::Keystore => {
                seen.require_once(element, reader.location())?;
                parse_key_material(reader, &mut operation.params, true)?;
            }
            _ => return Err(unexpected_element(reader)),
        }
    }
    Ok(operation)
}

fn parse_engine(reader: &mut dyn DocumentReader, params: &mut Parameters) -> ParseResult<()> {
    let position = reader.location();
    for (attribute, value) in attributes(reader)? {
        let definition = match attribute {
            Attribute::EnabledCipherSuites => ENABLED_CIPHER_SUITES,
            Attribute::EnabledProtocols => ENABLED_PROTOCOLS,
            other => return Err(unexpected_attribute(reader, other)),
        };
        definition.parse_and_set(&value, attribute, params, position)?;
    }
    require_no_content(reader)
}

/// Translate `keystore`/`truststore` attributes onto `params`.
///
/// `alias`, `key-password` and `generate-self-signed-certificate-host` are
/// only accepted in extended mode, which server identities use and trust
/// stores do not.
pub fn parse_key_material(
    reader: &mut dyn DocumentReader,
    params: &mut Parameters,
    extended: bool,
) -> ParseResult<()> {
    let position = reader.location();
    let mut required = RequiredAttributes::new(&[Attribute::KeystorePassword]);

    for (attribute, value) in attributes(reader)? {
        required.seen(attribute);
        let definition = match attribute {
            Attribute::Provider => KEYSTORE_PROVIDER,
            Attribute::Path => KEYSTORE_PATH,
            Attribute::RelativeTo => KEYSTORE_RELATIVE_TO,
            Attribute::KeystorePassword => KEYSTORE_PASSWORD,
            Attribute::Alias if extended => ALIAS,
            Attribute::KeyPassword if extended => KEY_PASSWORD,
            Attribute::GenerateSelfSignedCertificateHost if extended => {
                GENERATE_SELF_SIGNED_CERTIFICATE_HOST
            }
            other => return Err(unexpected_attribute(reader, other)),
        };
        definition.parse_and_set(&value, attribute, params, position)?;
    }
    required.finish(reader.local_name(), position)?;
    require_no_content(reader)
}

fn parse_kerberos_identity(
    reader: &mut dyn DocumentReader,
    namespace: Namespace,
    realm: &PathAddress,
    list: &mut OperationList,
) -> ParseResult<()> {
    require_no_attributes(reader)?;

    let address = realm.append(keys::SERVER_IDENTITY, keys::KERBEROS);
    list.push(Operation::add(address.clone()))?;

    while let Some(element) = next_element(reader, namespace)? {
        match element {
            Element::Keytab => list.push(parse_keytab(reader, &address)?)?,
            _ => return Err(unexpected_element(reader)),
        }
    }
    Ok(())
}

fn parse_keytab(reader: &mut dyn DocumentReader, kerberos: &PathAddress) -> ParseResult<Operation> {
    let position = reader.location();
    let mut required = RequiredAttributes::new(&[Attribute::Principal, Attribute::Path]);
    let mut principal = String::new();
    let mut params = Parameters::default();

    for (attribute, value) in attributes(reader)? {
        required.seen(attribute);
        let definition = match attribute {
            Attribute::Principal => {
                principal = value;
                continue;
            }
            Attribute::Path => KEYTAB_PATH,
            Attribute::RelativeTo => KEYTAB_RELATIVE_TO,
            Attribute::ForHosts => FOR_HOSTS,
            Attribute::Debug => DEBUG,
            other => return Err(unexpected_attribute(reader, other)),
        };
        definition.parse_and_set(&value, attribute, &mut params, position)?;
    }
    required.finish(reader.local_name(), position)?;
    require_no_content(reader)?;

    let mut operation = Operation::add(kerberos.append(keys::KEYTAB, &principal));
    operation.params = params;
    Ok(operation)
}
