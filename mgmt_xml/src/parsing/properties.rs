//! `properties` bags of named `property` entries

use super::error::ParseResult;
use super::tracker::NameSet;
use super::utils::{
    attributes, next_element, require_no_attributes, require_no_content, unexpected_attribute,
    unexpected_element,
};
use crate::grammar::{Attribute, Element, Namespace};
use crate::model::{keys, Operation, OperationList, Parameters, PathAddress};
use crate::reader::DocumentReader;
use crate::schema::{AttributeDefinition, RequiredAttributes};

const VALUE: AttributeDefinition = AttributeDefinition::string("value");

/// Translate a `properties` element into one command per entry under `owner`.
///
/// Connection properties carry a mandatory value; plug-in properties may
/// omit it.
pub fn parse_properties(
    reader: &mut dyn DocumentReader,
    namespace: Namespace,
    owner: &PathAddress,
    list: &mut OperationList,
    require_value: bool,
) -> ParseResult<()> {
    require_no_attributes(reader)?;

    let mut names = NameSet::new();
    while let Some(element) = next_element(reader, namespace)? {
        match element {
            Element::Property => {
                let operation = parse_property(reader, owner, &mut names, require_value)?;
                list.push(operation)?;
            }
            _ => return Err(unexpected_element(reader)),
        }
    }
    Ok(())
}

fn parse_property(
    reader: &mut dyn DocumentReader,
    owner: &PathAddress,
    names: &mut NameSet,
    require_value: bool,
) -> ParseResult<Operation> {
    let position = reader.location();
    let mut required = if require_value {
        RequiredAttributes::new(&[Attribute::Name, Attribute::Value])
    } else {
        RequiredAttributes::new(&[Attribute::Name])
    };

    let mut name = String::new();
    let mut params = Parameters::default();
    for (attribute, value) in attributes(reader)? {
        required.seen(attribute);
        match attribute {
            Attribute::Name => name = value,
            Attribute::Value => VALUE.parse_and_set(&value, attribute, &mut params, position)?,
            other => return Err(unexpected_attribute(reader, other)),
        }
    }
    required.finish(reader.local_name(), position)?;
    names.claim(Element::Property, &name, position)?;
    require_no_content(reader)?;

    let mut operation = Operation::add(owner.append(keys::PROPERTY, &name));
    operation.params = params;
    Ok(operation)
}
