//! Cursor helpers shared by every construct translator

use super::error::{ParseError, ParseResult};
use crate::grammar::{Attribute, Element, Namespace};
use crate::reader::{DocumentReader, ReaderError, Tag};
use crate::schema::RequiredAttributes;

/// Advance to the next child of the current scope.
///
/// Returns `None` on the scope's end tag. A child outside `namespace` is
/// rejected before its name is looked up.
pub fn next_element(
    reader: &mut dyn DocumentReader,
    namespace: Namespace,
) -> ParseResult<Option<Element>> {
    match reader.next_tag()? {
        Tag::End => Ok(None),
        Tag::Start => {
            require_namespace(reader, namespace)?;
            Ok(Some(Element::for_name(reader.local_name())))
        }
        Tag::EndOfDocument => Err(ReaderError::UnexpectedEndOfDocument {
            element: reader.local_name().to_string(),
            position: reader.location(),
        }
        .into()),
    }
}

pub fn require_namespace(reader: &dyn DocumentReader, namespace: Namespace) -> ParseResult<()> {
    match reader.namespace() {
        Some(uri) if uri == namespace.uri() => Ok(()),
        found => Err(ParseError::UnexpectedNamespace {
            element: reader.local_name().to_string(),
            found: found.unwrap_or("").to_string(),
            expected: namespace.uri().to_string(),
            position: reader.location(),
        }),
    }
}

/// Error for the element the cursor is on
pub fn unexpected_element(reader: &dyn DocumentReader) -> ParseError {
    ParseError::unexpected_element(reader.local_name(), reader.location())
}

pub fn unexpected_attribute(reader: &dyn DocumentReader, attribute: Attribute) -> ParseError {
    ParseError::unexpected_attribute(attribute.local_name(), reader.local_name(), reader.location())
}

/// Attributes of the current start tag, resolved against the vocabulary.
///
/// Namespace-qualified and unknown attributes are rejected here, so callers
/// only match the names their construct accepts.
pub fn attributes(reader: &dyn DocumentReader) -> ParseResult<Vec<(Attribute, String)>> {
    reader
        .attributes()
        .iter()
        .map(|attr| {
            let attribute = Attribute::for_name(&attr.local_name);
            if !attr.is_unqualified() || attribute == Attribute::Unknown {
                return Err(ParseError::unexpected_attribute(
                    &attr.local_name,
                    reader.local_name(),
                    reader.location(),
                ));
            }
            Ok((attribute, attr.value.clone()))
        })
        .collect()
}

pub fn require_no_attributes(reader: &dyn DocumentReader) -> ParseResult<()> {
    match reader.attributes().first() {
        Some(attr) => Err(ParseError::unexpected_attribute(
            &attr.local_name,
            reader.local_name(),
            reader.location(),
        )),
        None => Ok(()),
    }
}

/// Consume the end tag of the current element, rejecting any child
pub fn require_no_content(reader: &mut dyn DocumentReader) -> ParseResult<()> {
    match reader.next_tag()? {
        Tag::End => Ok(()),
        Tag::Start => Err(unexpected_element(reader)),
        Tag::EndOfDocument => Err(ReaderError::UnexpectedEndOfDocument {
            element: reader.local_name().to_string(),
            position: reader.location(),
        }
        .into()),
    }
}

/// Value of the only attribute the current element may carry
pub fn require_single_attribute(
    reader: &dyn DocumentReader,
    attribute: Attribute,
) -> ParseResult<String> {
    let mut required = RequiredAttributes::new(&[attribute]);
    let mut value = None;

    for (found, raw) in attributes(reader)? {
        if found != attribute {
            return Err(unexpected_attribute(reader, found));
        }
        required.seen(found);
        value = Some(raw);
    }

    required.finish(reader.local_name(), reader.location())?;
    Ok(value.unwrap_or_default())
}

/// Single-attribute element with no content, e.g. `<username-filter attribute="uid"/>`
pub fn read_string_attribute_element(
    reader: &mut dyn DocumentReader,
    attribute: Attribute,
) -> ParseResult<String> {
    let value = require_single_attribute(reader, attribute)?;
    require_no_content(reader)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::XmlStreamReader;
    use assert_matches::assert_matches;

    const NS: Namespace = Namespace::Domain4_0;

    fn positioned(fragment: &str) -> XmlStreamReader<'_> {
        let mut reader = XmlStreamReader::new(fragment);
        assert_eq!(reader.next_tag().unwrap(), Tag::Start);
        reader
    }

    #[test]
    fn test_next_element_checks_namespace() {
        let source = r#"<a xmlns="urn:jboss:domain:4.0"><cache/><x:cache xmlns:x="urn:other"/></a>"#;
        let mut reader = positioned(source);

        assert_eq!(next_element(&mut reader, NS).unwrap(), Some(Element::Cache));
        assert_eq!(reader.next_tag().unwrap(), Tag::End);
        assert_matches!(
            next_element(&mut reader, NS),
            Err(ParseError::UnexpectedNamespace { ref found, .. }) if found == "urn:other"
        );
    }

    #[test]
    fn test_unknown_child_resolves_to_unknown() {
        let mut reader = positioned(r#"<a xmlns="urn:jboss:domain:4.0"><bogus/></a>"#);
        assert_eq!(next_element(&mut reader, NS).unwrap(), Some(Element::Unknown));
    }

    #[test]
    fn test_attributes_reject_unknown_and_qualified() {
        let reader = positioned(r#"<cache type="by-access-time" max-cache-size="5"/>"#);
        let attrs = attributes(&reader).unwrap();
        assert_eq!(attrs[0], (Attribute::Type, "by-access-time".to_string()));
        assert_eq!(attrs[1], (Attribute::MaxCacheSize, "5".to_string()));

        let reader = positioned(r#"<cache colour="red"/>"#);
        assert_matches!(
            attributes(&reader),
            Err(ParseError::UnexpectedAttribute { ref attribute, .. }) if attribute == "colour"
        );

        let reader = positioned(r#"<cache xmlns:x="urn:x" x:type="by-access-time"/>"#);
        assert_matches!(attributes(&reader), Err(ParseError::UnexpectedAttribute { .. }));
    }

    #[test]
    fn test_single_attribute() {
        let mut reader = positioned(r#"<username-filter attribute="uid"/>"#);
        assert_eq!(
            read_string_attribute_element(&mut reader, Attribute::Attribute).unwrap(),
            "uid"
        );

        let reader = positioned(r#"<username-filter/>"#);
        assert_matches!(
            require_single_attribute(&reader, Attribute::Attribute),
            Err(ParseError::MissingRequiredAttributes { ref attributes, .. }) if attributes == &["attribute"]
        );

        let reader = positioned(r#"<username-filter attribute="uid" base-dn="dc=x"/>"#);
        assert_matches!(
            require_single_attribute(&reader, Attribute::Attribute),
            Err(ParseError::UnexpectedAttribute { ref attribute, .. }) if attribute == "base-dn"
        );
    }

    #[test]
    fn test_require_no_content() {
        let mut reader = positioned(r#"<secret value="x"><extra/></secret>"#);
        assert_matches!(
            require_no_content(&mut reader),
            Err(ParseError::UnexpectedElement { ref element, .. }) if element == "extra"
        );

        let mut reader = positioned(r#"<secret value="x"/>"#);
        assert!(require_no_content(&mut reader).is_ok());
    }
}
