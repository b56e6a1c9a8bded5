//! `DocumentReader` over quick-xml's namespace-aware pull parser

use super::{DocumentReader, ReaderError, ReaderResult, Tag, XmlAttribute};
use crate::config::compile_time::grammar::{MAX_ATTRIBUTES_PER_ELEMENT, MAX_NESTING_DEPTH};
use crate::utils::{Position, SourceMap};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;

#[derive(Debug, Clone, Default)]
struct CurrentTag {
    local_name: String,
    namespace: Option<String>,
    attributes: Vec<XmlAttribute>,
    position: Position,
}

/// Streaming reader over an in-memory document
pub struct XmlStreamReader<'a> {
    reader: NsReader<&'a [u8]>,
    source: &'a str,
    source_map: SourceMap,
    open_elements: Vec<String>,
    current: CurrentTag,
}

fn namespace_uri(result: ResolveResult<'_>) -> Result<Option<String>, String> {
    match result {
        ResolveResult::Bound(namespace) => {
            Ok(Some(String::from_utf8_lossy(namespace.as_ref()).into_owned()))
        }
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(format!(
            "unknown namespace prefix '{}'",
            String::from_utf8_lossy(&prefix)
        )),
    }
}

impl<'a> XmlStreamReader<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut reader = NsReader::from_str(source);
        let config = reader.config_mut();
        config.expand_empty_elements = true;
        config.trim_text(true);

        Self {
            reader,
            source,
            source_map: SourceMap::new(source),
            open_elements: Vec::new(),
            current: CurrentTag::default(),
        }
    }

    fn offset(&self) -> usize {
        usize::try_from(self.reader.buffer_position())
            .unwrap_or(usize::MAX)
            .min(self.source.len())
    }

    /// Start of the tag that ends at the current buffer offset
    fn tag_position(&self) -> Position {
        let end = self.offset();
        let start = self
            .source
            .get(..end)
            .and_then(|consumed| consumed.rfind('<'))
            .unwrap_or(0);
        self.source_map.position_at(start)
    }

    fn error_position(&self) -> Position {
        let offset = usize::try_from(self.reader.error_position())
            .unwrap_or(usize::MAX)
            .min(self.source.len());
        self.source_map.position_at(offset)
    }

    fn end_of_input(&self) -> Position {
        self.source_map.position_at(self.source.len())
    }

    fn read_event(&mut self) -> ReaderResult<(Result<Option<String>, String>, Event<'a>)> {
        let result = self
            .reader
            .read_resolved_event()
            .map(|(namespace, event)| (namespace_uri(namespace), event));

        result.map_err(|e| ReaderError::malformed(e.to_string(), self.error_position()))
    }

    fn open_element(
        &mut self,
        start: &BytesStart<'_>,
        namespace: Result<Option<String>, String>,
    ) -> ReaderResult<()> {
        let position = self.tag_position();
        let namespace = namespace.map_err(|m| ReaderError::malformed(m, position))?;
        let local_name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();

        let depth = self.open_elements.len() + 1;
        if depth > MAX_NESTING_DEPTH {
            return Err(ReaderError::NestingTooDeep {
                depth,
                max: MAX_NESTING_DEPTH,
                position,
            });
        }

        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| ReaderError::malformed(e.to_string(), position))?;
            if attribute.key.as_namespace_binding().is_some() {
                continue;
            }

            let (resolved, attribute_name) = self.reader.resolve_attribute(attribute.key);
            let attribute_namespace =
                namespace_uri(resolved).map_err(|m| ReaderError::malformed(m, position))?;
            let value = attribute
                .unescape_value()
                .map_err(|e| ReaderError::malformed(e.to_string(), position))?;

            attributes.push(XmlAttribute {
                namespace: attribute_namespace,
                local_name: String::from_utf8_lossy(attribute_name.as_ref()).into_owned(),
                value: value.into_owned(),
            });
        }

        if attributes.len() > MAX_ATTRIBUTES_PER_ELEMENT {
            return Err(ReaderError::TooManyAttributes {
                element: local_name,
                count: attributes.len(),
                max: MAX_ATTRIBUTES_PER_ELEMENT,
                position,
            });
        }

        self.open_elements.push(local_name.clone());
        self.current = CurrentTag {
            local_name,
            namespace,
            attributes,
            position,
        };
        Ok(())
    }

    fn close_element(
        &mut self,
        end: &BytesEnd<'_>,
        namespace: Result<Option<String>, String>,
    ) -> ReaderResult<()> {
        let position = self.tag_position();
        let namespace = namespace.map_err(|m| ReaderError::malformed(m, position))?;

        self.open_elements.pop();
        self.current = CurrentTag {
            local_name: String::from_utf8_lossy(end.local_name().as_ref()).into_owned(),
            namespace,
            attributes: Vec::new(),
            position,
        };
        Ok(())
    }

    fn unexpected_end(&self) -> ReaderError {
        ReaderError::UnexpectedEndOfDocument {
            element: self
                .open_elements
                .last()
                .cloned()
                .unwrap_or_else(|| self.current.local_name.clone()),
            position: self.end_of_input(),
        }
    }
}

impl<'a> DocumentReader for XmlStreamReader<'a> {
    fn next_tag(&mut self) -> ReaderResult<Tag> {
        loop {
            let before = self.offset();
            let (namespace, event) = self.read_event()?;

            match event {
                Event::Start(start) => {
                    self.open_element(&start, namespace)?;
                    return Ok(Tag::Start);
                }
                Event::End(end) => {
                    self.close_element(&end, namespace)?;
                    return Ok(Tag::End);
                }
                Event::Text(text) => {
                    let position = self.source_map.position_at(before);
                    let content = text
                        .unescape()
                        .map_err(|e| ReaderError::malformed(e.to_string(), position))?;
                    if !content.trim().is_empty() {
                        return Err(ReaderError::unexpected_content(content.trim(), position));
                    }
                }
                Event::CData(data) => {
                    let content = String::from_utf8_lossy(&data).into_owned();
                    if !content.trim().is_empty() {
                        return Err(ReaderError::unexpected_content(
                            content.trim(),
                            self.source_map.position_at(before),
                        ));
                    }
                }
                Event::Empty(_) => {
                    return Err(ReaderError::malformed(
                        "empty element was not expanded",
                        self.tag_position(),
                    ));
                }
                Event::Eof => {
                    if !self.open_elements.is_empty() {
                        return Err(self.unexpected_end());
                    }
                    return Ok(Tag::EndOfDocument);
                }
                // Declarations, comments, processing instructions, doctype
                _ => {}
            }
        }
    }

    fn local_name(&self) -> &str {
        &self.current.local_name
    }

    fn namespace(&self) -> Option<&str> {
        self.current.namespace.as_deref()
    }

    fn attributes(&self) -> &[XmlAttribute] {
        &self.current.attributes
    }

    fn element_text(&mut self) -> ReaderResult<String> {
        let mut text = String::new();

        loop {
            let before = self.offset();
            let (namespace, event) = self.read_event()?;

            match event {
                Event::Text(chunk) => {
                    let position = self.source_map.position_at(before);
                    let chunk = chunk
                        .unescape()
                        .map_err(|e| ReaderError::malformed(e.to_string(), position))?;
                    text.push_str(&chunk);
                }
                Event::CData(data) => text.push_str(&String::from_utf8_lossy(&data)),
                Event::End(end) => {
                    self.close_element(&end, namespace)?;
                    return Ok(text);
                }
                Event::Start(start) | Event::Empty(start) => {
                    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
                    return Err(ReaderError::unexpected_content(
                        &format!("<{}>", name),
                        self.tag_position(),
                    ));
                }
                Event::Eof => return Err(self.unexpected_end()),
                _ => {}
            }
        }
    }

    fn skip_element(&mut self) -> ReaderResult<()> {
        let target = self.open_elements.len().saturating_sub(1);

        while self.open_elements.len() > target {
            let (namespace, event) = self.read_event()?;
            match event {
                Event::Start(start) => self.open_element(&start, namespace)?,
                Event::End(end) => self.close_element(&end, namespace)?,
                Event::Eof => return Err(self.unexpected_end()),
                _ => {}
            }
        }

        Ok(())
    }

    fn location(&self) -> Position {
        self.current.position
    }

    fn depth(&self) -> usize {
        self.open_elements.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const NS: &str = "urn:jboss:domain:4.0";

    #[test]
    fn test_walks_start_and_end_tags() {
        let source = format!(r#"<management xmlns="{NS}"><security-realms/></management>"#);
        let mut reader = XmlStreamReader::new(&source);

        assert_eq!(reader.next_tag().unwrap(), Tag::Start);
        assert_eq!(reader.local_name(), "management");
        assert_eq!(reader.namespace(), Some(NS));
        assert!(reader.attributes().is_empty());

        assert_eq!(reader.next_tag().unwrap(), Tag::Start);
        assert_eq!(reader.local_name(), "security-realms");
        assert_eq!(reader.depth(), 2);

        assert_eq!(reader.next_tag().unwrap(), Tag::End);
        assert_eq!(reader.local_name(), "security-realms");
        assert_eq!(reader.next_tag().unwrap(), Tag::End);
        assert_eq!(reader.next_tag().unwrap(), Tag::EndOfDocument);
    }

    #[test]
    fn test_attributes_exclude_namespace_declarations() {
        let source = format!(
            r#"<ldap xmlns="{NS}" xmlns:x="urn:other" name="ldap1" x:extra="1" url="ldap://host"/>"#
        );
        let mut reader = XmlStreamReader::new(&source);
        reader.next_tag().unwrap();

        let attributes = reader.attributes();
        assert_eq!(attributes.len(), 3);
        assert_eq!(attributes[0], XmlAttribute::new("name", "ldap1"));
        assert_eq!(attributes[1].namespace.as_deref(), Some("urn:other"));
        assert_eq!(attributes[1].local_name, "extra");
        assert!(attributes[2].is_unqualified());
    }

    #[test]
    fn test_attribute_values_are_unescaped() {
        let mut reader = XmlStreamReader::new(r#"<advanced-filter filter="(&amp;(uid={0}))"/>"#);
        reader.next_tag().unwrap();
        assert_eq!(reader.attributes()[0].value, "(&(uid={0}))");
    }

    #[test]
    fn test_comments_and_whitespace_are_skipped() {
        let mut reader = XmlStreamReader::new("<?xml version=\"1.0\"?>\n<!-- c -->\n<a>\n  <!-- c -->\n</a>");
        assert_eq!(reader.next_tag().unwrap(), Tag::Start);
        assert_eq!(reader.next_tag().unwrap(), Tag::End);
        assert_eq!(reader.next_tag().unwrap(), Tag::EndOfDocument);
    }

    #[test]
    fn test_text_between_tags_is_rejected() {
        let mut reader = XmlStreamReader::new("<a>stray</a>");
        reader.next_tag().unwrap();
        assert_matches!(
            reader.next_tag(),
            Err(ReaderError::UnexpectedContent { content, .. }) if content == "stray"
        );
    }

    #[test]
    fn test_element_text() {
        let mut reader = XmlStreamReader::new("<user><password>s&amp;cret</password></user>");
        reader.next_tag().unwrap();
        reader.next_tag().unwrap();
        assert_eq!(reader.element_text().unwrap(), "s&cret");
        assert_eq!(reader.local_name(), "password");
        assert_eq!(reader.depth(), 1);
        assert_eq!(reader.next_tag().unwrap(), Tag::End);
    }

    #[test]
    fn test_element_text_of_empty_element() {
        let mut reader = XmlStreamReader::new("<password/>");
        reader.next_tag().unwrap();
        assert_eq!(reader.element_text().unwrap(), "");
    }

    #[test]
    fn test_element_text_rejects_child_elements() {
        let mut reader = XmlStreamReader::new("<password><b/></password>");
        reader.next_tag().unwrap();
        assert_matches!(
            reader.element_text(),
            Err(ReaderError::UnexpectedContent { content, .. }) if content == "<b>"
        );
    }

    #[test]
    fn test_location_is_tag_start() {
        let mut reader = XmlStreamReader::new("<a>\n  <b/>\n</a>");
        reader.next_tag().unwrap();
        assert_eq!(reader.location(), Position::new(0, 1, 1));
        reader.next_tag().unwrap();
        assert_eq!(reader.location().line, 2);
        assert_eq!(reader.location().column, 3);
    }

    #[test]
    fn test_skip_element_ignores_content() {
        let mut reader = XmlStreamReader::new("<root><profile><x>text</x><y/></profile><management/></root>");
        reader.next_tag().unwrap();
        reader.next_tag().unwrap();
        assert_eq!(reader.local_name(), "profile");

        reader.skip_element().unwrap();
        assert_eq!(reader.depth(), 1);

        assert_eq!(reader.next_tag().unwrap(), Tag::Start);
        assert_eq!(reader.local_name(), "management");
    }

    #[test]
    fn test_nesting_limit() {
        let depth = MAX_NESTING_DEPTH + 1;
        let source = format!("{}{}", "<e>".repeat(depth), "</e>".repeat(depth));
        let mut reader = XmlStreamReader::new(&source);

        let error = loop {
            match reader.next_tag() {
                Ok(Tag::Start) => continue,
                Ok(other) => panic!("unexpected tag {:?}", other),
                Err(error) => break error,
            }
        };
        assert_matches!(error, ReaderError::NestingTooDeep { depth: d, .. } if d == depth);
    }

    #[test]
    fn test_unclosed_document_fails() {
        let mut reader = XmlStreamReader::new("<a><b></b>");
        reader.next_tag().unwrap();
        reader.next_tag().unwrap();
        reader.next_tag().unwrap();
        assert!(reader.next_tag().is_err());
    }

    #[test]
    fn test_unknown_prefix_is_malformed() {
        let mut reader = XmlStreamReader::new("<x:a/>");
        assert_matches!(reader.next_tag(), Err(ReaderError::Malformed { .. }));
    }
}
