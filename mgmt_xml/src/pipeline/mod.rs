//! Document to command list pipeline
//!
//! Loads a document, locates its `management` element, resolves the grammar
//! version from the root namespace and runs [`ManagementXml`] over it.

mod error;
pub mod output;
mod result;

pub use error::PipelineError;
pub use output::PipelineOutput;
pub use result::PipelineResult;

use crate::config::runtime::{DocumentPreferences, TranslationPreferences};
use crate::file_processor::create_processor_from_preferences;
use crate::log_debug;
use crate::grammar::{Element, Namespace};
use crate::logging;
use crate::model::{keys, OperationList, PathAddress};
use crate::parsing::{ManagementXml, ParseError};
use crate::reader::{DocumentReader, Tag, XmlStreamReader};
use std::path::PathBuf;
use std::time::Instant;

/// What the pipeline translates for, and where the commands are rooted
#[derive(Debug, Clone, Default)]
pub struct TranslationOptions {
    /// `host=<name>` is prefixed onto every address when set
    pub host_name: Option<String>,
    pub require_native_interface: bool,
    pub log_emitted_operations: bool,
    /// How documents are loaded by [`process_file`]
    pub document: DocumentPreferences,
}

impl TranslationOptions {
    pub fn from_preferences(prefs: &TranslationPreferences) -> Self {
        Self {
            host_name: prefs.host_name.clone(),
            require_native_interface: prefs.require_native_interface,
            log_emitted_operations: prefs.log_emitted_operations,
            document: DocumentPreferences::default(),
        }
    }

    pub fn with_document_preferences(mut self, document: DocumentPreferences) -> Self {
        self.document = document;
        self
    }

    pub fn with_host(mut self, host_name: &str) -> Self {
        self.host_name = Some(host_name.to_string());
        self
    }

    pub fn with_native_interface_required(mut self, required: bool) -> Self {
        self.require_native_interface = required;
        self
    }

    pub fn base_address(&self) -> PathAddress {
        match &self.host_name {
            Some(host) => PathAddress::root().append(keys::HOST, host),
            None => PathAddress::root(),
        }
    }
}

/// Load a document from disk and translate it
pub fn process_file(
    file_path: &str,
    options: &TranslationOptions,
) -> Result<PipelineResult, PipelineError> {
    logging::with_document_context(PathBuf::from(file_path), 0, || {
        crate::log_info!("Starting management document pipeline", "file" => file_path);

        let start_time = Instant::now();
        let file_result =
            create_processor_from_preferences(&options.document).process_file(file_path)?;
        let (operations, namespace) = translate_document(&file_result.source, options)?;

        let result = PipelineResult::new(
            operations,
            namespace,
            options.base_address(),
            file_result.source.len(),
            start_time.elapsed(),
        )
        .with_file_metadata(file_result.metadata);

        result.log_success(file_path);
        Ok(result)
    })
}

/// Translate a document already in memory
pub fn process_source(
    source: &str,
    options: &TranslationOptions,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();
    let (operations, namespace) = translate_document(source, options)?;

    let result = PipelineResult::new(
        operations,
        namespace,
        options.base_address(),
        source.len(),
        start_time.elapsed(),
    );
    result.log_success("<memory>");
    Ok(result)
}

/// The root is either `management` itself or a `server`, `host` or `domain`
/// element whose other children are skipped.
fn translate_document(
    source: &str,
    options: &TranslationOptions,
) -> Result<(OperationList, Namespace), PipelineError> {
    let mut reader = XmlStreamReader::new(source);

    if reader.next_tag()? != Tag::Start {
        return Err(PipelineError::MissingManagementElement {
            root: "none".to_string(),
        });
    }

    let namespace = resolve_namespace(&reader)?;
    let root = reader.local_name().to_string();
    let base = options.base_address();
    let mut xml = ManagementXml::new(namespace);
    let mut operations = OperationList::new();

    log_debug!("Document root located", "root" => &root, "namespace" => namespace);

    match Element::for_name(&root) {
        Element::Management => {
            xml.parse_management(
                &mut reader,
                &base,
                &mut operations,
                options.require_native_interface,
            )?;
        }
        element if element.is_document_root() => {
            let mut found = false;
            loop {
                match reader.next_tag()? {
                    Tag::Start if is_management(&reader, namespace) => {
                        if found {
                            return Err(ParseError::duplicate_element(
                                Element::Management.local_name(),
                                reader.location(),
                            )
                            .into());
                        }
                        found = true;
                        xml.parse_management(
                            &mut reader,
                            &base,
                            &mut operations,
                            options.require_native_interface,
                        )?;
                    }
                    Tag::Start => reader.skip_element()?,
                    Tag::End | Tag::EndOfDocument => break,
                }
            }
            if !found {
                return Err(PipelineError::MissingManagementElement { root });
            }
        }
        _ => return Err(PipelineError::MissingManagementElement { root }),
    }

    if options.log_emitted_operations {
        for operation in operations.iter() {
            log_debug!("Emitted operation", "operation" => operation);
        }
    }

    Ok((operations, namespace))
}

fn resolve_namespace(reader: &dyn DocumentReader) -> Result<Namespace, PipelineError> {
    reader
        .namespace()
        .and_then(Namespace::for_uri)
        .ok_or_else(|| PipelineError::UnsupportedNamespace {
            namespace: reader.namespace().map(str::to_string),
        })
}

fn is_management(reader: &dyn DocumentReader, namespace: Namespace) -> bool {
    reader.local_name() == Element::Management.local_name()
        && reader.namespace() == Some(namespace.uri())
}
