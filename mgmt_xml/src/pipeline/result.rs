use crate::file_processor::FileMetadata;
use crate::grammar::Namespace;
use crate::model::{OperationList, PathAddress};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::time::Duration;

/// Commands produced for one document, with what is known about the run
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub operations: OperationList,
    pub namespace: Namespace,
    pub base_address: PathAddress,
    /// Present when the source came from disk
    pub file_metadata: Option<FileMetadata>,
    pub source_size: usize,
    pub processing_duration: Duration,
    pub completed_at: DateTime<Utc>,
}

impl PipelineResult {
    pub fn new(
        operations: OperationList,
        namespace: Namespace,
        base_address: PathAddress,
        source_size: usize,
        processing_duration: Duration,
    ) -> Self {
        Self {
            operations,
            namespace,
            base_address,
            file_metadata: None,
            source_size,
            processing_duration,
            completed_at: Utc::now(),
        }
    }

    pub fn with_file_metadata(mut self, metadata: FileMetadata) -> Self {
        self.file_metadata = Some(metadata);
        self
    }

    /// Number of commands per resource kind, e.g. `security-realm => 2`
    pub fn statistics(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for operation in self.operations.iter() {
            *counts.entry(operation.kind().to_string()).or_insert(0) += 1;
        }
        counts
    }

    pub fn log_success(&self, source_name: &str) {
        if !crate::logging::config::log_performance_events() {
            crate::log_success!(
                crate::logging::codes::success::PIPELINE_COMPLETE,
                "Management document translated",
                "source" => source_name,
                "namespace" => self.namespace,
                "operations" => self.operations.len()
            );
            return;
        }

        let seconds = self.processing_duration.as_secs_f64();
        let bytes_per_sec = if seconds > 0.0 {
            self.source_size as f64 / seconds
        } else {
            0.0
        };
        crate::log_performance!(
            crate::logging::codes::success::PIPELINE_COMPLETE,
            "Management document translated",
            duration = self.processing_duration,
            "source" => source_name,
            "namespace" => self.namespace,
            "operations" => self.operations.len(),
            "processing_rate_bytes_per_sec" => format!("{:.0}", bytes_per_sec)
        );
    }
}
