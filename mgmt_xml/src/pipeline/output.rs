use super::result::PipelineResult;
use crate::model::Operation;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// JSON form of a pipeline run
#[derive(Debug, Serialize)]
pub struct PipelineOutput<'a> {
    pub namespace: &'static str,
    pub completed_at: DateTime<Utc>,
    pub operation_count: usize,
    pub statistics: BTreeMap<String, usize>,
    pub operations: &'a [Operation],
}

impl<'a> PipelineOutput<'a> {
    pub fn new(result: &'a PipelineResult) -> Self {
        Self {
            namespace: result.namespace.uri(),
            completed_at: result.completed_at,
            operation_count: result.operations.len(),
            statistics: result.statistics(),
            operations: result.operations.as_slice(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
