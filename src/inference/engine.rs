//! Inference entry points and source dispatch

use crate::contract::FieldDescriptor;
use crate::error::{ContractError, ContractResult};
use crate::inference::assembler::{self, FieldObservation};
use crate::inference::type_resolver::resolve_sql_type;
use crate::inference::{ddl, json_sample, tabular};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Which source reader parses the raw sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// SQL DDL text (a CREATE TABLE statement)
    Database,
    /// A JSON API response document
    Api,
    /// CSV text or a JSON array uploaded as a file
    File,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Database => "database",
            SourceType::Api => "api",
            SourceType::File => "file",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SourceType {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "database" => Ok(Self::Database),
            "api" => Ok(Self::Api),
            "file" => Ok(Self::File),
            other => Err(ContractError::invalid_contract(format!(
                "unknown source type '{}'",
                other
            ))),
        }
    }
}

/// Optional caller-provided context for a sample. Informational only;
/// parsing never depends on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleHints {
    /// Table name for database sources
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    /// Endpoint URL for API sources
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,
}

/// Knobs for the inference pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InferenceOptions {
    /// Emit dotted descriptors for nested JSON objects and arrays of
    /// objects, up to two levels deep. Off by default: nested values are
    /// typed `object`/`array` without expansion.
    pub flatten_nested: bool,
}

/// Stateless service that turns raw samples into field descriptors.
///
/// Safe to share and call concurrently; every call allocates its own
/// working structures and returns a fresh list.
#[derive(Debug, Clone, Copy, Default)]
pub struct InferenceEngine {
    options: InferenceOptions,
}

impl InferenceEngine {
    /// Create an engine with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with explicit options.
    pub fn with_options(options: InferenceOptions) -> Self {
        Self { options }
    }

    /// Infer an ordered field-descriptor list from one raw sample.
    pub fn infer(
        &self,
        source: SourceType,
        raw_sample: &str,
        hints: &SampleHints,
    ) -> ContractResult<Vec<FieldDescriptor>> {
        let sample = raw_sample.trim();
        if sample.is_empty() {
            return Err(ContractError::malformed_schema("source sample is empty"));
        }

        let observations = match source {
            SourceType::Database => self.from_database(sample, hints)?,
            SourceType::Api => self.from_api(sample, hints)?,
            SourceType::File => self.from_file(sample)?,
        };

        let descriptors = assembler::assemble(observations)?;
        info!(
            "Inferred {} field(s) from {} sample",
            descriptors.len(),
            source
        );
        Ok(descriptors)
    }

    fn from_database(
        &self,
        sample: &str,
        hints: &SampleHints,
    ) -> ContractResult<Vec<FieldObservation>> {
        if let Some(table) = hints.table_name.as_deref() {
            debug!("Parsing DDL sample for table '{}'", table);
        }
        let columns = ddl::parse_columns(sample)?;
        Ok(columns
            .into_iter()
            .map(|column| {
                let field_type = resolve_sql_type(&column.sql_type);
                FieldObservation::new(column.name, field_type, column.required)
                    .with_constraints(column.constraints)
            })
            .collect())
    }

    fn from_api(
        &self,
        sample: &str,
        hints: &SampleHints,
    ) -> ContractResult<Vec<FieldObservation>> {
        if let Some(url) = hints.endpoint_url.as_deref() {
            debug!("Analyzing API response sample from '{}'", url);
        }
        let value: Value = serde_json::from_str(sample).map_err(|e| {
            ContractError::malformed_schema(format!("invalid JSON in API sample: {}", e))
        })?;
        json_sample::analyze_value(&value, self.options.flatten_nested)
    }

    /// File format is auto-detected: JSON parse first, CSV on failure.
    fn from_file(&self, sample: &str) -> ContractResult<Vec<FieldObservation>> {
        match serde_json::from_str::<Value>(sample) {
            Ok(Value::Array(items)) => {
                debug!("File sample detected as a JSON array");
                tabular::analyze_json_rows(&items)
            }
            Ok(value @ Value::Object(_)) => {
                debug!("File sample detected as a JSON object");
                json_sample::analyze_value(&value, self.options.flatten_nested)
            }
            _ => tabular::analyze_csv(sample),
        }
    }
}

/// Infer fields from one raw sample with default options.
///
/// This is the single logical operation the engine exposes to the CRUD/API
/// layer; see [`InferenceEngine::infer`].
pub fn infer_fields(
    source: SourceType,
    raw_sample: &str,
    hints: &SampleHints,
) -> ContractResult<Vec<FieldDescriptor>> {
    InferenceEngine::new().infer(source, raw_sample, hints)
}
