//! Field inference from delimited/tabular sample data
//!
//! CSV text and JSON arrays of flat objects both reduce to one "rows of
//! named values" abstraction. Unlike the single-document JSON analyzer,
//! every row is inspected: tabular sources carry enough rows to
//! disambiguate a type confidently, and a one-row peek would misclassify a
//! numeric-looking string column.

use crate::contract::FieldType;
use crate::error::{ContractError, ContractResult};
use crate::inference::assembler::FieldObservation;
use crate::inference::timestamps::looks_like_timestamp;
use log::warn;
use serde_json::Value;

/// Tokens a text column may use for booleans, case-insensitive.
const BOOLEAN_TOKENS: &[&str] = &["true", "false", "1", "0", "yes", "no"];

/// Infer field observations from CSV text: first line is the header,
/// every following non-blank line is a data row.
pub fn analyze_csv(text: &str) -> ContractResult<Vec<FieldObservation>> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());

    let header_line = lines
        .next()
        .ok_or_else(|| ContractError::malformed_schema("CSV sample contains no header line"))?;
    let headers: Vec<String> = header_line.split(',').map(clean_cell).collect();

    let rows: Vec<Vec<String>> = lines
        .map(|line| line.split(',').map(clean_cell).collect())
        .collect();

    let mut observations = Vec::with_capacity(headers.len());
    for (index, header) in headers.iter().enumerate() {
        if header.is_empty() {
            warn!("Skipping unnamed CSV column at position {}", index);
            continue;
        }

        let mut values = Vec::with_capacity(rows.len());
        let mut required = true;
        for row in &rows {
            match row.get(index) {
                Some(cell) if !cell.is_empty() => values.push(cell.as_str()),
                // empty or missing cell: the column is optional
                _ => required = false,
            }
        }

        observations.push(FieldObservation::new(
            header,
            infer_text_type(&values),
            required,
        ));
    }

    if observations.is_empty() {
        return Err(ContractError::malformed_schema(
            "CSV sample contains no usable columns",
        ));
    }
    Ok(observations)
}

fn clean_cell(cell: &str) -> String {
    cell.trim().trim_matches('"').trim().to_string()
}

/// Resolve a column type from its non-empty sample values, trying the most
/// strict interpretation first: integer, float, boolean, timestamp, then
/// string.
pub fn infer_text_type(values: &[&str]) -> FieldType {
    if values.is_empty() {
        return FieldType::String;
    }
    if values.iter().all(|v| v.parse::<i64>().is_ok()) {
        return FieldType::Integer;
    }
    if values.iter().all(|v| v.parse::<f64>().is_ok()) {
        return FieldType::Float;
    }
    if values
        .iter()
        .all(|v| BOOLEAN_TOKENS.contains(&v.to_ascii_lowercase().as_str()))
    {
        return FieldType::Boolean;
    }
    if values.iter().all(|v| looks_like_timestamp(v)) {
        return FieldType::Timestamp;
    }
    FieldType::String
}

/// Infer field observations from a JSON array treated as rows of named
/// values. Column order is the first row's key order, extended by keys
/// first seen in later rows.
pub fn analyze_json_rows(items: &[Value]) -> ContractResult<Vec<FieldObservation>> {
    if items.is_empty() {
        return Err(ContractError::malformed_schema(
            "file sample contains no rows",
        ));
    }
    if !items.iter().all(Value::is_object) {
        return Err(ContractError::malformed_schema(
            "file sample array must contain only objects",
        ));
    }

    let mut order: Vec<&str> = Vec::new();
    for item in items {
        if let Some(object) = item.as_object() {
            for key in object.keys() {
                if !order.iter().any(|existing| *existing == key.as_str()) {
                    order.push(key.as_str());
                }
            }
        }
    }

    let mut observations = Vec::with_capacity(order.len());
    for key in order {
        let mut cells: Vec<&Value> = Vec::with_capacity(items.len());
        let mut required = true;
        for item in items {
            match item.as_object().and_then(|object| object.get(key)) {
                None | Some(Value::Null) => required = false,
                Some(value) => cells.push(value),
            }
        }
        observations.push(FieldObservation::new(
            key,
            reconcile_value_types(&cells),
            required,
        ));
    }
    Ok(observations)
}

/// Widen runtime types across rows: all-integer stays integer, a mix of
/// integers and floats widens to float, all-string columns get the
/// timestamp refinement, and anything genuinely mixed falls back to string.
fn reconcile_value_types(cells: &[&Value]) -> FieldType {
    if cells.is_empty() {
        return FieldType::String;
    }
    if cells.iter().all(|v| v.is_boolean()) {
        return FieldType::Boolean;
    }
    if cells.iter().all(|v| v.is_i64() || v.is_u64()) {
        return FieldType::Integer;
    }
    if cells.iter().all(|v| v.is_number()) {
        return FieldType::Float;
    }
    if cells.iter().all(|v| v.is_string()) {
        let all_timestamps = cells
            .iter()
            .filter_map(|v| v.as_str())
            .all(looks_like_timestamp);
        return if all_timestamps {
            FieldType::Timestamp
        } else {
            FieldType::String
        };
    }
    if cells.iter().all(|v| v.is_array()) {
        return FieldType::Array;
    }
    if cells.iter().all(|v| v.is_object()) {
        return FieldType::Object;
    }
    FieldType::String
}
