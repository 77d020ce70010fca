//! Field inference from decoded JSON samples
//!
//! Operates on `serde_json::Value`, never raw text: syntax parsing is the
//! caller's job, and a decode failure surfaces there as a malformed-schema
//! error. Type dispatch is an explicit match over the decoded value kinds.

use crate::contract::FieldType;
use crate::error::{ContractError, ContractResult};
use crate::inference::assembler::FieldObservation;
use crate::inference::timestamps::looks_like_timestamp;
use serde_json::{Map, Value};

/// Nested structures are expanded at most this deep when flattening is on.
const MAX_FLATTEN_DEPTH: usize = 2;

/// Infer field observations from one decoded JSON document (an object or
/// an array of objects).
pub fn analyze_value(value: &Value, flatten_nested: bool) -> ContractResult<Vec<FieldObservation>> {
    match value {
        Value::Object(object) => Ok(analyze_object(object, flatten_nested)),
        Value::Array(items) => analyze_array(items, flatten_nested),
        other => Err(ContractError::malformed_schema(format!(
            "JSON sample must be an object or an array of objects, got {}",
            json_kind(other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// One field per key, in document order. A null value marks the field
/// optional with the conservative `string` type, since there is no other sample
/// value to infer from.
fn analyze_object(object: &Map<String, Value>, flatten: bool) -> Vec<FieldObservation> {
    let mut observations = Vec::with_capacity(object.len());
    for (key, value) in object {
        emit_field(&mut observations, key, value, !value.is_null(), flatten, 0);
    }
    observations
}

/// The runtime type of one decoded value, mapped onto the contract set.
fn classify(value: &Value) -> FieldType {
    match value {
        Value::Null => FieldType::String,
        Value::Bool(_) => FieldType::Boolean,
        Value::Number(number) => {
            if number.is_i64() || number.is_u64() {
                FieldType::Integer
            } else {
                FieldType::Float
            }
        }
        Value::String(text) => {
            if looks_like_timestamp(text) {
                FieldType::Timestamp
            } else {
                FieldType::String
            }
        }
        Value::Array(_) => FieldType::Array,
        Value::Object(_) => FieldType::Object,
    }
}

/// Emit one observation and, when flattening is enabled, dotted child
/// observations for nested objects and arrays of objects.
fn emit_field(
    out: &mut Vec<FieldObservation>,
    name: &str,
    value: &Value,
    required: bool,
    flatten: bool,
    depth: usize,
) {
    out.push(FieldObservation::new(name, classify(value), required));

    if !flatten || depth >= MAX_FLATTEN_DEPTH {
        return;
    }
    match value {
        Value::Object(nested) => {
            for (key, nested_value) in nested {
                let dotted = format!("{}.{}", name, key);
                emit_field(
                    out,
                    &dotted,
                    nested_value,
                    !nested_value.is_null(),
                    flatten,
                    depth + 1,
                );
            }
        }
        Value::Array(items) => {
            // the first element stands in for the whole array
            if let Some(Value::Object(first)) = items.first() {
                for (key, nested_value) in first {
                    let dotted = format!("{}_0.{}", name, key);
                    emit_field(
                        out,
                        &dotted,
                        nested_value,
                        !nested_value.is_null(),
                        flatten,
                        depth + 1,
                    );
                }
            }
        }
        _ => {}
    }
}

/// Arrays of objects merge keys across every element; arrays of primitives
/// collapse to a single `array` field.
fn analyze_array(items: &[Value], flatten: bool) -> ContractResult<Vec<FieldObservation>> {
    if items.is_empty() {
        return Err(ContractError::malformed_schema(
            "JSON array sample contains no elements",
        ));
    }

    if items.iter().all(Value::is_object) {
        return Ok(merge_object_elements(items, flatten));
    }
    if items.iter().any(Value::is_object) {
        return Err(ContractError::malformed_schema(
            "JSON array sample mixes objects and primitives",
        ));
    }

    Ok(vec![FieldObservation::new("items", FieldType::Array, true)])
}

/// Reconcile an array of objects into one field set: key order is
/// first-seen across all elements, the type comes from the first non-null
/// value, and a key missing or null anywhere is optional.
fn merge_object_elements(items: &[Value], flatten: bool) -> Vec<FieldObservation> {
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
        let mut representative: Option<&Value> = None;
        let mut required = true;
        for item in items {
            let object = match item.as_object() {
                Some(object) => object,
                None => continue,
            };
            match object.get(key) {
                None | Some(Value::Null) => required = false,
                Some(value) => {
                    if representative.is_none() {
                        representative = Some(value);
                    }
                }
            }
        }

        match representative {
            Some(value) => emit_field(&mut observations, key, value, required, flatten, 0),
            // null in every element: optional, conservative string
            None => observations.push(FieldObservation::new(key, FieldType::String, false)),
        }
    }
    observations
}
