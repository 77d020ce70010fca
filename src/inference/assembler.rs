//! Final descriptor assembly: sanitized names, deterministic ordering and
//! collision handling

use crate::contract::{FieldDescriptor, FieldType};
use crate::error::ContractResult;
use crate::naming;
use log::debug;
use std::collections::{BTreeMap, HashSet};

/// One observed field before sanitization and assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldObservation {
    pub name: String,
    pub field_type: FieldType,
    pub required: bool,
    pub constraints: BTreeMap<String, serde_json::Value>,
}

impl FieldObservation {
    pub fn new(name: impl Into<String>, field_type: FieldType, required: bool) -> Self {
        Self {
            name: name.into(),
            field_type,
            required,
            constraints: BTreeMap::new(),
        }
    }

    pub fn with_constraints(
        mut self,
        constraints: BTreeMap<String, serde_json::Value>,
    ) -> Self {
        self.constraints = constraints;
        self
    }
}

/// Assemble observations into the final descriptor list.
///
/// Source order is preserved. Names that collide after sanitization are
/// disambiguated with an incrementing suffix rather than silently dropped,
/// so two DDL columns differing only in characters sanitization erases both
/// survive.
pub fn assemble(observations: Vec<FieldObservation>) -> ContractResult<Vec<FieldDescriptor>> {
    let mut taken: HashSet<String> = HashSet::with_capacity(observations.len());
    let mut descriptors = Vec::with_capacity(observations.len());

    for observation in observations {
        let sanitized = naming::sanitize_field_name(&observation.name)?;
        let name = disambiguate(sanitized, &taken);
        if name != observation.name {
            debug!("Field name '{}' normalized to '{}'", observation.name, name);
        }
        taken.insert(name.clone());

        let mut descriptor =
            FieldDescriptor::new(name, observation.field_type, observation.required);
        descriptor.constraints = observation.constraints;
        descriptors.push(descriptor);
    }

    Ok(descriptors)
}

/// Append `_2`, `_3`, … until the name is unused, shortening the base so
/// the result stays within the length limit.
fn disambiguate(base: String, taken: &HashSet<String>) -> String {
    if !taken.contains(&base) {
        return base;
    }
    let mut counter = 2usize;
    loop {
        let suffix = format!("_{}", counter);
        let budget = naming::MAX_FIELD_NAME_LEN.saturating_sub(suffix.chars().count());
        let head: String = base.chars().take(budget).collect();
        let candidate = format!("{}{}", head, suffix);
        if !taken.contains(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}
