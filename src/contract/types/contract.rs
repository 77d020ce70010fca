use super::field::FieldDescriptor;
use crate::error::{ContractError, ContractResult};
use crate::naming;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Contract names are capped independently of field names.
const MAX_CONTRACT_NAME_LEN: usize = 255;

static VERSION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\d+\.\d+$").expect("version pattern is valid"));

/// Lifecycle status of a data contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    Active,
    Inactive,
    Deprecated,
}

impl Default for ContractStatus {
    fn default() -> Self {
        Self::Active
    }
}

/// A named, versioned collection of field descriptors describing an
/// expected data shape.
///
/// Field names here follow the same policy whether the contract was typed
/// in by hand or auto-generated; `validate` calls the shared
/// [`naming`] routines, never its own copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataContract {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub status: ContractStatus,
    pub fields: Vec<FieldDescriptor>,
}

impl DataContract {
    /// Create an active contract from a field list.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        fields: Vec<FieldDescriptor>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            status: ContractStatus::default(),
            fields,
        }
    }

    /// Validate the contract definition and every field name against the
    /// shared policy.
    pub fn validate(&self) -> ContractResult<()> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ContractError::invalid_contract(
                "contract name cannot be empty",
            ));
        }
        if name.chars().count() > MAX_CONTRACT_NAME_LEN {
            return Err(ContractError::invalid_contract(format!(
                "contract name cannot exceed {} characters",
                MAX_CONTRACT_NAME_LEN
            )));
        }

        if !VERSION_PATTERN.is_match(&self.version) {
            return Err(ContractError::invalid_contract(format!(
                "version '{}' must follow MAJOR.MINOR.PATCH",
                self.version
            )));
        }

        if self.fields.is_empty() {
            return Err(ContractError::invalid_contract(
                "contract must define at least one field",
            ));
        }

        let mut seen = HashSet::with_capacity(self.fields.len());
        for field in &self.fields {
            naming::validate_field_name(&field.name)?;
            if !seen.insert(field.name.as_str()) {
                return Err(ContractError::invalid_contract(format!(
                    "duplicate field name '{}'",
                    field.name
                )));
            }
        }

        Ok(())
    }
}
