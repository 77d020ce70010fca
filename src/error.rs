//! Error types for contract validation and schema inference
//!
//! Every error this crate raises is representable as plain structured data
//! (a kind tag plus a message), so the calling layer can always map it to a
//! serializable error body.

use serde::Serialize;
use thiserror::Error;

/// Errors raised by the inference engine and contract validation
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum ContractError {
    /// The raw sample cannot be parsed into any column/field structure
    #[error("Malformed schema: {0}")]
    MalformedSchema(String),

    /// A field name is empty or otherwise unusable after sanitization
    #[error("Invalid field name: {0}")]
    InvalidFieldName(String),

    /// A contract definition failed validation
    #[error("Invalid contract: {0}")]
    InvalidContract(String),
}

impl ContractError {
    /// Create a new malformed schema error
    pub fn malformed_schema(msg: impl Into<String>) -> Self {
        Self::MalformedSchema(msg.into())
    }

    /// Create a new invalid field name error
    pub fn invalid_field_name(msg: impl Into<String>) -> Self {
        Self::InvalidFieldName(msg.into())
    }

    /// Create a new invalid contract error
    pub fn invalid_contract(msg: impl Into<String>) -> Self {
        Self::InvalidContract(msg.into())
    }

    /// Stable kind tag used in serialized error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedSchema(_) => "malformed_schema",
            Self::InvalidFieldName(_) => "invalid_field_name",
            Self::InvalidContract(_) => "invalid_contract",
        }
    }

    /// The human-readable message without the kind prefix
    pub fn message(&self) -> &str {
        match self {
            Self::MalformedSchema(msg)
            | Self::InvalidFieldName(msg)
            | Self::InvalidContract(msg) => msg,
        }
    }
}

/// Result type alias for operations that can result in a ContractError
pub type ContractResult<T> = std::result::Result<T, ContractError>;
