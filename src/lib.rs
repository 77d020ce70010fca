//! # Data Contracts Studio schema-inference core
//!
//! This library implements the schema-inference engine behind Data Contracts
//! Studio: the routines that take a raw sample (SQL DDL text, a JSON API
//! response, or a CSV/JSON file body) and produce a normalized, ordered list
//! of typed field descriptors.
//!
//! ## Core Components
//!
//! * `contract` - Field descriptor and data contract types with validation
//! * `error` - Error types and handling
//! * `inference` - Source readers, type resolution, and field assembly
//! * `naming` - The field-name policy shared by inference and validation
//!
//! ## Architecture
//!
//! Three independent source readers (DDL parser, JSON sample analyzer,
//! tabular sample analyzer) feed one shared normalization stage: a type
//! resolver maps raw type hints onto the closed contract type set, the
//! shared name policy sanitizes identifiers, and the field assembler emits
//! the final deduplicated descriptor sequence.
//!
//! The engine is a pure function from (source type, sample) to field list:
//! no I/O, no shared mutable state, safe to call concurrently. The
//! surrounding CRUD/HTTP layers are external collaborators and are not part
//! of this crate.

pub mod contract;
pub mod error;
pub mod inference;
pub mod naming;

// Re-export main types for convenience
pub use contract::{ContractStatus, DataContract, FieldDescriptor, FieldType};
pub use error::{ContractError, ContractResult};
pub use inference::{
    infer_fields, InferenceEngine, InferenceOptions, SampleHints, SourceType,
};
pub use naming::{sanitize_field_name, validate_field_name};
