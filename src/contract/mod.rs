pub mod types;

// Re-export all types at the contract module level
pub use types::{ContractStatus, DataContract, FieldDescriptor, FieldType};
