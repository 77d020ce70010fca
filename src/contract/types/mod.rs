pub mod contract;
pub mod field;

pub use contract::{ContractStatus, DataContract};
pub use field::{FieldDescriptor, FieldType};
