//! Core schema model: field definitions, parameter policy and validation.
//! Nothing in here performs I/O.

pub mod field;
pub mod policy;
pub mod schema;
pub mod validation;

pub use field::{FieldDefinition, FieldParameters, FieldType, ParameterName};
pub use policy::ParameterPolicy;
pub use schema::{
    FieldParams, FieldSpec, GenerationRequest, SchemaError, SchemaEvent, SchemaModel,
};
pub use validation::{SchemaViolation, INPUT_ERROR_TITLE};
