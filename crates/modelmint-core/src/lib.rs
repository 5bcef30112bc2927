//! Core contracts for modelmint.
//!
//! This crate defines the model schema and field descriptor types consumed
//! read-only by the generation layer, plus structural validation shared
//! across crates.

pub mod error;
pub mod schema;
pub mod types;
pub mod validation;

pub use error::{Error, Result};
pub use schema::{Choice, FieldDescriptor, ModelSchema};
pub use types::FieldType;
pub use validation::validate_schema;
