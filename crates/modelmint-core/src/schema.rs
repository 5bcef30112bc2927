use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::FieldType;

/// Ordered field layout of one model.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ModelSchema {
    /// Model name, used in diagnostics.
    pub name: String,
    /// Fields in declaration order.
    pub fields: Vec<FieldDescriptor>,
}

impl ModelSchema {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// One allowed value for a field: a plain value or a `(value, label)` pair.
///
/// `Labeled` must stay first: untagged deserialization tries variants in
/// order, and `Plain` matches any JSON value including two-element arrays.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Choice {
    Labeled(Value, String),
    Plain(Value),
}

impl Choice {
    /// The value half; labels are presentation only.
    pub fn value(&self) -> &Value {
        match self {
            Choice::Labeled(value, _) => value,
            Choice::Plain(value) => value,
        }
    }
}

/// Metadata for one schema field.
///
/// Descriptors are immutable for the duration of a generation pass;
/// generators read constraints from them but never write back.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FieldDescriptor {
    pub name: String,
    pub field_type: FieldType,
    /// Whether the model system requires a value for this field.
    #[serde(default)]
    pub required: bool,
    /// Allowed values; generators prefer these over their own logic.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    /// Model-declared default; schema-aware generators short-circuit to it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Embedded sub-schema, present iff `field_type` is `Document`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<Box<ModelSchema>>,
}

impl FieldDescriptor {
    /// Descriptor with the given name and type and no constraints.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: false,
            choices: Vec::new(),
            min_value: None,
            max_value: None,
            max_length: None,
            default: None,
            document: None,
        }
    }
}
