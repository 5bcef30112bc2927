use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Closed set of field-type variants the registry dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Bool,
    Int,
    Float,
    Decimal,
    Text,
    Email,
    Url,
    Date,
    Time,
    DateTime,
    /// Datetime carrying sub-second precision.
    PreciseDateTime,
    /// Ordered sequence of element values.
    List,
    /// String-keyed mapping with one value shape.
    Map,
    /// Free-form keyed collection, possibly nested.
    Dict,
    /// Embedded sub-document with its own schema.
    Document,
    /// Identity of a persisted instance of another model.
    Reference,
}
