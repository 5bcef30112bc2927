use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;

/// Value produced by a generator for one field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Id(String),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    List(Vec<FieldValue>),
    Map(BTreeMap<String, FieldValue>),
    Document(Instance),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Int(value) => Some(*value as f64),
            FieldValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) | FieldValue::Id(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(value) => Some(*value),
            FieldValue::DateTime(value) => Some(value.date()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, FieldValue>> {
        match self {
            FieldValue::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_document(&self) -> Option<&Instance> {
        match self {
            FieldValue::Document(instance) => Some(instance),
            _ => None,
        }
    }

    /// Convert a descriptor-supplied JSON value (a choice or default).
    pub fn from_json(value: &Value) -> FieldValue {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(value) => FieldValue::Bool(*value),
            Value::Number(number) => number
                .as_i64()
                .map(FieldValue::Int)
                .or_else(|| number.as_f64().map(FieldValue::Float))
                .unwrap_or(FieldValue::Null),
            Value::String(value) => FieldValue::Text(value.clone()),
            Value::Array(items) => {
                FieldValue::List(items.iter().map(FieldValue::from_json).collect())
            }
            Value::Object(entries) => FieldValue::Map(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), FieldValue::from_json(value)))
                    .collect(),
            ),
        }
    }
}

/// Stable string rendering of a scalar value, used for map keys and
/// composed text formats. Structured values and `Null` have none.
pub(crate) fn render_scalar(value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::Null => None,
        FieldValue::Bool(value) => Some(value.to_string()),
        FieldValue::Int(value) => Some(value.to_string()),
        FieldValue::Float(value) => Some(value.to_string()),
        FieldValue::Text(value) | FieldValue::Id(value) => Some(value.clone()),
        FieldValue::Date(value) => Some(value.format("%Y-%m-%d").to_string()),
        FieldValue::Time(value) => Some(value.format("%H:%M:%S").to_string()),
        FieldValue::DateTime(value) => Some(value.format("%Y-%m-%dT%H:%M:%S").to_string()),
        FieldValue::List(_) | FieldValue::Map(_) | FieldValue::Document(_) => None,
    }
}

/// One generated model instance.
///
/// The engine only creates blanks and sets named fields; fields a generator
/// could not produce a value for stay unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Instance {
    values: BTreeMap<String, FieldValue>,
}

impl Instance {
    /// Blank instance with no fields set.
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: impl Into<String>, value: FieldValue) {
        self.values.insert(field.into(), value);
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    pub fn is_set(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Set fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }
}
