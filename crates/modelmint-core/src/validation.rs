use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::schema::ModelSchema;
use crate::types::FieldType;

/// Validate internal consistency of a model schema.
///
/// This checks:
/// - duplicate field names
/// - numeric bound ordering and zero length limits
/// - embedded sub-schema presence on document fields
pub fn validate_schema(schema: &ModelSchema) -> Result<()> {
    validate_model(schema, &schema.name)
}

fn validate_model(schema: &ModelSchema, path: &str) -> Result<()> {
    if schema.name.is_empty() {
        return Err(Error::InvalidSchema(format!("empty model name: {path}")));
    }

    let mut names = BTreeSet::new();
    for field in &schema.fields {
        let field_path = format!("{path}.{}", field.name);

        if field.name.is_empty() {
            return Err(Error::InvalidSchema(format!("empty field name: {path}")));
        }
        if !names.insert(field.name.clone()) {
            return Err(Error::InvalidSchema(format!(
                "duplicate field name: {field_path}"
            )));
        }
        if let (Some(min), Some(max)) = (field.min_value, field.max_value)
            && min > max
        {
            return Err(Error::InvalidSchema(format!(
                "min_value exceeds max_value: {field_path}"
            )));
        }
        if field.max_length == Some(0) {
            return Err(Error::InvalidSchema(format!(
                "max_length must be positive: {field_path}"
            )));
        }

        if field.field_type == FieldType::Document {
            let document = field.document.as_deref().ok_or_else(|| {
                Error::InvalidSchema(format!("document field missing sub-schema: {field_path}"))
            })?;
            validate_model(document, &field_path)?;
        } else if field.document.is_some() {
            return Err(Error::InvalidSchema(format!(
                "sub-schema on non-document field: {field_path}"
            )));
        }
    }

    Ok(())
}
