use modelmint_core::{Error, FieldDescriptor, FieldType, ModelSchema, validate_schema};

fn person_schema() -> ModelSchema {
    let mut address = FieldDescriptor::new("address", FieldType::Document);
    address.document = Some(Box::new(ModelSchema::new(
        "address",
        vec![FieldDescriptor::new("street", FieldType::Text)],
    )));
    ModelSchema::new(
        "person",
        vec![
            FieldDescriptor::new("name", FieldType::Text),
            FieldDescriptor::new("age", FieldType::Int),
            address,
        ],
    )
}

#[test]
fn accepts_well_formed_schema() {
    assert!(validate_schema(&person_schema()).is_ok());
}

#[test]
fn rejects_duplicate_field_names() {
    let schema = ModelSchema::new(
        "person",
        vec![
            FieldDescriptor::new("name", FieldType::Text),
            FieldDescriptor::new("name", FieldType::Email),
        ],
    );

    let err = validate_schema(&schema).expect_err("duplicate must fail");
    let Error::InvalidSchema(message) = err;
    assert!(message.contains("person.name"), "message: {message}");
}

#[test]
fn rejects_inverted_numeric_bounds() {
    let mut field = FieldDescriptor::new("age", FieldType::Int);
    field.min_value = Some(65.0);
    field.max_value = Some(18.0);
    let schema = ModelSchema::new("person", vec![field]);

    let err = validate_schema(&schema).expect_err("inverted bounds must fail");
    let Error::InvalidSchema(message) = err;
    assert!(message.contains("min_value"), "message: {message}");
}

#[test]
fn rejects_zero_max_length() {
    let mut field = FieldDescriptor::new("name", FieldType::Text);
    field.max_length = Some(0);
    let schema = ModelSchema::new("person", vec![field]);

    assert!(validate_schema(&schema).is_err());
}

#[test]
fn rejects_document_field_without_sub_schema() {
    let schema = ModelSchema::new(
        "person",
        vec![FieldDescriptor::new("address", FieldType::Document)],
    );

    let err = validate_schema(&schema).expect_err("missing sub-schema must fail");
    let Error::InvalidSchema(message) = err;
    assert!(message.contains("person.address"), "message: {message}");
}

#[test]
fn rejects_sub_schema_on_scalar_field() {
    let mut field = FieldDescriptor::new("name", FieldType::Text);
    field.document = Some(Box::new(ModelSchema::new("extra", Vec::new())));
    let schema = ModelSchema::new("person", vec![field]);

    assert!(validate_schema(&schema).is_err());
}

#[test]
fn validates_nested_sub_schemas_recursively() {
    let mut inner = FieldDescriptor::new("address", FieldType::Document);
    inner.document = Some(Box::new(ModelSchema::new(
        "address",
        vec![
            FieldDescriptor::new("street", FieldType::Text),
            FieldDescriptor::new("street", FieldType::Text),
        ],
    )));
    let schema = ModelSchema::new("person", vec![inner]);

    let err = validate_schema(&schema).expect_err("nested duplicate must fail");
    let Error::InvalidSchema(message) = err;
    assert!(
        message.contains("person.address.street"),
        "message: {message}"
    );
}
