use serde_json::json;

use modelmint_core::{Choice, FieldDescriptor, FieldType, ModelSchema};

#[test]
fn serializes_bare_descriptor_without_optional_keys() {
    let descriptor = FieldDescriptor::new("name", FieldType::Text);

    let value = serde_json::to_value(&descriptor).expect("serialize descriptor");
    assert_eq!(
        value,
        json!({
            "name": "name",
            "field_type": "text",
            "required": false,
        })
    );
}

#[test]
fn round_trips_constrained_descriptor() {
    let mut descriptor = FieldDescriptor::new("age", FieldType::Int);
    descriptor.required = true;
    descriptor.min_value = Some(18.0);
    descriptor.max_value = Some(65.0);
    descriptor.default = Some(json!(21));

    let json = serde_json::to_string(&descriptor).expect("serialize descriptor");
    let back: FieldDescriptor = serde_json::from_str(&json).expect("deserialize descriptor");

    assert_eq!(back.name, "age");
    assert_eq!(back.field_type, FieldType::Int);
    assert!(back.required);
    assert_eq!(back.min_value, Some(18.0));
    assert_eq!(back.max_value, Some(65.0));
    assert_eq!(back.default, Some(json!(21)));
}

#[test]
fn choices_accept_plain_values_and_labeled_pairs() {
    let mut descriptor = FieldDescriptor::new("status", FieldType::Text);
    descriptor.choices = vec![
        Choice::Plain(json!("open")),
        Choice::Labeled(json!("closed"), "Closed".to_string()),
    ];

    let value = serde_json::to_value(&descriptor).expect("serialize descriptor");
    assert_eq!(value["choices"], json!(["open", ["closed", "Closed"]]));

    let back: FieldDescriptor =
        serde_json::from_value(value).expect("deserialize descriptor");
    assert_eq!(back.choices.len(), 2);
    assert_eq!(back.choices[0].value(), &json!("open"));
    assert_eq!(back.choices[1].value(), &json!("closed"));
}

#[test]
fn round_trips_nested_document_schema() {
    let mut address = FieldDescriptor::new("address", FieldType::Document);
    address.document = Some(Box::new(ModelSchema::new(
        "address",
        vec![
            FieldDescriptor::new("street", FieldType::Text),
            FieldDescriptor::new("zip", FieldType::Text),
        ],
    )));
    let schema = ModelSchema::new(
        "person",
        vec![FieldDescriptor::new("name", FieldType::Text), address],
    );

    let json = serde_json::to_string(&schema).expect("serialize schema");
    let back: ModelSchema = serde_json::from_str(&json).expect("deserialize schema");

    assert_eq!(back.name, "person");
    let address = back.field("address").expect("address field");
    let document = address.document.as_deref().expect("sub-schema");
    assert_eq!(document.fields.len(), 2);
    assert!(document.field("zip").is_some());
}
