use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use modelmint_core::{FieldDescriptor, FieldType};
use modelmint_generate::generators::primitives::{ConstGenerator, ConstOptions};
use modelmint_generate::{FieldValue, Generator, ProduceContext, Registry};

fn literal(value: &str) -> Arc<dyn Generator> {
    Arc::new(ConstGenerator::new(ConstOptions {
        value: FieldValue::Text(value.to_string()),
    }))
}

#[test]
fn field_name_match_defeats_type_match() {
    let by_name = literal("by-name");
    let by_type = literal("by-type");
    let mut registry = Registry::new();
    registry.register_field("age", Arc::clone(&by_name));
    registry.register_type(FieldType::Int, Arc::clone(&by_type));

    let field = FieldDescriptor::new("age", FieldType::Int);
    let resolved = registry.resolve(&field).expect("resolved");
    assert!(Arc::ptr_eq(resolved, &by_name));
}

#[test]
fn type_match_applies_without_name_match() {
    let by_name = literal("by-name");
    let by_type = literal("by-type");
    let mut registry = Registry::new();
    registry.register_field("age", Arc::clone(&by_name));
    registry.register_type(FieldType::Int, Arc::clone(&by_type));

    let field = FieldDescriptor::new("count", FieldType::Int);
    let resolved = registry.resolve(&field).expect("resolved");
    assert!(Arc::ptr_eq(resolved, &by_type));
}

#[test]
fn default_applies_when_nothing_matches() {
    let fallback = literal("fallback");
    let mut registry = Registry::with_default(Arc::clone(&fallback));
    registry.register_type(FieldType::Int, literal("by-type"));

    let field = FieldDescriptor::new("city", FieldType::Text);
    let resolved = registry.resolve(&field).expect("resolved");
    assert!(Arc::ptr_eq(resolved, &fallback));
}

#[test]
fn resolution_without_default_yields_none() {
    let registry = Registry::new();
    let field = FieldDescriptor::new("city", FieldType::Text);
    assert!(registry.resolve(&field).is_none());
}

#[test]
fn resolved_generator_produces_the_registered_literal() {
    let mut registry = Registry::new();
    registry.register_field("status", literal("fixed"));

    let field = FieldDescriptor::new("status", FieldType::Text);
    let generator = Arc::clone(registry.resolve(&field).expect("resolved"));

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut ctx = ProduceContext::new(&registry, &mut rng);
    let value = generator.produce(&mut ctx, Some(&field)).expect("produce");
    assert_eq!(value, Some(FieldValue::Text("fixed".to_string())));
}
