use std::collections::HashMap;
use std::sync::Arc;

use modelmint_core::{FieldDescriptor, FieldType};

use crate::generators::Generator;
use crate::generators::composite::{DictGenerator, DocumentGenerator, MapGenerator};
use crate::generators::primitives::{
    BoolGenerator, ConstGenerator, DateGenerator, DateTimeGenerator, DecimalGenerator,
    EmailGenerator, FloatGenerator, SmartIntGenerator, TextGenerator, TimeGenerator, UrlGenerator,
};

/// Dispatch table from field name and type to the generator responsible.
///
/// Resolution precedence, highest first: field-name override, field-type
/// default, registry default. Per-field overrides defeat type defaults so
/// callers can special-case one field without re-registering its type.
/// A registry is built before delivery and read-only during it.
#[derive(Clone, Default)]
pub struct Registry {
    by_field: HashMap<String, Arc<dyn Generator>>,
    by_type: HashMap<FieldType, Arc<dyn Generator>>,
    default: Option<Arc<dyn Generator>>,
}

impl Registry {
    /// Empty registry with no default generator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the given fallback generator.
    pub fn with_default(default: Arc<dyn Generator>) -> Self {
        Self {
            default: Some(default),
            ..Self::default()
        }
    }

    pub fn set_default(&mut self, generator: Arc<dyn Generator>) {
        self.default = Some(generator);
    }

    pub fn register_type(&mut self, field_type: FieldType, generator: Arc<dyn Generator>) {
        self.by_type.insert(field_type, generator);
    }

    pub fn register_field(&mut self, field: impl Into<String>, generator: Arc<dyn Generator>) {
        self.by_field.insert(field.into(), generator);
    }

    /// Resolve the generator responsible for a field descriptor.
    ///
    /// Never mutates and never fails; `None` only when nothing matches and
    /// no default was installed.
    pub fn resolve(&self, field: &FieldDescriptor) -> Option<&Arc<dyn Generator>> {
        if let Some(generator) = self.by_field.get(&field.name) {
            return Some(generator);
        }
        if let Some(generator) = self.by_type.get(&field.field_type) {
            return Some(generator);
        }
        self.default.as_ref()
    }
}

/// Default wiring from common field types to their standard generators.
///
/// List fields stay unmapped (element pools are per-field decisions), as do
/// reference fields (they need a source); callers register those on top.
pub fn standard_registry() -> Registry {
    let mut registry = Registry::with_default(Arc::new(ConstGenerator::default()));
    registry.register_type(FieldType::Bool, Arc::new(BoolGenerator));
    registry.register_type(FieldType::Int, Arc::new(SmartIntGenerator::default()));
    registry.register_type(FieldType::Float, Arc::new(FloatGenerator::default()));
    registry.register_type(FieldType::Decimal, Arc::new(DecimalGenerator::default()));
    registry.register_type(FieldType::Text, Arc::new(TextGenerator::default()));
    registry.register_type(FieldType::Email, Arc::new(EmailGenerator::default()));
    registry.register_type(FieldType::Url, Arc::new(UrlGenerator::default()));
    registry.register_type(FieldType::Date, Arc::new(DateGenerator::default()));
    registry.register_type(FieldType::Time, Arc::new(TimeGenerator::default()));
    registry.register_type(FieldType::DateTime, Arc::new(DateTimeGenerator::default()));
    registry.register_type(
        FieldType::PreciseDateTime,
        Arc::new(DateTimeGenerator::precise()),
    );
    registry.register_type(FieldType::Map, Arc::new(MapGenerator::default()));
    registry.register_type(FieldType::Dict, Arc::new(DictGenerator::default()));
    registry.register_type(FieldType::Document, Arc::new(DocumentGenerator));
    registry
}
