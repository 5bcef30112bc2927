use rand::{Rng, RngCore};

use modelmint_core::FieldDescriptor;

use crate::errors::GenerationError;
use crate::registry::Registry;
use crate::value::FieldValue;

pub mod composite;
pub mod primitives;

/// A value-producing unit assigned to one field.
///
/// `Ok(None)` signals that no value is producible for this invocation;
/// callers leave the field unset rather than failing.
pub trait Generator: Send + Sync {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Produce one value, optionally informed by the field descriptor.
    fn produce(
        &self,
        ctx: &mut ProduceContext<'_>,
        field: Option<&FieldDescriptor>,
    ) -> Result<Option<FieldValue>, GenerationError>;
}

/// Per-invocation delivery context handed to every generator.
///
/// Carries the registry so composite generators can recurse into a nested
/// delivery; generators hold no back-reference to the plan that owns them
/// and may therefore be shared across fields and plans.
pub struct ProduceContext<'a> {
    pub registry: &'a Registry,
    pub rng: &'a mut dyn RngCore,
}

impl<'a> ProduceContext<'a> {
    pub fn new(registry: &'a Registry, rng: &'a mut dyn RngCore) -> Self {
        Self { registry, rng }
    }

    /// Uniform pick among descriptor choices, preferred over generator
    /// logic whenever choices are present. Pairs yield their value half.
    pub(crate) fn pick_choice(&mut self, field: Option<&FieldDescriptor>) -> Option<FieldValue> {
        let field = field?;
        if field.choices.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..field.choices.len());
        Some(FieldValue::from_json(field.choices[idx].value()))
    }
}
