use std::sync::Arc;

use rand::Rng;

use modelmint_core::FieldDescriptor;

use crate::errors::GenerationError;
use crate::generators::{Generator, ProduceContext};
use crate::value::{FieldValue, Instance};

/// Query collaborator for reference-lookup generation.
///
/// Reports how many instances exist and fetches one at a given offset. The
/// lookup is treated as synchronous; a missing instance at a valid offset is
/// a miss, not an error.
pub trait ReferenceSource: Send + Sync {
    fn count(&self) -> usize;
    fn fetch(&self, offset: usize) -> Option<Instance>;
}

/// In-memory reference pool for tests and fixtures.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReferenceSource {
    instances: Vec<Instance>,
}

impl InMemoryReferenceSource {
    pub fn new(instances: Vec<Instance>) -> Self {
        Self { instances }
    }

    pub fn push(&mut self, instance: Instance) {
        self.instances.push(instance);
    }
}

impl ReferenceSource for InMemoryReferenceSource {
    fn count(&self) -> usize {
        self.instances.len()
    }

    fn fetch(&self, offset: usize) -> Option<Instance> {
        self.instances.get(offset).cloned()
    }
}

/// Options for [`ReferenceGenerator`].
#[derive(Clone)]
pub struct ReferenceOptions {
    /// Pool of persisted instances to draw identities from.
    pub source: Option<Arc<dyn ReferenceSource>>,
    /// Field holding the identity on fetched instances.
    pub id_field: String,
}

impl Default for ReferenceOptions {
    fn default() -> Self {
        Self {
            source: None,
            id_field: "id".to_string(),
        }
    }
}

/// Picks the identity of an existing instance uniformly from a source.
///
/// An absent collaborator, an empty pool, a fetch miss, or a fetched
/// instance without the id field all signal "no value producible" rather
/// than failing; the corresponding field stays unset.
#[derive(Clone)]
pub struct ReferenceGenerator {
    source: Option<Arc<dyn ReferenceSource>>,
    id_field: String,
}

impl ReferenceGenerator {
    pub fn new(options: ReferenceOptions) -> Result<Self, GenerationError> {
        if options.id_field.is_empty() {
            return Err(GenerationError::InvalidOptions(
                "reference: id_field must not be empty".to_string(),
            ));
        }
        Ok(Self {
            source: options.source,
            id_field: options.id_field,
        })
    }
}

impl Default for ReferenceGenerator {
    fn default() -> Self {
        Self {
            source: None,
            id_field: "id".to_string(),
        }
    }
}

impl Generator for ReferenceGenerator {
    fn name(&self) -> &'static str {
        "reference"
    }

    fn produce(
        &self,
        ctx: &mut ProduceContext<'_>,
        _field: Option<&FieldDescriptor>,
    ) -> Result<Option<FieldValue>, GenerationError> {
        let Some(source) = &self.source else {
            return Ok(None);
        };
        let count = source.count();
        if count == 0 {
            return Ok(None);
        }
        let offset = ctx.rng.random_range(0..count);
        let Some(instance) = source.fetch(offset) else {
            return Ok(None);
        };
        Ok(instance.get(&self.id_field).cloned())
    }
}
