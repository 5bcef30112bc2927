use std::sync::Arc;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use modelmint_core::{FieldDescriptor, ModelSchema};

use crate::errors::GenerationError;
use crate::generators::{Generator, ProduceContext};
use crate::registry::Registry;
use crate::value::Instance;

/// Options for a delivery run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeliverOptions {
    /// Skip fields with no registered generator instead of failing.
    pub tolerant: bool,
    /// Seed for reproducible deliveries; fresh OS entropy when unset.
    pub seed: Option<u64>,
}

/// Per-model binding of fields to resolved generators.
///
/// Built once at the start of a delivery and reused across all of its rows;
/// in tolerant mode unresolved fields are simply absent.
pub struct AssignmentPlan<'s> {
    entries: Vec<(&'s FieldDescriptor, Arc<dyn Generator>)>,
}

impl AssignmentPlan<'_> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.entries.iter().any(|(descriptor, _)| descriptor.name == field)
    }
}

/// Plans the field→generator assignment for a model and mints instances in
/// bulk by re-running the plan.
///
/// The registry (and the generators it holds) may be shared across engines;
/// each `deliver` call builds a fresh plan and discards it at the end, so an
/// engine value can serve different schemas in sequence.
pub struct DeliveryEngine<'r> {
    registry: &'r Registry,
    options: DeliverOptions,
}

impl<'r> DeliveryEngine<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            options: DeliverOptions::default(),
        }
    }

    pub fn with_options(registry: &'r Registry, options: DeliverOptions) -> Self {
        Self { registry, options }
    }

    /// Resolve every schema field to its generator.
    ///
    /// Fails fast with [`GenerationError::UnresolvedField`] on the first
    /// unmapped field unless tolerant mode is on, in which case the field is
    /// excluded from the plan and stays unset on produced instances.
    pub fn plan<'s>(&self, schema: &'s ModelSchema) -> Result<AssignmentPlan<'s>, GenerationError> {
        let mut entries = Vec::with_capacity(schema.fields.len());
        for field in &schema.fields {
            match self.registry.resolve(field) {
                Some(generator) => {
                    debug!(
                        model = %schema.name,
                        field = %field.name,
                        generator = generator.name(),
                        "field resolved"
                    );
                    entries.push((field, Arc::clone(generator)));
                }
                None if self.options.tolerant => {
                    warn!(
                        model = %schema.name,
                        field = %field.name,
                        "no generator registered, field left unset"
                    );
                }
                None => return Err(GenerationError::UnresolvedField(field.name.clone())),
            }
        }
        Ok(AssignmentPlan { entries })
    }

    /// Mint `rows` instances of the schema.
    pub fn deliver(
        &self,
        schema: &ModelSchema,
        rows: usize,
    ) -> Result<Vec<Instance>, GenerationError> {
        let mut rng = match self.options.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        };
        self.deliver_with(schema, rows, &mut rng)
    }

    /// Mint `rows` instances drawing randomness from a caller-supplied rng.
    ///
    /// This is the seam nested-document generators use to stay on the parent
    /// delivery's randomness stream, and the one seeded tests drive.
    pub fn deliver_with(
        &self,
        schema: &ModelSchema,
        rows: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Instance>, GenerationError> {
        let plan = self.plan(schema)?;
        debug!(model = %schema.name, rows, fields = plan.len(), "delivery started");

        let mut instances = Vec::with_capacity(rows);
        for _ in 0..rows {
            let mut instance = Instance::blank();
            for (field, generator) in &plan.entries {
                let mut ctx = ProduceContext::new(self.registry, &mut *rng);
                if let Some(value) = generator.produce(&mut ctx, Some(*field))? {
                    instance.set(field.name.clone(), value);
                }
            }
            instances.push(instance);
        }

        debug!(model = %schema.name, rows = instances.len(), "delivery completed");
        Ok(instances)
    }
}
