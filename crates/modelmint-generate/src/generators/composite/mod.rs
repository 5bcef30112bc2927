use std::collections::BTreeMap;
use std::sync::Arc;

use rand::Rng;

use modelmint_core::FieldDescriptor;

use crate::engine::DeliveryEngine;
use crate::errors::GenerationError;
use crate::generators::primitives::{FloatGenerator, IntGenerator, TextGenerator};
use crate::generators::{Generator, ProduceContext};
use crate::options::{non_empty, positive};
use crate::value::{FieldValue, render_scalar};

const DEFAULT_COLLECTION_MAX_LEN: usize = 100;
const DEFAULT_DICT_MAX_DEPTH: usize = 2;
const DEFAULT_DICT_MAX_SIZE: usize = 10;

/// Options for [`ListGenerator`].
#[derive(Clone)]
pub struct ListOptions {
    /// Fixed element count; when zero, a uniform count in `[1, max_len]`.
    pub length: usize,
    pub max_len: usize,
    /// Pool of element generators, picked uniformly per element.
    pub elements: Vec<Arc<dyn Generator>>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            length: 0,
            max_len: DEFAULT_COLLECTION_MAX_LEN,
            elements: vec![Arc::new(TextGenerator::default())],
        }
    }
}

/// Ordered sequence whose elements come from a pool of generators.
///
/// Elements a pool generator could not produce are omitted; pool picks are
/// not a sole source, so the list itself is always produced.
#[derive(Clone)]
pub struct ListGenerator {
    length: usize,
    max_len: usize,
    elements: Vec<Arc<dyn Generator>>,
}

impl ListGenerator {
    pub fn new(options: ListOptions) -> Result<Self, GenerationError> {
        if options.length == 0 {
            positive("list", "max_len", options.max_len)?;
        }
        non_empty("list", "elements", &options.elements)?;
        Ok(Self {
            length: options.length,
            max_len: options.max_len,
            elements: options.elements,
        })
    }
}

impl Default for ListGenerator {
    fn default() -> Self {
        let options = ListOptions::default();
        Self {
            length: options.length,
            max_len: options.max_len,
            elements: options.elements,
        }
    }
}

impl Generator for ListGenerator {
    fn name(&self) -> &'static str {
        "list"
    }

    fn produce(
        &self,
        ctx: &mut ProduceContext<'_>,
        _field: Option<&FieldDescriptor>,
    ) -> Result<Option<FieldValue>, GenerationError> {
        let count = if self.length > 0 {
            self.length
        } else {
            ctx.rng.random_range(1..=self.max_len)
        };
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            let idx = ctx.rng.random_range(0..self.elements.len());
            if let Some(value) = self.elements[idx].produce(ctx, None)? {
                items.push(value);
            }
        }
        Ok(Some(FieldValue::List(items)))
    }
}

/// Options for [`MapGenerator`].
#[derive(Clone)]
pub struct MapOptions {
    /// Fixed entry count; when zero, a uniform count in `[1, max_len]`.
    pub length: usize,
    pub max_len: usize,
    /// Generator for entry keys, rendered to strings.
    pub keys: Arc<dyn Generator>,
    /// Generator every entry value comes from.
    pub value: Arc<dyn Generator>,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            length: 0,
            max_len: DEFAULT_COLLECTION_MAX_LEN,
            keys: Arc::new(TextGenerator::default()),
            value: Arc::new(TextGenerator::default()),
        }
    }
}

/// String-keyed mapping with one value shape.
///
/// The value generator is the sole source for every entry, so its "no value
/// producible" becomes the map's.
#[derive(Clone)]
pub struct MapGenerator {
    length: usize,
    max_len: usize,
    keys: Arc<dyn Generator>,
    value: Arc<dyn Generator>,
}

impl MapGenerator {
    pub fn new(options: MapOptions) -> Result<Self, GenerationError> {
        if options.length == 0 {
            positive("map", "max_len", options.max_len)?;
        }
        Ok(Self {
            length: options.length,
            max_len: options.max_len,
            keys: options.keys,
            value: options.value,
        })
    }
}

impl Default for MapGenerator {
    fn default() -> Self {
        let options = MapOptions::default();
        Self {
            length: options.length,
            max_len: options.max_len,
            keys: options.keys,
            value: options.value,
        }
    }
}

impl Generator for MapGenerator {
    fn name(&self) -> &'static str {
        "map"
    }

    fn produce(
        &self,
        ctx: &mut ProduceContext<'_>,
        _field: Option<&FieldDescriptor>,
    ) -> Result<Option<FieldValue>, GenerationError> {
        let count = if self.length > 0 {
            self.length
        } else {
            ctx.rng.random_range(1..=self.max_len)
        };
        let mut entries = BTreeMap::new();
        for _ in 0..count {
            let Some(key) = self.keys.produce(ctx, None)? else {
                continue;
            };
            let Some(key) = render_scalar(&key) else {
                continue;
            };
            match self.value.produce(ctx, None)? {
                Some(value) => {
                    entries.insert(key, value);
                }
                None => return Ok(None),
            }
        }
        Ok(Some(FieldValue::Map(entries)))
    }
}

/// Options for [`DictGenerator`].
#[derive(Clone)]
pub struct DictOptions {
    /// Levels of nested dicts allowed below this one.
    pub max_depth: usize,
    pub max_size: usize,
    /// Pool keys and values are drawn from.
    pub elements: Vec<Arc<dyn Generator>>,
}

impl Default for DictOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_DICT_MAX_DEPTH,
            max_size: DEFAULT_DICT_MAX_SIZE,
            elements: vec![
                Arc::new(TextGenerator::default()),
                Arc::new(IntGenerator::default()),
                Arc::new(FloatGenerator::default()),
            ],
        }
    }
}

/// Free-form keyed collection with depth-bounded self-nesting.
///
/// Value positions may draw a fresh nested dict while `depth < max_depth`;
/// the candidate set is computed per invocation and the configured pool is
/// never mutated. Keys come from the pool only.
#[derive(Clone)]
pub struct DictGenerator {
    max_depth: usize,
    max_size: usize,
    elements: Vec<Arc<dyn Generator>>,
    depth: usize,
}

impl DictGenerator {
    pub fn new(options: DictOptions) -> Result<Self, GenerationError> {
        positive("dict", "max_size", options.max_size)?;
        non_empty("dict", "elements", &options.elements)?;
        Ok(Self {
            max_depth: options.max_depth,
            max_size: options.max_size,
            elements: options.elements,
            depth: 0,
        })
    }

    fn nested(&self) -> Self {
        Self {
            depth: self.depth + 1,
            ..self.clone()
        }
    }
}

impl Default for DictGenerator {
    fn default() -> Self {
        let options = DictOptions::default();
        Self {
            max_depth: options.max_depth,
            max_size: options.max_size,
            elements: options.elements,
            depth: 0,
        }
    }
}

impl Generator for DictGenerator {
    fn name(&self) -> &'static str {
        "dict"
    }

    fn produce(
        &self,
        ctx: &mut ProduceContext<'_>,
        _field: Option<&FieldDescriptor>,
    ) -> Result<Option<FieldValue>, GenerationError> {
        let count = ctx.rng.random_range(1..=self.max_size);
        let can_nest = self.depth < self.max_depth;
        let candidates = self.elements.len() + usize::from(can_nest);

        let mut entries = BTreeMap::new();
        for _ in 0..count {
            let idx = ctx.rng.random_range(0..self.elements.len());
            let Some(key) = self.elements[idx].produce(ctx, None)? else {
                continue;
            };
            let Some(key) = render_scalar(&key) else {
                continue;
            };

            let idx = ctx.rng.random_range(0..candidates);
            let value = if idx < self.elements.len() {
                self.elements[idx].produce(ctx, None)?
            } else {
                let nested = self.nested();
                nested.produce(ctx, None)?
            };
            if let Some(value) = value {
                entries.insert(key, value);
            }
        }
        Ok(Some(FieldValue::Map(entries)))
    }
}

/// Fills embedded document fields by delivering one row of the descriptor's
/// sub-schema through the parent registry.
///
/// This is the composite layer's call back into the orchestrator: a fresh
/// single-row engine is built on `ctx.registry`, so the sub-instance is
/// generated with the same registry as the parent delivery. A child's
/// unresolved-field error propagates unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentGenerator;

impl Generator for DocumentGenerator {
    fn name(&self) -> &'static str {
        "document"
    }

    fn produce(
        &self,
        ctx: &mut ProduceContext<'_>,
        field: Option<&FieldDescriptor>,
    ) -> Result<Option<FieldValue>, GenerationError> {
        let Some(field) = field else {
            return Err(GenerationError::InvalidSchema(
                "document generation needs a field descriptor".to_string(),
            ));
        };
        let Some(schema) = field.document.as_deref() else {
            return Err(GenerationError::InvalidSchema(format!(
                "field '{}' carries no embedded schema",
                field.name
            )));
        };

        let engine = DeliveryEngine::new(ctx.registry);
        let mut rows = engine.deliver_with(schema, 1, &mut *ctx.rng)?;
        Ok(rows.pop().map(FieldValue::Document))
    }
}
