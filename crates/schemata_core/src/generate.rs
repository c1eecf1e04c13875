//! Format conversion: raw type graph to schema graph

use std::marker::PhantomData;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::bundle::Bundle;
use crate::data::{TypeData, TypeShape};
use crate::error::Result;
use crate::node::{SchemaBuilder, SchemaEntry};
use crate::step::Step;

/// Builds one backend node per type description.
///
/// Every edge to another type becomes a placeholder holding that type's
/// canonical id, so self-referencing types never unroll here. The compiler
/// resolves placeholders later.
pub struct SchemaGenerationStep<S> {
    _backend: PhantomData<fn() -> S>,
}

impl<S> SchemaGenerationStep<S> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _backend: PhantomData,
        }
    }
}

impl<S> Default for SchemaGenerationStep<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SchemaBuilder> Step<TypeData, SchemaEntry<S>> for SchemaGenerationStep<S> {
    fn process(&self, bundle: Bundle<TypeData>) -> Result<Bundle<SchemaEntry<S>>> {
        bundle.validate_closure()?;
        debug!(entries = bundle.len(), "generating schemas");
        Ok(bundle.map(|_, data| {
            let schema = generate_schema::<S>(&data);
            SchemaEntry::new(schema, Arc::new(data))
        }))
    }
}

/// Schema for a single description, edges left as placeholders
pub fn generate_schema<S: SchemaBuilder>(data: &TypeData) -> S {
    if !data.subtypes.is_empty() {
        trace!(id = %data.id, subtypes = data.subtypes.len(), "generating union");
        return S::any_of(data.subtypes.iter().map(S::placeholder).collect());
    }
    match &data.shape {
        TypeShape::Primitive { primitive } => S::primitive(*primitive),
        TypeShape::Object => {
            let properties = data
                .members
                .iter()
                .map(|member| {
                    let placeholder = S::placeholder(&member.type_id);
                    let node = if member.nullable {
                        placeholder.into_nullable()
                    } else {
                        placeholder
                    };
                    (member.name.clone(), node)
                })
                .collect();
            let required = data
                .members
                .iter()
                .filter(|member| !member.optional)
                .map(|member| member.name.clone())
                .collect();
            S::object(properties, required)
        }
        TypeShape::Collection { item, unique } => S::array(S::placeholder(item), *unique),
        TypeShape::Map { value } => S::map(S::placeholder(value)),
        TypeShape::Enum { constants } => S::enumeration(constants),
        TypeShape::Any => S::any(),
    }
}
