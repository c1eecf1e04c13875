//! Compilation results in `OpenAPI` layout

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use schemata_core::CompiledSchema;

use crate::schema::{Components, Schema};

/// A compiled root schema together with the component schemas it refers to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompiledOpenApiSchema {
    pub root: Schema,
    pub components: BTreeMap<String, Schema>,
}

impl CompiledOpenApiSchema {
    /// Wrap the component schemas in an `OpenAPI` components object.
    ///
    /// Returns `schemas: None` when nothing is referenced, so the object
    /// serializes as `{}`.
    #[must_use]
    pub fn into_components(self) -> (Schema, Components) {
        let schemas = (!self.components.is_empty()).then_some(self.components);
        (self.root, Components { schemas })
    }
}

/// Component layout straight from the core compiler output
pub trait CompiledSchemaExt {
    /// See [`CompiledOpenApiSchema::into_components`]
    fn into_components(self) -> (Schema, Components);
}

impl CompiledSchemaExt for CompiledSchema<Schema> {
    fn into_components(self) -> (Schema, Components) {
        CompiledOpenApiSchema::from(self).into_components()
    }
}

impl From<CompiledSchema<Schema>> for CompiledOpenApiSchema {
    fn from(compiled: CompiledSchema<Schema>) -> Self {
        Self {
            root: compiled.root,
            components: compiled.definitions,
        }
    }
}
