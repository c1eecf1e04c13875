//! `OpenAPI` backend for schemata
//!
//! Provides the [`Schema`] object model, plugs it into the core pipeline
//! and lays compiled output out as `#/components/schemas`.
//!
//! Targets `OpenAPI` 3.0: nullable edges carry `nullable: true`, also next
//! to a `$ref`.

pub mod compiled;
pub mod schema;

pub use compiled::{CompiledOpenApiSchema, CompiledSchemaExt};
pub use schema::{Components, NumberFormat, Reference, Schema, SchemaType};

use schemata_core::{Bundle, Result, SchemaEntry, TypeBundleExt, TypeData};
use tracing::debug;

/// Entry point into the `OpenAPI` pipeline
pub trait OpenApiBundleExt {
    /// Generate an `OpenAPI` schema for every type in the graph
    ///
    /// # Errors
    ///
    /// Fails when the bundle violates the closure invariant.
    fn generate_openapi_schema(self) -> Result<Bundle<SchemaEntry<Schema>>>;
}

impl OpenApiBundleExt for Bundle<TypeData> {
    fn generate_openapi_schema(self) -> Result<Bundle<SchemaEntry<Schema>>> {
        debug!(entries = self.len(), "generating openapi schemas");
        self.generate_schemas::<Schema>()
    }
}
