//! JSON Schema backend for schemata
//!
//! Compiled documents follow draft 2020-12: definitions live under `$defs`
//! and nullable edges are expressed as `anyOf` with a `null` branch.

pub mod document;
pub mod schema;

pub use document::CompiledSchemaExt;
pub use schema::{DEFS_PREFIX, DRAFT_2020_12, JsonSchema, JsonType};

use schemata_core::{Bundle, Result, SchemaEntry, TypeBundleExt, TypeData};
use tracing::debug;

/// Entry point into the JSON Schema pipeline
pub trait JsonSchemaBundleExt {
    /// Generate a JSON Schema for every type in the graph
    ///
    /// # Errors
    ///
    /// Fails when the bundle violates the closure invariant.
    fn generate_json_schema(self) -> Result<Bundle<SchemaEntry<JsonSchema>>>;
}

impl JsonSchemaBundleExt for Bundle<TypeData> {
    fn generate_json_schema(self) -> Result<Bundle<SchemaEntry<JsonSchema>>> {
        debug!(entries = self.len(), "generating json schemas");
        self.generate_schemas::<JsonSchema>()
    }
}
