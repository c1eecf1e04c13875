//! Assembling compiled schemas into self-contained documents

use schemata_core::CompiledSchema;

use crate::schema::{DRAFT_2020_12, JsonSchema};

pub trait CompiledSchemaExt {
    /// Root schema carrying the `$schema` dialect and, when anything is
    /// referenced, the definitions under `$defs`
    fn into_document(self) -> JsonSchema;
}

impl CompiledSchemaExt for CompiledSchema<JsonSchema> {
    fn into_document(self) -> JsonSchema {
        let defs = (!self.definitions.is_empty()).then_some(self.definitions);
        JsonSchema {
            dialect: Some(DRAFT_2020_12.to_string()),
            defs,
            ..self.root
        }
    }
}
