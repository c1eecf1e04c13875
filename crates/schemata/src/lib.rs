//! Schemata - schema generation from type graphs
//!
//! This crate re-exports the engine and both schema backends so users only
//! depend on one crate.

pub use schemata_core::*;

// Re-export backend crates under short module names
pub mod openapi {
    pub use schemata_openapi::*;
}

pub mod jsonschema {
    pub use schemata_jsonschema::*;
}

// Re-export serde_json for building default and example values
pub use serde_json;
