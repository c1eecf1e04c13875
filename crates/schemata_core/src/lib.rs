//! schemata core - type identity and schema compilation
//!
//! The engine works on graphs of type descriptions keyed by [`TypeId`]:
//!
//! 1. [`TypeGraphBuilder`] collects descriptions from a [`TypeIntrospector`]
//!    into a closed [`Bundle`].
//! 2. [`Step`]s transform the bundle; [`SchemaGenerationStep`] converts it
//!    into backend schema nodes and overlays add metadata.
//! 3. The [`Compiler`] resolves placeholders into a [`CompiledSchema`].
//!
//! Concrete schema formats live in backend crates and plug in through
//! [`SchemaNode`] and [`SchemaBuilder`].

pub mod annotations;
pub mod builder;
pub mod bundle;
pub mod compiler;
pub mod config;
pub mod data;
pub mod error;
pub mod generate;
pub mod node;
pub mod overlay;
pub mod pipeline;
pub mod step;
pub mod type_id;

#[cfg(test)]
mod testing;

pub use builder::{TypeCatalog, TypeGraphBuilder, TypeGraphConfig, TypeIntrospector};
pub use bundle::Bundle;
pub use compiler::{CompiledSchema, Compiler};
pub use config::{RefType, TitleType};
pub use data::{
    AnnotationData, AnnotationValue, MetadataSource, PrimitiveKind, PropertyData, TypeData,
    TypeShape,
};
pub use error::{Error, Result};
pub use generate::SchemaGenerationStep;
pub use node::{SchemaBuilder, SchemaEntry, SchemaNode, ref_segment};
pub use overlay::{
    AutoTitleStep, DefaultStep, DeprecatedStep, DescriptionStep, ExamplesStep, Overlay,
    OverlayStep, TitleStep,
};
pub use pipeline::SchemaBundleExt;
pub use step::{OptionalAnnotationStep, RenamePropertiesStep, Step, TypeBundleExt};
pub use type_id::TypeId;
