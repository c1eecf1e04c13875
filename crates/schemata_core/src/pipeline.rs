//! Fluent chaining over schema graphs
//!
//! ```ignore
//! let compiled = bundle
//!     .generate_schemas::<Schema>()?
//!     .handle_core_annotations()?
//!     .with_auto_title(TitleType::Simple)?
//!     .compile_referencing(RefType::Simple)?;
//! ```

use crate::bundle::Bundle;
use crate::compiler::{CompiledSchema, Compiler};
use crate::config::{RefType, TitleType};
use crate::error::{Error, Result};
use crate::node::{SchemaBuilder, SchemaEntry};
use crate::overlay::{
    AutoTitleStep, DefaultStep, DeprecatedStep, DescriptionStep, ExamplesStep, Overlay,
    OverlayStep, TitleStep,
};
use crate::step::Step;
use crate::type_id::TypeId;

pub trait SchemaBundleExt<S: SchemaBuilder>: Sized {
    /// See [`AutoTitleStep`]
    ///
    /// # Errors
    ///
    /// Overlays do not fail; the `Result` keeps chains uniform.
    fn with_auto_title(self, title_type: TitleType) -> Result<Bundle<SchemaEntry<S>>>;

    /// Default, deprecated, description, examples and title overlays
    ///
    /// # Errors
    ///
    /// Overlays do not fail; the `Result` keeps chains uniform.
    fn handle_core_annotations(self) -> Result<Bundle<SchemaEntry<S>>>;

    /// Inline everything below the first root, see
    /// [`Compiler::compile_inlining`]
    ///
    /// # Errors
    ///
    /// See [`Compiler::compile_inlining`].
    fn compile_inlining(&self) -> Result<CompiledSchema<S>>;

    /// See [`Compiler::compile_referencing`], for the first root
    ///
    /// # Errors
    ///
    /// See [`Compiler::compile_referencing`].
    fn compile_referencing(&self, ref_type: RefType) -> Result<CompiledSchema<S>>;

    /// See [`Compiler::compile_referencing_root`], for the first root
    ///
    /// # Errors
    ///
    /// See [`Compiler::compile_referencing_root`].
    fn compile_referencing_root(&self, ref_type: RefType) -> Result<CompiledSchema<S>>;
}

fn first_root<S>(bundle: &Bundle<SchemaEntry<S>>) -> Result<&TypeId> {
    bundle.roots().first().ok_or_else(|| Error::UnknownRoot {
        id: TypeId::unknown(),
    })
}

fn overlay<O: Overlay, S: SchemaBuilder>(
    bundle: Bundle<SchemaEntry<S>>,
    step: &OverlayStep<O>,
) -> Result<Bundle<SchemaEntry<S>>> {
    step.process(bundle)
}

impl<S: SchemaBuilder> SchemaBundleExt<S> for Bundle<SchemaEntry<S>> {
    fn with_auto_title(self, title_type: TitleType) -> Result<Self> {
        overlay(self, &AutoTitleStep::with_title_type(title_type))
    }

    fn handle_core_annotations(self) -> Result<Self> {
        let bundle = overlay(self, &DefaultStep::default())?;
        let bundle = overlay(bundle, &DeprecatedStep::default())?;
        let bundle = overlay(bundle, &DescriptionStep::default())?;
        let bundle = overlay(bundle, &ExamplesStep::default())?;
        overlay(bundle, &TitleStep::default())
    }

    fn compile_inlining(&self) -> Result<CompiledSchema<S>> {
        Compiler::default().compile_inlining(self, first_root(self)?)
    }

    fn compile_referencing(&self, ref_type: RefType) -> Result<CompiledSchema<S>> {
        Compiler::new(ref_type).compile_referencing(self, first_root(self)?)
    }

    fn compile_referencing_root(&self, ref_type: RefType) -> Result<CompiledSchema<S>> {
        Compiler::new(ref_type).compile_referencing_root(self, first_root(self)?)
    }
}
