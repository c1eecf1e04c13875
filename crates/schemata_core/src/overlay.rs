//! Non-destructive metadata overlays
//!
//! One walker, many overlays. Each overlay only says how to read its datum
//! from a type or property description and how to write it into a node. The
//! walker applies the type-level datum to the entry node, then the matching
//! property-level datum to each named property node. Nothing already present
//! on a node is overwritten, so overlays can run in any order and any number
//! of times.

use std::sync::Arc;

use serde_json::{Number, Value};
use tracing::{debug, trace};

use crate::annotations;
use crate::bundle::Bundle;
use crate::config::TitleType;
use crate::data::{AnnotationData, AnnotationValue, MetadataSource};
use crate::error::Result;
use crate::node::{SchemaEntry, SchemaNode};
use crate::step::Step;

/// A single kind of metadata applied by [`apply_overlay`]
pub trait Overlay {
    type Datum;

    /// Short name for log output
    fn name(&self) -> &'static str;

    fn read(&self, source: MetadataSource<'_>) -> Option<Self::Datum>;

    fn is_present<S: SchemaNode>(&self, node: &S) -> bool;

    fn write<S: SchemaNode>(&self, node: &mut S, datum: Self::Datum);
}

/// Apply `overlay` to `node` and to its named properties.
///
/// Property nodes are matched to the members of the originating type by
/// name; properties without a matching member are left alone.
pub fn apply_overlay<O, S>(overlay: &O, node: &mut S, source: MetadataSource<'_>)
where
    O: Overlay,
    S: SchemaNode,
{
    if !overlay.is_present(node)
        && let Some(datum) = overlay.read(source)
    {
        overlay.write(node, datum);
    }
    if let MetadataSource::Type(data) = source {
        for (name, property) in node.properties_mut() {
            if let Some(member) = data.find_member(name) {
                apply_overlay(overlay, property, MetadataSource::Property(member));
            }
        }
    }
}

/// Step wrapper running an [`Overlay`] over every entry of a schema graph
#[derive(Debug, Clone, Default)]
pub struct OverlayStep<O> {
    overlay: O,
}

impl<O> OverlayStep<O> {
    pub const fn new(overlay: O) -> Self {
        Self { overlay }
    }
}

impl<O, S> Step<SchemaEntry<S>, SchemaEntry<S>> for OverlayStep<O>
where
    O: Overlay,
    S: SchemaNode,
{
    fn process(&self, bundle: Bundle<SchemaEntry<S>>) -> Result<Bundle<SchemaEntry<S>>> {
        debug!(overlay = self.overlay.name(), entries = bundle.len(), "applying overlay");
        Ok(bundle.map(|_, mut entry| {
            let data = Arc::clone(&entry.type_data);
            apply_overlay(&self.overlay, &mut entry.schema, MetadataSource::Type(&data));
            entry
        }))
    }
}

/// Look up `key` on `annotation`, logging when the value has another kind
fn argument<'a, T>(
    annotation: &'a AnnotationData,
    key: &str,
    expected: &str,
    extract: impl FnOnce(&'a AnnotationValue) -> Option<T>,
) -> Option<T> {
    let value = annotation.value(key)?;
    let extracted = extract(value);
    if extracted.is_none() {
        trace!(
            annotation = %annotation.name,
            key,
            expected,
            found = value.kind(),
            "ignoring annotation argument of unexpected kind"
        );
    }
    extracted
}

fn first_string(source: MetadataSource<'_>, name: &'static str, key: &str) -> Option<String> {
    source
        .annotations_named(name)
        .find_map(|a| argument(a, key, "string", AnnotationValue::as_str))
        .map(str::to_string)
}

/// Examples from every `Example` annotation
#[derive(Debug, Clone, Copy, Default)]
pub struct ExamplesOverlay;

impl Overlay for ExamplesOverlay {
    type Datum = Vec<Value>;

    fn name(&self) -> &'static str {
        "examples"
    }

    fn read(&self, source: MetadataSource<'_>) -> Option<Vec<Value>> {
        let examples: Vec<Value> = source
            .annotations_named(annotations::EXAMPLE)
            .filter_map(|a| {
                argument(a, annotations::EXAMPLE_VALUE, "string", AnnotationValue::as_str)
            })
            .map(|example| Value::String(example.to_string()))
            .collect();
        (!examples.is_empty()).then_some(examples)
    }

    fn is_present<S: SchemaNode>(&self, node: &S) -> bool {
        node.has_examples()
    }

    fn write<S: SchemaNode>(&self, node: &mut S, datum: Vec<Value>) {
        node.set_examples(datum);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptionOverlay;

impl Overlay for DescriptionOverlay {
    type Datum = String;

    fn name(&self) -> &'static str {
        "description"
    }

    fn read(&self, source: MetadataSource<'_>) -> Option<String> {
        first_string(source, annotations::DESCRIPTION, annotations::DESCRIPTION_VALUE)
    }

    fn is_present<S: SchemaNode>(&self, node: &S) -> bool {
        node.description().is_some()
    }

    fn write<S: SchemaNode>(&self, node: &mut S, datum: String) {
        node.set_description(datum);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DeprecatedOverlay;

impl Overlay for DeprecatedOverlay {
    type Datum = bool;

    fn name(&self) -> &'static str {
        "deprecated"
    }

    fn read(&self, source: MetadataSource<'_>) -> Option<bool> {
        let annotation = source.annotations_named(annotations::DEPRECATED).next()?;
        if annotation.value(annotations::DEPRECATED_VALUE).is_none() {
            return Some(true);
        }
        argument(
            annotation,
            annotations::DEPRECATED_VALUE,
            "boolean",
            AnnotationValue::as_bool,
        )
    }

    fn is_present<S: SchemaNode>(&self, node: &S) -> bool {
        node.deprecated().is_some()
    }

    fn write<S: SchemaNode>(&self, node: &mut S, datum: bool) {
        node.set_deprecated(datum);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultOverlay;

impl Overlay for DefaultOverlay {
    type Datum = Value;

    fn name(&self) -> &'static str {
        "default"
    }

    fn read(&self, source: MetadataSource<'_>) -> Option<Value> {
        source
            .annotations_named(annotations::DEFAULT)
            .find_map(|a| {
                argument(
                    a,
                    annotations::DEFAULT_VALUE,
                    "string, number or boolean",
                    |value| match value {
                        AnnotationValue::String(text) => Some(Value::String(text.clone())),
                        AnnotationValue::Boolean(flag) => Some(Value::Bool(*flag)),
                        AnnotationValue::Number(number) => number_value(*number),
                        AnnotationValue::StringArray(_) => None,
                    },
                )
            })
    }

    fn is_present<S: SchemaNode>(&self, node: &S) -> bool {
        node.default_value().is_some()
    }

    fn write<S: SchemaNode>(&self, node: &mut S, datum: Value) {
        node.set_default_value(datum);
    }
}

/// Integral numbers become JSON integers so `integer` schemas get `3`, not `3.0`
fn number_value(number: f64) -> Option<Value> {
    #[allow(clippy::cast_precision_loss)]
    let in_range = (i64::MIN as f64..i64::MAX as f64).contains(&number);
    if number.fract() == 0.0 && in_range {
        #[allow(clippy::cast_possible_truncation)]
        return Some(Value::from(number as i64));
    }
    Number::from_f64(number).map(Value::Number)
}

/// Title declared through the `Title` annotation
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleOverlay;

impl Overlay for TitleOverlay {
    type Datum = String;

    fn name(&self) -> &'static str {
        "title"
    }

    fn read(&self, source: MetadataSource<'_>) -> Option<String> {
        first_string(source, annotations::TITLE, annotations::TITLE_VALUE)
    }

    fn is_present<S: SchemaNode>(&self, node: &S) -> bool {
        node.title().is_some()
    }

    fn write<S: SchemaNode>(&self, node: &mut S, datum: String) {
        node.set_title(datum);
    }
}

/// Title derived from the type id; only applies to type-level nodes
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoTitleOverlay {
    pub title_type: TitleType,
}

impl Overlay for AutoTitleOverlay {
    type Datum = String;

    fn name(&self) -> &'static str {
        "auto title"
    }

    fn read(&self, source: MetadataSource<'_>) -> Option<String> {
        match source {
            MetadataSource::Type(data) => Some(self.title_type.title(&data.id)),
            MetadataSource::Property(_) => None,
        }
    }

    fn is_present<S: SchemaNode>(&self, node: &S) -> bool {
        node.title().is_some()
    }

    fn write<S: SchemaNode>(&self, node: &mut S, datum: String) {
        node.set_title(datum);
    }
}

pub type ExamplesStep = OverlayStep<ExamplesOverlay>;
pub type DescriptionStep = OverlayStep<DescriptionOverlay>;
pub type DeprecatedStep = OverlayStep<DeprecatedOverlay>;
pub type DefaultStep = OverlayStep<DefaultOverlay>;
pub type TitleStep = OverlayStep<TitleOverlay>;
pub type AutoTitleStep = OverlayStep<AutoTitleOverlay>;

impl AutoTitleStep {
    #[must_use]
    pub const fn with_title_type(title_type: TitleType) -> Self {
        Self::new(AutoTitleOverlay { title_type })
    }
}
