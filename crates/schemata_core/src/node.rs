//! Capability surface of backend schema nodes
//!
//! The engine never sees a concrete schema format. Overlays and the compiler
//! talk to nodes through [`SchemaNode`], and the format conversion step builds
//! them through [`SchemaBuilder`].

use std::fmt::{Debug, Write};
use std::sync::Arc;

use serde_json::Value;

use crate::data::{PrimitiveKind, TypeData};
use crate::type_id::TypeId;

/// Read and write access to the parts of a schema node the engine touches
pub trait SchemaNode: Clone + Debug {
    fn title(&self) -> Option<&str>;
    fn set_title(&mut self, title: String);

    fn description(&self) -> Option<&str>;
    fn set_description(&mut self, description: String);

    fn has_examples(&self) -> bool;
    fn set_examples(&mut self, examples: Vec<Value>);

    fn default_value(&self) -> Option<&Value>;
    fn set_default_value(&mut self, value: Value);

    fn deprecated(&self) -> Option<bool>;
    fn set_deprecated(&mut self, deprecated: bool);

    /// Named object properties, in a stable order
    fn properties_mut(&mut self) -> Vec<(&str, &mut Self)>;

    /// Every directly nested node: properties, items, map values and
    /// composition members
    fn children_mut(&mut self) -> Vec<&mut Self>;

    /// Reference target when this node is a reference or a placeholder
    fn reference(&self) -> Option<&str>;
    fn set_reference(&mut self, reference: String);

    /// Reference string pointing at the definition called `name`.
    ///
    /// `name` is the raw definition key; see [`ref_segment`].
    fn definition_ref(name: &str) -> String;

    /// Replace a placeholder by the node it points at.
    ///
    /// Metadata set on the placeholder itself (property level) overrides the
    /// same metadata on `target` (type level).
    fn inline(placeholder: Self, target: Self) -> Self;
}

/// Constructors used by the format conversion step
pub trait SchemaBuilder: SchemaNode {
    /// Node standing in for the schema of `id` until compilation
    fn placeholder(id: &TypeId) -> Self;

    /// Mark a node, typically a placeholder, as accepting `null`
    #[must_use]
    fn into_nullable(self) -> Self;

    fn primitive(kind: PrimitiveKind) -> Self;
    fn object(properties: Vec<(String, Self)>, required: Vec<String>) -> Self;
    fn array(items: Self, unique: bool) -> Self;
    fn map(values: Self) -> Self;
    fn enumeration(constants: &[String]) -> Self;
    fn any_of(options: Vec<Self>) -> Self;
    fn any() -> Self;
}

/// Payload of a schema graph: the backend node and the description it was
/// generated from
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaEntry<S> {
    pub schema: S,
    pub type_data: Arc<TypeData>,
}

impl<S> SchemaEntry<S> {
    #[must_use]
    pub const fn new(schema: S, type_data: Arc<TypeData>) -> Self {
        Self { schema, type_data }
    }
}

/// Encode a definition name as one JSON pointer segment inside a URI
/// fragment.
///
/// `~` and `/` get their pointer escapes, then everything a fragment may not
/// contain (`#`, `<`, `>`, spaces, non-ASCII) is percent-encoded as UTF-8.
#[must_use]
pub fn ref_segment(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '~' => out.push_str("~0"),
            '/' => out.push_str("~1"),
            c if c.is_ascii_alphanumeric() || "-._!$&'()*+,;=:@".contains(c) => out.push(c),
            c => {
                let mut buf = [0; 4];
                for byte in c.encode_utf8(&mut buf).bytes() {
                    let _ = write!(out, "%{byte:02X}");
                }
            }
        }
    }
    out
}
