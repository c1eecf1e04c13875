//! Minimal schema node for engine tests

use std::collections::BTreeMap;

use serde_json::Value;

use crate::data::PrimitiveKind;
use crate::node::{SchemaBuilder, SchemaNode};
use crate::type_id::TypeId;

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct TestNode {
    pub kind: Option<String>,
    pub reference: Option<String>,
    pub nullable: bool,
    pub title: Option<String>,
    pub description: Option<String>,
    pub examples: Option<Vec<Value>>,
    pub default: Option<Value>,
    pub deprecated: Option<bool>,
    pub properties: BTreeMap<String, TestNode>,
    pub required: Vec<String>,
    pub items: Option<Box<TestNode>>,
    pub any_of: Vec<TestNode>,
    pub constants: Vec<String>,
}

impl TestNode {
    fn of_kind(kind: &str) -> Self {
        Self {
            kind: Some(kind.to_string()),
            ..Self::default()
        }
    }
}

impl SchemaNode for TestNode {
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn set_title(&mut self, title: String) {
        self.title = Some(title);
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn set_description(&mut self, description: String) {
        self.description = Some(description);
    }

    fn has_examples(&self) -> bool {
        self.examples.is_some()
    }

    fn set_examples(&mut self, examples: Vec<Value>) {
        self.examples = Some(examples);
    }

    fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    fn set_default_value(&mut self, value: Value) {
        self.default = Some(value);
    }

    fn deprecated(&self) -> Option<bool> {
        self.deprecated
    }

    fn set_deprecated(&mut self, deprecated: bool) {
        self.deprecated = Some(deprecated);
    }

    fn properties_mut(&mut self) -> Vec<(&str, &mut Self)> {
        self.properties
            .iter_mut()
            .map(|(name, node)| (name.as_str(), node))
            .collect()
    }

    fn children_mut(&mut self) -> Vec<&mut Self> {
        let mut children: Vec<&mut Self> = self.properties.values_mut().collect();
        if let Some(items) = self.items.as_deref_mut() {
            children.push(items);
        }
        children.extend(self.any_of.iter_mut());
        children
    }

    fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    fn set_reference(&mut self, reference: String) {
        self.reference = Some(reference);
    }

    fn definition_ref(name: &str) -> String {
        format!("#/defs/{name}")
    }

    fn inline(placeholder: Self, target: Self) -> Self {
        Self {
            nullable: placeholder.nullable || target.nullable,
            title: placeholder.title.or(target.title),
            description: placeholder.description.or(target.description),
            examples: placeholder.examples.or(target.examples),
            default: placeholder.default.or(target.default),
            deprecated: placeholder.deprecated.or(target.deprecated),
            ..target
        }
    }
}

impl SchemaBuilder for TestNode {
    fn placeholder(id: &TypeId) -> Self {
        Self {
            reference: Some(id.full()),
            ..Self::default()
        }
    }

    fn into_nullable(self) -> Self {
        Self {
            nullable: true,
            ..self
        }
    }

    fn primitive(kind: PrimitiveKind) -> Self {
        let name = match kind {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Int32 | PrimitiveKind::Int64 => "integer",
            PrimitiveKind::Float | PrimitiveKind::Double => "number",
            PrimitiveKind::String => "string",
            PrimitiveKind::Unit => "object",
        };
        Self::of_kind(name)
    }

    fn object(properties: Vec<(String, Self)>, required: Vec<String>) -> Self {
        Self {
            properties: properties.into_iter().collect(),
            required,
            ..Self::of_kind("object")
        }
    }

    fn array(items: Self, _unique: bool) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of_kind("array")
        }
    }

    fn map(values: Self) -> Self {
        Self {
            items: Some(Box::new(values)),
            ..Self::of_kind("map")
        }
    }

    fn enumeration(constants: &[String]) -> Self {
        Self {
            constants: constants.to_vec(),
            ..Self::of_kind("string")
        }
    }

    fn any_of(options: Vec<Self>) -> Self {
        Self {
            any_of: options,
            ..Self::default()
        }
    }

    fn any() -> Self {
        Self::default()
    }
}
