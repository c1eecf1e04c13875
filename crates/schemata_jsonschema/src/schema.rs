//! JSON Schema (draft 2020-12) object model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use schemata_core::{PrimitiveKind, SchemaBuilder, SchemaNode, TypeId, ref_segment};

/// Dialect written into compiled documents
pub const DRAFT_2020_12: &str = "https://json-schema.org/draft/2020-12/schema";

/// Prefix of definition references
pub const DEFS_PREFIX: &str = "#/$defs/";

/// JSON Schema instance type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonSchema {
    #[serde(rename = "$schema")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialect: Option<String>,
    /// Before compilation this holds the canonical id of the referenced type
    #[serde(rename = "$ref")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_path: Option<String>,
    #[serde(rename = "type")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<JsonType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<JsonSchema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_items: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, JsonSchema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<Box<JsonSchema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#enum: Option<Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub any_of: Option<Vec<JsonSchema>>,
    #[serde(rename = "$defs")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defs: Option<BTreeMap<String, JsonSchema>>,
}

impl JsonSchema {
    #[must_use]
    pub fn new(schema_type: JsonType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Self::default()
        }
    }

    fn formatted(schema_type: JsonType, format: &str) -> Self {
        Self {
            format: Some(format.to_string()),
            ..Self::new(schema_type)
        }
    }

    /// Reference-only schema
    #[must_use]
    pub fn reference_to(ref_path: impl Into<String>) -> Self {
        Self {
            ref_path: Some(ref_path.into()),
            ..Self::default()
        }
    }

    /// `anyOf` wrapper produced for nullable edges
    fn or_null(self) -> Self {
        Self {
            any_of: Some(vec![self, Self::new(JsonType::Null)]),
            ..Self::default()
        }
    }
}

impl SchemaNode for JsonSchema {
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

    fn set_examples(&mut self, examples: Vec<serde_json::Value>) {
        self.examples = Some(examples);
    }

    fn default_value(&self) -> Option<&serde_json::Value> {
        self.default.as_ref()
    }

    fn set_default_value(&mut self, value: serde_json::Value) {
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
            .flat_map(|properties| properties.iter_mut())
            .map(|(name, schema)| (name.as_str(), schema))
            .collect()
    }

    fn children_mut(&mut self) -> Vec<&mut Self> {
        let mut children: Vec<&mut Self> = Vec::new();
        if let Some(properties) = self.properties.as_mut() {
            children.extend(properties.values_mut());
        }
        if let Some(items) = self.items.as_deref_mut() {
            children.push(items);
        }
        if let Some(values) = self.additional_properties.as_deref_mut() {
            children.push(values);
        }
        if let Some(options) = self.any_of.as_mut() {
            children.extend(options.iter_mut());
        }
        children
    }

    fn reference(&self) -> Option<&str> {
        self.ref_path.as_deref()
    }

    fn set_reference(&mut self, reference: String) {
        self.ref_path = Some(reference);
    }

    fn definition_ref(name: &str) -> String {
        format!("{DEFS_PREFIX}{}", ref_segment(name))
    }

    fn inline(placeholder: Self, target: Self) -> Self {
        Self {
            title: placeholder.title.or(target.title),
            description: placeholder.description.or(target.description),
            default: placeholder.default.or(target.default),
            examples: placeholder.examples.or(target.examples),
            deprecated: placeholder.deprecated.or(target.deprecated),
            ..target
        }
    }
}

impl SchemaBuilder for JsonSchema {
    fn placeholder(id: &TypeId) -> Self {
        Self::reference_to(id.full())
    }

    fn into_nullable(self) -> Self {
        self.or_null()
    }

    fn primitive(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::Boolean => Self::new(JsonType::Boolean),
            PrimitiveKind::Int32 => Self::formatted(JsonType::Integer, "int32"),
            PrimitiveKind::Int64 => Self::formatted(JsonType::Integer, "int64"),
            PrimitiveKind::Float => Self::formatted(JsonType::Number, "float"),
            PrimitiveKind::Double => Self::formatted(JsonType::Number, "double"),
            PrimitiveKind::String => Self::new(JsonType::String),
            PrimitiveKind::Unit => Self::new(JsonType::Object),
        }
    }

    fn object(properties: Vec<(String, Self)>, required: Vec<String>) -> Self {
        Self {
            properties: Some(properties.into_iter().collect()),
            required: Some(required),
            ..Self::new(JsonType::Object)
        }
    }

    fn array(items: Self, unique: bool) -> Self {
        Self {
            items: Some(Box::new(items)),
            unique_items: unique.then_some(true),
            ..Self::new(JsonType::Array)
        }
    }

    fn map(values: Self) -> Self {
        Self {
            additional_properties: Some(Box::new(values)),
            ..Self::new(JsonType::Object)
        }
    }

    fn enumeration(constants: &[String]) -> Self {
        Self {
            r#enum: Some(
                constants
                    .iter()
                    .cloned()
                    .map(serde_json::Value::String)
                    .collect(),
            ),
            ..Self::new(JsonType::String)
        }
    }

    fn any_of(options: Vec<Self>) -> Self {
        Self {
            any_of: Some(options),
            ..Self::default()
        }
    }

    fn any() -> Self {
        Self::default()
    }
}
