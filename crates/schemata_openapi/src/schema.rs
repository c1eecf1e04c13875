//! Schema-related structure definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use schemata_core::{PrimitiveKind, SchemaBuilder, SchemaNode, TypeId, ref_segment};

/// Prefix of component schema references
pub const COMPONENTS_PREFIX: &str = "#/components/schemas/";

/// Reference definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Reference path (e.g., "#/components/schemas/User")
    #[serde(rename = "$ref")]
    pub ref_path: String,
}

impl Reference {
    /// Create a new reference
    #[must_use]
    pub const fn new(ref_path: String) -> Self {
        Self { ref_path }
    }

    /// Create a component schema reference; `name` is escaped for the
    /// fragment
    #[must_use]
    pub fn schema(name: &str) -> Self {
        Self::new(format!("{COMPONENTS_PREFIX}{}", ref_segment(name)))
    }
}

/// JSON Schema type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
}

/// Number format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberFormat {
    Float,
    Double,
    Int32,
    Int64,
}

impl NumberFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Double => "double",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
        }
    }
}

/// OpenAPI schema object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Schema reference ($ref). Before compilation this holds the canonical
    /// type id of the referenced type.
    #[serde(rename = "$ref")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_path: Option<String>,
    /// Schema type
    #[serde(rename = "type")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,
    /// Format (for numbers or strings)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Default value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    /// Examples
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<serde_json::Value>>,
    /// Deprecated flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,

    // Array constraints
    /// Array item schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    /// Unique items flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_items: Option<bool>,

    // Object constraints
    /// Property definitions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Schema>>,
    /// List of required properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    /// Schema of values for map-like objects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<Box<Schema>>,

    // General constraints
    /// Enum values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#enum: Option<Vec<serde_json::Value>>,
    /// At least one condition must be satisfied (OR)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub any_of: Option<Vec<Schema>>,

    /// Nullable flag (`OpenAPI` 3.0 keyword)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
}

impl Schema {
    /// Create a new schema
    #[must_use]
    pub fn new(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Self::default()
        }
    }

    /// Create a string schema
    #[must_use]
    pub fn string() -> Self {
        Self::new(SchemaType::String)
    }

    /// Create an integer schema
    #[must_use]
    pub fn integer(format: NumberFormat) -> Self {
        Self {
            format: Some(format.as_str().to_string()),
            ..Self::new(SchemaType::Integer)
        }
    }

    /// Create a number schema
    #[must_use]
    pub fn number(format: NumberFormat) -> Self {
        Self {
            format: Some(format.as_str().to_string()),
            ..Self::new(SchemaType::Number)
        }
    }

    /// Create a boolean schema
    #[must_use]
    pub fn boolean() -> Self {
        Self::new(SchemaType::Boolean)
    }

    /// Create an array schema
    #[must_use]
    pub fn array(items: Self) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::new(SchemaType::Array)
        }
    }

    /// Create an object schema
    #[must_use]
    pub fn object() -> Self {
        Self {
            properties: Some(BTreeMap::new()),
            required: Some(Vec::new()),
            ..Self::new(SchemaType::Object)
        }
    }

    /// Create a reference-only schema
    #[must_use]
    pub fn reference_to(reference: Reference) -> Self {
        Self {
            ref_path: Some(reference.ref_path),
            ..Self::default()
        }
    }
}

impl SchemaNode for Schema {
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
        Reference::schema(name).ref_path
    }

    fn inline(placeholder: Self, target: Self) -> Self {
        Self {
            title: placeholder.title.or(target.title),
            description: placeholder.description.or(target.description),
            default: placeholder.default.or(target.default),
            examples: placeholder.examples.or(target.examples),
            deprecated: placeholder.deprecated.or(target.deprecated),
            nullable: placeholder.nullable.or(target.nullable),
            ..target
        }
    }
}

impl SchemaBuilder for Schema {
    fn placeholder(id: &TypeId) -> Self {
        Self::reference_to(Reference::new(id.full()))
    }

    fn into_nullable(self) -> Self {
        Self {
            nullable: Some(true),
            ..self
        }
    }

    fn primitive(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::Boolean => Self::boolean(),
            PrimitiveKind::Int32 => Self::integer(NumberFormat::Int32),
            PrimitiveKind::Int64 => Self::integer(NumberFormat::Int64),
            PrimitiveKind::Float => Self::number(NumberFormat::Float),
            PrimitiveKind::Double => Self::number(NumberFormat::Double),
            PrimitiveKind::String => Self::string(),
            PrimitiveKind::Unit => Self::object(),
        }
    }

    fn object(properties: Vec<(String, Self)>, required: Vec<String>) -> Self {
        Self {
            properties: Some(properties.into_iter().collect()),
            required: Some(required),
            ..Self::new(SchemaType::Object)
        }
    }

    fn array(items: Self, unique: bool) -> Self {
        Self {
            unique_items: unique.then_some(true),
            ..Self::array(items)
        }
    }

    fn map(values: Self) -> Self {
        Self {
            additional_properties: Some(Box::new(values)),
            ..Self::new(SchemaType::Object)
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
            ..Self::string()
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

/// `OpenAPI` Components (reusable components)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    /// Schema definitions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemas: Option<BTreeMap<String, Schema>>,
}
