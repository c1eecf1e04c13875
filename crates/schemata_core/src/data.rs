//! Raw type descriptions
//!
//! These records are what an introspection front-end hands to the engine.
//! They are immutable once built and are shared by reference through the
//! rest of the pipeline.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::type_id::TypeId;

/// Value of a single annotation argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnnotationValue {
    Boolean(bool),
    Number(f64),
    String(String),
    StringArray(Vec<String>),
}

impl AnnotationValue {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_string_array(&self) -> Option<&[String]> {
        match self {
            Self::StringArray(values) => Some(values),
            _ => None,
        }
    }

    /// Human readable kind, used in trace output
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::StringArray(_) => "string array",
        }
    }
}

impl From<&str> for AnnotationValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for AnnotationValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for AnnotationValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<f64> for AnnotationValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Vec<String>> for AnnotationValue {
    fn from(values: Vec<String>) -> Self {
        Self::StringArray(values)
    }
}

/// Metadata record attached to a type or a property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationData {
    pub name: String,
    #[serde(default)]
    pub values: BTreeMap<String, AnnotationValue>,
}

impl AnnotationData {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<AnnotationValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn value(&self, key: &str) -> Option<&AnnotationValue> {
        self.values.get(key)
    }
}

/// Primitive kinds understood by the format conversion step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Boolean,
    Int32,
    Int64,
    Float,
    Double,
    String,
    /// A type with exactly one value and no fields
    Unit,
}

/// Structural kind of a described type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeShape {
    Primitive { primitive: PrimitiveKind },
    Object,
    Collection {
        item: TypeId,
        #[serde(default)]
        unique: bool,
    },
    Map { value: TypeId },
    Enum { constants: Vec<String> },
    Any,
}

/// A named member of a type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyData {
    pub name: String,
    pub type_id: TypeId,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub annotations: Vec<AnnotationData>,
}

impl PropertyData {
    #[must_use]
    pub fn new(name: impl Into<String>, type_id: TypeId) -> Self {
        Self {
            name: name.into(),
            type_id,
            nullable: false,
            optional: false,
            annotations: Vec::new(),
        }
    }

    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    #[must_use]
    pub fn annotated(mut self, annotation: AnnotationData) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// Description of one type in the raw graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeData {
    pub id: TypeId,
    pub shape: TypeShape,
    #[serde(default)]
    pub subtypes: Vec<TypeId>,
    #[serde(default)]
    pub supertypes: Vec<TypeId>,
    #[serde(default)]
    pub annotations: Vec<AnnotationData>,
    #[serde(default)]
    pub members: Vec<PropertyData>,
}

impl TypeData {
    #[must_use]
    pub fn new(id: TypeId, shape: TypeShape) -> Self {
        Self {
            id,
            shape,
            subtypes: Vec::new(),
            supertypes: Vec::new(),
            annotations: Vec::new(),
            members: Vec::new(),
        }
    }

    #[must_use]
    pub fn primitive(id: TypeId, primitive: PrimitiveKind) -> Self {
        Self::new(id, TypeShape::Primitive { primitive })
    }

    #[must_use]
    pub fn object(id: TypeId) -> Self {
        Self::new(id, TypeShape::Object)
    }

    #[must_use]
    pub fn collection(id: TypeId, item: TypeId) -> Self {
        Self::new(id, TypeShape::Collection { item, unique: false })
    }

    #[must_use]
    pub fn map(id: TypeId, value: TypeId) -> Self {
        Self::new(id, TypeShape::Map { value })
    }

    #[must_use]
    pub fn enumeration(id: TypeId, constants: Vec<String>) -> Self {
        Self::new(id, TypeShape::Enum { constants })
    }

    #[must_use]
    pub fn member(mut self, property: PropertyData) -> Self {
        self.members.push(property);
        self
    }

    #[must_use]
    pub fn annotated(mut self, annotation: AnnotationData) -> Self {
        self.annotations.push(annotation);
        self
    }

    #[must_use]
    pub fn subtype(mut self, id: TypeId) -> Self {
        self.subtypes.push(id);
        self
    }

    #[must_use]
    pub fn supertype(mut self, id: TypeId) -> Self {
        self.supertypes.push(id);
        self
    }

    #[must_use]
    pub fn find_member(&self, name: &str) -> Option<&PropertyData> {
        self.members.iter().find(|member| member.name == name)
    }

    /// Ids this type points at: member types, collection items, map values
    /// and subtypes. These are the edges the closure invariant follows.
    #[must_use]
    pub fn references(&self) -> Vec<&TypeId> {
        let mut refs: Vec<&TypeId> = self.members.iter().map(|m| &m.type_id).collect();
        match &self.shape {
            TypeShape::Collection { item, .. } => refs.push(item),
            TypeShape::Map { value } => refs.push(value),
            _ => {}
        }
        refs.extend(self.subtypes.iter());
        refs
    }

    /// Rewrite every outgoing reference through `f`
    pub fn map_references(&mut self, mut f: impl FnMut(&TypeId) -> TypeId) {
        for member in &mut self.members {
            member.type_id = f(&member.type_id);
        }
        match &mut self.shape {
            TypeShape::Collection { item, .. } => *item = f(item),
            TypeShape::Map { value } => *value = f(value),
            _ => {}
        }
        for subtype in &mut self.subtypes {
            *subtype = f(subtype);
        }
    }
}

/// A node the overlay walker reads metadata from
#[derive(Debug, Clone, Copy)]
pub enum MetadataSource<'a> {
    Type(&'a TypeData),
    Property(&'a PropertyData),
}

impl<'a> MetadataSource<'a> {
    #[must_use]
    pub fn annotations(self) -> &'a [AnnotationData] {
        match self {
            Self::Type(data) => &data.annotations,
            Self::Property(data) => &data.annotations,
        }
    }

    /// All annotations with the given name, in declaration order
    pub fn annotations_named(self, name: &'a str) -> impl Iterator<Item = &'a AnnotationData> {
        self.annotations().iter().filter(move |a| a.name == name)
    }
}
