//! Canonical type identity
//!
//! A [`TypeId`] names a type constructor together with its generic arguments
//! and an optional disambiguation token. Its textual form
//! `base<param1,param2>#token` is what schema placeholders carry as their
//! reference target, so encoding and parsing must stay exact inverses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

const WILDCARD: &str = "*";
const UNKNOWN: &str = "?";

/// Identity of a (possibly generic) type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId {
    base: String,
    type_parameters: Vec<TypeId>,
    additional_id: Option<String>,
}

impl TypeId {
    /// Create an id from all of its parts
    #[must_use]
    pub fn new(
        base: impl Into<String>,
        type_parameters: Vec<TypeId>,
        additional_id: Option<String>,
    ) -> Self {
        Self {
            base: base.into(),
            type_parameters,
            additional_id,
        }
    }

    /// Plain, non-generic id
    #[must_use]
    pub fn build(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new(), None)
    }

    /// Id with explicit generic parameters
    #[must_use]
    pub fn with_parameters(name: impl Into<String>, type_parameters: Vec<TypeId>) -> Self {
        Self::new(name, type_parameters, None)
    }

    /// Id carrying a freshly generated random token.
    ///
    /// Used for anonymous or locally scoped types that must never coalesce
    /// with another type of the same name. The token differs on every call.
    #[must_use]
    pub fn build_unique(name: impl Into<String>, type_parameters: Vec<TypeId>) -> Self {
        let token = uuid::Uuid::new_v4().simple().to_string();
        Self::new(name, type_parameters, Some(token))
    }

    /// The `*` sentinel
    #[must_use]
    pub fn wildcard() -> Self {
        Self::build(WILDCARD)
    }

    /// The `?` sentinel
    #[must_use]
    pub fn unknown() -> Self {
        Self::build(UNKNOWN)
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    #[must_use]
    pub fn type_parameters(&self) -> &[TypeId] {
        &self.type_parameters
    }

    #[must_use]
    pub fn additional_id(&self) -> Option<&str> {
        self.additional_id.as_deref()
    }

    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.base == WILDCARD && self.type_parameters.is_empty()
    }

    /// Copy of this id without the disambiguation token.
    ///
    /// Only the outermost token is stripped; parameters keep theirs.
    #[must_use]
    pub fn without_additional_id(&self) -> Self {
        Self::new(self.base.clone(), self.type_parameters.clone(), None)
    }

    /// Canonical encoding: `base<p1,p2>#token`
    #[must_use]
    pub fn full(&self) -> String {
        let mut out = self.base.clone();
        if !self.type_parameters.is_empty() {
            out.push('<');
            for (index, param) in self.type_parameters.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                out.push_str(&param.full());
            }
            out.push('>');
        }
        if let Some(token) = &self.additional_id {
            out.push('#');
            out.push_str(token);
        }
        out
    }

    /// Unqualified form used for short titles and definition names.
    ///
    /// `com.example.Page<com.example.User>` becomes `Page<User>`. Rust style
    /// `crate::models::User` paths are shortened the same way. The token is
    /// dropped.
    #[must_use]
    pub fn simple(&self) -> String {
        let mut out = simple_name(&self.base).to_string();
        if !self.type_parameters.is_empty() {
            let params: Vec<String> = self.type_parameters.iter().map(Self::simple).collect();
            out.push('<');
            out.push_str(&params.join(","));
            out.push('>');
        }
        out
    }

    /// Parse the canonical encoding produced by [`TypeId::full`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedTypeId`] when generic brackets are unbalanced
    /// or text follows the closing bracket without being a `#token`.
    pub fn parse(text: &str) -> Result<Self> {
        let mut depth = 0usize;
        let mut open = None;
        let mut close = None;
        let mut hash = None;

        for (index, c) in text.char_indices() {
            match c {
                '<' => {
                    if depth == 0 {
                        if close.is_some() {
                            return Err(Error::malformed(text, "second generic parameter list"));
                        }
                        open = Some(index);
                    }
                    depth += 1;
                }
                '>' => {
                    if depth == 0 {
                        return Err(Error::malformed(text, "unbalanced '>'"));
                    }
                    depth -= 1;
                    if depth == 0 {
                        close = Some(index);
                    }
                }
                '#' if depth == 0 => hash = Some(index),
                _ => {}
            }
        }
        if depth != 0 {
            return Err(Error::malformed(text, "unclosed '<'"));
        }

        let (head, additional_id) = match hash {
            Some(position) => {
                if open.is_some_and(|open| position < open) {
                    return Err(Error::malformed(
                        text,
                        "generic parameters after disambiguation token",
                    ));
                }
                (&text[..position], Some(text[position + 1..].to_string()))
            }
            None => (text, None),
        };

        let (Some(open), Some(close)) = (open, close) else {
            return Ok(Self::new(head, Vec::new(), additional_id));
        };
        if close + 1 != head.len() {
            return Err(Error::malformed(text, "unexpected text after generic parameters"));
        }

        let inner = &head[open + 1..close];
        let type_parameters = split_type_params(inner)
            .into_iter()
            .map(Self::parse)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(&head[..open], type_parameters, additional_id))
    }
}

/// Split a parameter list on commas at nesting depth 0.
///
/// Brackets always hold at least one parameter, so `Foo<>` keeps a single
/// empty one and round-trips through [`TypeId::full`].
fn split_type_params(inner: &str) -> Vec<&str> {
    let mut result = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (index, c) in inner.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                result.push(&inner[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    result.push(&inner[start..]);
    result
}

fn simple_name(base: &str) -> &str {
    let last_path = base.rsplit("::").next().unwrap_or(base);
    last_path.rsplit('.').next().unwrap_or(last_path)
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full())
    }
}

impl FromStr for TypeId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for TypeId {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.full())
    }
}

impl<'de> Deserialize<'de> for TypeId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
