//! Naming policies shared by titling and compilation

use serde::{Deserialize, Serialize};

use crate::type_id::TypeId;

/// How automatic titles are derived from a [`TypeId`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleType {
    /// Canonical encoding, e.g. `com.example.Page<com.example.User>`
    #[default]
    Full,
    /// Unqualified form, e.g. `Page<User>`
    Simple,
}

impl TitleType {
    #[must_use]
    pub fn title(self, id: &TypeId) -> String {
        match self {
            Self::Full => id.full(),
            Self::Simple => id.simple(),
        }
    }
}

/// How definition names are derived from a [`TypeId`] in referencing mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefType {
    #[default]
    Full,
    Simple,
}

impl RefType {
    #[must_use]
    pub fn name(self, id: &TypeId) -> String {
        match self {
            Self::Full => id.full(),
            Self::Simple => id.simple(),
        }
    }
}
