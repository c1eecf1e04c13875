//! Error types shared by every pipeline stage

use thiserror::Error;

use crate::type_id::TypeId;

/// Fatal pipeline failure.
///
/// Any of these aborts the whole run; no stage returns a partially compiled
/// document alongside an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("malformed type id '{input}': {reason}")]
    MalformedTypeId { input: String, reason: String },

    #[error("type '{id}' is referenced but missing from the bundle")]
    MissingType { id: TypeId },

    #[error("root '{id}' is not part of the bundle")]
    UnknownRoot { id: TypeId },

    #[error("definition name '{name}' is produced by both '{first}' and '{second}'")]
    NamingCollision {
        name: String,
        first: TypeId,
        second: TypeId,
    },

    #[error("no type description available for '{id}'")]
    UnresolvedType { id: TypeId },

    #[error("type redirects form a cycle through '{id}'")]
    RedirectCycle { id: TypeId },
}

impl Error {
    pub(crate) fn malformed(input: &str, reason: impl Into<String>) -> Self {
        Self::MalformedTypeId {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
