//! Building a closed type graph from an introspection front-end

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::bundle::Bundle;
use crate::data::TypeData;
use crate::error::{Error, Result};
use crate::type_id::TypeId;

/// Source of raw type descriptions.
///
/// Whatever walks a language's type system implements this. The engine only
/// ever asks for one id at a time and follows the references in the returned
/// description itself.
pub trait TypeIntrospector {
    fn describe(&self, id: &TypeId) -> Option<TypeData>;
}

impl<F> TypeIntrospector for F
where
    F: Fn(&TypeId) -> Option<TypeData>,
{
    fn describe(&self, id: &TypeId) -> Option<TypeData> {
        self(id)
    }
}

/// In-memory introspector fed with ready-made descriptions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeCatalog {
    types: BTreeMap<TypeId, TypeData>,
}

impl TypeCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a description under its own id, replacing an earlier one
    #[must_use]
    pub fn with(mut self, data: TypeData) -> Self {
        self.register(data);
        self
    }

    pub fn register(&mut self, data: TypeData) {
        self.types.insert(data.id.clone(), data);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl FromIterator<TypeData> for TypeCatalog {
    fn from_iter<I: IntoIterator<Item = TypeData>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for data in iter {
            catalog.register(data);
        }
        catalog
    }
}

impl TypeIntrospector for TypeCatalog {
    fn describe(&self, id: &TypeId) -> Option<TypeData> {
        self.types.get(id).cloned()
    }
}

/// Options applied while the graph is collected
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypeGraphConfig {
    /// Descriptions used instead of asking the introspector
    pub custom_processors: BTreeMap<TypeId, TypeData>,
    /// When the key type is encountered, the value type is used instead
    pub type_redirects: BTreeMap<TypeId, TypeId>,
    /// Bases that never take generic parameters. Every spelling of such a
    /// type collapses to the bare base name.
    pub known_not_parameterized: BTreeSet<String>,
}

impl TypeGraphConfig {
    /// Add a custom description that overwrites the default behaviour for
    /// its id
    #[must_use]
    pub fn custom_processor(mut self, data: TypeData) -> Self {
        self.custom_processors.insert(data.id.clone(), data);
        self
    }

    /// Redirect from the given type to the other given type
    #[must_use]
    pub fn redirect(mut self, from: TypeId, to: TypeId) -> Self {
        self.type_redirects.insert(from, to);
        self
    }

    #[must_use]
    pub fn mark_not_parameterized(mut self, base: impl Into<String>) -> Self {
        self.known_not_parameterized.insert(base.into());
        self
    }
}

/// Collects every type reachable from a set of roots into a [`Bundle`].
///
/// This is the one graph-extending step: it adds entries as it discovers
/// them. Redirects may remap the roots themselves, so the returned root list
/// holds resolved ids.
#[derive(Debug, Clone, Default)]
pub struct TypeGraphBuilder {
    config: TypeGraphConfig,
}

impl TypeGraphBuilder {
    #[must_use]
    pub const fn new(config: TypeGraphConfig) -> Self {
        Self { config }
    }

    /// # Errors
    ///
    /// [`Error::UnresolvedType`] when neither a custom processor nor the
    /// introspector describes a reachable id, [`Error::RedirectCycle`] for
    /// circular redirects.
    pub fn build(
        &self,
        introspector: &impl TypeIntrospector,
        roots: &[TypeId],
    ) -> Result<Bundle<TypeData>> {
        let mut bundle = Bundle::new(Vec::new());
        let mut queue = VecDeque::new();
        for root in roots {
            let resolved = self.resolve_id(root)?;
            bundle.add_root(resolved.clone());
            queue.push_back(resolved);
        }

        while let Some(id) = queue.pop_front() {
            if bundle.contains(&id) {
                continue;
            }
            let mut data = self.describe(introspector, &id)?;
            data.id = id.clone();

            let mut failure = None;
            data.map_references(|reference| match self.resolve_id(reference) {
                Ok(resolved) => resolved,
                Err(err) => {
                    failure.get_or_insert(err);
                    reference.clone()
                }
            });
            if let Some(err) = failure {
                return Err(err);
            }

            queue.extend(
                data.references()
                    .into_iter()
                    .filter(|next| !bundle.contains(next))
                    .cloned(),
            );
            bundle.insert(id, data);
        }

        debug!(roots = bundle.roots().len(), entries = bundle.len(), "built type graph");
        Ok(bundle)
    }

    /// Apply known-non-generic normalisation and follow redirects
    fn resolve_id(&self, id: &TypeId) -> Result<TypeId> {
        let mut current = self.normalize(id);
        let mut visited = BTreeSet::new();
        while let Some(target) = self.redirect_target(&current) {
            if !visited.insert(current.clone()) {
                return Err(Error::RedirectCycle { id: current });
            }
            trace!(from = %current, to = %target, "redirecting type");
            current = self.normalize(target);
        }
        Ok(current)
    }

    /// Redirect configured for `id`, comparing keys in normalised form
    fn redirect_target(&self, id: &TypeId) -> Option<&TypeId> {
        self.config.type_redirects.get(id).or_else(|| {
            self.config
                .type_redirects
                .iter()
                .find(|(from, _)| self.normalize(from) == *id)
                .map(|(_, to)| to)
        })
    }

    /// Collapse known-non-generic bases at every nesting level
    fn normalize(&self, id: &TypeId) -> TypeId {
        if self.config.known_not_parameterized.contains(id.base()) {
            return TypeId::build(id.base());
        }
        if id.type_parameters().is_empty() {
            return id.clone();
        }
        let type_parameters = id
            .type_parameters()
            .iter()
            .map(|param| self.normalize(param))
            .collect();
        TypeId::new(
            id.base(),
            type_parameters,
            id.additional_id().map(str::to_string),
        )
    }

    fn describe(&self, introspector: &impl TypeIntrospector, id: &TypeId) -> Result<TypeData> {
        if let Some(custom) = self.config.custom_processors.get(id) {
            trace!(%id, "using custom processor");
            return Ok(custom.clone());
        }
        introspector
            .describe(id)
            .ok_or_else(|| Error::UnresolvedType { id: id.clone() })
    }
}
