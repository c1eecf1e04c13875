//! Terminal compilation of schema graphs
//!
//! Placeholders left by format conversion are resolved either by inlining the
//! referenced entry or by pointing at a named definition. Cycles are broken
//! with references in both modes.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, trace};

use crate::bundle::Bundle;
use crate::config::RefType;
use crate::error::{Error, Result};
use crate::node::{SchemaBuilder, SchemaEntry, SchemaNode};
use crate::type_id::TypeId;

/// Final output: a root node plus the definitions it references
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledSchema<S> {
    pub root: S,
    pub definitions: BTreeMap<String, S>,
}

/// Compiles a [`Bundle`] of schema entries for one chosen root
#[derive(Debug, Clone, Copy, Default)]
pub struct Compiler {
    ref_type: RefType,
}

impl Compiler {
    #[must_use]
    pub const fn new(ref_type: RefType) -> Self {
        Self { ref_type }
    }

    /// Expand every placeholder in place.
    ///
    /// A placeholder pointing back at a type that is currently being expanded
    /// becomes a reference instead, and that type is emitted once into the
    /// definitions map. Acyclic graphs therefore compile to a single tree with
    /// no definitions.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownRoot`], [`Error::MissingType`],
    /// [`Error::MalformedTypeId`] for a corrupted placeholder, or
    /// [`Error::NamingCollision`] between cyclic types.
    pub fn compile_inlining<S: SchemaNode>(
        &self,
        bundle: &Bundle<SchemaEntry<S>>,
        root: &TypeId,
    ) -> Result<CompiledSchema<S>> {
        let mut ctx = Context::new(bundle, self.ref_type);
        let mut root_node = ctx.root(root)?;
        let mut stack = vec![root.clone()];
        ctx.inline(&mut root_node, &mut stack)?;

        let mut definitions = BTreeMap::new();
        while let Some(id) = ctx.pending.pop() {
            let mut node = ctx.entry(&id)?;
            let mut stack = vec![id.clone()];
            ctx.inline(&mut node, &mut stack)?;
            definitions.insert(self.ref_type.name(&id), node);
        }

        debug!(%root, definitions = definitions.len(), "compiled inlining");
        Ok(CompiledSchema {
            root: root_node,
            definitions,
        })
    }

    /// Keep the root inline and turn every other reachable entry into a
    /// definition. The root itself only becomes a definition when something
    /// references it.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownRoot`], [`Error::MissingType`],
    /// [`Error::MalformedTypeId`] or [`Error::NamingCollision`].
    pub fn compile_referencing<S: SchemaNode>(
        &self,
        bundle: &Bundle<SchemaEntry<S>>,
        root: &TypeId,
    ) -> Result<CompiledSchema<S>> {
        let mut ctx = Context::new(bundle, self.ref_type);
        let mut root_node = ctx.root(root)?;
        ctx.link(&mut root_node)?;
        let definitions = self.drain_linked(&mut ctx)?;

        debug!(%root, definitions = definitions.len(), "compiled referencing");
        Ok(CompiledSchema {
            root: root_node,
            definitions,
        })
    }

    /// Like [`Compiler::compile_referencing`], but every root of the bundle
    /// is a definition and the returned root is a reference to `root`.
    ///
    /// # Errors
    ///
    /// Same as [`Compiler::compile_referencing`].
    pub fn compile_referencing_root<S: SchemaBuilder>(
        &self,
        bundle: &Bundle<SchemaEntry<S>>,
        root: &TypeId,
    ) -> Result<CompiledSchema<S>> {
        let mut ctx = Context::new(bundle, self.ref_type);
        ctx.root(root)?;
        for other in bundle.roots() {
            if !bundle.contains(other) {
                return Err(Error::UnknownRoot { id: other.clone() });
            }
            ctx.reference(other)?;
        }
        let mut root_node = S::placeholder(root);
        ctx.link(&mut root_node)?;
        let definitions = self.drain_linked(&mut ctx)?;

        debug!(%root, definitions = definitions.len(), "compiled referencing root");
        Ok(CompiledSchema {
            root: root_node,
            definitions,
        })
    }

    fn drain_linked<S: SchemaNode>(&self, ctx: &mut Context<'_, S>) -> Result<BTreeMap<String, S>> {
        let mut definitions = BTreeMap::new();
        while let Some(id) = ctx.pending.pop() {
            let mut node = ctx.entry(&id)?;
            ctx.link(&mut node)?;
            definitions.insert(self.ref_type.name(&id), node);
        }
        Ok(definitions)
    }
}

struct Context<'a, S> {
    bundle: &'a Bundle<SchemaEntry<S>>,
    ref_type: RefType,
    /// Definition name to the id that claimed it
    names: BTreeMap<String, TypeId>,
    queued: BTreeSet<TypeId>,
    pending: Vec<TypeId>,
}

impl<'a, S: SchemaNode> Context<'a, S> {
    fn new(bundle: &'a Bundle<SchemaEntry<S>>, ref_type: RefType) -> Self {
        Self {
            bundle,
            ref_type,
            names: BTreeMap::new(),
            queued: BTreeSet::new(),
            pending: Vec::new(),
        }
    }

    fn root(&self, id: &TypeId) -> Result<S> {
        self.bundle
            .get(id)
            .map(|entry| entry.schema.clone())
            .ok_or_else(|| Error::UnknownRoot { id: id.clone() })
    }

    fn entry(&self, id: &TypeId) -> Result<S> {
        Ok(self.bundle.require(id)?.schema.clone())
    }

    fn definition_name(&mut self, id: &TypeId) -> Result<String> {
        let name = self.ref_type.name(id);
        match self.names.get(&name) {
            Some(existing) if existing != id => Err(Error::NamingCollision {
                name,
                first: existing.clone(),
                second: id.clone(),
            }),
            Some(_) => Ok(name),
            None => {
                self.names.insert(name.clone(), id.clone());
                Ok(name)
            }
        }
    }

    /// Reference string for `id`, queueing its definition on first use
    fn reference(&mut self, id: &TypeId) -> Result<String> {
        if !self.bundle.contains(id) {
            return Err(Error::MissingType { id: id.clone() });
        }
        let name = self.definition_name(id)?;
        if self.queued.insert(id.clone()) {
            self.pending.push(id.clone());
        }
        Ok(S::definition_ref(&name))
    }

    /// Replace every placeholder below `node` with a definition reference
    fn link(&mut self, node: &mut S) -> Result<()> {
        if let Some(target) = node.reference() {
            let id = TypeId::parse(target)?;
            let path = self.reference(&id)?;
            node.set_reference(path);
            return Ok(());
        }
        for child in node.children_mut() {
            self.link(child)?;
        }
        Ok(())
    }

    /// Expand placeholders below `node`, `stack` holding the ids being
    /// expanded on the current path
    fn inline(&mut self, node: &mut S, stack: &mut Vec<TypeId>) -> Result<()> {
        if let Some(target) = node.reference() {
            let id = TypeId::parse(target)?;
            if stack.contains(&id) {
                trace!(%id, "cycle detected, keeping a reference");
                let path = self.reference(&id)?;
                node.set_reference(path);
                return Ok(());
            }
            let mut resolved = self.entry(&id)?;
            stack.push(id);
            self.inline(&mut resolved, stack)?;
            stack.pop();
            *node = S::inline(node.clone(), resolved);
            return Ok(());
        }
        for child in node.children_mut() {
            self.inline(child, stack)?;
        }
        Ok(())
    }
}
