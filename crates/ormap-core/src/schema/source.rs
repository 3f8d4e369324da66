use super::{Mapping, NodeId, TypeId, TypeRegistry, TypeTree};
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Describes one physical data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSource {
    /// Unique source name, referenced by mapping declarations
    pub name: String,

    /// Sources with higher priority come first when several sources map
    /// the same type.
    pub priority: i32,

    /// Queries are translated for readable sources only.
    pub read: bool,

    pub write: bool,

    /// Runs the merge, reduce and prune stages during assembly.
    pub optimize: bool,
}

/// The assembled, immutable mapping metadata for one data source.
#[derive(Debug, Clone)]
pub struct MappingSource {
    pub(super) descriptor: DataSource,

    pub(super) registry: Arc<TypeRegistry>,

    /// Live mappings, by mapped type
    pub(super) mappings: IndexMap<TypeId, Mapping>,

    /// Resolved hierarchy, by root type
    pub(super) trees: IndexMap<TypeId, TypeTree>,

    /// Types that anchor no tree of their own
    pub(super) concrete: Vec<TypeId>,

    /// Ancestor type to the concrete types below it
    pub(super) children: IndexMap<TypeId, Vec<TypeId>>,

    /// Concrete type to its ancestors, itself included
    pub(super) parents: IndexMap<TypeId, Vec<TypeId>>,

    /// Types whose mapping was folded into another type's mapping
    pub(super) aliases: IndexMap<TypeId, TypeId>,
}

/// One type's mapped ancestry paired with the mappings of its nodes.
#[derive(Debug, Clone, Copy)]
pub struct Chain<'a> {
    source: &'a MappingSource,
    tree: &'a TypeTree,
}

impl DataSource {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn read(mut self, read: bool) -> Self {
        self.read = read;
        self
    }

    pub fn write(mut self, write: bool) -> Self {
        self.write = write;
        self
    }

    pub fn optimize(mut self, optimize: bool) -> Self {
        self.optimize = optimize;
        self
    }
}

impl Default for DataSource {
    fn default() -> Self {
        Self {
            name: String::new(),
            priority: 0,
            read: true,
            write: true,
            optimize: true,
        }
    }
}

impl MappingSource {
    pub(super) fn new(descriptor: DataSource, registry: Arc<TypeRegistry>) -> Self {
        Self {
            descriptor,
            registry,
            mappings: IndexMap::new(),
            trees: IndexMap::new(),
            concrete: vec![],
            children: IndexMap::new(),
            parents: IndexMap::new(),
            aliases: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn descriptor(&self) -> &DataSource {
        &self.descriptor
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn type_name(&self, ty: TypeId) -> &str {
        self.registry.name(ty)
    }

    /// Follows the alias of a folded type to the type that absorbed it.
    pub fn resolve_alias(&self, ty: TypeId) -> TypeId {
        let mut ty = ty;
        while let Some(target) = self.aliases.get(&ty) {
            ty = *target;
        }
        ty
    }

    pub fn mapping(&self, ty: TypeId) -> Option<&Mapping> {
        self.mappings.get(&self.resolve_alias(ty))
    }

    pub fn mappings(&self) -> impl Iterator<Item = &Mapping> {
        self.mappings.values()
    }

    pub fn tree(&self, ty: TypeId) -> Option<&TypeTree> {
        self.trees.get(&self.resolve_alias(ty))
    }

    pub fn trees(&self) -> impl Iterator<Item = (TypeId, &TypeTree)> {
        self.trees.iter().map(|(ty, tree)| (*ty, tree))
    }

    pub fn concrete_types(&self) -> &[TypeId] {
        &self.concrete
    }

    pub fn is_concrete(&self, ty: TypeId) -> bool {
        self.concrete.contains(&ty)
    }

    /// Concrete types whose chain includes `ty`.
    pub fn children_of(&self, ty: TypeId) -> &[TypeId] {
        self.children.get(&ty).map(|v| &v[..]).unwrap_or(&[])
    }

    /// The chain of a concrete type, itself first.
    pub fn parents_of(&self, ty: TypeId) -> &[TypeId] {
        self.parents.get(&ty).map(|v| &v[..]).unwrap_or(&[])
    }

    pub fn aliases(&self) -> impl Iterator<Item = (TypeId, TypeId)> + '_ {
        self.aliases.iter().map(|(from, to)| (*from, *to))
    }

    /// Returns `true` if this source maps `ty`, directly or through an alias.
    pub fn maps_type(&self, ty: TypeId) -> bool {
        self.mapping(ty).is_some() && self.tree(ty).is_some()
    }

    /// The chain for `ty`.
    ///
    /// Fails with a configuration error when the source does not map `ty`.
    pub fn chain(&self, ty: TypeId) -> Result<Chain<'_>> {
        match self.tree(ty) {
            Some(tree) if tree.types().iter().all(|ty| self.mappings.contains_key(ty)) => {
                Ok(Chain { source: self, tree })
            }
            _ => Err(Error::configuration(format!(
                "type `{}` has no mapping in data source `{}`",
                self.type_name(ty),
                self.name()
            ))),
        }
    }
}

impl<'a> Chain<'a> {
    pub fn source(&self) -> &'a MappingSource {
        self.source
    }

    pub fn tree(&self) -> &'a TypeTree {
        self.tree
    }

    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    pub fn ty(&self) -> TypeId {
        self.tree.root_ty()
    }

    /// The mapping of a node.
    ///
    /// # Panics
    ///
    /// Panics if `node` does not belong to this chain's tree.
    pub fn mapping(&self, node: NodeId) -> &'a Mapping {
        self.source
            .mappings
            .get(&self.tree.ty(node))
            .expect("chain node without mapping")
    }

    /// Mappings in depth-first order, the requested type first.
    pub fn mappings(&self) -> impl Iterator<Item = &'a Mapping> + '_ {
        self.tree
            .pre_order()
            .into_iter()
            .map(move |node| self.mapping(node))
    }

    pub fn nodes(&self) -> Vec<NodeId> {
        self.tree.pre_order()
    }

    /// The immediate mapped ancestors of a node.
    pub fn children(&self, node: NodeId) -> &'a [NodeId] {
        self.tree.children(node)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.tree.parent(node)
    }

    /// Nodes reachable from the root through edges into identity-bearing
    /// ancestors, pre-order. These are the tables a row of the chain can be
    /// joined across.
    pub fn joined_nodes(&self) -> Vec<NodeId> {
        let mut ret = vec![];
        let mut stack = vec![self.root()];

        while let Some(node) = stack.pop() {
            ret.push(node);
            stack.extend(
                self.children(node)
                    .iter()
                    .rev()
                    .copied()
                    .filter(|child| self.mapping(*child).has_identity()),
            );
        }

        ret
    }

    /// Returns `true` if the mapping of `node`, or of any of its ancestors,
    /// declares an identity.
    pub fn has_identity_below(&self, node: NodeId) -> bool {
        self.mapping(node).has_identity()
            || self
                .tree
                .ancestors(node)
                .into_iter()
                .any(|ancestor| self.mapping(ancestor).has_identity())
    }
}
