use super::TypeId;
use std::fmt;

/// Index of a node within its [`TypeTree`] arena.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// The mapped ancestry of one type.
///
/// The root wraps the requested type; the children of a node are its
/// immediate mapped ancestors, base class first, then interfaces. Nodes live
/// in an arena and link by index. Detached nodes stay in the arena but are
/// unreachable from the root.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeTree {
    nodes: Vec<Node>,
    root: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
struct Node {
    ty: TypeId,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl TypeTree {
    pub fn new(root: TypeId) -> Self {
        Self {
            nodes: vec![Node {
                ty: root,
                parent: None,
                children: vec![],
            }],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_ty(&self) -> TypeId {
        self.ty(self.root)
    }

    pub fn ty(&self, node: NodeId) -> TypeId {
        self.nodes[node.0].ty
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// Appends a child (an immediate ancestor) to `parent`.
    pub fn push_child(&mut self, parent: NodeId, ty: TypeId) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            ty,
            parent: Some(parent),
            children: vec![],
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Reachable nodes in depth-first pre-order: each node comes before its
    /// ancestors, base class subtree before interface subtrees.
    pub fn pre_order(&self) -> Vec<NodeId> {
        let mut ret = vec![];
        let mut stack = vec![self.root];

        while let Some(node) = stack.pop() {
            ret.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }

        ret
    }

    /// Reachable nodes in depth-first post-order.
    pub fn post_order(&self) -> Vec<NodeId> {
        let mut ret = vec![];
        self.post_order_from(self.root, &mut ret);
        ret
    }

    fn post_order_from(&self, node: NodeId, ret: &mut Vec<NodeId>) {
        for child in self.children(node) {
            self.post_order_from(*child, ret);
        }
        ret.push(node);
    }

    /// The subtree rooted at `node`, pre-order, excluding `node` itself.
    pub fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut ret = vec![];
        let mut stack: Vec<_> = self.children(node).iter().rev().copied().collect();

        while let Some(next) = stack.pop() {
            ret.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }

        ret
    }

    /// Types of the reachable nodes, pre-order.
    pub fn types(&self) -> Vec<TypeId> {
        self.pre_order()
            .into_iter()
            .map(|node| self.ty(node))
            .collect()
    }

    /// Number of reachable nodes.
    pub fn node_count(&self) -> usize {
        self.pre_order().len()
    }

    pub fn find(&self, ty: TypeId) -> Option<NodeId> {
        self.pre_order().into_iter().find(|node| self.ty(*node) == ty)
    }

    pub fn contains(&self, ty: TypeId) -> bool {
        self.find(ty).is_some()
    }

    /// Returns `true` if `ty` is reachable and is not the root.
    pub fn contains_non_root(&self, ty: TypeId) -> bool {
        self.find(ty).is_some_and(|node| node != self.root)
    }

    /// Removes a node (and its subtree) from its parent.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|child| *child != node);
        }
    }

    /// Removes a non-root node, moving its children into its place within
    /// the parent's child list.
    pub fn splice(&mut self, node: NodeId) {
        let Some(parent) = self.nodes[node.0].parent.take() else {
            return;
        };

        let children = std::mem::take(&mut self.nodes[node.0].children);
        for child in &children {
            self.nodes[child.0].parent = Some(parent);
        }

        let siblings = &mut self.nodes[parent.0].children;
        if let Some(pos) = siblings.iter().position(|child| *child == node) {
            siblings.splice(pos..=pos, children);
        }
    }

    /// Makes `node` the root. The previous root is dropped; its remaining
    /// children are appended to the new root's children.
    pub fn reroot(&mut self, node: NodeId) {
        if node == self.root {
            return;
        }

        self.detach(node);

        let old_root = self.root;
        let children = std::mem::take(&mut self.nodes[old_root.0].children);
        for child in &children {
            self.nodes[child.0].parent = Some(node);
        }
        self.nodes[node.0].children.extend(children);
        self.root = node;
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "NodeId({})", self.0)
    }
}
