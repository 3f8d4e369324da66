use super::{NodeId, TypeId, TypeRegistry, TypeTree};
use indexmap::IndexMap;

/// Builds the tree of mapped ancestors for `ty`.
///
/// `is_mapped` tells whether a type has a mapping in the source being
/// assembled. Unmapped ancestors are passed through: their own ancestors
/// attach to the nearest mapped descendant. Each type appears at most once;
/// the first depth-first occurrence wins.
pub fn resolve(registry: &TypeRegistry, ty: TypeId, is_mapped: impl Fn(TypeId) -> bool) -> TypeTree {
    let mut tree = TypeTree::new(ty);
    let root = tree.root();
    Resolve {
        registry,
        is_mapped: &is_mapped,
    }
    .attach_ancestors(&mut tree, root, ty);
    tree
}

/// Types that appear in no other type's tree except as its root.
pub fn find_concrete_types(trees: &IndexMap<TypeId, TypeTree>) -> Vec<TypeId> {
    trees
        .keys()
        .copied()
        .filter(|ty| {
            !trees
                .iter()
                .any(|(other, tree)| other != ty && tree.contains_non_root(*ty))
        })
        .collect()
}

struct Resolve<'a> {
    registry: &'a TypeRegistry,
    is_mapped: &'a dyn Fn(TypeId) -> bool,
}

impl Resolve<'_> {
    /// Attaches the mapped ancestors of `ty` below `node`.
    fn attach_ancestors(&self, tree: &mut TypeTree, node: NodeId, ty: TypeId) {
        let ancestors: Vec<_> = self.registry.immediate_ancestors(ty).collect();

        for ancestor in ancestors {
            if !(self.is_mapped)(ancestor) {
                self.attach_ancestors(tree, node, ancestor);
            } else if !tree.contains(ancestor) {
                let child = tree.push_child(node, ancestor);
                self.attach_ancestors(tree, child, ancestor);
            }
        }
    }
}
