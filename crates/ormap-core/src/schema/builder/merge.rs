use super::BuildSource;
use crate::schema::{Mapping, TypeId, TypeTree};
use indexmap::IndexMap;
use tracing::{debug, trace};

impl BuildSource<'_> {
    /// Folds identity-less, merge-eligible mappings into related mappings.
    ///
    /// A mapping with an identity-bearing ancestor is folded into the first
    /// such ancestor (depth-first, base class first) and becomes an alias of
    /// it. Otherwise a leaf mapping is folded into the mapping that
    /// introduced it. Trees whose root was folded are re-keyed by their new
    /// root.
    pub(super) fn merge(&mut self) {
        let concrete = std::mem::take(&mut self.source.concrete);
        let mut merged = 0;

        for ty in concrete {
            let Some(mut tree) = self.source.trees.get(&ty).cloned() else {
                continue;
            };

            merged += merge_tree(
                &mut tree,
                &mut self.source.mappings,
                &mut self.source.aliases,
            );

            let root = tree.root_ty();
            if root != ty {
                self.source.trees.shift_remove(&ty);
            }
            self.source.trees.insert(root, tree);

            if !self.source.concrete.contains(&root) {
                self.source.concrete.push(root);
            }
        }

        debug!(
            source = self.source.name(),
            merged,
            aliases = self.source.aliases.len(),
            "merged mappings"
        );
    }
}

fn merge_tree(
    tree: &mut TypeTree,
    mappings: &mut IndexMap<TypeId, Mapping>,
    aliases: &mut IndexMap<TypeId, TypeId>,
) -> usize {
    let mut merged = 0;

    for node in tree.post_order() {
        let ty = tree.ty(node);

        match mappings.get(&ty) {
            Some(mapping) if mapping.merge && !mapping.has_identity() => {}
            _ => continue,
        }

        let target = tree.ancestors(node).into_iter().find(|ancestor| {
            mappings
                .get(&tree.ty(*ancestor))
                .is_some_and(Mapping::has_identity)
        });

        if let Some(target) = target {
            let target_ty = tree.ty(target);
            fold(mappings, ty, target_ty);

            if node == tree.root() {
                tree.reroot(target);
            } else {
                tree.splice(node);
            }

            aliases.entry(ty).or_insert(target_ty);
            merged += 1;
        } else if tree.children(node).is_empty() {
            let Some(parent) = tree.parent(node) else {
                continue;
            };

            fold(mappings, ty, tree.ty(parent));
            tree.detach(node);
            merged += 1;
        }
    }

    merged
}

/// Copies every property of `from` into `into`, re-binding the owner.
fn fold(mappings: &mut IndexMap<TypeId, Mapping>, from: TypeId, into: TypeId) {
    let Some(properties) = mappings
        .get(&from)
        .map(|mapping| mapping.properties().cloned().collect::<Vec<_>>())
    else {
        return;
    };

    let Some(target) = mappings.get_mut(&into) else {
        return;
    };

    trace!(
        from = ?from,
        into = ?into,
        properties = properties.len(),
        "folding mapping"
    );

    for property in properties {
        target.push(property);
    }
}
