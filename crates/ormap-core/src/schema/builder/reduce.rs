use super::BuildSource;
use crate::schema::Property;
use tracing::{debug, trace};

impl BuildSource<'_> {
    /// Removes redundant properties from the root mapping of every tree:
    /// duplicates within a collection (the first is kept), then properties
    /// similar to one an ancestor mapping declares.
    ///
    /// Identity kind plays no part in similarity: a redeclared key is removed
    /// like any other property. Ancestor mappings are left alone and
    /// generated surrogate keys are never removed, so running it twice
    /// changes nothing.
    pub(super) fn reduce(&mut self) {
        let source = &mut self.source;
        let mut removed = 0;

        for tree in source.trees.values() {
            let inherited: Vec<Property> = tree
                .ancestors(tree.root())
                .into_iter()
                .filter_map(|node| source.mappings.get(&tree.ty(node)))
                .flat_map(|mapping| mapping.properties().cloned())
                .collect();

            let Some(mapping) = source.mappings.get_mut(&tree.root_ty()) else {
                continue;
            };

            for collection in mapping.collections_mut() {
                let mut kept: Vec<Property> = Vec::with_capacity(collection.len());

                for property in collection.drain(..) {
                    let redundant = !property.is_auto_identity()
                        && (kept.iter().any(|other| other.is_similar(&property))
                            || inherited.iter().any(|other| other.is_similar(&property)));

                    if redundant {
                        trace!(
                            owner = ?property.owner,
                            property = %property.name,
                            "removing redundant property"
                        );
                        removed += 1;
                    } else {
                        kept.push(property);
                    }
                }

                *collection = kept;
            }
        }

        debug!(source = self.source.name(), removed, "reduced mappings");
    }
}
