use super::BuildSource;
use tracing::debug;

impl BuildSource<'_> {
    /// Indexes every concrete type's chain: ancestors by concrete type and
    /// concrete types by ancestor. Both include the concrete type itself.
    pub(super) fn build_indexes(&mut self) {
        let source = &mut self.source;
        source.children.clear();
        source.parents.clear();

        for ty in &source.concrete {
            let Some(tree) = source.trees.get(ty) else {
                continue;
            };

            let chain = tree.types();

            for ancestor in &chain {
                let children = source.children.entry(*ancestor).or_default();
                if !children.contains(ty) {
                    children.push(*ty);
                }
            }

            source.parents.insert(*ty, chain);
        }

        debug!(
            source = source.name(),
            parents = source.parents.len(),
            children = source.children.len(),
            "built type indexes"
        );
    }
}
