use super::BuildSource;
use crate::schema::TypeId;
use tracing::{debug, trace};

impl BuildSource<'_> {
    /// Drops mappings and trees of types that no concrete chain includes.
    ///
    /// Aliases are kept only for types whose mapping was dropped.
    pub(super) fn prune(&mut self) {
        let source = &mut self.source;
        let before = source.mappings.len();

        let live = |ty: &TypeId| source.children.contains_key(ty) || source.parents.contains_key(ty);

        source.mappings.retain(|ty, mapping| {
            let keep = live(ty);
            if !keep {
                trace!(table = %mapping.table, "pruning mapping");
            }
            keep
        });

        source.trees.retain(|ty, _| live(ty));
        source.aliases.retain(|ty, _| !live(ty));

        debug!(
            source = source.name(),
            pruned = before - source.mappings.len(),
            "pruned mappings"
        );
    }
}
