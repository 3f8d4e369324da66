use super::BuildSource;
use crate::schema::Property;
use tracing::{debug, trace};

impl BuildSource<'_> {
    /// Gives the root mapping of every tree an auto-increment identity when
    /// it has none of its own, so every concrete mapping can be addressed by
    /// key.
    pub(super) fn assign_surrogate_keys(&mut self) {
        let source = &mut self.source;
        let mut assigned = 0;

        for tree in source.trees.values() {
            let Some(mapping) = source.mappings.get_mut(&tree.root_ty()) else {
                continue;
            };

            if mapping.has_identity() {
                continue;
            }

            let name = mapping.generated_name(&self.builder.identity_name);
            trace!(table = %mapping.table, identity = %name, "assigning surrogate key");
            mapping.push(Property::auto_identity(&name));
            assigned += 1;
        }

        debug!(source = source.name(), assigned, "assigned surrogate keys");
    }
}
