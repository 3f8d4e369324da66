use super::{Mapping, MappingSource};
use crate::{Error, Result};
use std::collections::HashSet;

struct Verify<'a> {
    source: &'a MappingSource,
}

impl MappingSource {
    pub(super) fn verify(&self) -> Result<()> {
        Verify { source: self }.verify()
    }
}

impl Verify<'_> {
    fn verify(&self) -> Result<()> {
        debug_assert!(self.verify_concrete_chains_have_identity());

        self.verify_table_names_are_unique()?;
        Ok(())
    }

    fn verify_concrete_chains_have_identity(&self) -> bool {
        for ty in self.source.concrete_types() {
            let Ok(chain) = self.source.chain(*ty) else {
                continue;
            };

            assert!(
                chain.mappings().any(Mapping::has_identity),
                "concrete type `{}` has no identity after assembly",
                self.source.type_name(*ty)
            );
        }

        true
    }

    fn verify_table_names_are_unique(&self) -> Result<()> {
        let mut seen = HashSet::new();

        for mapping in self.source.mappings() {
            if !seen.insert((&mapping.schema, &mapping.table)) {
                return Err(Error::configuration(format!(
                    "table `{}.{}` is mapped by more than one type",
                    mapping.schema, mapping.table
                )));
            }
        }

        Ok(())
    }
}
