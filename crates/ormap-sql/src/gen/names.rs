use crate::Param;
use ormap_core::schema::{Chain, Mapping, Property};

/// Names the parameters and temporaries of one chain's statements.
///
/// A parameter is named after its property, qualified with the table name
/// when another mapping of the chain declares a property of the same name.
/// Rows of a bulk statement append `_<row>` to every parameter name and
/// read their values from instance `<row>`.
#[derive(Clone, Copy)]
pub(super) struct Names<'a> {
    chain: Chain<'a>,
    row: Option<usize>,
}

impl<'a> Names<'a> {
    pub(super) fn new(chain: Chain<'a>) -> Self {
        Self { chain, row: None }
    }

    pub(super) fn row(chain: Chain<'a>, row: usize) -> Self {
        Self {
            chain,
            row: Some(row),
        }
    }

    /// The instance parameters read from.
    pub(super) fn instance(&self) -> usize {
        self.row.unwrap_or(0)
    }

    /// The property's name, qualified when ambiguous within the chain.
    pub(super) fn qualified(&self, mapping: &Mapping, property: &Property) -> String {
        if self.is_shared(&property.name) {
            format!("{}{}", mapping.table, property.name)
        } else {
            property.name.clone()
        }
    }

    pub(super) fn param(&self, mapping: &Mapping, property: &Property) -> Param {
        let mut name = self.qualified(mapping, property);

        if let Some(row) = self.row {
            name = format!("{name}_{row}");
        }

        Param::property(name, property, self.instance())
    }

    /// The batch variable holding a key value between statements.
    pub(super) fn temp(&self, mapping: &Mapping, property: &Property) -> String {
        format!("{}{}_Temp", mapping.table, property.name)
    }

    fn is_shared(&self, name: &str) -> bool {
        self.chain
            .mappings()
            .filter(|mapping| {
                mapping
                    .identities
                    .iter()
                    .chain(&mapping.references)
                    .any(|property| property.name == name)
            })
            .count()
            > 1
    }
}
