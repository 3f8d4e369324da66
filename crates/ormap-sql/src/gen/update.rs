use super::Names;
use crate::serializer::{Ident, Joins, TableName, ToSql};
use crate::{Query, Serializer};
use ormap_core::{schema::Chain, Error, Result};

/// One `UPDATE` per mapping with writable references, ancestors first.
///
/// Rows are matched on the identities of the updated mapping and of the
/// identity-bearing ancestors it joins to. Mappings without references
/// contribute nothing.
pub(super) fn update(chain: Chain<'_>) -> Result<Vec<Query>> {
    let names = Names::new(chain);
    let mut queries = vec![];

    for node in chain.tree().post_order() {
        let mapping = chain.mapping(node);

        let references: Vec<_> = mapping
            .references
            .iter()
            .filter(|reference| reference.computed.is_none())
            .collect();

        if references.is_empty() {
            continue;
        }

        let joins = Joins::at(chain, node);
        let keys: Vec<_> = joins
            .nodes()
            .iter()
            .flat_map(|node| {
                let mapping = chain.mapping(*node);
                mapping
                    .identities
                    .iter()
                    .map(move |identity| (mapping, identity))
            })
            .collect();

        if keys.is_empty() {
            return Err(Error::resolution_anomaly(
                chain.source().type_name(mapping.ty),
                &references[0].name,
                "no identity to match rows on",
            ));
        }

        let joined = joins.nodes().len() > 1;
        let table = TableName::of(mapping);
        let mut serializer = Serializer::new();

        serializer.statement(|f| {
            fmt!(f, "UPDATE " table " SET ");

            let mut s = "";
            for reference in references {
                let param = names.param(mapping, reference);
                fmt!(f, s Ident(&reference.column) " = " param);
                s = ", ";
            }

            if joined {
                fmt!(f, " FROM " joins);
            }

            fmt!(f, " WHERE ");

            let mut s = "";
            for (mapping, identity) in keys {
                let column = TableName::of(mapping).column(&identity.column);
                let param = names.param(mapping, identity);
                fmt!(f, s column " = " param);
                s = " AND ";
            }
        });

        queries.push(serializer.finish());
    }

    Ok(queries)
}
