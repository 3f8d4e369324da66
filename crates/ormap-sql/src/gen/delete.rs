use super::Names;
use crate::serializer::{TableName, ToSql};
use crate::{Query, Serializer};
use ormap_core::schema::{Chain, NodeId};

/// One `DELETE` per identity-bearing mapping of the chain.
///
/// Statements are ordered by the mappings' declared order, ancestors first
/// within the same order. The order is reversed, deleting descendant rows
/// first, unless every key referencing an ancestor row cascades.
pub(super) fn delete(chain: Chain<'_>) -> Vec<Query> {
    let names = Names::new(chain);

    let mut nodes: Vec<_> = chain
        .nodes()
        .into_iter()
        .filter(|node| chain.mapping(*node).has_identity())
        .collect();

    // `sort_by_key` is stable, so ties keep the depth-first order
    nodes.sort_by_key(|node| (chain.mapping(*node).order, std::cmp::Reverse(depth(chain, *node))));

    if !cascades(chain) {
        nodes.reverse();
    }

    nodes
        .into_iter()
        .map(|node| {
            let mapping = chain.mapping(node);
            let table = TableName::of(mapping);
            let mut serializer = Serializer::new();

            serializer.statement(|f| {
                fmt!(f, "DELETE FROM " table " WHERE ");

                let mut s = "";
                for identity in &mapping.identities {
                    let column = table.column(&identity.column);
                    let param = names.param(mapping, identity);
                    fmt!(f, s column " = " param);
                    s = " AND ";
                }
            });

            serializer.finish()
        })
        .collect()
}

fn depth(chain: Chain<'_>, node: NodeId) -> usize {
    std::iter::successors(chain.parent(node), |node| chain.parent(*node)).count()
}

/// Returns `true` if every identity an ancestor row passes down cascades on
/// delete. A single-table chain trivially does.
fn cascades(chain: Chain<'_>) -> bool {
    chain
        .nodes()
        .into_iter()
        .filter(|node| chain.parent(*node).is_some())
        .flat_map(|node| &chain.mapping(node).identities)
        .all(|identity| identity.cascade_delete)
}
