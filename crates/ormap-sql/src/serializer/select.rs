use super::{ColumnName, Comma, Formatter, Params, Serializer, TableName, ToSql};

use crate::Query;
use ormap_core::{
    schema::{db::ancestor_key_column, Chain, NodeId},
    stmt::QueryData,
    MappingSource, Result,
};
use tracing::debug;

/// The `FROM` clause of a chain: the requested type's table, inner joined
/// to every identity-bearing ancestor table along the chain.
pub(crate) struct Joins<'a> {
    chain: Chain<'a>,
    nodes: Vec<NodeId>,
}

/// Renders a translated query as a `SELECT` against its source.
///
/// Fails when the source no longer maps the queried type.
pub fn render(data: &QueryData, source: &MappingSource) -> Result<Query> {
    let chain = source.chain(data.ty)?;
    let mut serializer = Serializer::new();

    serializer.statement(|f| {
        fmt!(f, "SELECT ");

        if data.projection.is_empty() {
            fmt!(f, "*");
        } else {
            let columns = Comma(data.projection.iter().map(ColumnName::from));
            fmt!(f, columns);
        }

        fmt!(f, " FROM " Joins::new(chain));

        if data.is_always_false() {
            fmt!(f, " WHERE (1 = 0)");
        } else if let Some(filter) = &data.filter {
            fmt!(f, " WHERE " filter);
        }

        paging(f, data);
    });

    let query = serializer.finish();

    debug!(
        source = source.name(),
        ty = source.type_name(data.ty),
        params = query.params.len(),
        "rendered select"
    );

    Ok(query)
}

fn paging<P: Params>(f: &mut Formatter<'_, P>, data: &QueryData) {
    let paged = data.skip > 0 || data.take > 0;

    if !data.order_by.is_empty() {
        fmt!(f, " ORDER BY ");

        let mut s = "";
        for (column, direction) in &data.order_by {
            let direction = if direction.is_desc() { " DESC" } else { " ASC" };
            fmt!(f, s ColumnName::from(column) direction);
            s = ", ";
        }
    } else if paged {
        // OFFSET requires an ORDER BY clause
        fmt!(f, " ORDER BY (SELECT NULL)");
    }

    if paged {
        fmt!(f, " OFFSET " data.skip " ROWS");
    }

    if data.take > 0 {
        fmt!(f, " FETCH NEXT " data.take " ROWS ONLY");
    }
}

impl<'a> Joins<'a> {
    pub(crate) fn new(chain: Chain<'a>) -> Self {
        Self::at(chain, chain.root())
    }

    /// The clause for the part of the chain at and above `start`.
    pub(crate) fn at(chain: Chain<'a>, start: NodeId) -> Self {
        let mut nodes = vec![];
        let mut stack = vec![start];

        while let Some(node) = stack.pop() {
            nodes.push(node);
            stack.extend(
                chain
                    .children(node)
                    .iter()
                    .rev()
                    .copied()
                    .filter(|child| chain.mapping(*child).has_identity()),
            );
        }

        Self { chain, nodes }
    }

    /// Nodes whose tables appear in the clause, the starting node first.
    pub(crate) fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }
}

impl ToSql for Joins<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let chain = self.chain;
        fmt!(f, TableName::of(chain.mapping(self.nodes[0])));

        for &node in &self.nodes[1..] {
            let Some(parent) = chain.parent(node) else {
                continue;
            };

            let ancestor = chain.mapping(node);
            let descendant = TableName::of(chain.mapping(parent));
            let table = TableName::of(ancestor);

            fmt!(f, " INNER JOIN " table " ON ");

            let mut s = "";
            for identity in &ancestor.identities {
                let key = ancestor_key_column(ancestor, identity);
                let lhs = table.column(&identity.column);
                let rhs = descendant.column(&key);

                fmt!(f, s lhs " = " rhs);
                s = " AND ";
            }
        }
    }
}
