use super::{
    ColumnRef, Expression, LikeMethod, ObjectQuery, Operator, OperatorLike,
    PropertyResolver, QueryData, UnaryOp, Value,
};
use crate::schema::{Chain, Mapping, MappingSource, NodeId, Property};
use crate::{Error, Result};
use indexmap::IndexMap;
use tracing::debug;

/// Translates an object query into one [`QueryData`] per readable source
/// that maps the queried type, keyed by source name.
///
/// The operator tree is built once and then optimized separately for every
/// source, so a property only one source maps drops out of the other
/// sources' predicates. Expressions that have no SQL counterpart fail the
/// whole query.
pub fn translate<'a>(
    query: &ObjectQuery,
    sources: impl IntoIterator<Item = &'a MappingSource>,
) -> Result<IndexMap<String, QueryData>> {
    let filter = query.filter.as_ref().map(predicate).transpose()?;

    let order_by = query
        .order_by
        .iter()
        .map(|order_by| match order_by.expr.as_parameter_member() {
            Some(name) => Ok((name, order_by.direction)),
            None => Err(unsupported("ordering expression", &order_by.expr)),
        })
        .collect::<Result<Vec<_>>>()?;

    let mut ret = IndexMap::new();

    for source in sources {
        if !source.descriptor().read || !source.maps_type(query.ty) {
            continue;
        }

        let Ok(chain) = source.chain(query.ty) else {
            continue;
        };

        let columns = ChainColumns {
            chain,
            nodes: chain.joined_nodes(),
        };

        let filter = filter
            .clone()
            .and_then(|filter| filter.optimize(&columns))
            .filter(|filter| filter.as_bool_constant() != Some(true));

        let order_by = order_by
            .iter()
            .filter_map(|(name, direction)| {
                columns
                    .resolve_property(name)
                    .map(|column| (column, *direction))
            })
            .collect();

        let projection = if query.projection.is_empty() {
            columns.all()
        } else {
            query
                .projection
                .iter()
                .filter_map(|name| columns.resolve_property(name))
                .collect()
        };

        debug!(
            source = source.name(),
            ty = source.type_name(query.ty),
            filtered = filter.is_some(),
            "translated object query"
        );

        ret.insert(
            source.name().to_string(),
            QueryData {
                source: source.name().to_string(),
                ty: query.ty,
                projection,
                filter,
                order_by,
                skip: query.skip,
                take: query.take,
            },
        );
    }

    Ok(ret)
}

/// Builds an operator in predicate position, where a bare boolean property
/// stands for `property = true`.
fn predicate(expr: &Expression) -> Result<Operator> {
    match expr.as_parameter_member() {
        Some(name) => Ok(Operator::eq(Operator::property(name), true)),
        None => operator(expr),
    }
}

fn operator(expr: &Expression) -> Result<Operator> {
    Ok(match expr {
        Expression::Parameter => return Err(unsupported("parameter reference", expr)),
        Expression::Member { .. } => match expr.as_parameter_member() {
            Some(name) => Operator::property(name),
            None => return Err(unsupported("member access", expr)),
        },
        Expression::Constant(Value::List(_)) => return Err(unsupported("constant", expr)),
        Expression::Constant(value) => Operator::Constant(value.clone()),
        Expression::Binary { lhs, op, rhs } if op.is_logical() => {
            Operator::binary(predicate(lhs)?, *op, predicate(rhs)?)
        }
        Expression::Binary { lhs, op, rhs } => {
            Operator::binary(operator(lhs)?, *op, operator(rhs)?)
        }
        Expression::Not(operand) => Operator::not(predicate(operand)?),
        Expression::Convert { operand, ty } => {
            Operator::unary(UnaryOp::Convert(ty.clone()), operator(operand)?)
        }
        Expression::Call {
            target,
            method,
            args,
        } => match (LikeMethod::from_method(method), &args[..]) {
            (Some(method), [Expression::Constant(Value::String(value))]) => {
                OperatorLike::new(operator(target)?, method, value).into()
            }
            _ => return Err(unsupported("method call", expr)),
        },
    })
}

fn unsupported(what: &str, expr: &Expression) -> Error {
    Error::translation_unsupported(what, expr.to_string())
}

/// Resolves property names against the joinable mappings of a chain, the
/// queried type's own mapping first.
struct ChainColumns<'a> {
    chain: Chain<'a>,
    nodes: Vec<NodeId>,
}

impl ChainColumns<'_> {
    fn scalar_properties(&self) -> impl Iterator<Item = (&Mapping, &Property)> + '_ {
        self.nodes.iter().flat_map(move |node| {
            let mapping = self.chain.mapping(*node);
            mapping
                .identities
                .iter()
                .chain(&mapping.references)
                .map(move |property| (mapping, property))
        })
    }

    fn all(&self) -> Vec<ColumnRef> {
        self.scalar_properties()
            .map(|(mapping, property)| column_ref(mapping, property))
            .collect()
    }
}

impl PropertyResolver for ChainColumns<'_> {
    fn resolve_property(&self, name: &str) -> Option<ColumnRef> {
        self.scalar_properties()
            .find(|(_, property)| property.name == name)
            .map(|(mapping, property)| column_ref(mapping, property))
    }
}

fn column_ref(mapping: &Mapping, property: &Property) -> ColumnRef {
    ColumnRef {
        schema: mapping.schema.clone(),
        table: mapping.table.clone(),
        column: property.column.clone(),
        ty: property.ty.clone(),
    }
}
