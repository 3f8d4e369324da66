use super::{
    BinaryOp, Operator, OperatorBinary, OperatorUnary, PropertyResolver, Type, UnaryOp, Value,
};
use std::cmp::Ordering;

impl Operator {
    /// Specializes the tree to one source.
    ///
    /// Properties are resolved through `resolver`. A property that does not
    /// resolve removes every node above it up to the nearest `AND`/`OR`,
    /// which collapses to its surviving operand. Constants fold, boolean
    /// identities simplify and `NOT` is pushed into its operand. Returns
    /// `None` when nothing survives.
    pub fn optimize(self, resolver: &dyn PropertyResolver) -> Option<Operator> {
        match self {
            Operator::Empty => None,
            Operator::Constant(value) => Some(Operator::Constant(value)),
            Operator::Property(mut property) => {
                let column = resolver.resolve_property(&property.name)?;
                property.ty = column.ty.clone();
                property.column = Some(column);
                Some(Operator::Property(property))
            }
            Operator::Unary(OperatorUnary {
                op: UnaryOp::Not,
                operand,
            }) => {
                let operand = (*operand).optimize(resolver)?;
                operand.is_boolean().then(|| operand.negate())
            }
            Operator::Unary(OperatorUnary {
                op: UnaryOp::Convert(ty),
                operand,
            }) => match (*operand).optimize(resolver)? {
                Operator::Constant(value) => match ty.cast(&value) {
                    Some(value) => Some(Operator::Constant(value)),
                    None => Some(Operator::unary(UnaryOp::Convert(ty), value)),
                },
                operand => Some(Operator::unary(UnaryOp::Convert(ty), operand)),
            },
            Operator::Binary(OperatorBinary { lhs, op, rhs }) => {
                let lhs = (*lhs).optimize(resolver);
                let rhs = (*rhs).optimize(resolver);

                match (lhs, rhs) {
                    (Some(survivor), None) | (None, Some(survivor)) if op.is_logical() => {
                        survivor.is_boolean().then_some(survivor)
                    }
                    (None, _) | (_, None) => None,
                    (Some(lhs), Some(rhs)) if op.is_logical() => Some(fold_logical(lhs, op, rhs)),
                    (Some(lhs), Some(rhs)) if op.is_comparison() => {
                        Some(fold_comparison(lhs, op, rhs))
                    }
                    (Some(lhs), Some(rhs)) => Some(fold_arithmetic(lhs, op, rhs)),
                }
            }
            Operator::Like(mut like) => {
                let operand = std::mem::take(&mut *like.operand).optimize(resolver)?;
                like.operand = Box::new(operand);
                like.pattern = Some(like.build_pattern());
                Some(Operator::Like(like))
            }
        }
    }
}

fn fold_logical(lhs: Operator, op: BinaryOp, rhs: Operator) -> Operator {
    let is_and = op == BinaryOp::And;

    match (lhs.as_bool_constant(), rhs.as_bool_constant()) {
        // `true AND x` is `x`, `false OR x` is `x`
        (Some(value), _) if value == is_and => rhs,
        (_, Some(value)) if value == is_and => lhs,
        // `false AND x` is `false`, `true OR x` is `true`
        (Some(_), _) => lhs,
        (_, Some(_)) => rhs,
        (None, None) => Operator::binary(lhs, op, rhs),
    }
}

fn fold_comparison(lhs: Operator, op: BinaryOp, rhs: Operator) -> Operator {
    let (Some(l), Some(r)) = (lhs.as_constant(), rhs.as_constant()) else {
        return Operator::binary(lhs, op, rhs);
    };

    let result = if l.is_null() || r.is_null() {
        match op {
            BinaryOp::Eq => Some(l.is_null() && r.is_null()),
            BinaryOp::Ne => Some(!(l.is_null() && r.is_null())),
            _ => None,
        }
    } else {
        l.compare(r).map(|ordering| match op {
            BinaryOp::Eq => ordering == Ordering::Equal,
            BinaryOp::Ne => ordering != Ordering::Equal,
            BinaryOp::Lt => ordering == Ordering::Less,
            BinaryOp::Le => ordering != Ordering::Greater,
            BinaryOp::Gt => ordering == Ordering::Greater,
            BinaryOp::Ge => ordering != Ordering::Less,
            _ => unreachable!("not a comparison: {op}"),
        })
    };

    match result {
        Some(value) => Operator::constant(value),
        None => Operator::binary(lhs, op, rhs),
    }
}

fn fold_arithmetic(lhs: Operator, op: BinaryOp, rhs: Operator) -> Operator {
    let (Some(l), Some(r)) = (lhs.as_constant(), rhs.as_constant()) else {
        return Operator::binary(lhs, op, rhs);
    };

    match eval_arithmetic(l, op, r) {
        Some(value) => Operator::Constant(value),
        None => Operator::binary(lhs, op, rhs),
    }
}

fn eval_arithmetic(lhs: &Value, op: BinaryOp, rhs: &Value) -> Option<Value> {
    let ty = lhs.ty().promote(&rhs.ty());

    if !ty.is_numeric() {
        return None;
    }

    if ty == Type::F64 {
        let (l, r) = (lhs.as_f64()?, rhs.as_f64()?);
        let value = match op {
            BinaryOp::Add => l + r,
            BinaryOp::Sub => l - r,
            BinaryOp::Mul => l * r,
            BinaryOp::Div if r != 0.0 => l / r,
            BinaryOp::Mod if r != 0.0 => l % r,
            _ => return None,
        };
        return Some(Value::F64(value));
    }

    let (l, r) = (lhs.as_i64()?, rhs.as_i64()?);
    let value = match op {
        BinaryOp::Add => l.checked_add(r)?,
        BinaryOp::Sub => l.checked_sub(r)?,
        BinaryOp::Mul => l.checked_mul(r)?,
        BinaryOp::Div => l.checked_div(r)?,
        BinaryOp::Mod => l.checked_rem(r)?,
        _ => return None,
    };

    ty.cast(&Value::I64(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stmt::ColumnRef;

    struct Columns(Vec<(&'static str, Type)>);

    impl PropertyResolver for Columns {
        fn resolve_property(&self, name: &str) -> Option<ColumnRef> {
            self.0
                .iter()
                .find(|(column, _)| *column == name)
                .map(|(column, ty)| ColumnRef {
                    schema: "dbo".to_string(),
                    table: "Person".to_string(),
                    column: column.to_string(),
                    ty: ty.clone(),
                })
        }
    }

    fn person() -> Columns {
        Columns(vec![("Name", Type::String), ("Age", Type::I32)])
    }

    #[test]
    fn unresolved_operand_collapses_to_survivor() {
        let op = Operator::and(
            Operator::eq(Operator::property("Nickname"), "Al"),
            Operator::gt(Operator::property("Age"), 18),
        );

        let optimized = op.optimize(&person()).unwrap();
        assert!(matches!(
            &optimized,
            Operator::Binary(OperatorBinary { op: BinaryOp::Gt, .. })
        ));
    }

    #[test]
    fn non_boolean_survivor_disappears() {
        let op = Operator::eq(Operator::property("Nickname"), "Al");
        assert_eq!(op.optimize(&person()), None);
    }

    #[test]
    fn comparison_with_unresolved_operand_disappears() {
        let op = Operator::eq(Operator::property("Active"), false);
        assert_eq!(op.optimize(&person()), None);

        let op = Operator::not(Operator::eq(Operator::property("Active"), true));
        assert_eq!(op.optimize(&person()), None);

        let op = Operator::or(
            Operator::eq(Operator::property("Active"), false),
            Operator::gt(Operator::property("Age"), 18),
        );
        let optimized = op.optimize(&person()).unwrap();
        assert!(matches!(
            &optimized,
            Operator::Binary(OperatorBinary { op: BinaryOp::Gt, .. })
        ));
    }

    #[test]
    fn folds_constants() {
        let op = Operator::lt(Operator::binary(2, BinaryOp::Add, 3), 10);
        assert_eq!(op.optimize(&person()), Some(Operator::constant(true)));

        let op = Operator::and(true, Operator::gt(Operator::property("Age"), 1));
        let optimized = op.optimize(&person()).unwrap();
        assert!(matches!(optimized, Operator::Binary(_)));

        let op = Operator::or(true, Operator::gt(Operator::property("Age"), 1));
        assert_eq!(op.optimize(&person()), Some(Operator::constant(true)));
    }

    #[test]
    fn not_is_pushed_down() {
        let op = Operator::not(Operator::lt(Operator::property("Age"), 18));
        let pushed = Operator::ge(Operator::property("Age"), 18);

        assert_eq!(op.optimize(&person()), pushed.optimize(&person()));
    }

    #[test]
    fn empty_optimizes_away() {
        assert_eq!(Operator::Empty.optimize(&person()), None);
    }
}
