use super::{Operator, OperatorBinary, UnaryOp, Value};

impl Operator {
    /// Returns the logical negation of the node, pushed as far down as the
    /// opposite-operator table allows.
    ///
    /// Comparisons flip to their opposite, `AND`/`OR` swap and negate both
    /// sides, `NOT x` unwraps to `x`, `LIKE` toggles to `NOT LIKE` and boolean
    /// constants flip. Anything else is wrapped in `NOT`.
    pub fn negate(self) -> Operator {
        match self {
            Operator::Binary(OperatorBinary { lhs, op, rhs }) => match op.negate() {
                Some(negated) if op.is_logical() => {
                    Operator::binary((*lhs).negate(), negated, (*rhs).negate())
                }
                Some(negated) => Operator::Binary(OperatorBinary {
                    lhs,
                    op: negated,
                    rhs,
                }),
                None => Operator::not(Operator::Binary(OperatorBinary { lhs, op, rhs })),
            },
            Operator::Unary(unary) if unary.op == UnaryOp::Not => *unary.operand,
            Operator::Like(mut like) => {
                like.negated = !like.negated;
                Operator::Like(like)
            }
            Operator::Constant(Value::Bool(value)) => Operator::Constant(Value::Bool(!value)),
            Operator::Empty => Operator::Empty,
            operator => Operator::not(operator),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stmt::{LikeMethod, OperatorLike};

    #[test]
    fn comparisons_flip() {
        let op = Operator::lt(Operator::property("Age"), 18);
        assert_eq!(op.negate(), Operator::ge(Operator::property("Age"), 18));

        let op = Operator::eq(Operator::property("Name"), Value::Null);
        assert_eq!(op.negate(), Operator::ne(Operator::property("Name"), Value::Null));
    }

    #[test]
    fn de_morgan() {
        let op = Operator::and(
            Operator::gt(Operator::property("Age"), 18),
            Operator::eq(Operator::property("Name"), "Ann"),
        );

        assert_eq!(
            op.negate(),
            Operator::or(
                Operator::le(Operator::property("Age"), 18),
                Operator::ne(Operator::property("Name"), "Ann"),
            )
        );
    }

    #[test]
    fn double_negation_is_identity() {
        let op = Operator::or(
            Operator::Like(OperatorLike::new(
                Operator::property("Name"),
                LikeMethod::StartsWith,
                "A",
            )),
            Operator::constant(true),
        );

        assert_eq!(op.clone().negate().negate(), op);
        assert_eq!(Operator::not(op.clone()).negate(), op);
    }
}
