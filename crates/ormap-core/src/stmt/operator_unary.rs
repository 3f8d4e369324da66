use super::{Operator, UnaryOp};

#[derive(Debug, Clone, PartialEq)]
pub struct OperatorUnary {
    pub op: UnaryOp,

    pub operand: Box<Operator>,
}

impl From<OperatorUnary> for Operator {
    fn from(value: OperatorUnary) -> Self {
        Self::Unary(value)
    }
}
