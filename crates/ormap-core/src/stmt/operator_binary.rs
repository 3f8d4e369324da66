use super::{BinaryOp, Operator};

#[derive(Debug, Clone, PartialEq)]
pub struct OperatorBinary {
    pub lhs: Box<Operator>,

    pub op: BinaryOp,

    pub rhs: Box<Operator>,
}

impl OperatorBinary {
    /// Returns `true` if one side is the `null` literal. Such comparisons
    /// render as `IS` / `IS NOT`.
    pub fn is_null_test(&self) -> bool {
        matches!(self.op, BinaryOp::Eq | BinaryOp::Ne)
            && (self.lhs.is_null_literal() || self.rhs.is_null_literal())
    }
}

impl From<OperatorBinary> for Operator {
    fn from(value: OperatorBinary) -> Self {
        Self::Binary(value)
    }
}
