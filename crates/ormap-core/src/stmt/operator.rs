use super::{
    BinaryOp, OperatorBinary, OperatorLike, OperatorUnary, PropertyRef, Type, UnaryOp, Value,
};

/// A node of a per-source predicate tree.
///
/// Trees are built from object queries without knowledge of any source, then
/// specialized to one source by [`Operator::optimize`].
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Operator {
    /// A literal value
    Constant(Value),

    /// A property of the queried type
    Property(PropertyRef),

    /// Logical, comparison or arithmetic operation
    Binary(OperatorBinary),

    /// `NOT` or a conversion
    Unary(OperatorUnary),

    /// A `LIKE` match
    Like(OperatorLike),

    /// Matches nothing in particular; optimizes away
    #[default]
    Empty,
}

impl Operator {
    pub fn constant(value: impl Into<Value>) -> Self {
        Self::Constant(value.into())
    }

    pub fn property(name: &str) -> Self {
        Self::Property(PropertyRef::new(name))
    }

    pub fn binary(lhs: impl Into<Self>, op: BinaryOp, rhs: impl Into<Self>) -> Self {
        OperatorBinary {
            lhs: Box::new(lhs.into()),
            op,
            rhs: Box::new(rhs.into()),
        }
        .into()
    }

    pub fn and(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        Self::binary(lhs, BinaryOp::And, rhs)
    }

    pub fn or(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        Self::binary(lhs, BinaryOp::Or, rhs)
    }

    pub fn eq(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        Self::binary(lhs, BinaryOp::Eq, rhs)
    }

    pub fn ne(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        Self::binary(lhs, BinaryOp::Ne, rhs)
    }

    pub fn lt(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        Self::binary(lhs, BinaryOp::Lt, rhs)
    }

    pub fn le(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        Self::binary(lhs, BinaryOp::Le, rhs)
    }

    pub fn gt(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        Self::binary(lhs, BinaryOp::Gt, rhs)
    }

    pub fn ge(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        Self::binary(lhs, BinaryOp::Ge, rhs)
    }

    pub fn not(operand: impl Into<Self>) -> Self {
        Self::unary(UnaryOp::Not, operand)
    }

    pub fn unary(op: UnaryOp, operand: impl Into<Self>) -> Self {
        OperatorUnary {
            op,
            operand: Box::new(operand.into()),
        }
        .into()
    }

    /// The result type ("type code") of the node.
    pub fn ty(&self) -> Type {
        match self {
            Self::Constant(value) => value.ty(),
            Self::Property(property) => property.ty.clone(),
            Self::Binary(binary) if binary.op.is_arithmetic() => {
                binary.lhs.ty().promote(&binary.rhs.ty())
            }
            Self::Binary(_) | Self::Like(_) => Type::Bool,
            Self::Unary(unary) => match &unary.op {
                UnaryOp::Not => Type::Bool,
                UnaryOp::Convert(ty) => ty.clone(),
            },
            Self::Empty => Type::Unknown,
        }
    }

    /// Returns `true` if the node yields a boolean. Unresolved properties
    /// count as boolean until their type is known.
    pub fn is_boolean(&self) -> bool {
        matches!(self.ty(), Type::Bool | Type::Unknown) && !self.is_empty()
    }

    pub fn is_null_literal(&self) -> bool {
        matches!(self, Self::Constant(Value::Null))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn as_constant(&self) -> Option<&Value> {
        match self {
            Self::Constant(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bool_constant(&self) -> Option<bool> {
        self.as_constant().and_then(Value::as_bool)
    }
}

impl From<Value> for Operator {
    fn from(value: Value) -> Self {
        Self::Constant(value)
    }
}

impl From<bool> for Operator {
    fn from(value: bool) -> Self {
        Self::Constant(value.into())
    }
}

impl From<i32> for Operator {
    fn from(value: i32) -> Self {
        Self::Constant(value.into())
    }
}

impl From<i64> for Operator {
    fn from(value: i64) -> Self {
        Self::Constant(value.into())
    }
}

impl From<&str> for Operator {
    fn from(value: &str) -> Self {
        Self::Constant(value.into())
    }
}
