use super::{BinaryOp, Type, Value};
use std::fmt;

/// A node of an object query, written against the object model.
///
/// The query's single parameter is the object being filtered (`x` in
/// `x => x.Age > 18`).
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// The object being queried
    Parameter,

    /// Member access, `target.name`
    Member {
        target: Box<Expression>,
        name: String,
    },

    Constant(Value),

    Binary {
        lhs: Box<Expression>,
        op: BinaryOp,
        rhs: Box<Expression>,
    },

    Not(Box<Expression>),

    Convert {
        operand: Box<Expression>,
        ty: Type,
    },

    /// Method call, `target.method(args..)`
    Call {
        target: Box<Expression>,
        method: String,
        args: Vec<Expression>,
    },
}

impl Expression {
    /// A property of the queried object.
    pub fn member(name: &str) -> Self {
        Self::Parameter.field(name)
    }

    /// Member access on this expression.
    pub fn field(self, name: &str) -> Self {
        Self::Member {
            target: Box::new(self),
            name: name.to_string(),
        }
    }

    pub fn constant(value: impl Into<Value>) -> Self {
        Self::Constant(value.into())
    }

    pub fn binary(lhs: impl Into<Self>, op: BinaryOp, rhs: impl Into<Self>) -> Self {
        Self::Binary {
            lhs: Box::new(lhs.into()),
            op,
            rhs: Box::new(rhs.into()),
        }
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
        Self::Not(Box::new(operand.into()))
    }

    pub fn convert(operand: impl Into<Self>, ty: Type) -> Self {
        Self::Convert {
            operand: Box::new(operand.into()),
            ty,
        }
    }

    pub fn call(self, method: &str, args: impl IntoIterator<Item = Expression>) -> Self {
        Self::Call {
            target: Box::new(self),
            method: method.to_string(),
            args: args.into_iter().collect(),
        }
    }

    pub fn starts_with(self, value: &str) -> Self {
        self.call("StartsWith", [Self::constant(value)])
    }

    pub fn ends_with(self, value: &str) -> Self {
        self.call("EndsWith", [Self::constant(value)])
    }

    pub fn contains(self, value: &str) -> Self {
        self.call("Contains", [Self::constant(value)])
    }

    /// The property name when this is a member of the queried object.
    pub fn as_parameter_member(&self) -> Option<&str> {
        match self {
            Self::Member { target, name } if matches!(**target, Self::Parameter) => Some(name),
            _ => None,
        }
    }
}

impl From<Value> for Expression {
    fn from(value: Value) -> Self {
        Self::Constant(value)
    }
}

impl From<bool> for Expression {
    fn from(value: bool) -> Self {
        Self::Constant(value.into())
    }
}

impl From<i32> for Expression {
    fn from(value: i32) -> Self {
        Self::Constant(value.into())
    }
}

impl From<i64> for Expression {
    fn from(value: i64) -> Self {
        Self::Constant(value.into())
    }
}

impl From<f64> for Expression {
    fn from(value: f64) -> Self {
        Self::Constant(value.into())
    }
}

impl From<&str> for Expression {
    fn from(value: &str) -> Self {
        Self::Constant(value.into())
    }
}

/// Renders the expression the way it reads in the object query, for error
/// messages.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parameter => f.write_str("x"),
            Self::Member { target, name } => write!(f, "{target}.{name}"),
            Self::Constant(value) => write!(f, "{value}"),
            Self::Binary { lhs, op, rhs } => write!(f, "({lhs} {op} {rhs})"),
            Self::Not(operand) => write!(f, "!{operand}"),
            Self::Convert { operand, ty } => write!(f, "({ty}){operand}"),
            Self::Call {
                target,
                method,
                args,
            } => {
                write!(f, "{target}.{method}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
        }
    }
}
