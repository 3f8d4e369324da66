use super::Type;

#[derive(Debug, Clone, PartialEq)]
pub enum UnaryOp {
    /// Logical negation
    Not,

    /// Conversion to another type
    Convert(Type),
}

impl UnaryOp {
    pub fn is_not(&self) -> bool {
        matches!(self, Self::Not)
    }
}
