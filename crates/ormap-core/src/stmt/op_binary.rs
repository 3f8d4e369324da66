use std::fmt;

#[derive(Copy, Clone, PartialEq, Eq)]
pub enum BinaryOp {
    And,
    Or,
    Eq,
    Ne,
    Ge,
    Gt,
    Le,
    Lt,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinaryOp {
    pub fn is_logical(self) -> bool {
        matches!(self, Self::And | Self::Or)
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Eq | Self::Ne | Self::Ge | Self::Gt | Self::Le | Self::Lt
        )
    }

    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Mod
        )
    }

    /// The operator producing the logical negation of this one. Arithmetic
    /// operators have none.
    pub fn negate(self) -> Option<Self> {
        use BinaryOp::*;

        Some(match self {
            And => Or,
            Or => And,
            Eq => Ne,
            Ne => Eq,
            Ge => Lt,
            Gt => Le,
            Le => Gt,
            Lt => Ge,
            Add | Sub | Mul | Div | Mod => return None,
        })
    }

    /// The operator to use when the operands swap sides.
    pub fn reverse(self) -> Self {
        use BinaryOp::*;

        match self {
            Ge => Le,
            Gt => Lt,
            Le => Ge,
            Lt => Gt,
            op => op,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BinaryOp::*;

        match self {
            And => "&&".fmt(f),
            Or => "||".fmt(f),
            Eq => "==".fmt(f),
            Ne => "!=".fmt(f),
            Ge => ">=".fmt(f),
            Gt => ">".fmt(f),
            Le => "<=".fmt(f),
            Lt => "<".fmt(f),
            Add => "+".fmt(f),
            Sub => "-".fmt(f),
            Mul => "*".fmt(f),
            Div => "/".fmt(f),
            Mod => "%".fmt(f),
        }
    }
}

impl fmt::Debug for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
