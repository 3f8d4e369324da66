use super::{ColumnName, Formatter, Ident, Params, SqlType, ToSql};

use crate::Param;
use ormap_core::stmt::{BinaryOp, Operator, OperatorBinary, UnaryOp, Value};

impl ToSql for &Operator {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Operator::Constant(Value::Null) => fmt!(f, "NULL"),
            Operator::Constant(value) => constant(f, value.clone()),
            Operator::Property(property) => match &property.column {
                Some(column) => fmt!(f, ColumnName::from(column)),
                None => fmt!(f, Ident(&property.name)),
            },
            Operator::Binary(binary) => binary.to_sql(f),
            Operator::Unary(unary) => match &unary.op {
                UnaryOp::Not => {
                    let operand = &*unary.operand;
                    fmt!(f, "(NOT " operand ")");
                }
                UnaryOp::Convert(ty) => {
                    let ty = SqlType::new(ty);
                    let operand = &*unary.operand;
                    fmt!(f, "(CONVERT(" ty ", " operand "))");
                }
            },
            Operator::Like(like) => {
                let operand = &*like.operand;
                let keyword = if like.negated { " NOT LIKE " } else { " LIKE " };
                let pattern = like.pattern.clone().unwrap_or_else(|| like.build_pattern());

                fmt!(f, "(" operand keyword);
                constant(f, Value::String(pattern));
                fmt!(f, ")");
            }
            Operator::Empty => fmt!(f, "(1 = 1)"),
        }
    }
}

impl ToSql for &OperatorBinary {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let (lhs, rhs) = (&*self.lhs, &*self.rhs);

        if self.is_null_test() {
            let operand = if lhs.is_null_literal() { rhs } else { lhs };
            let test = if self.op == BinaryOp::Eq {
                " IS NULL)"
            } else {
                " IS NOT NULL)"
            };

            fmt!(f, "(" operand test);
            return;
        }

        fmt!(f, "(" lhs " " self.op " " rhs ")");
    }
}

impl ToSql for BinaryOp {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        f.dst.push_str(match self {
            BinaryOp::And => "AND",
            BinaryOp::Or => "OR",
            BinaryOp::Eq => "=",
            BinaryOp::Ne => "<>",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
        });
    }
}

/// Renders a literal as the next positional parameter, `@p0`, `@p1`, ...
fn constant<P: Params>(f: &mut Formatter<'_, P>, value: Value) {
    let param = Param::constant(format!("p{}", f.params.count()), value);
    fmt!(f, param);
}
