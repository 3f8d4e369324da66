mod expression;
pub use expression::Expression;

mod instance;
pub use instance::{Instance, Record};

mod negate;

mod op_binary;
pub use op_binary::BinaryOp;

mod op_unary;
pub use op_unary::UnaryOp;

mod operator;
pub use operator::Operator;

mod operator_binary;
pub use operator_binary::OperatorBinary;

mod operator_like;
pub use operator_like::{LikeMethod, OperatorLike};

mod operator_unary;
pub use operator_unary::OperatorUnary;

mod optimize;

mod property_ref;
pub use property_ref::{ColumnRef, PropertyRef, PropertyResolver};

mod query;
pub use query::{Direction, ObjectQuery, OrderBy, QueryData};

mod translate;
pub use translate::translate;

mod ty;
pub use ty::Type;

mod value;
pub use value::Value;
