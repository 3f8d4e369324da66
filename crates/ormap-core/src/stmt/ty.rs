use super::Value;
use std::fmt;

/// The type code of a property, constant, or operator result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// Boolean value
    Bool,

    /// Raw bytes
    Bytes,

    /// 64-bit floating point number
    F64,

    /// Signed 16-bit integer
    I16,

    /// Signed 32-bit integer
    I32,

    /// Signed 64-bit integer
    I64,

    /// A list of a single type
    List(Box<Type>),

    /// The type of the `null` literal. It is compatible with every type.
    Null,

    /// String type
    String,

    /// 128-bit universally unique identifier
    Uuid,

    /// A type that could not be determined
    Unknown,
}

impl Type {
    pub fn list(ty: impl Into<Self>) -> Self {
        Self::List(Box::new(ty.into()))
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool)
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Self::String)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::I16 | Self::I32 | Self::I64 | Self::F64)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// The value a freshly constructed, unassigned property of this type
    /// holds. Parameter binding treats it as "no value".
    pub fn default_value(&self) -> Value {
        match self {
            Self::Bool => Value::Bool(false),
            Self::Bytes => Value::Bytes(vec![]),
            Self::F64 => Value::F64(0.0),
            Self::I16 => Value::I16(0),
            Self::I32 => Value::I32(0),
            Self::I64 => Value::I64(0),
            Self::List(_) => Value::List(vec![]),
            Self::String => Value::String(String::new()),
            Self::Uuid => Value::Uuid(uuid::Uuid::nil()),
            Self::Null | Self::Unknown => Value::Null,
        }
    }

    /// Converts `value` to this type, returning `None` when no lossless
    /// conversion exists.
    pub fn cast(&self, value: &Value) -> Option<Value> {
        if value.is_null() {
            return Some(Value::Null);
        }

        Some(match (self, value) {
            (Self::Bool, Value::Bool(v)) => Value::Bool(*v),
            (Self::String, Value::String(v)) => Value::String(v.clone()),
            (Self::String, Value::Uuid(v)) => Value::String(v.to_string()),
            (Self::Uuid, Value::String(v)) => Value::Uuid(v.parse().ok()?),
            (Self::F64, value) => Value::F64(value.as_f64()?),
            (Self::I64, value) => Value::I64(value.as_i64()?),
            (Self::I32, value) => Value::I32(i32::try_from(value.as_i64()?).ok()?),
            (Self::I16, value) => Value::I16(i16::try_from(value.as_i64()?).ok()?),
            (ty, value) if value.ty() == *ty => value.clone(),
            _ => return None,
        })
    }

    /// Numeric promotion used when folding arithmetic on two constants.
    pub fn promote(&self, other: &Type) -> Type {
        match (self, other) {
            (Self::F64, _) | (_, Self::F64) => Self::F64,
            (Self::I64, _) | (_, Self::I64) => Self::I64,
            (Self::I32, _) | (_, Self::I32) => Self::I32,
            (Self::Null, ty) | (ty, Self::Null) => ty.clone(),
            (ty, _) => ty.clone(),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::Bytes => f.write_str("bytes"),
            Self::F64 => f.write_str("f64"),
            Self::I16 => f.write_str("i16"),
            Self::I32 => f.write_str("i32"),
            Self::I64 => f.write_str("i64"),
            Self::List(item) => write!(f, "list<{item}>"),
            Self::Null => f.write_str("null"),
            Self::String => f.write_str("string"),
            Self::Uuid => f.write_str("uuid"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

impl From<&Self> for Type {
    fn from(value: &Self) -> Self {
        value.clone()
    }
}
