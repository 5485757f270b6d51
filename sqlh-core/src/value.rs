use std::mem::discriminant;
use time::PrimitiveDateTime;

/// Dynamically typed column value exchanged with the drivers.
///
/// Every variant except `Null` wraps an `Option`: the `None` form is a typed NULL and doubles as
/// the type prototype stored in the column definitions.
#[derive(Default, Debug, Clone, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Boolean(Option<bool>),
    Int8(Option<i8>),
    Int16(Option<i16>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    UInt8(Option<u8>),
    UInt16(Option<u16>),
    UInt32(Option<u32>),
    UInt64(Option<u64>),
    Float32(Option<f32>),
    Float64(Option<f64>),
    Varchar(Option<String>),
    Blob(Option<Box<[u8]>>),
    Timestamp(Option<PrimitiveDateTime>),
}

impl Value {
    pub fn same_type(&self, other: &Self) -> bool {
        discriminant(self) == discriminant(other)
    }

    pub fn is_null(&self) -> bool {
        match self {
            Value::Null
            | Value::Boolean(None)
            | Value::Int8(None)
            | Value::Int16(None)
            | Value::Int32(None)
            | Value::Int64(None)
            | Value::UInt8(None)
            | Value::UInt16(None)
            | Value::UInt32(None)
            | Value::UInt64(None)
            | Value::Float32(None)
            | Value::Float64(None)
            | Value::Varchar(None)
            | Value::Blob(None)
            | Value::Timestamp(None) => true,
            _ => false,
        }
    }

    /// The empty prototype of the same variant.
    pub fn as_null(&self) -> Value {
        match self {
            Value::Null => Value::Null,
            Value::Boolean(..) => Value::Boolean(None),
            Value::Int8(..) => Value::Int8(None),
            Value::Int16(..) => Value::Int16(None),
            Value::Int32(..) => Value::Int32(None),
            Value::Int64(..) => Value::Int64(None),
            Value::UInt8(..) => Value::UInt8(None),
            Value::UInt16(..) => Value::UInt16(None),
            Value::UInt32(..) => Value::UInt32(None),
            Value::UInt64(..) => Value::UInt64(None),
            Value::Float32(..) => Value::Float32(None),
            Value::Float64(..) => Value::Float64(None),
            Value::Varchar(..) => Value::Varchar(None),
            Value::Blob(..) => Value::Blob(None),
            Value::Timestamp(..) => Value::Timestamp(None),
        }
    }

    /// Short variant name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Boolean(..) => "Boolean",
            Value::Int8(..) => "Int8",
            Value::Int16(..) => "Int16",
            Value::Int32(..) => "Int32",
            Value::Int64(..) => "Int64",
            Value::UInt8(..) => "UInt8",
            Value::UInt16(..) => "UInt16",
            Value::UInt32(..) => "UInt32",
            Value::UInt64(..) => "UInt64",
            Value::Float32(..) => "Float32",
            Value::Float64(..) => "Float64",
            Value::Varchar(..) => "Varchar",
            Value::Blob(..) => "Blob",
            Value::Timestamp(..) => "Timestamp",
        }
    }

    /// Widen any integer variant to `i128`, `None` for everything else (typed NULLs included).
    pub fn as_integer(&self) -> Option<i128> {
        match *self {
            Value::Int8(Some(v)) => Some(v as _),
            Value::Int16(Some(v)) => Some(v as _),
            Value::Int32(Some(v)) => Some(v as _),
            Value::Int64(Some(v)) => Some(v as _),
            Value::UInt8(Some(v)) => Some(v as _),
            Value::UInt16(Some(v)) => Some(v as _),
            Value::UInt32(Some(v)) => Some(v as _),
            Value::UInt64(Some(v)) => Some(v as _),
            _ => None,
        }
    }
}
