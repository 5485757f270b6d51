use crate::{Complex32, Complex64, Error, Result, SqlhError, Value, prefix_at_boundary};
use std::any;
use time::{
    PrimitiveDateTime, format_description::BorrowedFormatItem,
    macros::{datetime, format_description},
};

/// Conversion between a field type and the dynamically typed [`Value`].
///
/// This is the coercion boundary of the marshaller: drivers hand back whatever their storage
/// returned and `try_from_value` fits it into the field.
///
/// # Coercion rules
/// - Any integer width is accepted by any integer field, as long as it fits (range checked).
/// - A `bool` field accepts integers too, only `1` is `true`.
/// - Float fields accept floats of both widths and integers.
/// - `String` accepts `Varchar` and UTF-8 `Blob`, byte fields accept `Blob` and `Varchar`.
/// - Timestamps accept `Timestamp` or text in the `YYYY-MM-DD HH:MM:SS` layout.
/// - Complex numbers are decoded from their `Blob` encoding.
/// - `NULL` (or a typed NULL) yields the zero value of the field, `None` for `Option`.
/// - Anything else is a [`SqlhError::FieldTypeMismatch`].
///
/// # Examples
/// ```rust
/// use sqlh_core::{AsValue, Value};
/// let v = 42i32.as_value();
/// assert_eq!(v, Value::Int32(Some(42)));
/// let n: i8 = AsValue::try_from_value(Value::Int64(Some(42))).unwrap();
/// assert_eq!(n, 42);
/// ```
pub trait AsValue {
    /// Typed NULL of this type, the prototype used to infer the column storage type.
    fn as_empty_value() -> Value;
    /// Convert into the value bound to a statement.
    fn as_value(self) -> Value;
    /// Coerce a value produced by a driver into `Self`.
    fn try_from_value(value: Value) -> Result<Self>
    where
        Self: Sized;
}

impl<T: AsValue> From<T> for Value {
    fn from(value: T) -> Self {
        value.as_value()
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Varchar(Some(value.into()))
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Blob(Some(value.into()))
    }
}

pub(crate) fn type_mismatch<T>(value: &Value) -> Error {
    let mut found = format!("{:?}", value);
    if found.len() > 64 {
        found = format!("{}...", prefix_at_boundary(&found, 61));
    }
    SqlhError::FieldTypeMismatch {
        expected: any::type_name::<T>(),
        found,
    }
    .into()
}

macro_rules! impl_as_value_integer {
    ($($source:ty => $destination:path),+ $(,)?) => {
        $(
            impl AsValue for $source {
                fn as_empty_value() -> Value {
                    $destination(None)
                }
                fn as_value(self) -> Value {
                    $destination(Some(self as _))
                }
                fn try_from_value(value: Value) -> Result<Self> {
                    if value.is_null() {
                        return Ok(0);
                    }
                    match value.as_integer() {
                        Some(v) => <$source>::try_from(v).map_err(|_| type_mismatch::<Self>(&value)),
                        None => Err(type_mismatch::<Self>(&value)),
                    }
                }
            }
        )+
    };
}
impl_as_value_integer!(
    i8 => Value::Int8,
    i16 => Value::Int16,
    i32 => Value::Int32,
    i64 => Value::Int64,
    isize => Value::Int64,
    u8 => Value::UInt8,
    u16 => Value::UInt16,
    u32 => Value::UInt32,
    u64 => Value::UInt64,
    usize => Value::UInt64,
);

macro_rules! impl_as_value_float {
    ($($source:ty => $destination:path),+ $(,)?) => {
        $(
            impl AsValue for $source {
                fn as_empty_value() -> Value {
                    $destination(None)
                }
                fn as_value(self) -> Value {
                    $destination(Some(self))
                }
                fn try_from_value(value: Value) -> Result<Self> {
                    match value {
                        Value::Float32(Some(v)) => Ok(v as _),
                        Value::Float64(Some(v)) => Ok(v as _),
                        ref v if v.is_null() => Ok(0.0),
                        ref v => match v.as_integer() {
                            Some(v) => Ok(v as _),
                            None => Err(type_mismatch::<Self>(&value)),
                        },
                    }
                }
            }
        )+
    };
}
impl_as_value_float!(f32 => Value::Float32, f64 => Value::Float64);

impl AsValue for bool {
    fn as_empty_value() -> Value {
        Value::Boolean(None)
    }
    fn as_value(self) -> Value {
        Value::Boolean(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Boolean(Some(v)) => Ok(v),
            ref v if v.is_null() => Ok(false),
            ref v => match v.as_integer() {
                Some(v) => Ok(v == 1),
                None => Err(type_mismatch::<Self>(&value)),
            },
        }
    }
}

impl AsValue for String {
    fn as_empty_value() -> Value {
        Value::Varchar(None)
    }
    fn as_value(self) -> Value {
        Value::Varchar(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Varchar(Some(v)) => Ok(v),
            Value::Blob(Some(v)) => String::from_utf8(v.into_vec())
                .map_err(|e| type_mismatch::<Self>(&Value::Blob(Some(e.into_bytes().into())))),
            ref v if v.is_null() => Ok(String::new()),
            _ => Err(type_mismatch::<Self>(&value)),
        }
    }
}

impl AsValue for Box<[u8]> {
    fn as_empty_value() -> Value {
        Value::Blob(None)
    }
    fn as_value(self) -> Value {
        Value::Blob(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Blob(Some(v)) => Ok(v),
            Value::Varchar(Some(v)) => Ok(v.into_bytes().into_boxed_slice()),
            ref v if v.is_null() => Ok(Box::default()),
            _ => Err(type_mismatch::<Self>(&value)),
        }
    }
}

impl AsValue for Vec<u8> {
    fn as_empty_value() -> Value {
        Value::Blob(None)
    }
    fn as_value(self) -> Value {
        Value::Blob(Some(self.into_boxed_slice()))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        <Box<[u8]>>::try_from_value(value).map(Into::into)
    }
}

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const TIMESTAMP_FORMAT_SUBSECOND: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]");

/// Zero value of a timestamp field.
pub const ZERO_TIMESTAMP: PrimitiveDateTime = datetime!(0001-01-01 00:00:00);

/// Render a timestamp as `YYYY-MM-DD HH:MM:SS`, fractional seconds are appended only when present.
pub fn format_timestamp(value: &PrimitiveDateTime) -> String {
    let mut out = format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        value.year(),
        u8::from(value.month()),
        value.day(),
        value.hour(),
        value.minute(),
        value.second(),
    );
    let nanosecond = value.nanosecond();
    if nanosecond != 0 {
        let fraction = format!("{:09}", nanosecond);
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }
    out
}

/// Parse the layout produced by [`format_timestamp`].
pub fn parse_timestamp(value: &str) -> Result<PrimitiveDateTime> {
    let value = value.trim();
    PrimitiveDateTime::parse(value, TIMESTAMP_FORMAT)
        .or_else(|_| PrimitiveDateTime::parse(value, TIMESTAMP_FORMAT_SUBSECOND))
        .map_err(|_| type_mismatch::<PrimitiveDateTime>(&Value::Varchar(Some(value.into()))))
}

impl AsValue for PrimitiveDateTime {
    fn as_empty_value() -> Value {
        Value::Timestamp(None)
    }
    fn as_value(self) -> Value {
        Value::Timestamp(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Timestamp(Some(v)) => Ok(v),
            Value::Varchar(Some(v)) => parse_timestamp(&v),
            Value::Blob(Some(ref v)) => match std::str::from_utf8(v) {
                Ok(v) => parse_timestamp(v),
                Err(..) => Err(type_mismatch::<Self>(&value)),
            },
            ref v if v.is_null() => Ok(ZERO_TIMESTAMP),
            _ => Err(type_mismatch::<Self>(&value)),
        }
    }
}

macro_rules! impl_as_value_complex {
    ($($source:ty),+ $(,)?) => {
        $(
            impl AsValue for $source {
                fn as_empty_value() -> Value {
                    Value::Blob(None)
                }
                fn as_value(self) -> Value {
                    Value::Blob(Some(self.to_bytes().into()))
                }
                fn try_from_value(value: Value) -> Result<Self> {
                    match value {
                        Value::Blob(Some(v)) => Self::from_bytes(&v),
                        ref v if v.is_null() => Ok(Self::default()),
                        _ => Err(type_mismatch::<Self>(&value)),
                    }
                }
            }
        )+
    };
}
impl_as_value_complex!(Complex32, Complex64);

impl<T: AsValue> AsValue for Option<T> {
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        match self {
            Some(v) => v.as_value(),
            None => T::as_empty_value(),
        }
    }
    fn try_from_value(value: Value) -> Result<Self> {
        if value.is_null() {
            return Ok(None);
        }
        T::try_from_value(value).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn is_mismatch(err: &Error) -> bool {
        matches!(
            err.downcast_ref::<SqlhError>(),
            Some(SqlhError::FieldTypeMismatch { .. })
        )
    }

    #[test]
    fn integer_widths() {
        assert_eq!(i16::try_from_value(Value::Int64(Some(-300))).unwrap(), -300);
        assert_eq!(u64::try_from_value(Value::Int64(Some(7))).unwrap(), 7);
        assert_eq!(i64::try_from_value(Value::UInt8(Some(255))).unwrap(), 255);
        assert!(is_mismatch(&u8::try_from_value(Value::Int64(Some(256))).unwrap_err()));
        assert!(is_mismatch(&u32::try_from_value(Value::Int64(Some(-1))).unwrap_err()));
        assert!(is_mismatch(&i32::try_from_value(Value::Varchar(Some("1".into()))).unwrap_err()));
    }

    #[test]
    fn boolean_from_integer() {
        assert!(bool::try_from_value(Value::Int64(Some(1))).unwrap());
        assert!(!bool::try_from_value(Value::Int64(Some(2))).unwrap());
        assert!(!bool::try_from_value(Value::Int64(Some(0))).unwrap());
        assert!(bool::try_from_value(Value::Boolean(Some(true))).unwrap());
    }

    #[test]
    fn floats() {
        assert_eq!(f32::try_from_value(Value::Float64(Some(1.5))).unwrap(), 1.5);
        assert_eq!(f64::try_from_value(Value::Int64(Some(3))).unwrap(), 3.0);
        assert!(is_mismatch(&f64::try_from_value(Value::Boolean(Some(true))).unwrap_err()));
    }

    #[test]
    fn text_and_bytes() {
        assert_eq!(
            String::try_from_value(Value::Blob(Some(b"abc".as_slice().into()))).unwrap(),
            "abc"
        );
        assert!(is_mismatch(
            &String::try_from_value(Value::Blob(Some([0xff, 0xfe].as_slice().into()))).unwrap_err()
        ));
        assert_eq!(
            Vec::<u8>::try_from_value(Value::Varchar(Some("hi".into()))).unwrap(),
            b"hi"
        );
        assert!(is_mismatch(&Vec::<u8>::try_from_value(Value::Int8(Some(1))).unwrap_err()));
    }

    #[test]
    fn null_is_zero_value() {
        assert_eq!(i32::try_from_value(Value::Null).unwrap(), 0);
        assert_eq!(String::try_from_value(Value::Varchar(None)).unwrap(), "");
        assert!(!bool::try_from_value(Value::Null).unwrap());
        assert_eq!(
            PrimitiveDateTime::try_from_value(Value::Null).unwrap(),
            ZERO_TIMESTAMP
        );
        assert_eq!(Complex32::try_from_value(Value::Null).unwrap(), Complex32::default());
        assert_eq!(Option::<i32>::try_from_value(Value::Int64(None)).unwrap(), None);
        assert_eq!(Option::<i32>::try_from_value(Value::Int64(Some(4))).unwrap(), Some(4));
    }

    #[test]
    fn timestamps() {
        let value = datetime!(2024-02-29 13:45:07);
        assert_eq!(format_timestamp(&value), "2024-02-29 13:45:07");
        assert_eq!(parse_timestamp("2024-02-29 13:45:07").unwrap(), value);
        let value = datetime!(2024-02-29 13:45:07.25);
        assert_eq!(format_timestamp(&value), "2024-02-29 13:45:07.25");
        assert_eq!(
            PrimitiveDateTime::try_from_value(Value::Varchar(Some(format_timestamp(&value))))
                .unwrap(),
            value
        );
        assert_eq!(format_timestamp(&ZERO_TIMESTAMP), "0001-01-01 00:00:00");
        assert!(is_mismatch(&parse_timestamp("29/02/2024").unwrap_err()));
    }

    #[test]
    fn from_borrowed() {
        assert_eq!(Value::from("abc"), Value::Varchar(Some("abc".into())));
        assert_eq!(
            Value::from([1u8, 2].as_slice()),
            Value::Blob(Some(vec![1, 2].into_boxed_slice()))
        );
    }

    #[test]
    fn mismatch_on_multibyte_text() {
        let text = "日本語のテキストはとても長いので途中で切られます、日本語のテキスト";
        let err = i32::try_from_value(Value::Varchar(Some(text.into()))).unwrap_err();
        let Some(SqlhError::FieldTypeMismatch { expected, found }) = err.downcast_ref() else {
            panic!("Expected a type mismatch, got {:#}", err);
        };
        assert_eq!(*expected, "i32");
        assert!(found.ends_with("..."));
        assert!(found.len() <= 64);
        assert!(found.starts_with("Varchar(Some(\"日本語"));
    }

    #[test]
    fn complex() {
        let value = Complex64::new(3.0, -4.0);
        assert_eq!(Complex64::try_from_value(value.as_value()).unwrap(), value);
        assert!(matches!(Complex32::as_empty_value(), Value::Blob(None)));
    }
}
