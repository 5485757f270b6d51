use rusqlite::types::{Value as SqliteValue, ValueRef};
use sqlh_core::{Error, Result, Value, format_timestamp};

pub(crate) fn extract_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(v) => Value::Int64(Some(v)),
        ValueRef::Real(v) => Value::Float64(Some(v)),
        // Invalid UTF-8 stays raw so that text fields reject it.
        ValueRef::Text(v) => match std::str::from_utf8(v) {
            Ok(text) => Value::Varchar(Some(text.to_owned())),
            Err(..) => Value::Blob(Some(v.into())),
        },
        ValueRef::Blob(v) => Value::Blob(Some(v.into())),
    }
}

pub(crate) fn bind_value(value: Value) -> Result<SqliteValue> {
    Ok(match value {
        v if v.is_null() => SqliteValue::Null,
        Value::Boolean(Some(v)) => SqliteValue::Integer(v as i64),
        Value::Int8(Some(v)) => SqliteValue::Integer(v.into()),
        Value::Int16(Some(v)) => SqliteValue::Integer(v.into()),
        Value::Int32(Some(v)) => SqliteValue::Integer(v.into()),
        Value::Int64(Some(v)) => SqliteValue::Integer(v),
        Value::UInt8(Some(v)) => SqliteValue::Integer(v.into()),
        Value::UInt16(Some(v)) => SqliteValue::Integer(v.into()),
        Value::UInt32(Some(v)) => SqliteValue::Integer(v.into()),
        Value::UInt64(Some(v)) => SqliteValue::Integer(i64::try_from(v).map_err(|_| {
            Error::msg(format!("Value {v}: u64 does not fit in a sqlite INTEGER"))
        })?),
        Value::Float32(Some(v)) => SqliteValue::Real(v.into()),
        Value::Float64(Some(v)) => SqliteValue::Real(v),
        Value::Varchar(Some(v)) => SqliteValue::Text(v),
        Value::Blob(Some(v)) => SqliteValue::Blob(v.into_vec()),
        Value::Timestamp(Some(v)) => SqliteValue::Text(format_timestamp(&v)),
        v => return Err(Error::msg(format!("Cannot bind {:?} to a sqlite statement", v))),
    })
}
