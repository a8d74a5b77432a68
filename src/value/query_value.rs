//! Bridge between `sea_query::Value` and [`SourceValue`].
//!
//! Inward, driver rows that were already decoded into `sea_query::Value` become source
//! values: every integer variant collapses to `Int64`/`Uint64`, both float variants to
//! `Float64`, and every `None` variant to `Null`. Outward, a source value becomes the
//! `sea_query::Value` the query layer binds as a parameter.

use chrono::{DateTime, FixedOffset, Utc};
use sea_query::Value;

use crate::value::SourceValue;

impl From<Value> for SourceValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Bool(Some(b)) => SourceValue::Bool(b),
            Value::TinyInt(Some(i)) => SourceValue::Int64(i64::from(i)),
            Value::SmallInt(Some(i)) => SourceValue::Int64(i64::from(i)),
            Value::Int(Some(i)) => SourceValue::Int64(i64::from(i)),
            Value::BigInt(Some(i)) => SourceValue::Int64(i),
            Value::TinyUnsigned(Some(u)) => SourceValue::Uint64(u64::from(u)),
            Value::SmallUnsigned(Some(u)) => SourceValue::Uint64(u64::from(u)),
            Value::Unsigned(Some(u)) => SourceValue::Uint64(u64::from(u)),
            Value::BigUnsigned(Some(u)) => SourceValue::Uint64(u),
            Value::Float(Some(f)) => SourceValue::Float64(f64::from(f)),
            Value::Double(Some(d)) => SourceValue::Float64(d),
            Value::String(Some(s)) => SourceValue::String(s),
            Value::Char(Some(c)) => SourceValue::String(c.to_string()),
            Value::Bytes(Some(b)) => SourceValue::Bytes(b),
            Value::Json(Some(j)) => SourceValue::Other(*j),
            v @ Value::ChronoDateTimeWithTimeZone(Some(_)) => {
                match <DateTime<FixedOffset> as sea_query::ValueType>::try_from(v) {
                    Ok(ts) => SourceValue::Timestamp(ts),
                    Err(_) => SourceValue::Null,
                }
            }
            v @ Value::ChronoDateTimeUtc(Some(_)) => {
                match <DateTime<Utc> as sea_query::ValueType>::try_from(v) {
                    Ok(ts) => SourceValue::Timestamp(ts.fixed_offset()),
                    Err(_) => SourceValue::Null,
                }
            }
            Value::Bool(None)
            | Value::TinyInt(None)
            | Value::SmallInt(None)
            | Value::Int(None)
            | Value::BigInt(None)
            | Value::TinyUnsigned(None)
            | Value::SmallUnsigned(None)
            | Value::Unsigned(None)
            | Value::BigUnsigned(None)
            | Value::Float(None)
            | Value::Double(None)
            | Value::String(None)
            | Value::Char(None)
            | Value::Bytes(None)
            | Value::Json(None)
            | Value::ChronoDateTimeWithTimeZone(None)
            | Value::ChronoDateTimeUtc(None) => SourceValue::Null,
            other => SourceValue::Other(serde_json::Value::String(format!("{other:?}"))),
        }
    }
}

impl SourceValue {
    /// Convert into a `sea_query::Value` for parameter binding.
    ///
    /// An untyped `Null` binds as a text null.
    #[must_use]
    pub fn into_query_value(self) -> Value {
        match self {
            SourceValue::Null => Value::String(None),
            SourceValue::Bool(b) => Value::Bool(Some(b)),
            SourceValue::Int64(i) => Value::BigInt(Some(i)),
            SourceValue::Uint64(u) => Value::BigUnsigned(Some(u)),
            SourceValue::Float64(f) => Value::Double(Some(f)),
            SourceValue::String(s) => Value::String(Some(s)),
            SourceValue::Bytes(b) => Value::Bytes(Some(b)),
            SourceValue::Timestamp(ts) => Value::from(ts),
            SourceValue::Other(j) => Value::Json(Some(Box::new(j))),
        }
    }
}

impl From<SourceValue> for Value {
    fn from(value: SourceValue) -> Self {
        value.into_query_value()
    }
}
