//! Dynamically typed source values
//!
//! `SourceValue` is what the query layer hands over for one column of one row. It is never
//! mutated by the conversion engine; every conversion takes it by shared reference.
//!
//! ## Text rendering
//!
//! [`SourceValue::as_text`] is the staging step before numeric parsing: strings pass
//! through, byte sequences are decoded as UTF-8 (lossy), and every other kind is rendered
//! with its default textual form.

use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, Utc};

/// Layout used to render timestamps as text and to parse raw timestamp columns:
/// `YYYY-MM-DD HH:MM:SS.mmm ±HHMM`.
pub const TIMESTAMP_LAYOUT: &str = "%Y-%m-%d %H:%M:%S%.3f %z";

/// Zero representation of a timestamp (1970-01-01 00:00:00 +0000).
#[must_use]
pub fn zero_timestamp() -> DateTime<FixedOffset> {
    DateTime::from_naive_utc_and_offset(NaiveDateTime::default(), Utc.fix())
}

/// A dynamically typed scalar or null arriving from the data source.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceValue {
    Null,
    Bool(bool),
    Int64(i64),
    Uint64(u64),
    Float64(f64),
    String(String),
    Bytes(Vec<u8>),
    Timestamp(DateTime<FixedOffset>),
    /// Any driver value without a scalar mapping, carried as JSON
    Other(serde_json::Value),
}

/// The dynamic kind of a [`SourceValue`], used in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Null,
    Bool,
    Int64,
    Uint64,
    Float64,
    String,
    Bytes,
    Timestamp,
    Other,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceKind::Null => "null",
            SourceKind::Bool => "bool",
            SourceKind::Int64 => "int64",
            SourceKind::Uint64 => "uint64",
            SourceKind::Float64 => "float64",
            SourceKind::String => "string",
            SourceKind::Bytes => "bytes",
            SourceKind::Timestamp => "timestamp",
            SourceKind::Other => "other",
        };
        f.write_str(name)
    }
}

impl SourceValue {
    #[must_use]
    pub fn kind(&self) -> SourceKind {
        match self {
            SourceValue::Null => SourceKind::Null,
            SourceValue::Bool(_) => SourceKind::Bool,
            SourceValue::Int64(_) => SourceKind::Int64,
            SourceValue::Uint64(_) => SourceKind::Uint64,
            SourceValue::Float64(_) => SourceKind::Float64,
            SourceValue::String(_) => SourceKind::String,
            SourceValue::Bytes(_) => SourceKind::Bytes,
            SourceValue::Timestamp(_) => SourceKind::Timestamp,
            SourceValue::Other(_) => SourceKind::Other,
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, SourceValue::Null)
    }

    /// Render the value as text for numeric parsing.
    ///
    /// Total: every kind has a rendering. `Null` renders as `NULL`, timestamps use
    /// [`TIMESTAMP_LAYOUT`], and `Other` renders as compact JSON.
    #[must_use]
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            SourceValue::String(s) => Cow::Borrowed(s.as_str()),
            SourceValue::Bytes(b) => String::from_utf8_lossy(b),
            SourceValue::Null => Cow::Borrowed("NULL"),
            SourceValue::Bool(v) => Cow::Owned(v.to_string()),
            SourceValue::Int64(v) => Cow::Owned(v.to_string()),
            SourceValue::Uint64(v) => Cow::Owned(v.to_string()),
            SourceValue::Float64(v) => Cow::Owned(v.to_string()),
            SourceValue::Timestamp(t) => Cow::Owned(t.format(TIMESTAMP_LAYOUT).to_string()),
            SourceValue::Other(v) => Cow::Owned(v.to_string()),
        }
    }
}

macro_rules! impl_from_scalar {
    ($type:ty, $variant:ident) => {
        impl From<$type> for SourceValue {
            fn from(value: $type) -> Self {
                SourceValue::$variant(value.into())
            }
        }
    };
}

impl_from_scalar!(bool, Bool);
impl_from_scalar!(i8, Int64);
impl_from_scalar!(i16, Int64);
impl_from_scalar!(i32, Int64);
impl_from_scalar!(i64, Int64);
impl_from_scalar!(u8, Uint64);
impl_from_scalar!(u16, Uint64);
impl_from_scalar!(u32, Uint64);
impl_from_scalar!(u64, Uint64);
impl_from_scalar!(f32, Float64);
impl_from_scalar!(f64, Float64);
impl_from_scalar!(String, String);
impl_from_scalar!(&str, String);
impl_from_scalar!(Vec<u8>, Bytes);
impl_from_scalar!(&[u8], Bytes);
impl_from_scalar!(DateTime<FixedOffset>, Timestamp);
impl_from_scalar!(serde_json::Value, Other);

impl<T: Into<SourceValue>> From<Option<T>> for SourceValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(SourceValue::Null, Into::into)
    }
}
