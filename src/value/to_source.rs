//! `ToSource` trait for reading record fields back out as source values
//!
//! The record-to-map direction needs every field rendered as a [`SourceValue`].
//! Integers widen to `Int64`/`Uint64`, floats to `Float64`, and `Option<T>` maps
//! `None` to `Null`.

use chrono::{DateTime, FixedOffset};

use crate::value::SourceValue;

/// Trait for rendering a typed field as a [`SourceValue`].
pub trait ToSource {
    fn to_source(&self) -> SourceValue;
}

macro_rules! impl_to_source {
    ($($type:ty),* $(,)?) => {
        $(
            impl ToSource for $type {
                fn to_source(&self) -> SourceValue {
                    SourceValue::from(self.clone())
                }
            }
        )*
    };
}

impl_to_source!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    f32,
    f64,
    String,
    Vec<u8>,
    DateTime<FixedOffset>,
);

impl ToSource for SourceValue {
    fn to_source(&self) -> SourceValue {
        self.clone()
    }
}

impl<T: ToSource> ToSource for Option<T> {
    fn to_source(&self) -> SourceValue {
        self.as_ref().map_or(SourceValue::Null, ToSource::to_source)
    }
}
