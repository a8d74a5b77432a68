//! # rowbind
//!
//! Scalar value conversion between database rows and typed Rust fields.
//!
//! - [`convert_assign`] converts one dynamically typed [`SourceValue`] into one typed
//!   [`Slot`] without silent loss of information.
//! - The nullable wrappers ([`NullString`], [`NullInt64`], ...) carry SQL `NULL` through
//!   non-optional fields and project back out as query parameters.
//! - [`scan_map_into_record`] / [`scan_record_into_map`] map `#[derive(Record)]` structs
//!   to and from name-keyed column maps; [`scan_row`] fills them positionally.
//!
//! Query execution, SQL assembly and connection handling live in the calling layer.

extern crate self as rowbind;

pub mod config;
pub mod convert;
pub mod error;
pub mod nullable;
pub mod record;
pub mod value;

pub use config::MapperConfig;
pub use convert::{convert_assign, Absorb};
pub use error::{ConvertError, Result};
pub use nullable::{
    NullBool, NullBytes, NullFloat64, NullInt64, NullString, NullTime, NullUint64,
    NullUint8Slice, Project,
};
pub use record::mapper::{scan_map_into_record, scan_record_into_map, RecordMapper};
pub use record::row::{row_to_map, scan_row, scan_slots};
pub use record::{FieldDescriptor, Getter, Record, RecordShape, Setter};
pub use value::{
    zero_timestamp, AsSlot, DestKind, NullableSlot, Slot, SourceKind, SourceValue, ToSource,
    TIMESTAMP_LAYOUT,
};

// Derive macro for `Record`
pub use rowbind_derive::Record;

#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::Lazy;
}
