//! Value type system for rowbind
//!
//! This module provides the two sides of every conversion: the dynamically typed
//! [`SourceValue`] handed over by the query layer, and the statically typed [`Slot`]
//! borrowed from the caller.
//!
//! ## Traits
//!
//! - **`AsSlot`** - Lends a typed location out as a conversion destination
//! - **`NullableSlot`** - Optional destinations (`Option<T>`)
//! - **`ToSource`** - Reads a typed field back out as a `SourceValue`

pub mod query_value;
pub mod slot;
pub mod to_source;
pub mod types;

pub use slot::{AsSlot, DestKind, NullableSlot, Slot};
pub use to_source::ToSource;
pub use types::{zero_timestamp, SourceKind, SourceValue, TIMESTAMP_LAYOUT};
