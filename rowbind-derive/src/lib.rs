//! Procedural macros for rowbind
//!
//! This crate provides the `Record` derive, which builds the field table used by the
//! name-keyed and positional record mappers.

mod attributes;
mod macros;

use proc_macro::TokenStream;

/// Derive macro for `Record` - generates the record's field table
///
/// This macro generates:
/// - a getter and a setter function per field
/// - a `RecordShape` built once, on first use
/// - the `Record` trait implementation returning it
///
/// Field attributes:
/// - `#[column_name = "..."]` maps the field under a different name (default: the field
///   name, matched exactly)
/// - `#[readonly]` keeps the field out of every write path; it is still read by
///   `scan_record_into_map`
///
/// # Example
///
/// ```ignore
/// use rowbind::Record;
///
/// #[derive(Default, Record)]
/// struct Account {
///     #[column_name = "user_name"]
///     username: String,
///     #[readonly]
///     created_at: chrono::DateTime<chrono::FixedOffset>,
/// }
/// ```
#[proc_macro_derive(Record, attributes(column_name, readonly))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    macros::derive_record(input)
}
