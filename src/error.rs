//! Error types for value conversion and record mapping.
//!
//! Every failure in the conversion engine, the nullable wrappers and the record mappers
//! surfaces as a [`ConvertError`]. Nothing is retried: conversions are pure, so a caller
//! can re-invoke with corrected input.

use crate::value::{DestKind, SourceKind};

/// Error type for conversion operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// The destination field exists but cannot be written
    #[error("destination not addressable: field {field} is read-only")]
    DestinationNotAddressable { field: String },

    /// No rule converts this source kind into this destination kind
    #[error("unsupported conversion pair: {source_kind} -> {dest_kind}")]
    UnsupportedConversionPair {
        source_kind: SourceKind,
        dest_kind: DestKind,
    },

    /// Text could not be parsed as the destination's numeric kind and width
    #[error("converting {raw:?} to {kind}{}: {cause}", field_suffix(.field))]
    NumericParseFailure {
        field: Option<String>,
        raw: String,
        cause: String,
        kind: DestKind,
        width: u32,
    },

    /// A record field's declared kind has no raw-bytes mapping
    #[error("unsupported type in scan: field {field} is {kind}")]
    UnsupportedFieldKind { field: String, kind: DestKind },

    /// A raw column bound for a text field is not valid UTF-8
    #[error("field {field} is not valid UTF-8 (valid up to byte {valid_up_to})")]
    InvalidUtf8 { field: String, valid_up_to: usize },

    /// The source is not one of the recognized boolean representations
    #[error("couldn't convert {raw:?} into type bool")]
    BooleanCoercionFailure { raw: String },

    /// Positional scan received a different number of values than there are fields
    #[error("expected {expected} destination arguments in scan, not {actual}")]
    ColumnCountMismatch { expected: usize, actual: usize },
}

fn field_suffix(field: &Option<String>) -> String {
    match field {
        Some(name) => format!(" (field {name})"),
        None => String::new(),
    }
}

impl ConvertError {
    /// Attach a field name to a numeric parse failure raised without one.
    #[must_use]
    pub fn in_field(self, name: &str) -> Self {
        match self {
            ConvertError::NumericParseFailure {
                field: None,
                raw,
                cause,
                kind,
                width,
            } => ConvertError::NumericParseFailure {
                field: Some(name.to_string()),
                raw,
                cause,
                kind,
                width,
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
