//! Nullable scalar wrappers
//!
//! Each wrapper pairs a scalar with a `valid` flag so that SQL `NULL` survives a round
//! trip through a non-optional field. They are scan destinations in their own right
//! ([`Absorb`]) and produce outward parameter literals ([`Project`]).
//!
//! ```rust
//! use rowbind::{Absorb, NullString, Project, SourceValue};
//!
//! let mut name = NullString::default();
//! name.absorb(&SourceValue::String("kevin".to_string())).unwrap();
//! assert!(name.valid);
//! assert_eq!(name.value, "kevin");
//!
//! name.absorb(&SourceValue::Null).unwrap();
//! assert!(!name.valid);
//! assert_eq!(name.project(), None);
//! ```
//!
//! ## Pre-existing state on failure
//!
//! `absorb` marks the wrapper valid *before* delegating to [`convert_assign`]. When the
//! conversion fails the error is returned, `valid` stays `true`, and `value` keeps
//! whatever it held before the call.
//!
//! ## Timestamps
//!
//! [`NullTime`] only accepts an already-parsed timestamp. Any other non-null source
//! leaves it invalid without raising an error.

use chrono::{DateTime, FixedOffset};
use sea_query::Value;

use crate::convert::{convert_assign, Absorb};
use crate::error::Result;
use crate::value::{zero_timestamp, AsSlot, Slot, SourceValue, ToSource};

/// Outward projection of a nullable value.
pub trait Project {
    /// `None` when the value is absent, otherwise a source-compatible literal.
    fn project(&self) -> Option<SourceValue>;
}

macro_rules! nullable_wrapper {
    ($(#[$meta:meta])* $name:ident, $type:ty, $variant:ident, $query_variant:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            pub value: $type,
            /// `true` if `value` is not NULL
            pub valid: bool,
        }

        impl $name {
            #[must_use]
            pub fn new(value: $type) -> Self {
                Self { value, valid: true }
            }

            #[must_use]
            pub fn null() -> Self {
                Self::default()
            }

            #[must_use]
            pub fn as_option(&self) -> Option<&$type> {
                self.valid.then_some(&self.value)
            }
        }

        impl Absorb for $name {
            fn absorb(&mut self, src: &SourceValue) -> Result<()> {
                if src.is_null() {
                    *self = Self::default();
                    return Ok(());
                }
                self.valid = true;
                convert_assign(self.value.as_slot(), src)
            }
        }

        impl Project for $name {
            fn project(&self) -> Option<SourceValue> {
                self.valid.then(|| SourceValue::$variant(self.value.clone()))
            }
        }

        impl AsSlot for $name {
            fn as_slot(&mut self) -> Slot<'_> {
                Slot::Custom(self)
            }
        }

        impl ToSource for $name {
            fn to_source(&self) -> SourceValue {
                self.project().unwrap_or(SourceValue::Null)
            }
        }

        impl From<Option<$type>> for $name {
            fn from(value: Option<$type>) -> Self {
                value.map_or_else(Self::default, Self::new)
            }
        }

        impl From<$name> for Option<$type> {
            fn from(value: $name) -> Self {
                value.valid.then_some(value.value)
            }
        }

        impl From<$name> for Value {
            fn from(value: $name) -> Self {
                Value::$query_variant(value.valid.then_some(value.value))
            }
        }
    };
}

nullable_wrapper!(
    /// A string that may be null.
    NullString,
    String,
    String,
    String
);

nullable_wrapper!(
    /// An `i64` that may be null.
    NullInt64,
    i64,
    Int64,
    BigInt
);

nullable_wrapper!(
    /// A `u64` that may be null.
    NullUint64,
    u64,
    Uint64,
    BigUnsigned
);

nullable_wrapper!(
    /// An `f64` that may be null.
    NullFloat64,
    f64,
    Float64,
    Double
);

nullable_wrapper!(
    /// A `bool` that may be null.
    NullBool,
    bool,
    Bool,
    Bool
);

nullable_wrapper!(
    /// A byte sequence that may be null. The null state holds an empty vector.
    NullBytes,
    Vec<u8>,
    Bytes,
    Bytes
);

/// Alternate name for [`NullBytes`].
pub type NullUint8Slice = NullBytes;

/// A timestamp that may be null.
#[derive(Debug, Clone, PartialEq)]
pub struct NullTime {
    pub value: DateTime<FixedOffset>,
    /// `true` if `value` is not NULL
    pub valid: bool,
}

impl Default for NullTime {
    fn default() -> Self {
        Self {
            value: zero_timestamp(),
            valid: false,
        }
    }
}

impl NullTime {
    #[must_use]
    pub fn new(value: DateTime<FixedOffset>) -> Self {
        Self { value, valid: true }
    }

    #[must_use]
    pub fn null() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn as_option(&self) -> Option<&DateTime<FixedOffset>> {
        self.valid.then_some(&self.value)
    }
}

impl Absorb for NullTime {
    fn absorb(&mut self, src: &SourceValue) -> Result<()> {
        match src {
            SourceValue::Timestamp(ts) => *self = Self::new(*ts),
            SourceValue::Null => *self = Self::default(),
            other => {
                log::debug!(
                    "NullTime received a non-timestamp {} source; storing NULL",
                    other.kind()
                );
                *self = Self::default();
            }
        }
        Ok(())
    }
}

impl Project for NullTime {
    fn project(&self) -> Option<SourceValue> {
        self.valid.then_some(SourceValue::Timestamp(self.value))
    }
}

impl AsSlot for NullTime {
    fn as_slot(&mut self) -> Slot<'_> {
        Slot::Custom(self)
    }
}

impl ToSource for NullTime {
    fn to_source(&self) -> SourceValue {
        self.project().unwrap_or(SourceValue::Null)
    }
}

impl From<Option<DateTime<FixedOffset>>> for NullTime {
    fn from(value: Option<DateTime<FixedOffset>>) -> Self {
        value.map_or_else(Self::default, Self::new)
    }
}

impl From<NullTime> for Option<DateTime<FixedOffset>> {
    fn from(value: NullTime) -> Self {
        value.valid.then_some(value.value)
    }
}

impl From<NullTime> for Value {
    fn from(value: NullTime) -> Self {
        if value.valid {
            Value::from(value.value)
        } else {
            Value::ChronoDateTimeWithTimeZone(None)
        }
    }
}
