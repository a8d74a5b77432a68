//! Destination slots
//!
//! A [`Slot`] is a statically typed, mutable location borrowed from the caller for the
//! duration of one conversion. The set of destination kinds is closed; types that want
//! to own their conversion plug in through [`Slot::Custom`].

use std::fmt;

use chrono::{DateTime, FixedOffset};

use crate::convert::{convert_assign, Absorb};
use crate::error::Result;
use crate::value::SourceValue;

/// A mutable destination for one converted value.
pub enum Slot<'a> {
    Bool(&'a mut bool),
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    F32(&'a mut f32),
    F64(&'a mut f64),
    String(&'a mut String),
    Bytes(&'a mut Vec<u8>),
    /// The composite kind; records only carry timestamps here
    Timestamp(&'a mut DateTime<FixedOffset>),
    /// Untyped container, accepts any source verbatim
    Any(&'a mut SourceValue),
    /// An optional pointee (`Option<T>`)
    Nullable(&'a mut dyn NullableSlot),
    /// A destination that converts for itself
    Custom(&'a mut dyn Absorb),
}

/// Declared kind of a destination slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DestKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    String,
    Bytes,
    Timestamp,
    Any,
    Nullable,
    Custom,
}

impl DestKind {
    /// Bit width of numeric kinds, `0` for everything else.
    #[must_use]
    pub fn width(self) -> u32 {
        match self {
            DestKind::I8 | DestKind::U8 => 8,
            DestKind::I16 | DestKind::U16 => 16,
            DestKind::I32 | DestKind::U32 | DestKind::F32 => 32,
            DestKind::I64 | DestKind::U64 | DestKind::F64 => 64,
            _ => 0,
        }
    }
}

impl fmt::Display for DestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DestKind::Bool => "bool",
            DestKind::I8 => "i8",
            DestKind::I16 => "i16",
            DestKind::I32 => "i32",
            DestKind::I64 => "i64",
            DestKind::U8 => "u8",
            DestKind::U16 => "u16",
            DestKind::U32 => "u32",
            DestKind::U64 => "u64",
            DestKind::F32 => "f32",
            DestKind::F64 => "f64",
            DestKind::String => "string",
            DestKind::Bytes => "bytes",
            DestKind::Timestamp => "timestamp",
            DestKind::Any => "any",
            DestKind::Nullable => "nullable",
            DestKind::Custom => "custom",
        };
        f.write_str(name)
    }
}

impl Slot<'_> {
    #[must_use]
    pub fn kind(&self) -> DestKind {
        match self {
            Slot::Bool(_) => DestKind::Bool,
            Slot::I8(_) => DestKind::I8,
            Slot::I16(_) => DestKind::I16,
            Slot::I32(_) => DestKind::I32,
            Slot::I64(_) => DestKind::I64,
            Slot::U8(_) => DestKind::U8,
            Slot::U16(_) => DestKind::U16,
            Slot::U32(_) => DestKind::U32,
            Slot::U64(_) => DestKind::U64,
            Slot::F32(_) => DestKind::F32,
            Slot::F64(_) => DestKind::F64,
            Slot::String(_) => DestKind::String,
            Slot::Bytes(_) => DestKind::Bytes,
            Slot::Timestamp(_) => DestKind::Timestamp,
            Slot::Any(_) => DestKind::Any,
            Slot::Nullable(_) => DestKind::Nullable,
            Slot::Custom(_) => DestKind::Custom,
        }
    }
}

impl fmt::Debug for Slot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slot({})", self.kind())
    }
}

/// An optional destination: `clear` stores the absent state, `fill` converts into a
/// fresh pointee and stores it only when the conversion succeeds.
pub trait NullableSlot {
    fn clear(&mut self);

    fn fill(&mut self, src: &SourceValue) -> Result<()>;
}

impl<T: AsSlot + Default> NullableSlot for Option<T> {
    fn clear(&mut self) {
        *self = None;
    }

    fn fill(&mut self, src: &SourceValue) -> Result<()> {
        let mut pointee = T::default();
        convert_assign(pointee.as_slot(), src)?;
        *self = Some(pointee);
        Ok(())
    }
}

/// Types that can lend themselves out as a conversion destination.
pub trait AsSlot {
    fn as_slot(&mut self) -> Slot<'_>;
}

macro_rules! impl_as_slot {
    ($type:ty, $variant:ident) => {
        impl AsSlot for $type {
            fn as_slot(&mut self) -> Slot<'_> {
                Slot::$variant(self)
            }
        }
    };
}

impl_as_slot!(bool, Bool);
impl_as_slot!(i8, I8);
impl_as_slot!(i16, I16);
impl_as_slot!(i32, I32);
impl_as_slot!(i64, I64);
impl_as_slot!(u8, U8);
impl_as_slot!(u16, U16);
impl_as_slot!(u32, U32);
impl_as_slot!(u64, U64);
impl_as_slot!(f32, F32);
impl_as_slot!(f64, F64);
impl_as_slot!(String, String);
impl_as_slot!(Vec<u8>, Bytes);
impl_as_slot!(DateTime<FixedOffset>, Timestamp);
impl_as_slot!(SourceValue, Any);

impl<T: AsSlot + Default> AsSlot for Option<T> {
    fn as_slot(&mut self) -> Slot<'_> {
        Slot::Nullable(self)
    }
}
