//! The value conversion engine.
//!
//! [`convert_assign`] copies one [`SourceValue`] into one [`Slot`], converting it when
//! that can be done without losing information. Rules are tried in order:
//!
//! 1. exact-shape fast paths between strings and byte sequences,
//! 2. destination rules for `String`, `Bool` and `Any`,
//! 3. `Custom` destinations, which convert for themselves,
//! 4. `Nullable` destinations (`None` for null, otherwise convert into a fresh pointee),
//! 5. direct copy when source and destination have the same kind,
//! 6. numeric parsing of the source's text, bounded by the destination's width.
//!
//! Anything left over is an [`ConvertError::UnsupportedConversionPair`]. A failed call
//! never leaves the destination half-written.

use std::num::{ParseFloatError, ParseIntError};
use std::str::FromStr;

use crate::error::{ConvertError, Result};
use crate::value::{DestKind, Slot, SourceValue};

/// A destination type that owns its own conversion.
///
/// Implementors receive the raw source value, including `Null`.
pub trait Absorb {
    fn absorb(&mut self, src: &SourceValue) -> Result<()>;
}

/// Copy `src` into `dest`, converting where possible.
///
/// # Errors
///
/// Returns [`ConvertError::BooleanCoercionFailure`] for unrecognized boolean input,
/// [`ConvertError::NumericParseFailure`] when text does not parse or does not fit the
/// destination's width, [`ConvertError::UnsupportedConversionPair`] when no rule applies,
/// and whatever a `Custom` destination returns.
pub fn convert_assign(dest: Slot<'_>, src: &SourceValue) -> Result<()> {
    let dest = match (dest, src) {
        (Slot::String(d), SourceValue::String(s)) => {
            d.clone_from(s);
            return Ok(());
        }
        (Slot::Bytes(d), SourceValue::String(s)) => {
            *d = s.as_bytes().to_vec();
            return Ok(());
        }
        (Slot::String(d), SourceValue::Bytes(b)) => {
            let text = std::str::from_utf8(b).map_err(|_| unsupported(src, DestKind::String))?;
            text.clone_into(d);
            return Ok(());
        }
        (Slot::Any(d), SourceValue::Bytes(b)) => {
            *d = SourceValue::Bytes(b.clone());
            return Ok(());
        }
        (Slot::Bytes(d), SourceValue::Bytes(b)) => {
            d.clone_from(b);
            return Ok(());
        }
        (Slot::Bytes(d), SourceValue::Null) => {
            d.clear();
            return Ok(());
        }
        (dest, _) => dest,
    };

    match (dest, src) {
        (
            Slot::String(d),
            SourceValue::Bool(_)
            | SourceValue::Int64(_)
            | SourceValue::Uint64(_)
            | SourceValue::Float64(_),
        ) => {
            *d = src.as_text().into_owned();
            Ok(())
        }
        (Slot::String(_), _) => Err(unsupported(src, DestKind::String)),
        (Slot::Bool(d), _) => {
            *d = coerce_bool(src)?;
            Ok(())
        }
        (Slot::Any(d), _) => {
            *d = src.clone();
            Ok(())
        }
        (Slot::Custom(scanner), _) => scanner.absorb(src),
        (Slot::Nullable(d), SourceValue::Null) => {
            d.clear();
            Ok(())
        }
        (Slot::Nullable(d), _) => d.fill(src),
        (Slot::I64(d), SourceValue::Int64(v)) => {
            *d = *v;
            Ok(())
        }
        (Slot::U64(d), SourceValue::Uint64(v)) => {
            *d = *v;
            Ok(())
        }
        (Slot::F64(d), SourceValue::Float64(v)) => {
            *d = *v;
            Ok(())
        }
        (Slot::Timestamp(d), SourceValue::Timestamp(ts)) => {
            *d = *ts;
            Ok(())
        }
        (dest, _) => match parse_numeric(dest, &src.as_text()) {
            Parsed::Done(result) => result,
            Parsed::NotNumeric(kind) => Err(unsupported(src, kind)),
        },
    }
}

fn unsupported(src: &SourceValue, dest_kind: DestKind) -> ConvertError {
    ConvertError::UnsupportedConversionPair {
        source_kind: src.kind(),
        dest_kind,
    }
}

fn coerce_bool(src: &SourceValue) -> Result<bool> {
    let parsed = match src {
        SourceValue::Bool(b) => Some(*b),
        SourceValue::String(s) => parse_bool_text(s),
        SourceValue::Bytes(b) => std::str::from_utf8(b).ok().and_then(parse_bool_text),
        SourceValue::Int64(1) | SourceValue::Uint64(1) => Some(true),
        SourceValue::Int64(0) | SourceValue::Uint64(0) => Some(false),
        _ => None,
    };
    parsed.ok_or_else(|| ConvertError::BooleanCoercionFailure {
        raw: src.as_text().into_owned(),
    })
}

fn parse_bool_text(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Outcome of [`parse_numeric`].
pub(crate) enum Parsed {
    /// The slot was numeric; the parse either wrote it or failed
    Done(Result<()>),
    /// The slot is not a numeric kind and was left alone
    NotNumeric(DestKind),
}

/// Parse `text` into a numeric slot, respecting its declared width.
///
/// The slot is only written when the parse succeeds. Raised failures carry no field
/// name; callers that know one attach it with [`ConvertError::in_field`].
pub(crate) fn parse_numeric(dest: Slot<'_>, text: &str) -> Parsed {
    let kind = dest.kind();
    let result = match dest {
        Slot::I8(d) => parse_int(text, kind).map(|v| *d = v),
        Slot::I16(d) => parse_int(text, kind).map(|v| *d = v),
        Slot::I32(d) => parse_int(text, kind).map(|v| *d = v),
        Slot::I64(d) => parse_int(text, kind).map(|v| *d = v),
        Slot::U8(d) => parse_int(text, kind).map(|v| *d = v),
        Slot::U16(d) => parse_int(text, kind).map(|v| *d = v),
        Slot::U32(d) => parse_int(text, kind).map(|v| *d = v),
        Slot::U64(d) => parse_int(text, kind).map(|v| *d = v),
        Slot::F32(d) => parse_float(text, kind).map(|v| *d = v),
        Slot::F64(d) => parse_float(text, kind).map(|v| *d = v),
        _ => return Parsed::NotNumeric(kind),
    };
    Parsed::Done(result)
}

fn numeric_failure(text: &str, cause: String, kind: DestKind) -> ConvertError {
    ConvertError::NumericParseFailure {
        field: None,
        raw: text.to_string(),
        cause,
        kind,
        width: kind.width(),
    }
}

fn parse_int<T>(text: &str, kind: DestKind) -> Result<T>
where
    T: FromStr<Err = ParseIntError>,
{
    text.parse::<T>()
        .map_err(|e| numeric_failure(text, e.to_string(), kind))
}

fn parse_float<T>(text: &str, kind: DestKind) -> Result<T>
where
    T: FromStr<Err = ParseFloatError> + Into<f64> + Copy,
{
    let value = text
        .parse::<T>()
        .map_err(|e| numeric_failure(text, e.to_string(), kind))?;
    // Finite literals that overflow the width parse to infinity instead of failing
    if Into::<f64>::into(value).is_infinite() && !is_infinity_literal(text) {
        return Err(numeric_failure(
            text,
            "value out of range".to_string(),
            kind,
        ));
    }
    Ok(value)
}

fn is_infinity_literal(text: &str) -> bool {
    let unsigned = text.trim_start_matches(|c: char| c == '+' || c == '-');
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{zero_timestamp, AsSlot};
    use chrono::DateTime;

    fn text(s: &str) -> SourceValue {
        SourceValue::String(s.to_string())
    }

    #[test]
    fn test_string_fast_paths() {
        let mut s = String::from("old");
        convert_assign(s.as_slot(), &text("new")).unwrap();
        assert_eq!(s, "new");

        convert_assign(s.as_slot(), &SourceValue::Bytes(b"raw".to_vec())).unwrap();
        assert_eq!(s, "raw");

        let mut b = Vec::new();
        convert_assign(b.as_slot(), &text("abc")).unwrap();
        assert_eq!(b, b"abc");
    }

    #[test]
    fn test_invalid_utf8_bytes_into_string_fails() {
        let mut s = String::from("kept");
        let err = convert_assign(s.as_slot(), &SourceValue::Bytes(vec![0x66, 0xff, 0x6f]))
            .unwrap_err();
        assert_eq!(
            err,
            ConvertError::UnsupportedConversionPair {
                source_kind: crate::value::SourceKind::Bytes,
                dest_kind: DestKind::String,
            }
        );
        assert_eq!(s, "kept");
    }

    #[test]
    fn test_null_resets_bytes() {
        let mut b = b"filled".to_vec();
        convert_assign(b.as_slot(), &SourceValue::Null).unwrap();
        assert!(b.is_empty());
    }

    #[test]
    fn test_bytes_into_any_is_a_copy() {
        let src = SourceValue::Bytes(vec![1, 2, 3]);
        let mut any = SourceValue::Null;
        convert_assign(any.as_slot(), &src).unwrap();
        assert_eq!(any, src);
    }

    #[test]
    fn test_any_accepts_verbatim() {
        let mut any = SourceValue::Null;
        convert_assign(any.as_slot(), &SourceValue::Float64(2.5)).unwrap();
        assert_eq!(any, SourceValue::Float64(2.5));
    }

    #[test]
    fn test_int_into_string() {
        let mut s = String::new();
        convert_assign(s.as_slot(), &SourceValue::Int64(42)).unwrap();
        assert_eq!(s, "42");

        convert_assign(s.as_slot(), &SourceValue::Bool(false)).unwrap();
        assert_eq!(s, "false");

        convert_assign(s.as_slot(), &SourceValue::Float64(0.25)).unwrap();
        assert_eq!(s, "0.25");
    }

    #[test]
    fn test_string_rejects_null_and_timestamp() {
        let mut s = String::from("keep");
        let err = convert_assign(s.as_slot(), &SourceValue::Null).unwrap_err();
        assert_eq!(
            err,
            ConvertError::UnsupportedConversionPair {
                source_kind: crate::value::SourceKind::Null,
                dest_kind: DestKind::String,
            }
        );
        let err = convert_assign(s.as_slot(), &SourceValue::Timestamp(zero_timestamp()));
        assert!(err.is_err());
        assert_eq!(s, "keep");
    }

    #[test]
    fn test_bool_recognized_forms() {
        let mut b = false;
        convert_assign(b.as_slot(), &text("1")).unwrap();
        assert!(b);
        convert_assign(b.as_slot(), &text("false")).unwrap();
        assert!(!b);
        convert_assign(b.as_slot(), &SourceValue::Bytes(b"true".to_vec())).unwrap();
        assert!(b);
        convert_assign(b.as_slot(), &SourceValue::Int64(0)).unwrap();
        assert!(!b);
        convert_assign(b.as_slot(), &SourceValue::Uint64(1)).unwrap();
        assert!(b);
    }

    #[test]
    fn test_bool_rejects_guesses() {
        let mut b = true;
        let err = convert_assign(b.as_slot(), &text("banana")).unwrap_err();
        assert_eq!(
            err,
            ConvertError::BooleanCoercionFailure {
                raw: "banana".to_string()
            }
        );
        assert!(convert_assign(b.as_slot(), &SourceValue::Int64(2)).is_err());
        assert!(convert_assign(b.as_slot(), &SourceValue::Float64(1.0)).is_err());
        assert!(b);
    }

    #[test]
    fn test_width_is_respected() {
        let mut small = 7i8;
        let err = convert_assign(small.as_slot(), &text("200")).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::NumericParseFailure { ref raw, width: 8, kind: DestKind::I8, .. } if raw == "200"
        ));
        assert_eq!(small, 7);

        convert_assign(small.as_slot(), &text("-128")).unwrap();
        assert_eq!(small, -128);
    }

    #[test]
    fn test_int64_into_narrower_int() {
        let mut n = 0i32;
        convert_assign(n.as_slot(), &SourceValue::Int64(123)).unwrap();
        assert_eq!(n, 123);

        let err = convert_assign(n.as_slot(), &SourceValue::Int64(i64::MAX));
        assert!(matches!(err, Err(ConvertError::NumericParseFailure { .. })));
        assert_eq!(n, 123);
    }

    #[test]
    fn test_unsigned_rejects_negative() {
        let mut n = 1u64;
        let err = convert_assign(n.as_slot(), &SourceValue::Int64(-1));
        assert!(matches!(err, Err(ConvertError::NumericParseFailure { .. })));
        assert_eq!(n, 1);

        convert_assign(n.as_slot(), &SourceValue::Uint64(u64::MAX)).unwrap();
        assert_eq!(n, u64::MAX);
    }

    #[test]
    fn test_float_from_text_and_overflow() {
        let mut f = 0f32;
        convert_assign(f.as_slot(), &SourceValue::Float64(1.5)).unwrap();
        assert_eq!(f, 1.5);

        let err = convert_assign(f.as_slot(), &text("3.5e39"));
        assert!(matches!(err, Err(ConvertError::NumericParseFailure { width: 32, .. })));
        assert_eq!(f, 1.5);

        convert_assign(f.as_slot(), &text("-inf")).unwrap();
        assert!(f.is_infinite());

        let mut d = 0f64;
        assert!(convert_assign(d.as_slot(), &text("1e400")).is_err());
        convert_assign(d.as_slot(), &SourceValue::Bytes(b"2.25".to_vec())).unwrap();
        assert_eq!(d, 2.25);
    }

    #[test]
    fn test_float_text_into_int_fails() {
        let mut n = 0i64;
        assert!(convert_assign(n.as_slot(), &SourceValue::Float64(3.5)).is_err());
        convert_assign(n.as_slot(), &SourceValue::Float64(3.0)).unwrap();
        assert_eq!(n, 3);
    }

    #[test]
    fn test_nullable_null_sets_none() {
        let mut p: Option<i64> = Some(9);
        convert_assign(p.as_slot(), &SourceValue::Null).unwrap();
        assert_eq!(p, None);
    }

    #[test]
    fn test_nullable_allocates_and_recurses() {
        let mut p: Option<i64> = None;
        convert_assign(p.as_slot(), &text("17")).unwrap();
        assert_eq!(p, Some(17));

        let mut nested: Option<Option<String>> = None;
        convert_assign(nested.as_slot(), &SourceValue::Int64(5)).unwrap();
        assert_eq!(nested, Some(Some("5".to_string())));
    }

    #[test]
    fn test_timestamp_copy() {
        let ts = DateTime::parse_from_rfc3339("2021-03-04T05:06:07-03:00").unwrap();
        let mut dest = zero_timestamp();
        convert_assign(dest.as_slot(), &SourceValue::Timestamp(ts)).unwrap();
        assert_eq!(dest, ts);

        let err = convert_assign(dest.as_slot(), &text("2021-03-04")).unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedConversionPair { .. }));
    }

    #[test]
    fn test_bytes_rejects_numbers() {
        let mut b = vec![1u8];
        let err = convert_assign(b.as_slot(), &SourceValue::Int64(1)).unwrap_err();
        assert_eq!(
            err,
            ConvertError::UnsupportedConversionPair {
                source_kind: crate::value::SourceKind::Int64,
                dest_kind: DestKind::Bytes,
            }
        );
        assert_eq!(b, vec![1u8]);
    }

    struct Upper(String);

    impl Absorb for Upper {
        fn absorb(&mut self, src: &SourceValue) -> Result<()> {
            self.0 = src.as_text().to_uppercase();
            Ok(())
        }
    }

    #[test]
    fn test_custom_destination_owns_conversion() {
        let mut up = Upper(String::new());
        convert_assign(Slot::Custom(&mut up), &text("shout")).unwrap();
        assert_eq!(up.0, "SHOUT");
    }
}
