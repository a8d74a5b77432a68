//! Name-keyed mapping between records and column maps.
//!
//! Inward, [`RecordMapper::scan_map_into_record`] writes raw column bytes into the
//! record fields of the same name. Names are matched exactly; names the record does
//! not declare, and read-only fields, are skipped so that extra columns never break a
//! scan. Outward, [`RecordMapper::scan_record_into_map`] reads every declared field.
//!
//! Timestamp fields are the one lenient kind: raw text that does not match the
//! configured layout produces the zero timestamp rather than an error.

use std::collections::HashMap;

use chrono::DateTime;

use crate::config::MapperConfig;
use crate::convert::{parse_numeric, Parsed};
use crate::error::{ConvertError, Result};
use crate::record::Record;
use crate::value::{zero_timestamp, Slot, SourceValue};

/// Maps records to and from name-keyed column maps.
#[derive(Debug, Clone, Default)]
pub struct RecordMapper {
    config: MapperConfig,
}

impl RecordMapper {
    #[must_use]
    pub fn new(config: MapperConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Write raw column bytes into the matching fields of `dest`.
    ///
    /// Each field is committed as soon as it converts; a later failure does not undo
    /// earlier fields.
    ///
    /// # Errors
    ///
    /// [`ConvertError::NumericParseFailure`] naming the field when a numeric column does
    /// not parse, and [`ConvertError::UnsupportedFieldKind`] when the matched field is not
    /// a bytes, string, bool, numeric or timestamp field.
    pub fn scan_map_into_record<R, I, K, V>(&self, dest: &mut R, fields: I) -> Result<()>
    where
        R: Record,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<[u8]>,
    {
        let shape = R::shape();
        for (key, raw) in fields {
            let name = key.as_ref();
            let Some(field) = shape.field(name) else {
                log::trace!("no field named {name}; skipping column");
                continue;
            };
            let Some(slot) = field.slot(dest) else {
                log::trace!("field {name} is read-only; skipping column");
                continue;
            };
            self.assign_raw(slot, field.name(), raw.as_ref())?;
        }
        Ok(())
    }

    fn assign_raw(&self, slot: Slot<'_>, name: &str, raw: &[u8]) -> Result<()> {
        match slot {
            Slot::Bytes(d) => *d = raw.to_vec(),
            Slot::String(d) => {
                let text = std::str::from_utf8(raw).map_err(|e| ConvertError::InvalidUtf8 {
                    field: name.to_string(),
                    valid_up_to: e.valid_up_to(),
                })?;
                text.clone_into(d);
            }
            Slot::Bool(d) => *d = raw == b"1",
            Slot::Timestamp(d) => {
                let text = String::from_utf8_lossy(raw);
                *d = match DateTime::parse_from_str(&text, &self.config.timestamp_format) {
                    Ok(ts) => ts,
                    Err(e) => {
                        log::debug!("field {name}: unparseable timestamp {text:?} ({e}); using zero");
                        zero_timestamp()
                    }
                };
            }
            slot => {
                let text = String::from_utf8_lossy(raw);
                return match parse_numeric(slot, &text) {
                    Parsed::Done(result) => result.map_err(|e| e.in_field(name)),
                    Parsed::NotNumeric(kind) => Err(ConvertError::UnsupportedFieldKind {
                        field: name.to_string(),
                        kind,
                    }),
                };
            }
        }
        Ok(())
    }

    /// Read every declared field of `src` into a map keyed by field name.
    #[must_use]
    pub fn scan_record_into_map<R: Record>(&self, src: &R) -> HashMap<String, SourceValue> {
        R::shape()
            .fields()
            .iter()
            .map(|field| (field.name().to_string(), field.value(src)))
            .collect()
    }
}

/// [`RecordMapper::scan_map_into_record`] with the default configuration.
///
/// # Errors
///
/// See [`RecordMapper::scan_map_into_record`].
pub fn scan_map_into_record<R, I, K, V>(dest: &mut R, fields: I) -> Result<()>
where
    R: Record,
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<[u8]>,
{
    RecordMapper::default().scan_map_into_record(dest, fields)
}

/// [`RecordMapper::scan_record_into_map`] with the default configuration.
#[must_use]
pub fn scan_record_into_map<R: Record>(src: &R) -> HashMap<String, SourceValue> {
    RecordMapper::default().scan_record_into_map(src)
}
