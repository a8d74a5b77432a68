//! Positional row scanning.
//!
//! When the query layer knows the column order it can skip name lookups entirely: the
//! i-th value goes into the i-th declared field (or the i-th slot).

use std::collections::HashMap;

use crate::convert::convert_assign;
use crate::error::{ConvertError, Result};
use crate::record::mapper::RecordMapper;
use crate::record::Record;
use crate::value::{Slot, SourceValue};

/// Convert `values[i]` into `slots[i]` for every position.
///
/// # Errors
///
/// [`ConvertError::ColumnCountMismatch`] when the lengths differ (nothing is written),
/// otherwise the first conversion error. Slots before the failing one keep their new
/// values.
pub fn scan_slots<'a, I>(slots: I, values: &[SourceValue]) -> Result<()>
where
    I: IntoIterator<Item = Slot<'a>>,
{
    let slots: Vec<Slot<'a>> = slots.into_iter().collect();
    if slots.len() != values.len() {
        return Err(ConvertError::ColumnCountMismatch {
            expected: slots.len(),
            actual: values.len(),
        });
    }
    for (slot, value) in slots.into_iter().zip(values) {
        convert_assign(slot, value)?;
    }
    Ok(())
}

/// Convert `values` into the fields of `dest` in declaration order.
///
/// # Errors
///
/// [`ConvertError::ColumnCountMismatch`] when the value count differs from the field
/// count, [`ConvertError::DestinationNotAddressable`] when a position lands on a
/// read-only field, otherwise the first conversion error with the field name attached.
pub fn scan_row<R: Record>(dest: &mut R, values: &[SourceValue]) -> Result<()> {
    let shape = R::shape();
    if shape.len() != values.len() {
        return Err(ConvertError::ColumnCountMismatch {
            expected: shape.len(),
            actual: values.len(),
        });
    }
    for (field, value) in shape.fields().iter().zip(values) {
        let slot = field
            .slot(dest)
            .ok_or_else(|| ConvertError::DestinationNotAddressable {
                field: field.name().to_string(),
            })?;
        convert_assign(slot, value).map_err(|e| e.in_field(field.name()))?;
    }
    Ok(())
}

impl RecordMapper {
    /// Zip column names with one row's values.
    ///
    /// Names are lower-cased when `lowercase_columns` is set. A repeated name keeps the
    /// last value.
    ///
    /// # Errors
    ///
    /// [`ConvertError::ColumnCountMismatch`] when the lengths differ.
    pub fn row_to_map<S: AsRef<str>>(
        &self,
        columns: &[S],
        values: Vec<SourceValue>,
    ) -> Result<HashMap<String, SourceValue>> {
        if columns.len() != values.len() {
            return Err(ConvertError::ColumnCountMismatch {
                expected: columns.len(),
                actual: values.len(),
            });
        }
        Ok(columns
            .iter()
            .zip(values)
            .map(|(column, value)| {
                let column = column.as_ref();
                let name = if self.config().lowercase_columns {
                    column.to_lowercase()
                } else {
                    column.to_string()
                };
                (name, value)
            })
            .collect())
    }
}

/// [`RecordMapper::row_to_map`] with the default configuration.
///
/// # Errors
///
/// See [`RecordMapper::row_to_map`].
pub fn row_to_map<S: AsRef<str>>(
    columns: &[S],
    values: Vec<SourceValue>,
) -> Result<HashMap<String, SourceValue>> {
    RecordMapper::default().row_to_map(columns, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapperConfig;
    use crate::nullable::{NullInt64, NullString};
    use crate::value::AsSlot;
    use crate::Record;

    #[derive(Debug, Default, Record)]
    struct Account {
        id: i64,
        username: String,
        nickname: NullString,
        parent: Option<i64>,
        #[readonly]
        created_by: String,
    }

    #[derive(Debug, Default, Record)]
    struct Counter {
        name: String,
        hits: NullInt64,
        small: i8,
    }

    #[test]
    fn test_scan_slots() {
        let mut id = 0i64;
        let mut name = String::new();
        let mut parent: Option<i64> = Some(1);
        scan_slots(
            [id.as_slot(), name.as_slot(), parent.as_slot()],
            &[
                SourceValue::Bytes(b"5".to_vec()),
                SourceValue::String("ann".into()),
                SourceValue::Null,
            ],
        )
        .unwrap();
        assert_eq!(id, 5);
        assert_eq!(name, "ann");
        assert_eq!(parent, None);
    }

    #[test]
    fn test_scan_slots_count_mismatch_writes_nothing() {
        let mut id = 3i64;
        let err = scan_slots([id.as_slot()], &[]).unwrap_err();
        assert_eq!(
            err,
            ConvertError::ColumnCountMismatch {
                expected: 1,
                actual: 0
            }
        );
        assert_eq!(id, 3);
    }

    #[test]
    fn test_scan_row_commits_in_order() {
        let mut counter = Counter::default();
        let err = scan_row(
            &mut counter,
            &[
                SourceValue::String("page".into()),
                SourceValue::Int64(10),
                SourceValue::Int64(1000),
            ],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConvertError::NumericParseFailure { field: Some(ref f), .. } if f == "small"
        ));
        assert_eq!(counter.name, "page");
        assert_eq!(counter.hits, NullInt64::new(10));
        assert_eq!(counter.small, 0);
    }

    #[test]
    fn test_scan_row_rejects_readonly_position() {
        let mut account = Account::default();
        let err = scan_row(
            &mut account,
            &[
                SourceValue::Int64(1),
                SourceValue::String("kevin".into()),
                SourceValue::Null,
                SourceValue::Uint64(7),
                SourceValue::String("root".into()),
            ],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConvertError::DestinationNotAddressable {
                field: "created_by".to_string()
            }
        );
        assert_eq!(account.id, 1);
        assert_eq!(account.username, "kevin");
        assert!(!account.nickname.valid);
        assert_eq!(account.parent, Some(7));
    }

    #[test]
    fn test_row_to_map_lowercases() {
        let map = row_to_map(
            &["ID", "UserName"],
            vec![SourceValue::Int64(1), SourceValue::String("k".into())],
        )
        .unwrap();
        assert_eq!(map["id"], SourceValue::Int64(1));
        assert_eq!(map["username"], SourceValue::String("k".into()));
    }

    #[test]
    fn test_row_to_map_keeps_case_when_configured() {
        let mapper = RecordMapper::new(MapperConfig {
            lowercase_columns: false,
            ..MapperConfig::default()
        });
        let map = mapper
            .row_to_map(&["UserName"], vec![SourceValue::Null])
            .unwrap();
        assert!(map.contains_key("UserName"));
        assert!(mapper.row_to_map(&["a", "b"], vec![]).is_err());
    }
}
