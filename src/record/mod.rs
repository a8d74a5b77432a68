//! Record shapes
//!
//! A record is a struct with named fields. Its [`RecordShape`] is a table of
//! [`FieldDescriptor`]s (name, getter, optional setter) built once per type, normally by
//! `#[derive(Record)]`, and looked up by name on every mapping call.
//!
//! ```rust
//! use rowbind::{scan_map_into_record, Record};
//! use std::collections::HashMap;
//!
//! #[derive(Debug, Default, Record)]
//! struct Account {
//!     username: String,
//!     logins: i32,
//! }
//!
//! let mut account = Account::default();
//! let row: HashMap<&str, &[u8]> =
//!     HashMap::from([("username", &b"kevin"[..]), ("logins", &b"3"[..])]);
//! scan_map_into_record(&mut account, &row).unwrap();
//! assert_eq!(account.username, "kevin");
//! assert_eq!(account.logins, 3);
//! ```

pub mod mapper;
pub mod row;

use std::collections::HashMap;
use std::fmt;

use crate::value::{Slot, SourceValue};

/// Reads one field out of a record.
pub type Getter<R> = fn(&R) -> SourceValue;

/// Lends one field of a record out as a conversion destination.
pub type Setter<R> = for<'a> fn(&'a mut R) -> Slot<'a>;

/// A struct whose fields can be mapped by name.
pub trait Record: Sized + 'static {
    /// The field table for this type. Implementations build it once and return the
    /// same reference on every call.
    fn shape() -> &'static RecordShape<Self>;
}

/// One named field of a record.
pub struct FieldDescriptor<R> {
    name: &'static str,
    getter: Getter<R>,
    setter: Option<Setter<R>>,
}

impl<R> FieldDescriptor<R> {
    #[must_use]
    pub fn writable(name: &'static str, getter: Getter<R>, setter: Setter<R>) -> Self {
        Self {
            name,
            getter,
            setter: Some(setter),
        }
    }

    /// A field the mappers can read but never write.
    #[must_use]
    pub fn readonly(name: &'static str, getter: Getter<R>) -> Self {
        Self {
            name,
            getter,
            setter: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn is_writable(&self) -> bool {
        self.setter.is_some()
    }

    #[must_use]
    pub fn value(&self, record: &R) -> SourceValue {
        (self.getter)(record)
    }

    /// Borrow the field as a destination, `None` for read-only fields.
    pub fn slot<'a>(&self, record: &'a mut R) -> Option<Slot<'a>> {
        self.setter.map(|setter| setter(record))
    }
}

impl<R> fmt::Debug for FieldDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("writable", &self.is_writable())
            .finish()
    }
}

/// Field table of a record type, in declaration order.
pub struct RecordShape<R> {
    fields: Vec<FieldDescriptor<R>>,
    index: HashMap<&'static str, usize>,
}

impl<R> RecordShape<R> {
    /// Build the table. When two descriptors share a name the first one wins lookups.
    #[must_use]
    pub fn new(fields: Vec<FieldDescriptor<R>>) -> Self {
        let mut index = HashMap::with_capacity(fields.len());
        for (position, field) in fields.iter().enumerate() {
            index.entry(field.name).or_insert(position);
        }
        Self { fields, index }
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor<R>] {
        &self.fields
    }

    /// Exact, case-sensitive lookup.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor<R>> {
        self.index.get(name).map(|&position| &self.fields[position])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<R> fmt::Debug for RecordShape<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.fields.iter()).finish()
    }
}
