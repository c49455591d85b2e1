//! Field access and field descriptors

use std::borrow::Cow;

use serde::Deserialize;
use serde::Serialize;

use super::Value;

/// Read access to named fields of a record.
///
/// The engine never assumes a concrete record shape: anything that can
/// answer "what is the value of field `key`" can be searched, filtered,
/// sorted and grouped. Return `None` for fields the record does not have;
/// the engine treats them as empty.
///
/// Borrow when the value is stored as a [`Value`], build an owned one
/// otherwise:
///
/// ```
/// use std::borrow::Cow;
/// use mero_lib::model::{Fields, Value};
///
/// struct User {
///     name: String,
///     age: u32,
/// }
///
/// impl Fields for User {
///     fn field(&self, key: &str) -> Option<Cow<'_, Value>> {
///         match key {
///             "name" => Some(Cow::Owned(Value::from(self.name.as_str()))),
///             "age" => Some(Cow::Owned(Value::from(self.age))),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Fields {
    /// Returns the value of the given field, if the record has it.
    fn field(&self, key: &str) -> Option<Cow<'_, Value>>;
}

impl<T: Fields + ?Sized> Fields for &T {
    fn field(&self, key: &str) -> Option<Cow<'_, Value>> {
        (**self).field(key)
    }
}

impl Fields for serde_json::Map<String, serde_json::Value> {
    fn field(&self, key: &str) -> Option<Cow<'_, Value>> {
        self.get(key).map(|v| Cow::Owned(Value::from(v)))
    }
}

/// Declares a field and the operations a query may apply to it.
///
/// A query that sorts, filters or groups by a field whose descriptor does
/// not allow it leaves the records untouched for that operation.
///
/// # Examples
///
/// ```
/// use mero_lib::model::FieldDescriptor;
///
/// let fields = vec![
///     FieldDescriptor::new("id"),
///     FieldDescriptor::new("name").sortable().filterable(),
///     FieldDescriptor::new("status").filterable().groupable(),
/// ];
/// assert!(fields[1].sortable);
/// assert!(!fields[0].filterable);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Field name, as passed to [`Fields::field`].
    pub key: String,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default)]
    pub filterable: bool,
    #[serde(default)]
    pub groupable: bool,
}

impl FieldDescriptor {
    /// Create a descriptor that allows no operations.
    ///
    /// The field still takes part in free-text search.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            sortable: false,
            filterable: false,
            groupable: false,
        }
    }

    /// Create a descriptor that allows every operation.
    pub fn all(key: impl Into<String>) -> Self {
        Self::new(key).sortable().filterable().groupable()
    }

    /// Allow sorting by this field.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Allow per-field filters on this field.
    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    /// Allow grouping by this field.
    pub fn groupable(mut self) -> Self {
        self.groupable = true;
        self
    }
}

/// Find the descriptor for a field key.
pub fn find_field<'a>(fields: &'a [FieldDescriptor], key: &str) -> Option<&'a FieldDescriptor> {
    fields.iter().find(|f| f.key == key)
}
