//! Record abstraction consumed by the gate.
//!
//! The gate never assumes a schema. A record only has to expose its fields as
//! JSON values, which lets batches come from any reader that can produce
//! [`serde_json::Value`]s or implement [`Record`] for its own row type.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single opaque record.
///
/// # Examples
///
/// ```rust
/// use quality_gate::core::Record;
/// use serde_json::json;
///
/// let record = json!({"id": 7, "name": "Ada"});
/// assert_eq!(record.field("id"), Some(&json!(7)));
/// assert_eq!(record.entries().count(), 2);
/// ```
pub trait Record {
    /// Looks up a field by name, returning `None` when it is absent.
    fn field(&self, name: &str) -> Option<&Value>;

    /// Iterates over every `(name, value)` pair the record carries.
    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &Value)> + '_>;

    /// Returns false for a bare value standing in for a record.
    fn is_object(&self) -> bool {
        true
    }
}

impl Record for Map<String, Value> {
    fn field(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &Value)> + '_> {
        Box::new(self.iter().map(|(k, v)| (k.as_str(), v)))
    }
}

/// Objects expose their members. Any other value acts as a record with a
/// single unnamed field holding the value itself.
impl Record for Value {
    fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(name),
            _ => None,
        }
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &Value)> + '_> {
        match self {
            Value::Object(map) => map.entries(),
            other => Box::new(std::iter::once(("", other))),
        }
    }

    fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, name: &str) -> Option<&Value> {
        (**self).field(name)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &Value)> + '_> {
        (**self).entries()
    }

    fn is_object(&self) -> bool {
        (**self).is_object()
    }
}

impl<R: Record + ?Sized> Record for Box<R> {
    fn field(&self, name: &str) -> Option<&Value> {
        (**self).field(name)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &Value)> + '_> {
        (**self).entries()
    }

    fn is_object(&self) -> bool {
        (**self).is_object()
    }
}

/// An ordered, in-memory sequence of records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordBatch<R = Value> {
    records: Vec<R>,
}

impl<R> RecordBatch<R> {
    /// Creates a batch from records in their original order.
    pub fn new(records: Vec<R>) -> Self {
        Self { records }
    }

    /// Creates an empty batch.
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Returns the number of records in the batch.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the batch holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the records as a slice.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Iterates over the records in order.
    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    /// Consumes the batch, returning the owned records.
    pub fn into_records(self) -> Vec<R> {
        self.records
    }
}

impl<R> Default for RecordBatch<R> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<R> From<Vec<R>> for RecordBatch<R> {
    fn from(records: Vec<R>) -> Self {
        Self::new(records)
    }
}

impl<R> FromIterator<R> for RecordBatch<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<R> IntoIterator for RecordBatch<R> {
    type Item = R;
    type IntoIter = std::vec::IntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a, R> IntoIterator for &'a RecordBatch<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
