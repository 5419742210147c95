//! Purpose: Hold JSON properties a record's schema does not declare.
//! Exports: `ExtraFields`, `Extensible`.
//! Role: Forward-compatibility base shared by every record in the model.
//! Invariants: The backing map starts absent and is allocated on first insert.
//! Invariants: Absent and cleared maps serialize identically (nothing emitted).
//! Invariants: Values are stored verbatim; capture never fails.

use serde_json::{Map, Value};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExtraFields {
    fields: Option<Map<String, Value>>,
}

impl ExtraFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        tracing::trace!(field = %key, "storing unsupported field");
        self.fields.get_or_insert_with(Map::new).insert(key, value);
    }

    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.put(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.as_ref().and_then(|fields| fields.get(key))
    }

    pub fn has(&self, key: &str) -> bool {
        self.fields
            .as_ref()
            .is_some_and(|fields| fields.contains_key(key))
    }

    pub fn count(&self) -> usize {
        self.fields.as_ref().map_or(0, Map::len)
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// True once anything has been stored, even if it was later removed.
    pub fn is_allocated(&self) -> bool {
        self.fields.is_some()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &Value)> + '_ {
        self.fields.iter().flat_map(|fields| fields.iter())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries().map(|(key, _)| key.as_str())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.as_mut().and_then(|fields| fields.remove(key))
    }

    pub fn clear(&mut self) {
        if let Some(fields) = self.fields.as_mut() {
            fields.clear();
        }
    }

    /// Copies every entry into `out` unless `out` already holds that key.
    pub(crate) fn write_into(&self, out: &mut Map<String, Value>) {
        for (key, value) in self.entries() {
            if out.contains_key(key) {
                tracing::warn!(field = %key, "unsupported field shadows a declared field; skipped");
                continue;
            }
            out.insert(key.clone(), value.clone());
        }
    }
}

impl FromIterator<(String, Value)> for ExtraFields {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut extras = ExtraFields::new();
        for (key, value) in iter {
            extras.put(key, value);
        }
        extras
    }
}

/// Records that preserve undeclared JSON properties.
pub trait Extensible {
    fn extra_fields(&self) -> &ExtraFields;

    fn extra_fields_mut(&mut self) -> &mut ExtraFields;
}
