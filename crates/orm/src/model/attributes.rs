//! Attribute bag for model instances
//!
//! Holds the current column values, the snapshot of those values as last
//! loaded or persisted, and the existence flag. `original` always
//! reflects the attribute map at the last successful load or save;
//! `exists` is true iff the row is known to exist in storage.

use crate::value::{Row, Value};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    values: Row,
    original: Row,
    exists: bool,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value for a column. Absent keys are `None`; there is no
    /// silent null fallback.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }

    /// The full current attribute map
    pub fn all(&self) -> &Row {
        &self.values
    }

    /// The snapshot taken at the last load or save
    pub fn original(&self) -> &Row {
        &self.original
    }

    pub fn exists(&self) -> bool {
        self.exists
    }

    pub fn set_exists(&mut self, exists: bool) {
        self.exists = exists;
    }

    /// Adopt a freshly fetched row: current and original maps both take
    /// the row's values and the instance is marked persisted.
    pub fn hydrate(&mut self, row: Row) {
        self.values = row.clone();
        self.original = row;
        self.exists = true;
    }

    /// Re-snapshot the current values after a successful persist
    pub fn sync_original(&mut self) {
        self.original = self.values.clone();
    }

    /// Current attribute map minus the given keys
    pub fn except(&self, keys: &[&str]) -> Row {
        self.values
            .iter()
            .filter(|(k, _)| !keys.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}
