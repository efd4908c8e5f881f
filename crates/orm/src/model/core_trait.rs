//! Core Model Trait - Base definition for database entities
//!
//! Defines table metadata, the fillable/hidden declarations, and the
//! attribute-level contract shared by every entity type. Persistence
//! lives in `crud_operations`, relationship traversal in the
//! `relationships` module.

use crate::error::OrmResult;
use crate::model::attributes::Attributes;
use crate::query::QueryBuilder;
use crate::relationships::inference;
use crate::value::{Row, Value};

/// Core trait for active-record entities.
///
/// Table names are always declared explicitly per type; the naming
/// helpers in `relationships::inference` are an optional convenience for
/// writing those declarations, never an implicit fallback.
pub trait Model: Sized {
    /// Table name for this model
    fn table_name() -> &'static str;

    /// Primary key column name
    fn primary_key_name() -> &'static str {
        "id"
    }

    /// Allow-list of columns writable through bulk fill. Empty means
    /// unrestricted.
    fn fillable() -> &'static [&'static str] {
        &[]
    }

    /// Columns excluded from `to_array`/`to_json` output
    fn hidden() -> &'static [&'static str] {
        &[]
    }

    /// Foreign-key column other tables use to reference this model,
    /// e.g. `user_id` for a model stored in `users`. Overridable per
    /// relationship call.
    fn foreign_key_name() -> String {
        format!("{}_id", inference::singularize(Self::table_name()))
    }

    /// Construct an empty, unpersisted instance
    fn new() -> Self;

    fn attributes(&self) -> &Attributes;

    fn attributes_mut(&mut self) -> &mut Attributes;

    /// A query builder scoped to this model's table and primary key.
    /// Terminal calls on it return raw row maps, not instances; use
    /// [`from_row`](Model::from_row) to hydrate rows when types are
    /// wanted.
    fn query() -> QueryBuilder {
        QueryBuilder::table(Self::table_name()).primary_key(Self::primary_key_name())
    }

    /// Hydrate an instance from a fetched row
    fn from_row(row: Row) -> Self {
        let mut model = Self::new();
        model.attributes_mut().hydrate(row);
        model
    }

    /// Whether a key passes the fillable allow-list
    fn is_fillable(key: &str) -> bool {
        Self::fillable().is_empty() || Self::fillable().contains(&key)
    }

    fn get_attribute(&self, key: &str) -> Option<&Value> {
        self.attributes().get(key)
    }

    /// Set a single attribute directly, bypassing the fillable check
    fn set_attribute(&mut self, key: &str, value: Value) -> &mut Self {
        self.attributes_mut().set(key, value);
        self
    }

    /// Bulk-assign attributes. Keys failing the fillable check are
    /// silently dropped.
    fn fill(&mut self, attributes: Row) -> &mut Self {
        for (key, value) in attributes {
            if Self::is_fillable(&key) {
                self.attributes_mut().set(&key, value);
            }
        }
        self
    }

    /// The attribute map minus the hidden set
    fn to_array(&self) -> Row {
        self.attributes().except(Self::hidden())
    }

    /// JSON text of [`to_array`](Model::to_array)'s result
    fn to_json(&self) -> OrmResult<String> {
        Ok(serde_json::to_string(&self.to_array())?)
    }
}
