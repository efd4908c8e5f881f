//! CRUD Operations - Create, Read, Update, Delete operations for models
//!
//! Finder and persistence operations on top of a table-scoped query
//! builder, with dirty-attribute diffing on the update path. Every
//! storage-touching method takes the connection explicitly; there is no
//! process-wide handle.

use crate::connection::Connection;
use crate::error::{OrmError, OrmResult};
use crate::model::core_trait::Model;
use crate::query::QueryBuilder;
use crate::value::{Row, Value};

/// Trait providing CRUD operations for models
pub trait CrudOperations: Model {
    /// Find a model by its primary key. Absence is `Ok(None)`, never an
    /// error.
    fn find<C: Connection, K: Into<Value>>(conn: &mut C, id: K) -> OrmResult<Option<Self>> {
        Ok(Self::query().find(conn, id)?.map(Self::from_row))
    }

    /// Find a model by its primary key or fail with a not-found error
    /// carrying the requested id.
    fn find_or_fail<C: Connection, K: Into<Value>>(conn: &mut C, id: K) -> OrmResult<Self> {
        let id = id.into();
        Self::find(conn, id.clone())?.ok_or_else(|| OrmError::NotFound {
            table: Self::table_name().to_string(),
            id: id.to_string(),
        })
    }

    /// Every row in the table, hydrated, in storage order. No implicit
    /// limit; the caller accepts the full-table materialization cost.
    fn all<C: Connection>(conn: &mut C) -> OrmResult<Vec<Self>> {
        let rows = Self::query().get(conn)?;
        Ok(rows.into_iter().map(Self::from_row).collect())
    }

    /// Start an ad-hoc query with an initial equality predicate.
    ///
    /// Returns the raw table-scoped builder: terminal calls on it yield
    /// row maps, not instances, unlike `find`/`all`/`create`. Hydrate
    /// with [`Model::from_row`] when typed results are wanted.
    fn where_eq<T: Into<Value>>(column: &str, value: T) -> QueryBuilder {
        Self::query().where_eq(column, value)
    }

    /// Start an ad-hoc query with an initial predicate and an arbitrary
    /// comparison operator. Same raw-row contract as
    /// [`where_eq`](CrudOperations::where_eq).
    fn where_condition<T: Into<Value>>(column: &str, operator: &str, value: T) -> QueryBuilder {
        Self::query().where_condition(column, operator, value)
    }

    /// Construct, fill (fillable-filtered) and persist a new instance
    fn create<C: Connection>(conn: &mut C, attributes: Row) -> OrmResult<Self> {
        let mut model = Self::new();
        model.fill(attributes);
        model.save(conn)?;
        Ok(model)
    }

    /// Bulk update by primary key, bypassing instance hydration and the
    /// fillable filter. Returns the affected-row count.
    fn update_by_id<C: Connection, K: Into<Value>>(
        conn: &mut C,
        id: K,
        attributes: Row,
    ) -> OrmResult<u64> {
        Self::query()
            .where_eq(Self::primary_key_name(), id)
            .update(conn, &attributes)
    }

    /// Bulk delete by primary key. Returns the affected-row count.
    fn delete_by_id<C: Connection, K: Into<Value>>(conn: &mut C, id: K) -> OrmResult<u64> {
        Self::query()
            .where_eq(Self::primary_key_name(), id)
            .delete(conn)
    }

    fn count<C: Connection>(conn: &mut C) -> OrmResult<i64> {
        Self::query().count(conn)
    }

    fn exists<C: Connection>(conn: &mut C) -> OrmResult<bool> {
        Self::query().exists(conn)
    }

    /// Persist the instance: insert when new, update when already
    /// persisted. Returns `true` on success, `false` when an update or
    /// re-save matched no row.
    fn save<C: Connection>(&mut self, conn: &mut C) -> OrmResult<bool> {
        if self.attributes().exists() {
            self.perform_update(conn)
        } else {
            self.perform_insert(conn)
        }
    }

    /// Insert path of [`save`](CrudOperations::save): inserts the
    /// fillable-filtered attribute subset, writes the generated id into
    /// the primary-key attribute, marks the instance persisted and
    /// resyncs the original snapshot.
    fn perform_insert<C: Connection>(&mut self, conn: &mut C) -> OrmResult<bool> {
        let data: Row = self
            .attributes()
            .all()
            .iter()
            .filter(|(key, _)| Self::is_fillable(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        if data.is_empty() {
            return Err(OrmError::InvalidArgument(
                "cannot insert a model with no fillable attributes".to_string(),
            ));
        }

        let id = Self::query().insert(conn, &data)?;
        self.set_attribute(Self::primary_key_name(), id);
        self.attributes_mut().set_exists(true);
        self.attributes_mut().sync_original();
        Ok(true)
    }

    /// Update path of [`save`](CrudOperations::save): diffs the attribute
    /// map against the original snapshot and updates only the dirty
    /// subset, scoped by primary-key equality. An empty dirty set is a
    /// no-op success issuing no statement; an update matching no row
    /// reports `false` without raising.
    fn perform_update<C: Connection>(&mut self, conn: &mut C) -> OrmResult<bool> {
        let pk_name = Self::primary_key_name();
        let pk = self
            .get_attribute(pk_name)
            .cloned()
            .ok_or(OrmError::MissingPrimaryKey)?;

        let dirty = self.dirty_attributes();
        if dirty.is_empty() {
            return Ok(true);
        }

        let affected = Self::query()
            .where_eq(pk_name, pk)
            .update(conn, &dirty)?;

        if affected >= 1 {
            self.attributes_mut().sync_original();
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Keys whose value differs from the original snapshot (and pass the
    /// fillable check), plus keys set since the snapshot was taken.
    fn dirty_attributes(&self) -> Row {
        let original = self.attributes().original();
        self.attributes()
            .all()
            .iter()
            .filter(|(key, value)| match original.get(*key) {
                None => true,
                Some(previous) => previous != *value && Self::is_fillable(key),
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Delete the backing row. `Ok(false)` when the instance is not
    /// persisted, has no primary key, or the delete matched no row; on
    /// success the instance drops back to the unpersisted state (a later
    /// save re-inserts it).
    fn delete<C: Connection>(&mut self, conn: &mut C) -> OrmResult<bool> {
        if !self.attributes().exists() {
            return Ok(false);
        }

        let pk_name = Self::primary_key_name();
        let pk = match self.get_attribute(pk_name) {
            Some(value) => value.clone(),
            None => return Ok(false),
        };

        let affected = Self::query().where_eq(pk_name, pk).delete(conn)?;

        if affected >= 1 {
            self.attributes_mut().set_exists(false);
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

// Implement CrudOperations for all types that implement Model
impl<T: Model> CrudOperations for T {}
