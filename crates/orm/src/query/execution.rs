//! Query Builder terminal operations
//!
//! Each method renders the builder's state, issues exactly one blocking
//! statement against the connection, and converts the result. Invalid
//! payloads are rejected before anything reaches the connection.

use tracing::debug;

use crate::connection::Connection;
use crate::error::{OrmError, OrmResult};
use crate::value::{Row, Value};

use super::builder::QueryBuilder;

impl QueryBuilder {
    /// Execute the SELECT and return all rows in storage-returned order.
    /// No implicit ordering is applied; add `order_by` terms for one.
    pub fn get<C: Connection>(&self, conn: &mut C) -> OrmResult<Vec<Row>> {
        let (sql, bindings) = self.to_sql_with_bindings();
        debug!(sql = %sql, bindings = bindings.len(), "executing select");
        Ok(conn.execute(&sql, &bindings)?.fetch_all())
    }

    /// Execute with `LIMIT 1` and return the first row, or `None` for an
    /// empty result. Absence is not an error.
    pub fn first<C: Connection>(&self, conn: &mut C) -> OrmResult<Option<Row>> {
        let query = self.clone().limit(1);
        let (sql, bindings) = query.to_sql_with_bindings();
        debug!(sql = %sql, bindings = bindings.len(), "executing select");
        Ok(conn.execute(&sql, &bindings)?.fetch_one())
    }

    /// Sugar for a primary-key lookup: `where_eq(pk, id).first()`
    pub fn find<C: Connection, T: Into<Value>>(
        &self,
        conn: &mut C,
        id: T,
    ) -> OrmResult<Option<Row>> {
        let pk = self.primary_key.clone();
        self.clone().where_eq(&pk, id).first(conn)
    }

    /// Execute a row-count aggregate over the current predicates. The
    /// builder's select state is left untouched.
    pub fn count<C: Connection>(&self, conn: &mut C) -> OrmResult<i64> {
        let (sql, bindings) = self.count_sql();
        debug!(sql = %sql, bindings = bindings.len(), "executing count");

        let row = conn
            .execute(&sql, &bindings)?
            .fetch_one()
            .ok_or_else(|| OrmError::Database("count query returned no rows".to_string()))?;

        row.get("count")
            .and_then(|v| v.as_i64())
            .ok_or_else(|| OrmError::Database("count query returned a non-integer value".to_string()))
    }

    /// Whether any row matches the current predicates
    pub fn exists<C: Connection>(&self, conn: &mut C) -> OrmResult<bool> {
        Ok(self.count(conn)? > 0)
    }

    /// Insert one row and return the generated primary-key value.
    ///
    /// Fails with an invalid-argument error, issuing no statement, when
    /// the payload is empty.
    pub fn insert<C: Connection>(&self, conn: &mut C, data: &Row) -> OrmResult<Value> {
        let (sql, bindings) = self.insert_sql(data)?;
        debug!(sql = %sql, bindings = bindings.len(), "executing insert");

        conn.execute(&sql, &bindings)?;
        conn.last_insert_id()
    }

    /// Update the rows matching the current predicates and return the
    /// affected-row count. With no predicates this updates every row in
    /// the table; see [`update_sql`](QueryBuilder::update_sql).
    pub fn update<C: Connection>(&self, conn: &mut C, data: &Row) -> OrmResult<u64> {
        let (sql, bindings) = self.update_sql(data)?;
        debug!(sql = %sql, bindings = bindings.len(), "executing update");

        Ok(conn.execute(&sql, &bindings)?.rows_affected())
    }

    /// Delete the rows matching the current predicates and return the
    /// affected-row count. Same whole-table caveat as `update`.
    pub fn delete<C: Connection>(&self, conn: &mut C) -> OrmResult<u64> {
        let (sql, bindings) = self.delete_sql();
        debug!(sql = %sql, bindings = bindings.len(), "executing delete");

        Ok(conn.execute(&sql, &bindings)?.rows_affected())
    }
}
