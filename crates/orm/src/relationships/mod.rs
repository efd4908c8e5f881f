//! Relationship resolution - belongs-to, has-many, has-one
//!
//! Relationships are computed on access: each resolver issues one fresh
//! query against the related table and hydrates the result as instances
//! of the related type. Nothing is cached and nothing is loaded lazily
//! behind the scenes; eager-load hints on the query builder stay hints.

pub mod inference;

use crate::connection::Connection;
use crate::error::OrmResult;
use crate::model::Model;

/// Relationship traversal for models.
///
/// Default key inference: the foreign key is the owning side's
/// `foreign_key_name()` (singularized table name + `_id`), the owner or
/// local key is the respective primary key. The `_with` variants
/// override both per call.
pub trait Relationships: Model {
    /// Resolve the parent this instance belongs to, e.g.
    /// `post.belongs_to::<User, _>(conn)` reads `post.user_id` and looks
    /// up the matching user.
    fn belongs_to<R: Model, C: Connection>(&self, conn: &mut C) -> OrmResult<Option<R>> {
        self.belongs_to_with(conn, &R::foreign_key_name(), R::primary_key_name())
    }

    /// `belongs_to` with explicit foreign-key and owner-key columns.
    /// An unset or null foreign-key attribute resolves to `Ok(None)`
    /// without querying.
    fn belongs_to_with<R: Model, C: Connection>(
        &self,
        conn: &mut C,
        foreign_key: &str,
        owner_key: &str,
    ) -> OrmResult<Option<R>> {
        let fk_value = match self.get_attribute(foreign_key) {
            Some(value) if !value.is_null() => value.clone(),
            _ => return Ok(None),
        };

        let row = R::query().where_eq(owner_key, fk_value).first(conn)?;
        Ok(row.map(R::from_row))
    }

    /// Resolve all children referencing this instance, e.g.
    /// `user.has_many::<Post, _>(conn)` fetches posts whose `user_id`
    /// equals this user's id.
    fn has_many<R: Model, C: Connection>(&self, conn: &mut C) -> OrmResult<Vec<R>> {
        self.has_many_with(conn, &Self::foreign_key_name(), Self::primary_key_name())
    }

    /// `has_many` with explicit foreign-key and local-key columns.
    /// An unset or null local-key attribute resolves to an empty vec
    /// without querying.
    fn has_many_with<R: Model, C: Connection>(
        &self,
        conn: &mut C,
        foreign_key: &str,
        local_key: &str,
    ) -> OrmResult<Vec<R>> {
        let local_value = match self.get_attribute(local_key) {
            Some(value) if !value.is_null() => value.clone(),
            _ => return Ok(Vec::new()),
        };

        let rows = R::query().where_eq(foreign_key, local_value).get(conn)?;
        Ok(rows.into_iter().map(R::from_row).collect())
    }

    /// `has_many` truncated to the first match
    fn has_one<R: Model, C: Connection>(&self, conn: &mut C) -> OrmResult<Option<R>> {
        self.has_one_with(conn, &Self::foreign_key_name(), Self::primary_key_name())
    }

    /// `has_one` with explicit foreign-key and local-key columns
    fn has_one_with<R: Model, C: Connection>(
        &self,
        conn: &mut C,
        foreign_key: &str,
        local_key: &str,
    ) -> OrmResult<Option<R>> {
        let local_value = match self.get_attribute(local_key) {
            Some(value) if !value.is_null() => value.clone(),
            _ => return Ok(None),
        };

        let row = R::query().where_eq(foreign_key, local_value).first(conn)?;
        Ok(row.map(R::from_row))
    }
}

// Implement Relationships for all types that implement Model
impl<T: Model> Relationships for T {}
