//! Query Builder - Core builder implementation

use super::types::*;

/// Fluent builder for a single logical query against one table.
///
/// Chainer methods consume and return the builder; terminal methods in
/// `execution` borrow it, so a builder can run several statements and be
/// [`reset`](QueryBuilder::reset) for reuse. A builder owns its clause
/// state exclusively and is not thread-safe.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryBuilder {
    pub(crate) table: String,
    pub(crate) primary_key: String,
    pub(crate) select_columns: Vec<String>,
    pub(crate) wheres: Vec<WhereClause>,
    pub(crate) joins: Vec<JoinClause>,
    pub(crate) orders: Vec<(String, OrderDirection)>,
    pub(crate) limit: Option<u64>,
    pub(crate) offset: Option<u64>,
    pub(crate) eager_loads: Vec<String>,
}

impl QueryBuilder {
    /// Create a builder scoped to a table
    pub fn table(table: &str) -> Self {
        Self {
            table: table.to_string(),
            primary_key: "id".to_string(),
            select_columns: Vec::new(),
            wheres: Vec::new(),
            joins: Vec::new(),
            orders: Vec::new(),
            limit: None,
            offset: None,
            eager_loads: Vec::new(),
        }
    }

    /// Override the primary key column used by `find` (default `id`)
    pub fn primary_key(mut self, column: &str) -> Self {
        self.primary_key = column.to_string();
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    pub fn primary_key_name(&self) -> &str {
        &self.primary_key
    }

    /// Clear all clauses back to the just-constructed state, preserving
    /// the table and primary-key identity, and return the builder for
    /// further chaining.
    pub fn reset(mut self) -> Self {
        self.select_columns.clear();
        self.wheres.clear();
        self.joins.clear();
        self.orders.clear();
        self.limit = None;
        self.offset = None;
        self.eager_loads.clear();
        self
    }
}
