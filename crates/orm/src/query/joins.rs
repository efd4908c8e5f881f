//! Query Builder JOIN operations

use super::builder::QueryBuilder;
use super::types::*;

impl QueryBuilder {
    /// Add an INNER JOIN. `left` and `right` are column-reference
    /// expressions emitted verbatim, e.g. `users.id` and `posts.user_id`.
    pub fn join(mut self, table: &str, left: &str, operator: &str, right: &str) -> Self {
        self.joins.push(JoinClause {
            join_type: JoinType::Inner,
            table: table.to_string(),
            left: left.to_string(),
            operator: operator.to_string(),
            right: right.to_string(),
        });
        self
    }

    /// Add a LEFT JOIN
    pub fn left_join(mut self, table: &str, left: &str, operator: &str, right: &str) -> Self {
        self.joins.push(JoinClause {
            join_type: JoinType::Left,
            table: table.to_string(),
            left: left.to_string(),
            operator: operator.to_string(),
            right: right.to_string(),
        });
        self
    }
}
