//! Query Builder WHERE clause operations

use super::builder::QueryBuilder;
use super::types::*;
use crate::value::Value;

impl QueryBuilder {
    /// Add an AND-joined equality predicate
    pub fn where_eq<T: Into<Value>>(self, column: &str, value: T) -> Self {
        self.where_condition(column, "=", value)
    }

    /// Add an AND-joined predicate with an arbitrary comparison operator.
    ///
    /// The operator string is emitted into the SQL verbatim. That is a
    /// deliberate trust boundary: callers pass operators from their own
    /// code (`=`, `>`, `<=`, `LIKE`, ...), never from user input. Values
    /// always go through placeholders.
    pub fn where_condition<T: Into<Value>>(mut self, column: &str, operator: &str, value: T) -> Self {
        self.wheres.push(WhereClause {
            boolean: BooleanOperator::And,
            column: column.to_string(),
            operator: operator.to_string(),
            value: Some(value.into()),
            values: Vec::new(),
        });
        self
    }

    /// Add an OR-joined equality predicate
    pub fn or_where_eq<T: Into<Value>>(self, column: &str, value: T) -> Self {
        self.or_where_condition(column, "=", value)
    }

    /// Add an OR-joined predicate with an arbitrary comparison operator
    pub fn or_where_condition<T: Into<Value>>(
        mut self,
        column: &str,
        operator: &str,
        value: T,
    ) -> Self {
        self.wheres.push(WhereClause {
            boolean: BooleanOperator::Or,
            column: column.to_string(),
            operator: operator.to_string(),
            value: Some(value.into()),
            values: Vec::new(),
        });
        self
    }

    /// Add an AND-joined `IN` predicate with one placeholder per element,
    /// bound in element order. An empty set renders the always-false
    /// predicate `1 = 0` so the query matches nothing instead of failing.
    pub fn where_in<T: Into<Value>>(mut self, column: &str, values: Vec<T>) -> Self {
        self.wheres.push(WhereClause {
            boolean: BooleanOperator::And,
            column: column.to_string(),
            operator: "IN".to_string(),
            value: None,
            values: values.into_iter().map(|v| v.into()).collect(),
        });
        self
    }
}
