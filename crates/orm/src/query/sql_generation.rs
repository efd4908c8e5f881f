//! Query Builder SQL generation
//!
//! Renders a builder's clause state to a SQL string with Postgres-style
//! `$1..$n` placeholders and the parallel ordered binding list. Only
//! structural tokens (table/column names, operators, join and direction
//! keywords) are ever concatenated into the SQL text; every value goes
//! through a placeholder. Binding order always equals placeholder
//! emission order.

use crate::error::{OrmError, OrmResult};
use crate::value::{Row, Value};

use super::builder::QueryBuilder;

impl QueryBuilder {
    /// Render the SELECT statement and its bindings
    pub fn to_sql_with_bindings(&self) -> (String, Vec<Value>) {
        self.render_select(&self.select_list())
    }

    /// Render the SELECT with the column list replaced by a row-count
    /// aggregate. The builder's own select state is untouched.
    pub fn count_sql(&self) -> (String, Vec<Value>) {
        self.render_select("COUNT(*) AS count")
    }

    /// Render `INSERT INTO table (cols) VALUES (placeholders)` with one
    /// placeholder per column in the payload's iteration order.
    pub fn insert_sql(&self, data: &Row) -> OrmResult<(String, Vec<Value>)> {
        if data.is_empty() {
            return Err(OrmError::InvalidArgument(
                "insert requires at least one column".to_string(),
            ));
        }

        let columns: Vec<&str> = data.keys().map(|k| k.as_str()).collect();
        let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("${}", i)).collect();
        let bindings: Vec<Value> = data.values().cloned().collect();

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table,
            columns.join(", "),
            placeholders.join(", ")
        );

        Ok((sql, bindings))
    }

    /// Render `UPDATE table SET ...` plus the current WHERE predicates.
    ///
    /// With no predicates the WHERE clause is omitted and the statement
    /// updates every row in the table. That is intentional power-user
    /// behavior; callers that mean one row must constrain the builder.
    pub fn update_sql(&self, data: &Row) -> OrmResult<(String, Vec<Value>)> {
        if data.is_empty() {
            return Err(OrmError::InvalidArgument(
                "update requires at least one column".to_string(),
            ));
        }

        let mut sql = format!("UPDATE {} SET ", self.table);
        let mut bindings = Vec::new();
        let mut placeholder = 1;

        for (i, (column, value)) in data.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            sql.push_str(&format!("{} = ${}", column, placeholder));
            bindings.push(value.clone());
            placeholder += 1;
        }

        self.append_where(&mut sql, &mut bindings, &mut placeholder);

        Ok((sql, bindings))
    }

    /// Render `DELETE FROM table` plus the current WHERE predicates.
    /// Same whole-table caveat as [`update_sql`](QueryBuilder::update_sql).
    pub fn delete_sql(&self) -> (String, Vec<Value>) {
        let mut sql = format!("DELETE FROM {}", self.table);
        let mut bindings = Vec::new();
        let mut placeholder = 1;

        self.append_where(&mut sql, &mut bindings, &mut placeholder);

        (sql, bindings)
    }

    fn select_list(&self) -> String {
        if self.select_columns.is_empty() {
            "*".to_string()
        } else {
            self.select_columns.join(", ")
        }
    }

    fn render_select(&self, columns: &str) -> (String, Vec<Value>) {
        let mut sql = format!("SELECT {} FROM {}", columns, self.table);

        for join in &self.joins {
            sql.push_str(&format!(
                " {} {} ON {} {} {}",
                join.join_type, join.table, join.left, join.operator, join.right
            ));
        }

        let mut bindings = Vec::new();
        let mut placeholder = 1;
        self.append_where(&mut sql, &mut bindings, &mut placeholder);

        if !self.orders.is_empty() {
            sql.push_str(" ORDER BY ");
            let terms: Vec<String> = self
                .orders
                .iter()
                .map(|(column, direction)| format!("{} {}", column, direction))
                .collect();
            sql.push_str(&terms.join(", "));
        }

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        if let Some(offset) = self.offset {
            sql.push_str(&format!(" OFFSET {}", offset));
        }

        (sql, bindings)
    }

    /// Append the WHERE clause. The first predicate carries no join
    /// keyword; every later fragment embeds its own leading ` AND `/` OR `.
    fn append_where(&self, sql: &mut String, bindings: &mut Vec<Value>, placeholder: &mut usize) {
        if self.wheres.is_empty() {
            return;
        }

        sql.push_str(" WHERE ");
        for (i, clause) in self.wheres.iter().enumerate() {
            if i > 0 {
                sql.push_str(&format!(" {} ", clause.boolean));
            }

            match &clause.value {
                Some(value) => {
                    sql.push_str(&format!("{} {} ${}", clause.column, clause.operator, placeholder));
                    bindings.push(value.clone());
                    *placeholder += 1;
                }
                None => {
                    // IN predicate: one placeholder per element, values
                    // appended in element order. Empty set matches nothing.
                    if clause.values.is_empty() {
                        sql.push_str("1 = 0");
                        continue;
                    }

                    sql.push_str(&format!("{} {} (", clause.column, clause.operator));
                    for (j, value) in clause.values.iter().enumerate() {
                        if j > 0 {
                            sql.push_str(", ");
                        }
                        sql.push_str(&format!("${}", placeholder));
                        bindings.push(value.clone());
                        *placeholder += 1;
                    }
                    sql.push(')');
                }
            }
        }
    }
}
