//! Query Builder SELECT operations

use super::builder::QueryBuilder;

impl QueryBuilder {
    /// Replace the selected-column list; the last call wins. An empty
    /// list (the default) renders as `*`.
    pub fn select(mut self, columns: &[&str]) -> Self {
        self.select_columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }
}
