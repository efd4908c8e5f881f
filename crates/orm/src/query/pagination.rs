//! Query Builder LIMIT/OFFSET operations

use super::builder::QueryBuilder;

impl QueryBuilder {
    /// Set the LIMIT, overwriting any previous value
    pub fn limit(mut self, count: u64) -> Self {
        self.limit = Some(count);
        self
    }

    /// Set the OFFSET, overwriting any previous value
    pub fn offset(mut self, count: u64) -> Self {
        self.offset = Some(count);
        self
    }
}
