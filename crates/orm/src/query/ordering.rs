//! Query Builder ORDER BY operations

use super::builder::QueryBuilder;
use super::types::OrderDirection;

impl QueryBuilder {
    /// Append an ORDER BY term. String directions go through
    /// `OrderDirection`'s case-normalizing `FromStr`, which rejects
    /// anything but `ASC`/`DESC`.
    pub fn order_by(mut self, column: &str, direction: OrderDirection) -> Self {
        self.orders.push((column.to_string(), direction));
        self
    }
}
