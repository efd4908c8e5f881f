//! Query Builder eager-load hints
//!
//! Relation names recorded here are advisory metadata for whatever layer
//! materializes relationships; this builder never resolves them itself.

use super::builder::QueryBuilder;

impl QueryBuilder {
    /// Record several relation names for eager loading
    pub fn with(mut self, relations: &[&str]) -> Self {
        for relation in relations {
            if !self.eager_loads.iter().any(|r| r == relation) {
                self.eager_loads.push(relation.to_string());
            }
        }
        self
    }

    /// Record a single relation name for eager loading
    pub fn load(self, relation: &str) -> Self {
        self.with(&[relation])
    }

    /// Relation names accumulated so far, in first-requested order
    pub fn eager_loads(&self) -> &[String] {
        &self.eager_loads
    }
}
