//! Model System - Active-record base for database entities
//!
//! Split into focused pieces:
//!
//! - `attributes`: the per-instance attribute bag with dirty tracking
//! - `core_trait`: the core `Model` trait (metadata + attribute access)
//! - `crud_operations`: finder/persistence operations on top of the
//!   query builder

pub mod attributes;
pub mod core_trait;
pub mod crud_operations;

// Re-export main types and traits for convenience
pub use attributes::Attributes;
pub use core_trait::Model;
pub use crud_operations::CrudOperations;
