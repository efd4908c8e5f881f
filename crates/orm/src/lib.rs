//! # strata-orm: Active-Record Core
//!
//! A minimal object-relational layer: a fluent, fully parameterized query
//! builder plus an active-record model base with attribute fill/dirty
//! tracking and declarative relationships (belongs-to, has-many, has-one).
//!
//! The crate never talks to a database driver directly. Every operation
//! that touches storage takes an explicit [`Connection`] implementation,
//! which executes one parameterized statement per call and controls
//! transactions. See the `connection` module for the contract.

pub mod connection;
pub mod error;
pub mod model;
pub mod query;
pub mod relationships;
pub mod value;



// Re-export core traits and types
pub use connection::{transaction, Connection, Statement};
pub use error::{OrmError, OrmResult};
pub use model::{Attributes, CrudOperations, Model};
pub use query::{BooleanOperator, JoinType, OrderDirection, QueryBuilder};
pub use relationships::Relationships;
pub use value::{Row, Value};
