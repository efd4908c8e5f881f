//! Database connection abstraction
//!
//! The execution collaborator consumed by the query builder and the model
//! base. Implementations own the driver, the wire protocol, and any
//! timeout or retry policy; this crate only hands them a rendered SQL
//! string with positional `$1..$n` placeholders and the matching ordered
//! bindings, one blocking round-trip per statement.

use tracing::{debug, warn};

use crate::error::OrmResult;
use crate::value::{Row, Value};

/// Synchronous database connection contract.
///
/// Not thread-safe by contract: a connection (like the query builders
/// that drive it) is owned by one call path at a time and must not be
/// shared across threads without external synchronization.
pub trait Connection {
    /// Execute a parameterized statement and return its result handle.
    ///
    /// Implementations report malformed SQL, constraint violations and
    /// connectivity failures as [`crate::OrmError::Database`].
    fn execute(&mut self, sql: &str, bindings: &[Value]) -> OrmResult<Statement>;

    /// Identifier generated by the most recent insert on this connection.
    fn last_insert_id(&mut self) -> OrmResult<Value>;

    fn begin_transaction(&mut self) -> OrmResult<()>;

    fn commit(&mut self) -> OrmResult<()>;

    fn rollback(&mut self) -> OrmResult<()>;

    fn in_transaction(&self) -> bool;
}

/// Result handle for one executed statement
#[derive(Debug, Clone, Default)]
pub struct Statement {
    rows: Vec<Row>,
    rows_affected: u64,
}

impl Statement {
    pub fn new(rows: Vec<Row>, rows_affected: u64) -> Self {
        Self {
            rows,
            rows_affected,
        }
    }

    /// All result rows, in storage-returned order
    pub fn fetch_all(self) -> Vec<Row> {
        self.rows
    }

    /// First result row, if any
    pub fn fetch_one(self) -> Option<Row> {
        self.rows.into_iter().next()
    }

    pub fn rows_affected(&self) -> u64 {
        self.rows_affected
    }
}

/// Run a closure inside a transaction: commit on `Ok`, roll back on `Err`.
///
/// No savepoints and no nesting; beginning a transaction while one is
/// already open is the collaborator's problem to reject or flatten.
pub fn transaction<C, T, F>(conn: &mut C, f: F) -> OrmResult<T>
where
    C: Connection,
    F: FnOnce(&mut C) -> OrmResult<T>,
{
    conn.begin_transaction()?;
    debug!("transaction started");

    match f(conn) {
        Ok(value) => {
            conn.commit()?;
            debug!("transaction committed");
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = conn.rollback() {
                warn!("transaction rollback failed: {}", rollback_err);
            }
            Err(err)
        }
    }
}
