//! # oak-db
//!
//! libSQL storage for the oak entry store.
//!
//! Holds taxonomic entries, sources, source records, taxa, and the audit
//! trail. Every write runs in one `BEGIN IMMEDIATE` transaction that also
//! carries the hybrid consistency engine ([`relations`]) and, for deletes, the
//! cascade guard ([`guard`]), so callers only ever observe the fully-old or
//! fully-new state.
//!
//! Uses the `libsql` crate (C `SQLite` fork, v0.9.29) with a local file or an
//! in-memory database.

pub mod error;
pub mod guard;
pub mod helpers;
pub mod import;
mod migrations;
pub(crate) mod relations;
pub mod repos;
pub mod service;
pub mod updates;

#[cfg(test)]
mod test_support;

use std::ops::Deref;

use error::DatabaseError;
use libsql::{Builder, Connection, Transaction, TransactionBehavior};
use tokio::sync::{Mutex, MutexGuard};

/// Central database handle.
///
/// Wraps a libSQL database and a single connection. Access is gated so that
/// one write transaction runs at a time per handle, and reads never see a
/// write that has not committed.
pub struct OakDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: Connection,
    gate: Mutex<()>,
}

/// Shared access to the connection outside any write transaction.
pub struct ReadConn<'a> {
    conn: &'a Connection,
    _gate: MutexGuard<'a, ()>,
}

impl Deref for ReadConn<'_> {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        self.conn
    }
}

/// An open `BEGIN IMMEDIATE` transaction.
///
/// Dropping it without calling [`WriteTx::commit`] rolls back.
pub struct WriteTx<'a> {
    // Declared before the gate so the rollback on drop happens first.
    tx: Transaction,
    _gate: MutexGuard<'a, ()>,
}

impl WriteTx<'_> {
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if `COMMIT` fails; the transaction is
    /// then rolled back.
    pub async fn commit(self) -> Result<(), DatabaseError> {
        let Self { tx, _gate } = self;
        tx.commit().await?;
        Ok(())
    }
}

impl Deref for WriteTx<'_> {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        &self.tx
    }
}

impl OakDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let oak_db = Self {
            db,
            conn,
            gate: Mutex::new(()),
        };
        oak_db.run_migrations().await?;
        Ok(oak_db)
    }

    /// Access the underlying libSQL connection without taking the gate.
    ///
    /// Meant for diagnostics and tests; service code goes through
    /// [`Self::read`] or [`Self::begin_write`].
    #[must_use]
    pub const fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Wait for any in-flight write to finish, then hand out the connection.
    pub async fn read(&self) -> ReadConn<'_> {
        ReadConn {
            conn: &self.conn,
            _gate: self.gate.lock().await,
        }
    }

    /// Start a write transaction.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if `BEGIN IMMEDIATE` fails, e.g. when
    /// another process holds the write lock past the busy timeout.
    pub async fn begin_write(&self) -> Result<WriteTx<'_>, DatabaseError> {
        let gate = self.gate.lock().await;
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .await?;
        Ok(WriteTx { tx, _gate: gate })
    }
}

/// Generate a prefixed ID via libSQL. Returns e.g. `"aud-a3f8b2c1"`.
///
/// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
///
/// # Errors
///
/// Returns `DatabaseError` if the query fails or returns no rows.
pub async fn generate_id(conn: &Connection, prefix: &str) -> Result<String, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
            (),
        )
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    Ok(row.get::<String>(0)?)
}
