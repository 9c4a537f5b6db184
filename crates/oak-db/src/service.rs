//! Service layer orchestrating store operations.
//!
//! `OakService` wraps `OakDb` and the configured result limits. All repo
//! methods are implemented as `impl OakService` blocks under [`crate::repos`].

use oak_config::GeneralConfig;

use crate::OakDb;
use crate::error::DatabaseError;

/// Orchestrates database mutations with the consistency engine and audit trail.
///
/// Every mutation method follows this protocol:
/// 1. Begin an IMMEDIATE transaction
/// 2. Read the current state and apply the change, including any hybrid
///    propagation to parent entries
/// 3. Append audit entries (inside the transaction)
/// 4. Commit
pub struct OakService {
    db: OakDb,
    limits: GeneralConfig,
}

impl OakService {
    /// Create a new service over a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    /// * `limits` - Default and maximum result limits for listings.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated.
    pub async fn new_local(db_path: &str, limits: GeneralConfig) -> Result<Self, DatabaseError> {
        let db = OakDb::open_local(db_path).await?;
        Ok(Self { db, limits })
    }

    /// Create from an existing `OakDb` (for testing).
    #[must_use]
    pub const fn from_db(db: OakDb, limits: GeneralConfig) -> Self {
        Self { db, limits }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &OakDb {
        &self.db
    }

    #[must_use]
    pub const fn limits(&self) -> &GeneralConfig {
        &self.limits
    }

    /// Resolve a requested page size against the configured limits.
    #[must_use]
    pub fn clamp_limit(&self, requested: Option<u32>) -> u32 {
        self.limits.clamp_limit(requested)
    }
}
