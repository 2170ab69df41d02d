//! Service layer hosting every entity store operation.
//!
//! `ExamService` wraps `ExamDb` (raw database access). Repo methods, the
//! cascade planner and the tree assembler are all implemented as
//! `impl ExamService` blocks in their own modules.

use crate::ExamDb;
use crate::error::DatabaseError;

/// Entry point for callers (handlers, seeders, the CLI).
///
/// Every multi-statement method follows this protocol:
/// 1. Begin transaction
/// 2. Validate and normalize (placement, ownership)
/// 3. Execute SQL
/// 4. Commit, or roll back and return the first error
pub struct ExamService {
    db: ExamDb,
}

impl ExamService {
    /// Create a new service over a local database file, or `":memory:"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = ExamDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Create from an existing `ExamDb`.
    #[must_use]
    pub const fn from_db(db: ExamDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &ExamDb {
        &self.db
    }
}
