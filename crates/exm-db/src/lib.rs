//! # exm-db
//!
//! libSQL-backed store for the exam hierarchy.
//!
//! Owns every relational concern of Examina:
//! - the entity store: create, read, update and guarded delete for exams,
//!   sections, topics, units, problems, translations and choices
//! - the unit placement enforcer (a unit hangs under a section XOR a topic)
//! - the cascade deletion planner (bottom-up, one transaction per exam)
//! - the tree assembler (one query per level, linked by parent id)
//!
//! Uses the `libsql` crate in local mode. Foreign keys are switched on for
//! every connection at open.

pub mod cascade;
pub mod error;
pub mod helpers;
pub mod inserts;
mod migrations;
pub mod placement;
pub mod repos;
mod scope;
pub mod service;
pub mod tree;
pub mod updates;

#[cfg(test)]
mod test_support;

use std::path::Path;

use error::DatabaseError;
use libsql::Builder;

pub use exm_config::IN_MEMORY;

/// Central database handle: one libSQL database and one connection.
///
/// Every operation issued through a handle runs on that one connection, so a
/// handle must finish one transaction before starting the next. Open one
/// handle per concurrent worker against the same file to get `SQLite`
/// isolation between them.
pub struct ExamDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl ExamDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Creates missing parent directories, enables foreign keys, and runs
    /// migrations.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the directory cannot be created, the
    /// database cannot be opened, or migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        if path != IN_MEMORY {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
        }

        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let exam_db = Self { db, conn };
        exam_db.run_migrations().await?;
        tracing::debug!(path, "opened exam database");
        Ok(exam_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Begin a transaction on the handle's connection.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if `BEGIN` fails (for instance when a
    /// transaction is already open on this handle).
    pub async fn begin(&self) -> Result<libsql::Transaction, DatabaseError> {
        Ok(self.conn.transaction().await?)
    }
}

/// Commit `tx` if `result` is `Ok`, otherwise roll it back and return the
/// original error.
///
/// A failed rollback is logged; the caller still sees the error that caused
/// it.
///
/// # Errors
///
/// Returns the error carried by `result`, or `DatabaseError::LibSql` if the
/// commit itself fails.
pub async fn finish<T>(
    tx: libsql::Transaction,
    result: Result<T, DatabaseError>,
) -> Result<T, DatabaseError> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(error) => {
            if let Err(rollback_error) = tx.rollback().await {
                tracing::warn!(%error, %rollback_error, "rollback failed");
            }
            Err(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> ExamDb {
        ExamDb::open_local(IN_MEMORY).await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        let tables = [
            "exams",
            "sections",
            "topics",
            "units",
            "problems",
            "problem_translations",
            "choices",
        ];
        for table in &tables {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [*table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn foreign_keys_are_enabled() {
        let db = test_db().await;
        let mut rows = db.conn().query("PRAGMA foreign_keys", ()).await.unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 1);
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn orphan_section_is_rejected_by_store() {
        let db = test_db().await;
        let result = db
            .conn()
            .execute(
                "INSERT INTO sections (exam_id, title, seq) VALUES (999, 'Orphan', 1)",
                (),
            )
            .await;
        let err = result.unwrap_err();
        assert!(error::is_constraint_error(&err), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn unit_with_both_parents_is_rejected_by_store() {
        let db = test_db().await;
        let conn = db.conn();
        conn.execute("INSERT INTO exams (id, title) VALUES (1, 'E')", ())
            .await
            .unwrap();
        conn.execute(
            "INSERT INTO sections (id, exam_id, title, seq) VALUES (1, 1, 'S', 1)",
            (),
        )
        .await
        .unwrap();
        conn.execute(
            "INSERT INTO topics (id, exam_id, section_id, title, seq) VALUES (1, 1, 1, 'T', 1)",
            (),
        )
        .await
        .unwrap();

        let both = conn
            .execute(
                "INSERT INTO units (exam_id, section_id, topic_id, title, seq) VALUES (1, 1, 1, 'U', 1)",
                (),
            )
            .await;
        assert!(both.is_err(), "CHECK should reject a unit with both parents");

        let neither = conn
            .execute(
                "INSERT INTO units (exam_id, title, seq) VALUES (1, 'U', 1)",
                (),
            )
            .await;
        assert!(neither.is_err(), "CHECK should reject a unit with no parent");
    }

    #[tokio::test]
    async fn finish_rolls_back_on_error() {
        let db = test_db().await;
        let tx = db.begin().await.unwrap();
        tx.execute("INSERT INTO exams (title) VALUES ('Temp')", ())
            .await
            .unwrap();
        let result: Result<(), DatabaseError> =
            finish(tx, Err(DatabaseError::Query("forced".into()))).await;
        assert!(result.is_err());

        let mut rows = db
            .conn()
            .query("SELECT COUNT(*) FROM exams", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 0);
    }

    #[tokio::test]
    async fn file_database_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("exams.db");
        let db = ExamDb::open_local(path.to_str().unwrap()).await.unwrap();
        db.conn()
            .execute("INSERT INTO exams (title) VALUES ('On disk')", ())
            .await
            .unwrap();
        assert!(path.exists());
    }
}
