//! Database error types for exm-db.
//!
//! Store failures are wrapped with the operation and entity they belong to.
//! Constraint failures reported by libSQL (`... constraint failed`) are lifted
//! into [`DatabaseError::ConstraintViolation`] so callers can tell a bad
//! request from a broken store.

use std::fmt;

use exm_core::enums::{CascadeLevel, EntityKind};
use exm_core::errors::CoreError;
use thiserror::Error;

/// Kind of statement a store error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    Insert,
    Update,
    Delete,
    Select,
}

impl StoreOp {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Select => "select",
        }
    }
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Step of a multi-statement operation that failed and forced a rollback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortedStep {
    /// A level of an exam cascade delete.
    Cascade(CascadeLevel),
    /// The n-th row (0-based) of a bulk choice insert.
    Choice { index: usize },
}

impl fmt::Display for AbortedStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cascade(level) => write!(f, "cascade level '{level}'"),
            Self::Choice { index } => write!(f, "choice #{index}"),
        }
    }
}

/// Coarse outcome class for handler collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStatus {
    NotFound,
    BadRequest,
    Internal,
}

impl ErrorStatus {
    /// HTTP status code equivalent.
    #[must_use]
    pub const fn http_code(self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::BadRequest => 400,
            Self::Internal => 500,
        }
    }
}

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// No record matched the lookup.
    #[error("{entity} not found ({selector})")]
    NotFound { entity: EntityKind, selector: String },

    /// A selector that must name one record matched several.
    #[error("{selector} matches {matches} exams, expected exactly one")]
    AmbiguousSelector { selector: String, matches: usize },

    /// The unit placement rule (section XOR topic) or an ownership rule
    /// cannot be satisfied by the requested mutation.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Uniqueness, foreign-key, check, or dependent-row failure.
    #[error("Constraint violation on {op} {entity}: {message}")]
    ConstraintViolation {
        op: StoreOp,
        entity: EntityKind,
        message: String,
    },

    /// A multi-statement operation failed part-way and was rolled back.
    #[error("Transaction aborted at {step}: {source}")]
    TransactionAborted {
        step: AbortedStep,
        #[source]
        source: Box<DatabaseError>,
    },

    /// A store statement failed for a reason other than a constraint.
    #[error("Store error on {op} {entity}: {source}")]
    Store {
        op: StoreOp,
        entity: EntityKind,
        #[source]
        source: libsql::Error,
    },

    /// Input rejected before reaching the store.
    #[error(transparent)]
    Validation(#[from] CoreError),

    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error outside any entity statement.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Filesystem error while preparing the database location.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DatabaseError {
    /// Shorthand for a `NotFound` keyed by a displayable id or selector.
    pub fn not_found(entity: EntityKind, selector: impl fmt::Display) -> Self {
        Self::NotFound {
            entity,
            selector: selector.to_string(),
        }
    }

    /// Map to the outcome class a handler should report.
    ///
    /// A `TransactionAborted` takes the class of its cause when the cause is
    /// narrower than a plain store failure.
    #[must_use]
    pub fn status(&self) -> ErrorStatus {
        match self {
            Self::NotFound { .. } => ErrorStatus::NotFound,
            Self::AmbiguousSelector { .. }
            | Self::InvariantViolation(_)
            | Self::ConstraintViolation { .. }
            | Self::Validation(_) => ErrorStatus::BadRequest,
            Self::TransactionAborted { source, .. } => source.status(),
            Self::Store { .. }
            | Self::Query(_)
            | Self::Migration(_)
            | Self::InvalidState(_)
            | Self::LibSql(_)
            | Self::Io(_) => ErrorStatus::Internal,
        }
    }
}

/// Detect constraint failures in a libSQL error.
///
/// `SQLite` reports every constraint class with the same suffix:
/// `UNIQUE constraint failed`, `FOREIGN KEY constraint failed`,
/// `CHECK constraint failed`, `NOT NULL constraint failed`.
#[must_use]
pub fn is_constraint_error(e: &libsql::Error) -> bool {
    e.to_string().contains("constraint failed")
}

/// Build a mapper that wraps a libSQL error with statement context.
///
/// Use as `.map_err(store_err(StoreOp::Insert, EntityKind::Unit))`.
pub fn store_err(op: StoreOp, entity: EntityKind) -> impl FnOnce(libsql::Error) -> DatabaseError {
    move |source| {
        if is_constraint_error(&source) {
            DatabaseError::ConstraintViolation {
                op,
                entity,
                message: source.to_string(),
            }
        } else {
            DatabaseError::Store { op, entity, source }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classes() {
        assert_eq!(
            DatabaseError::not_found(EntityKind::Exam, 3).status().http_code(),
            404
        );
        assert_eq!(
            DatabaseError::InvariantViolation("x".into()).status(),
            ErrorStatus::BadRequest
        );
        assert_eq!(
            DatabaseError::Query("boom".into()).status(),
            ErrorStatus::Internal
        );
        let io = DatabaseError::from(std::io::Error::other("read-only file system"));
        assert_eq!(io.status(), ErrorStatus::Internal);
        assert_eq!(io.to_string(), "I/O error: read-only file system");
    }

    #[test]
    fn aborted_transaction_inherits_narrower_cause() {
        let constraint = DatabaseError::TransactionAborted {
            step: AbortedStep::Choice { index: 1 },
            source: Box::new(DatabaseError::ConstraintViolation {
                op: StoreOp::Insert,
                entity: EntityKind::Choice,
                message: "CHECK constraint failed".into(),
            }),
        };
        assert_eq!(constraint.status(), ErrorStatus::BadRequest);

        let plain = DatabaseError::TransactionAborted {
            step: AbortedStep::Cascade(CascadeLevel::Problems),
            source: Box::new(DatabaseError::Query("disk I/O error".into())),
        };
        assert_eq!(plain.status(), ErrorStatus::Internal);
        assert_eq!(
            plain.to_string(),
            "Transaction aborted at cascade level 'problems': Query failed: disk I/O error"
        );
    }

    #[test]
    fn not_found_message_names_entity_and_selector() {
        let err = DatabaseError::not_found(EntityKind::Unit, "id=9");
        assert_eq!(err.to_string(), "unit not found (id=9)");
    }
}
