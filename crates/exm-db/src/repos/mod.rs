//! Repository modules implementing the entity store.
//!
//! Each module adds methods to `ExamService` via `impl ExamService` blocks.
//! Statement-level functions take a `&libsql::Connection` so the same code
//! runs standalone or inside a caller's transaction (a `Transaction` derefs
//! to its connection).

pub mod choice;
pub mod exam;
pub mod footprint;
pub mod problem;
pub mod section;
pub mod topic;
pub mod translation;
pub mod unit;

use exm_core::enums::EntityKind;
use exm_core::ids::ExamId;

use crate::error::{DatabaseError, StoreOp, store_err};

/// Exam that owns row `id` of `kind`, or `None` if the row does not exist.
///
/// Only meaningful for the levels that carry `exam_id` directly.
pub(crate) async fn owning_exam(
    conn: &libsql::Connection,
    kind: EntityKind,
    id: i64,
) -> Result<Option<ExamId>, DatabaseError> {
    let sql = format!("SELECT exam_id FROM {} WHERE id = ?1", kind.table());
    let mut rows = conn
        .query(&sql, [id])
        .await
        .map_err(store_err(StoreOp::Select, kind))?;
    match rows.next().await? {
        Some(row) => Ok(Some(ExamId(row.get::<i64>(0)?))),
        None => Ok(None),
    }
}

/// Require that parent row `parent_id` of `parent` exists and belongs to
/// `exam_id`, before writing a `child` row that references it.
///
/// A missing parent is reported the way the store would report it (a
/// foreign-key constraint violation); a parent from another exam is an
/// ownership invariant violation.
pub(crate) async fn ensure_parent_in_exam(
    conn: &libsql::Connection,
    op: StoreOp,
    child: EntityKind,
    parent: EntityKind,
    parent_id: i64,
    exam_id: ExamId,
) -> Result<(), DatabaseError> {
    match owning_exam(conn, parent, parent_id).await? {
        None => Err(DatabaseError::ConstraintViolation {
            op,
            entity: child,
            message: format!("{parent} {parent_id} does not exist"),
        }),
        Some(owner) if owner != exam_id => Err(DatabaseError::InvariantViolation(format!(
            "{parent} {parent_id} belongs to exam {owner}, not exam {exam_id}"
        ))),
        Some(_) => Ok(()),
    }
}

/// Refuse a direct delete of `entity` row `id` while rows in `dependents`
/// still reference it. Each dependent is `(kind, referencing column)`.
pub(crate) async fn ensure_no_dependents(
    conn: &libsql::Connection,
    entity: EntityKind,
    id: i64,
    dependents: &[(EntityKind, &str)],
) -> Result<(), DatabaseError> {
    for (kind, column) in dependents {
        let sql = format!("SELECT COUNT(*) FROM {} WHERE {column} = ?1", kind.table());
        let mut rows = conn
            .query(&sql, [id])
            .await
            .map_err(store_err(StoreOp::Select, *kind))?;
        let count = match rows.next().await? {
            Some(row) => row.get::<i64>(0)?,
            None => 0,
        };
        if count > 0 {
            return Err(DatabaseError::ConstraintViolation {
                op: StoreOp::Delete,
                entity,
                message: format!(
                    "{entity} {id} still has {count} {kind} row(s); use the exam cascade delete"
                ),
            });
        }
    }
    Ok(())
}

/// Delete one row by id, reporting `NotFound` when nothing was removed.
pub(crate) async fn delete_by_id(
    conn: &libsql::Connection,
    entity: EntityKind,
    id: i64,
) -> Result<(), DatabaseError> {
    let sql = format!("DELETE FROM {} WHERE id = ?1", entity.table());
    let affected = conn
        .execute(&sql, [id])
        .await
        .map_err(store_err(StoreOp::Delete, entity))?;
    if affected == 0 {
        return Err(DatabaseError::not_found(entity, format!("id={id}")));
    }
    Ok(())
}
