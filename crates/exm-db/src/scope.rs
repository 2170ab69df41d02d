//! Exam-rooted path predicates.
//!
//! Every level of the hierarchy can be scoped to one exam with a single
//! predicate bound to `?1 = exam_id`. Sections, topics and units carry
//! `exam_id` directly; problems, translations and choices reach it through
//! their unit. The cascade planner deletes with these predicates, the tree
//! assembler reads with them, and the footprint counts with them.

use exm_core::enums::EntityKind;
use exm_core::ids::ExamId;

use crate::error::{DatabaseError, StoreOp, store_err};

/// `WHERE` body selecting every row of `kind` under exam `?1`.
pub(crate) const fn exam_predicate(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Exam => "id = ?1",
        EntityKind::Section | EntityKind::Topic | EntityKind::Unit => "exam_id = ?1",
        EntityKind::Problem => "unit_id IN (SELECT id FROM units WHERE exam_id = ?1)",
        EntityKind::Translation => {
            "problem_id IN (SELECT p.id FROM problems p \
             JOIN units u ON u.id = p.unit_id \
             WHERE u.exam_id = ?1)"
        }
        EntityKind::Choice => {
            "problem_translation_id IN (SELECT pt.id FROM problem_translations pt \
             JOIN problems p ON p.id = pt.problem_id \
             JOIN units u ON u.id = p.unit_id \
             WHERE u.exam_id = ?1)"
        }
    }
}

/// Delete every row of `kind` under `exam_id`. Returns the number removed.
pub(crate) async fn delete_scoped(
    conn: &libsql::Connection,
    kind: EntityKind,
    exam_id: ExamId,
) -> Result<u64, DatabaseError> {
    let sql = format!("DELETE FROM {} WHERE {}", kind.table(), exam_predicate(kind));
    conn.execute(&sql, [exam_id.get()])
        .await
        .map_err(store_err(StoreOp::Delete, kind))
}

/// Count the rows of `kind` under `exam_id`.
pub(crate) async fn count_scoped(
    conn: &libsql::Connection,
    kind: EntityKind,
    exam_id: ExamId,
) -> Result<u64, DatabaseError> {
    let sql = format!(
        "SELECT COUNT(*) FROM {} WHERE {}",
        kind.table(),
        exam_predicate(kind)
    );
    let mut rows = conn
        .query(&sql, [exam_id.get()])
        .await
        .map_err(store_err(StoreOp::Select, kind))?;
    let row = rows
        .next()
        .await?
        .ok_or_else(|| DatabaseError::Query(format!("COUNT over {} returned no row", kind.table())))?;
    let count = row.get::<i64>(0)?;
    u64::try_from(count).map_err(|e| DatabaseError::InvalidState(format!("negative count: {e}")))
}
