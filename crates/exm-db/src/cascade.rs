//! Cascade deletion planner.
//!
//! Removes one exam and everything under it, bottom-up, inside a single
//! transaction:
//!
//! ```text
//! choices → translations → problems → units → topics → sections → exam
//! ```
//!
//! Each level is one `DELETE` scoped to the exam through [`crate::scope`].
//! The first failing level rolls the whole transaction back; the caller sees
//! [`DatabaseError::TransactionAborted`] naming that level.

use exm_core::enums::CascadeLevel;
use exm_core::ids::ExamId;
use exm_core::selector::ExamSelector;
use serde::Serialize;

use crate::error::{AbortedStep, DatabaseError};
use crate::finish;
use crate::repos::exam::resolve_exam;
use crate::scope::delete_scoped;
use crate::service::ExamService;

/// Rows removed at one cascade level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelDeletion {
    pub level: CascadeLevel,
    pub rows: u64,
}

/// Outcome of a committed cascade delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CascadeReport {
    pub exam_id: ExamId,
    pub title: String,
    /// One entry per level, in execution order.
    pub levels: Vec<LevelDeletion>,
}

impl CascadeReport {
    /// Rows removed at `level`.
    #[must_use]
    pub fn rows(&self, level: CascadeLevel) -> u64 {
        self.levels
            .iter()
            .find(|deletion| deletion.level == level)
            .map_or(0, |deletion| deletion.rows)
    }

    /// Rows removed across all levels, the exam row included.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.levels.iter().map(|deletion| deletion.rows).sum()
    }
}

async fn run_cascade(
    conn: &libsql::Connection,
    selector: &ExamSelector,
) -> Result<CascadeReport, DatabaseError> {
    let exam = resolve_exam(conn, selector).await?;

    let mut levels = Vec::with_capacity(CascadeLevel::ORDER.len());
    for level in CascadeLevel::ORDER {
        let rows = delete_scoped(conn, level.entity(), exam.id)
            .await
            .map_err(|source| DatabaseError::TransactionAborted {
                step: AbortedStep::Cascade(level),
                source: Box::new(source),
            })?;
        tracing::debug!(exam_id = %exam.id, %level, rows, "cascade level deleted");
        levels.push(LevelDeletion { level, rows });
    }

    Ok(CascadeReport {
        exam_id: exam.id,
        title: exam.title,
        levels,
    })
}

impl ExamService {
    /// Delete an exam and its whole subtree.
    ///
    /// # Errors
    ///
    /// `NotFound` if the exam does not exist (nothing is touched);
    /// `TransactionAborted` if any level fails, after a full rollback.
    pub async fn delete_exam_cascade(&self, exam_id: ExamId) -> Result<CascadeReport, DatabaseError> {
        self.delete_exam_cascade_by(&ExamSelector::Id(exam_id)).await
    }

    /// Delete the exam named by `selector` and its whole subtree.
    ///
    /// The selector is resolved inside the same transaction as the deletes.
    ///
    /// # Errors
    ///
    /// As [`Self::delete_exam_cascade`], plus `AmbiguousSelector` when a title
    /// names several exams.
    pub async fn delete_exam_cascade_by(
        &self,
        selector: &ExamSelector,
    ) -> Result<CascadeReport, DatabaseError> {
        let tx = self.db().begin().await?;
        let result = run_cascade(&tx, selector).await;
        if let Err(DatabaseError::TransactionAborted { step, source }) = &result {
            tracing::warn!(%selector, %step, error = %source, "cascade delete rolled back");
        }
        let report = finish(tx, result).await?;

        tracing::info!(
            exam_id = %report.exam_id,
            title = %report.title,
            rows = report.total(),
            "cascade delete committed"
        );
        Ok(report)
    }
}
