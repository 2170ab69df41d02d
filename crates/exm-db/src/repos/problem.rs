//! Problem repository.
//!
//! `created_at` is stored as fixed-width RFC 3339 with microseconds so the
//! text order of the column is its chronological order.

use chrono::{DateTime, SecondsFormat, Utc};
use exm_core::entities::Problem;
use exm_core::enums::EntityKind;
use exm_core::ids::{ProblemId, UnitId};

use crate::error::{DatabaseError, StoreOp, store_err};
use crate::helpers::parse_datetime;
use crate::inserts::NewProblem;
use crate::service::ExamService;

use super::{delete_by_id, ensure_no_dependents};

pub(crate) const SELECT_COLS: &str = "id, unit_id, type, difficulty, created_at";

pub(crate) fn row_to_problem(row: &libsql::Row) -> Result<Problem, DatabaseError> {
    let created_at: String = row.get(4)?;
    Ok(Problem {
        id: ProblemId(row.get(0)?),
        unit_id: UnitId(row.get(1)?),
        problem_type: row.get(2)?,
        difficulty: row.get(3)?,
        created_at: parse_datetime(&created_at)?,
    })
}

pub(crate) fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

impl ExamService {
    /// Insert a problem under an existing unit.
    ///
    /// # Errors
    ///
    /// `ConstraintViolation` if the unit does not exist or the type is empty.
    pub async fn create_problem(&self, new: NewProblem) -> Result<Problem, DatabaseError> {
        let stamp = format_timestamp(new.created_at.unwrap_or_else(Utc::now));
        let conn = self.db().conn();
        conn.execute(
            "INSERT INTO problems (unit_id, type, difficulty, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            libsql::params![
                new.unit_id.get(),
                new.problem_type.as_str(),
                new.difficulty,
                stamp.as_str()
            ],
        )
        .await
        .map_err(store_err(StoreOp::Insert, EntityKind::Problem))?;

        let problem = Problem {
            id: ProblemId(conn.last_insert_rowid()),
            unit_id: new.unit_id,
            problem_type: new.problem_type,
            difficulty: new.difficulty,
            created_at: parse_datetime(&stamp)?,
        };
        tracing::debug!(problem_id = %problem.id, unit_id = %problem.unit_id, "created problem");
        Ok(problem)
    }

    pub async fn get_problem(&self, id: ProblemId) -> Result<Problem, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM problems WHERE id = ?1"),
                [id.get()],
            )
            .await
            .map_err(store_err(StoreOp::Select, EntityKind::Problem))?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityKind::Problem, format!("id={id}")))?;
        row_to_problem(&row)
    }

    /// Problems of a unit in creation order, ties broken by id.
    pub async fn list_problems(&self, unit_id: UnitId) -> Result<Vec<Problem>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM problems WHERE unit_id = ?1 ORDER BY created_at, id"
                ),
                [unit_id.get()],
            )
            .await
            .map_err(store_err(StoreOp::Select, EntityKind::Problem))?;

        let mut problems = Vec::new();
        while let Some(row) = rows.next().await? {
            problems.push(row_to_problem(&row)?);
        }
        Ok(problems)
    }

    /// Delete a problem that has no translations left.
    pub async fn delete_problem(&self, id: ProblemId) -> Result<(), DatabaseError> {
        let conn = self.db().conn();
        ensure_no_dependents(
            conn,
            EntityKind::Problem,
            id.get(),
            &[(EntityKind::Translation, "problem_id")],
        )
        .await?;
        delete_by_id(conn, EntityKind::Problem, id.get()).await?;
        tracing::debug!(problem_id = %id, "deleted problem");
        Ok(())
    }
}
