//! Exam repository: create, lookup by id or title, partial update.
//!
//! Exams have no direct delete here: removing an exam goes through
//! [`ExamService::delete_exam_cascade`](crate::service::ExamService::delete_exam_cascade).

use exm_core::entities::Exam;
use exm_core::enums::EntityKind;
use exm_core::ids::ExamId;
use exm_core::selector::ExamSelector;

use crate::error::{DatabaseError, StoreOp, store_err};
use crate::helpers::{UpdateSet, get_bool, get_opt_string};
use crate::inserts::NewExam;
use crate::service::ExamService;
use crate::updates::exam::ExamUpdate;

const SELECT_COLS: &str = "id, title, description, time_limit, is_active";

pub(crate) fn row_to_exam(row: &libsql::Row) -> Result<Exam, DatabaseError> {
    Ok(Exam {
        id: ExamId(row.get(0)?),
        title: row.get(1)?,
        description: get_opt_string(row, 2)?,
        time_limit: row.get(3)?,
        is_active: get_bool(row, 4)?,
    })
}

pub(crate) async fn fetch_exam(
    conn: &libsql::Connection,
    id: ExamId,
) -> Result<Exam, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {SELECT_COLS} FROM exams WHERE id = ?1"),
            [id.get()],
        )
        .await
        .map_err(store_err(StoreOp::Select, EntityKind::Exam))?;
    let row = rows
        .next()
        .await?
        .ok_or_else(|| DatabaseError::not_found(EntityKind::Exam, ExamSelector::Id(id)))?;
    row_to_exam(&row)
}

pub(crate) async fn fetch_exams_by_title(
    conn: &libsql::Connection,
    title: &str,
) -> Result<Vec<Exam>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {SELECT_COLS} FROM exams WHERE title = ?1 ORDER BY id"),
            [title],
        )
        .await
        .map_err(store_err(StoreOp::Select, EntityKind::Exam))?;

    let mut exams = Vec::new();
    while let Some(row) = rows.next().await? {
        exams.push(row_to_exam(&row)?);
    }
    Ok(exams)
}

/// Resolve a selector to exactly one exam.
pub(crate) async fn resolve_exam(
    conn: &libsql::Connection,
    selector: &ExamSelector,
) -> Result<Exam, DatabaseError> {
    match selector {
        ExamSelector::Id(id) => fetch_exam(conn, *id).await,
        ExamSelector::Title(title) => {
            let mut exams = fetch_exams_by_title(conn, title).await?;
            match exams.len() {
                0 => Err(DatabaseError::not_found(EntityKind::Exam, selector)),
                1 => Ok(exams.remove(0)),
                matches => Err(DatabaseError::AmbiguousSelector {
                    selector: selector.to_string(),
                    matches,
                }),
            }
        }
    }
}

impl ExamService {
    pub async fn create_exam(&self, new: NewExam) -> Result<Exam, DatabaseError> {
        let conn = self.db().conn();
        conn.execute(
            "INSERT INTO exams (title, description, time_limit, is_active)
             VALUES (?1, ?2, ?3, ?4)",
            libsql::params![
                new.title.as_str(),
                new.description.as_deref(),
                new.time_limit,
                i64::from(new.is_active)
            ],
        )
        .await
        .map_err(store_err(StoreOp::Insert, EntityKind::Exam))?;

        let exam = Exam {
            id: ExamId(conn.last_insert_rowid()),
            title: new.title,
            description: new.description,
            time_limit: new.time_limit,
            is_active: new.is_active,
        };
        tracing::debug!(exam_id = %exam.id, title = %exam.title, "created exam");
        Ok(exam)
    }

    pub async fn get_exam(&self, id: ExamId) -> Result<Exam, DatabaseError> {
        fetch_exam(self.db().conn(), id).await
    }

    /// Every exam with exactly this title, oldest first.
    pub async fn find_exams_by_title(&self, title: &str) -> Result<Vec<Exam>, DatabaseError> {
        fetch_exams_by_title(self.db().conn(), title).await
    }

    /// Resolve a selector to a single exam.
    ///
    /// # Errors
    ///
    /// `NotFound` when nothing matches, `AmbiguousSelector` when a title
    /// matches several exams.
    pub async fn resolve_exam(&self, selector: &ExamSelector) -> Result<Exam, DatabaseError> {
        resolve_exam(self.db().conn(), selector).await
    }

    pub async fn list_exams(&self) -> Result<Vec<Exam>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM exams ORDER BY id"), ())
            .await
            .map_err(store_err(StoreOp::Select, EntityKind::Exam))?;

        let mut exams = Vec::new();
        while let Some(row) = rows.next().await? {
            exams.push(row_to_exam(&row)?);
        }
        Ok(exams)
    }

    pub async fn update_exam(
        &self,
        id: ExamId,
        update: ExamUpdate,
    ) -> Result<Exam, DatabaseError> {
        let mut set = UpdateSet::new();
        if let Some(title) = update.title {
            set.push("title", title);
        }
        if let Some(description) = update.description {
            set.push(
                "description",
                description.map_or(libsql::Value::Null, Into::into),
            );
        }
        if let Some(time_limit) = update.time_limit {
            set.push("time_limit", time_limit);
        }
        if let Some(is_active) = update.is_active {
            set.push("is_active", i64::from(is_active));
        }

        if set.is_empty() {
            return self.get_exam(id).await;
        }

        let (sql, params) = set.finish("exams", id.get());
        let affected = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await
            .map_err(store_err(StoreOp::Update, EntityKind::Exam))?;
        if affected == 0 {
            return Err(DatabaseError::not_found(EntityKind::Exam, ExamSelector::Id(id)));
        }

        tracing::debug!(exam_id = %id, "updated exam");
        self.get_exam(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::test_service;
    use crate::updates::exam::ExamUpdateBuilder;

    #[tokio::test]
    async fn create_exam_roundtrip() {
        let svc = test_service().await;

        let exam = svc
            .create_exam(
                NewExam::new("Distributed Systems 101")
                    .description("Intro exam")
                    .time_limit(60)
                    .active(true),
            )
            .await
            .unwrap();

        let fetched = svc.get_exam(exam.id).await.unwrap();
        assert_eq!(fetched, exam);
        assert_eq!(fetched.time_limit, 60);
        assert!(fetched.is_active);
        assert_eq!(fetched.description.as_deref(), Some("Intro exam"));
    }

    #[tokio::test]
    async fn empty_title_is_a_constraint_violation() {
        let svc = test_service().await;
        let result = svc.create_exam(NewExam::new("")).await;
        assert!(matches!(
            result,
            Err(DatabaseError::ConstraintViolation {
                op: StoreOp::Insert,
                entity: EntityKind::Exam,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn get_missing_exam_is_not_found() {
        let svc = test_service().await;
        let result = svc.get_exam(ExamId(404)).await;
        assert!(matches!(
            result,
            Err(DatabaseError::NotFound {
                entity: EntityKind::Exam,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn resolve_by_title() {
        let svc = test_service().await;
        let exam = svc.create_exam(NewExam::new("Only one")).await.unwrap();

        let resolved = svc
            .resolve_exam(&ExamSelector::Title("Only one".into()))
            .await
            .unwrap();
        assert_eq!(resolved.id, exam.id);

        let missing = svc
            .resolve_exam(&ExamSelector::Title("Nope".into()))
            .await;
        assert!(matches!(missing, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn duplicate_titles_are_ambiguous() {
        let svc = test_service().await;
        svc.create_exam(NewExam::new("Twin")).await.unwrap();
        svc.create_exam(NewExam::new("Twin")).await.unwrap();

        let result = svc.resolve_exam(&ExamSelector::Title("Twin".into())).await;
        assert!(matches!(
            result,
            Err(DatabaseError::AmbiguousSelector { matches: 2, .. })
        ));
        assert_eq!(svc.find_exams_by_title("Twin").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn update_exam_partial() {
        let svc = test_service().await;
        let exam = svc
            .create_exam(NewExam::new("Original").description("keep?"))
            .await
            .unwrap();

        let update = ExamUpdateBuilder::new()
            .title("Renamed")
            .description(None)
            .active(true)
            .build();
        let updated = svc.update_exam(exam.id, update).await.unwrap();
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.description, None);
        assert!(updated.is_active);
        assert_eq!(updated.time_limit, exam.time_limit);
    }

    #[tokio::test]
    async fn update_missing_exam_is_not_found() {
        let svc = test_service().await;
        let update = ExamUpdateBuilder::new().time_limit(30).build();
        let result = svc.update_exam(ExamId(77), update).await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn list_exams_in_insertion_order() {
        let svc = test_service().await;
        svc.create_exam(NewExam::new("A")).await.unwrap();
        svc.create_exam(NewExam::new("B")).await.unwrap();

        let titles: Vec<String> = svc
            .list_exams()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["A", "B"]);
    }
}
