//! Section repository.

use exm_core::entities::Section;
use exm_core::enums::EntityKind;
use exm_core::ids::{ExamId, SectionId};

use crate::error::{DatabaseError, StoreOp, store_err};
use crate::helpers::UpdateSet;
use crate::inserts::NewSection;
use crate::service::ExamService;
use crate::updates::section::SectionUpdate;

use super::{delete_by_id, ensure_no_dependents};

pub(crate) const SELECT_COLS: &str = "id, exam_id, title, seq";

pub(crate) fn row_to_section(row: &libsql::Row) -> Result<Section, DatabaseError> {
    Ok(Section {
        id: SectionId(row.get(0)?),
        exam_id: ExamId(row.get(1)?),
        title: row.get(2)?,
        seq: row.get(3)?,
    })
}

impl ExamService {
    /// Insert a section under an existing exam.
    ///
    /// # Errors
    ///
    /// `ConstraintViolation` if the exam does not exist or the title is empty.
    pub async fn create_section(&self, new: NewSection) -> Result<Section, DatabaseError> {
        let conn = self.db().conn();
        conn.execute(
            "INSERT INTO sections (exam_id, title, seq) VALUES (?1, ?2, ?3)",
            libsql::params![new.exam_id.get(), new.title.as_str(), new.seq],
        )
        .await
        .map_err(store_err(StoreOp::Insert, EntityKind::Section))?;

        let section = Section {
            id: SectionId(conn.last_insert_rowid()),
            exam_id: new.exam_id,
            title: new.title,
            seq: new.seq,
        };
        tracing::debug!(section_id = %section.id, exam_id = %section.exam_id, "created section");
        Ok(section)
    }

    pub async fn get_section(&self, id: SectionId) -> Result<Section, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM sections WHERE id = ?1"),
                [id.get()],
            )
            .await
            .map_err(store_err(StoreOp::Select, EntityKind::Section))?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityKind::Section, format!("id={id}")))?;
        row_to_section(&row)
    }

    /// Sections of an exam ordered by `seq`, ties broken by id.
    pub async fn list_sections(&self, exam_id: ExamId) -> Result<Vec<Section>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM sections WHERE exam_id = ?1 ORDER BY seq, id"
                ),
                [exam_id.get()],
            )
            .await
            .map_err(store_err(StoreOp::Select, EntityKind::Section))?;

        let mut sections = Vec::new();
        while let Some(row) = rows.next().await? {
            sections.push(row_to_section(&row)?);
        }
        Ok(sections)
    }

    pub async fn update_section(
        &self,
        id: SectionId,
        update: SectionUpdate,
    ) -> Result<Section, DatabaseError> {
        let mut set = UpdateSet::new();
        if let Some(title) = update.title {
            set.push("title", title);
        }
        if let Some(seq) = update.seq {
            set.push("seq", seq);
        }

        if set.is_empty() {
            return self.get_section(id).await;
        }

        let (sql, params) = set.finish("sections", id.get());
        let affected = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await
            .map_err(store_err(StoreOp::Update, EntityKind::Section))?;
        if affected == 0 {
            return Err(DatabaseError::not_found(EntityKind::Section, format!("id={id}")));
        }
        self.get_section(id).await
    }

    /// Delete a section that has no topics and no units left.
    ///
    /// # Errors
    ///
    /// `ConstraintViolation` while dependents remain, `NotFound` if the
    /// section does not exist.
    pub async fn delete_section(&self, id: SectionId) -> Result<(), DatabaseError> {
        let conn = self.db().conn();
        ensure_no_dependents(
            conn,
            EntityKind::Section,
            id.get(),
            &[(EntityKind::Topic, "section_id"), (EntityKind::Unit, "section_id")],
        )
        .await?;
        delete_by_id(conn, EntityKind::Section, id.get()).await?;
        tracing::debug!(section_id = %id, "deleted section");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inserts::{NewExam, NewUnit};
    use crate::test_support::helpers::test_service;
    use crate::updates::section::SectionUpdateBuilder;

    #[tokio::test]
    async fn create_and_get_section() {
        let svc = test_service().await;
        let exam = svc.create_exam(NewExam::new("E")).await.unwrap();

        let section = svc
            .create_section(NewSection::new(exam.id, "Data Consistency", 1))
            .await
            .unwrap();
        assert_eq!(svc.get_section(section.id).await.unwrap(), section);
    }

    #[tokio::test]
    async fn section_requires_existing_exam() {
        let svc = test_service().await;
        let result = svc
            .create_section(NewSection::new(ExamId(999), "Orphan", 1))
            .await;
        assert!(matches!(
            result,
            Err(DatabaseError::ConstraintViolation {
                entity: EntityKind::Section,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn list_orders_by_seq_then_id() {
        let svc = test_service().await;
        let exam = svc.create_exam(NewExam::new("E")).await.unwrap();
        svc.create_section(NewSection::new(exam.id, "third", 2))
            .await
            .unwrap();
        svc.create_section(NewSection::new(exam.id, "first", 1))
            .await
            .unwrap();
        svc.create_section(NewSection::new(exam.id, "fourth", 2))
            .await
            .unwrap();
        svc.create_section(NewSection::new(exam.id, "second", 1))
            .await
            .unwrap();

        let titles: Vec<String> = svc
            .list_sections(exam.id)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(titles, vec!["first", "second", "third", "fourth"]);
    }

    #[tokio::test]
    async fn update_section_seq() {
        let svc = test_service().await;
        let exam = svc.create_exam(NewExam::new("E")).await.unwrap();
        let section = svc
            .create_section(NewSection::new(exam.id, "S", 1))
            .await
            .unwrap();

        let updated = svc
            .update_section(section.id, SectionUpdateBuilder::new().seq(5).build())
            .await
            .unwrap();
        assert_eq!(updated.seq, 5);
        assert_eq!(updated.title, "S");
    }

    #[tokio::test]
    async fn delete_refuses_while_units_remain() {
        let svc = test_service().await;
        let exam = svc.create_exam(NewExam::new("E")).await.unwrap();
        let section = svc
            .create_section(NewSection::new(exam.id, "S", 1))
            .await
            .unwrap();
        svc.create_unit(NewUnit::new(exam.id, "U", 1).section(section.id))
            .await
            .unwrap();

        let result = svc.delete_section(section.id).await;
        assert!(matches!(
            result,
            Err(DatabaseError::ConstraintViolation {
                op: StoreOp::Delete,
                entity: EntityKind::Section,
                ..
            })
        ));
        assert!(svc.get_section(section.id).await.is_ok());
    }

    #[tokio::test]
    async fn delete_empty_section() {
        let svc = test_service().await;
        let exam = svc.create_exam(NewExam::new("E")).await.unwrap();
        let section = svc
            .create_section(NewSection::new(exam.id, "S", 1))
            .await
            .unwrap();

        svc.delete_section(section.id).await.unwrap();
        assert!(matches!(
            svc.get_section(section.id).await,
            Err(DatabaseError::NotFound { .. })
        ));
        assert!(matches!(
            svc.delete_section(section.id).await,
            Err(DatabaseError::NotFound { .. })
        ));
    }
}
