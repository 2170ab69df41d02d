//! Topic repository.
//!
//! A topic belongs to one section of its own exam. Creates and moves check
//! that ownership inside a transaction, so the check and the write see the
//! same snapshot.

use exm_core::entities::Topic;
use exm_core::enums::EntityKind;
use exm_core::ids::{ExamId, SectionId, TopicId};

use crate::error::{DatabaseError, StoreOp, store_err};
use crate::finish;
use crate::helpers::UpdateSet;
use crate::inserts::NewTopic;
use crate::service::ExamService;
use crate::updates::topic::TopicUpdate;

use super::{delete_by_id, ensure_no_dependents, ensure_parent_in_exam, owning_exam};

pub(crate) const SELECT_COLS: &str = "id, exam_id, section_id, title, seq";

pub(crate) fn row_to_topic(row: &libsql::Row) -> Result<Topic, DatabaseError> {
    Ok(Topic {
        id: TopicId(row.get(0)?),
        exam_id: ExamId(row.get(1)?),
        section_id: SectionId(row.get(2)?),
        title: row.get(3)?,
        seq: row.get(4)?,
    })
}

async fn insert_topic(conn: &libsql::Connection, new: &NewTopic) -> Result<TopicId, DatabaseError> {
    ensure_parent_in_exam(
        conn,
        StoreOp::Insert,
        EntityKind::Topic,
        EntityKind::Section,
        new.section_id.get(),
        new.exam_id,
    )
    .await?;
    conn.execute(
        "INSERT INTO topics (exam_id, section_id, title, seq) VALUES (?1, ?2, ?3, ?4)",
        libsql::params![
            new.exam_id.get(),
            new.section_id.get(),
            new.title.as_str(),
            new.seq
        ],
    )
    .await
    .map_err(store_err(StoreOp::Insert, EntityKind::Topic))?;
    Ok(TopicId(conn.last_insert_rowid()))
}

async fn apply_topic_update(
    conn: &libsql::Connection,
    id: TopicId,
    update: TopicUpdate,
) -> Result<(), DatabaseError> {
    let exam_id = owning_exam(conn, EntityKind::Topic, id.get())
        .await?
        .ok_or_else(|| DatabaseError::not_found(EntityKind::Topic, format!("id={id}")))?;

    let mut set = UpdateSet::new();
    if let Some(section_id) = update.section_id {
        ensure_parent_in_exam(
            conn,
            StoreOp::Update,
            EntityKind::Topic,
            EntityKind::Section,
            section_id.get(),
            exam_id,
        )
        .await?;
        set.push("section_id", section_id.get());
    }
    if let Some(title) = update.title {
        set.push("title", title);
    }
    if let Some(seq) = update.seq {
        set.push("seq", seq);
    }
    if set.is_empty() {
        return Ok(());
    }

    let (sql, params) = set.finish("topics", id.get());
    conn.execute(&sql, libsql::params_from_iter(params))
        .await
        .map_err(store_err(StoreOp::Update, EntityKind::Topic))?;
    Ok(())
}

impl ExamService {
    /// Insert a topic under a section of the same exam.
    ///
    /// # Errors
    ///
    /// `ConstraintViolation` if the section does not exist,
    /// `InvariantViolation` if it belongs to another exam.
    pub async fn create_topic(&self, new: NewTopic) -> Result<Topic, DatabaseError> {
        let tx = self.db().begin().await?;
        let result = insert_topic(&tx, &new).await;
        let id = finish(tx, result).await?;

        tracing::debug!(topic_id = %id, section_id = %new.section_id, "created topic");
        Ok(Topic {
            id,
            exam_id: new.exam_id,
            section_id: new.section_id,
            title: new.title,
            seq: new.seq,
        })
    }

    pub async fn get_topic(&self, id: TopicId) -> Result<Topic, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM topics WHERE id = ?1"),
                [id.get()],
            )
            .await
            .map_err(store_err(StoreOp::Select, EntityKind::Topic))?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityKind::Topic, format!("id={id}")))?;
        row_to_topic(&row)
    }

    /// Topics of one section ordered by `seq`, ties broken by id.
    pub async fn list_topics(&self, section_id: SectionId) -> Result<Vec<Topic>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM topics WHERE section_id = ?1 ORDER BY seq, id"
                ),
                [section_id.get()],
            )
            .await
            .map_err(store_err(StoreOp::Select, EntityKind::Topic))?;

        let mut topics = Vec::new();
        while let Some(row) = rows.next().await? {
            topics.push(row_to_topic(&row)?);
        }
        Ok(topics)
    }

    /// Apply a partial update. Moving to another section requires that
    /// section to belong to the topic's exam.
    pub async fn update_topic(
        &self,
        id: TopicId,
        update: TopicUpdate,
    ) -> Result<Topic, DatabaseError> {
        let tx = self.db().begin().await?;
        let result = apply_topic_update(&tx, id, update).await;
        finish(tx, result).await?;
        self.get_topic(id).await
    }

    /// Delete a topic that has no units left.
    pub async fn delete_topic(&self, id: TopicId) -> Result<(), DatabaseError> {
        let conn = self.db().conn();
        ensure_no_dependents(
            conn,
            EntityKind::Topic,
            id.get(),
            &[(EntityKind::Unit, "topic_id")],
        )
        .await?;
        delete_by_id(conn, EntityKind::Topic, id.get()).await?;
        tracing::debug!(topic_id = %id, "deleted topic");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inserts::{NewExam, NewSection, NewUnit};
    use crate::test_support::helpers::test_service;
    use crate::updates::topic::TopicUpdateBuilder;

    #[tokio::test]
    async fn create_topic_under_section() {
        let svc = test_service().await;
        let exam = svc.create_exam(NewExam::new("E")).await.unwrap();
        let section = svc
            .create_section(NewSection::new(exam.id, "S", 1))
            .await
            .unwrap();

        let topic = svc
            .create_topic(NewTopic::new(exam.id, section.id, "Replication", 1))
            .await
            .unwrap();
        assert_eq!(svc.get_topic(topic.id).await.unwrap(), topic);
        assert_eq!(svc.list_topics(section.id).await.unwrap(), vec![topic]);
    }

    #[tokio::test]
    async fn topic_with_missing_section_is_constraint_violation() {
        let svc = test_service().await;
        let exam = svc.create_exam(NewExam::new("E")).await.unwrap();

        let result = svc
            .create_topic(NewTopic::new(exam.id, SectionId(42), "T", 1))
            .await;
        assert!(matches!(
            result,
            Err(DatabaseError::ConstraintViolation {
                entity: EntityKind::Topic,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn topic_cannot_borrow_another_exams_section() {
        let svc = test_service().await;
        let a = svc.create_exam(NewExam::new("A")).await.unwrap();
        let b = svc.create_exam(NewExam::new("B")).await.unwrap();
        let section_b = svc
            .create_section(NewSection::new(b.id, "S", 1))
            .await
            .unwrap();

        let result = svc
            .create_topic(NewTopic::new(a.id, section_b.id, "T", 1))
            .await;
        assert!(matches!(result, Err(DatabaseError::InvariantViolation(_))));
    }

    #[tokio::test]
    async fn move_topic_between_sections() {
        let svc = test_service().await;
        let exam = svc.create_exam(NewExam::new("E")).await.unwrap();
        let s1 = svc
            .create_section(NewSection::new(exam.id, "S1", 1))
            .await
            .unwrap();
        let s2 = svc
            .create_section(NewSection::new(exam.id, "S2", 2))
            .await
            .unwrap();
        let topic = svc
            .create_topic(NewTopic::new(exam.id, s1.id, "T", 1))
            .await
            .unwrap();

        let moved = svc
            .update_topic(
                topic.id,
                TopicUpdateBuilder::new().section(s2.id).title("T2").build(),
            )
            .await
            .unwrap();
        assert_eq!(moved.section_id, s2.id);
        assert_eq!(moved.title, "T2");
        assert!(svc.list_topics(s1.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_missing_topic_is_not_found() {
        let svc = test_service().await;
        let result = svc
            .update_topic(TopicId(5), TopicUpdateBuilder::new().seq(2).build())
            .await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn delete_topic_guards_units() {
        let svc = test_service().await;
        let exam = svc.create_exam(NewExam::new("E")).await.unwrap();
        let section = svc
            .create_section(NewSection::new(exam.id, "S", 1))
            .await
            .unwrap();
        let topic = svc
            .create_topic(NewTopic::new(exam.id, section.id, "T", 1))
            .await
            .unwrap();
        let unit = svc
            .create_unit(NewUnit::new(exam.id, "U", 1).topic(topic.id))
            .await
            .unwrap();

        assert!(matches!(
            svc.delete_topic(topic.id).await,
            Err(DatabaseError::ConstraintViolation { .. })
        ));

        svc.delete_unit(unit.id).await.unwrap();
        svc.delete_topic(topic.id).await.unwrap();
        assert!(svc.list_topics(section.id).await.unwrap().is_empty());
    }
}
