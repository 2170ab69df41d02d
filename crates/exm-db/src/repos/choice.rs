//! Choice repository.
//!
//! Choices are written in batches per translation. A batch is one transaction:
//! the first failing row aborts it and nothing from the batch is kept.

use exm_core::entities::Choice;
use exm_core::enums::EntityKind;
use exm_core::ids::{ChoiceId, TranslationId};

use crate::error::{AbortedStep, DatabaseError, StoreOp, store_err};
use crate::finish;
use crate::helpers::get_bool;
use crate::inserts::NewChoice;
use crate::service::ExamService;

pub(crate) const SELECT_COLS: &str = "id, problem_translation_id, content, is_correct, seq";

pub(crate) fn row_to_choice(row: &libsql::Row) -> Result<Choice, DatabaseError> {
    Ok(Choice {
        id: ChoiceId(row.get(0)?),
        translation_id: TranslationId(row.get(1)?),
        content: row.get(2)?,
        is_correct: get_bool(row, 3)?,
        seq: row.get(4)?,
    })
}

async fn insert_choices(
    conn: &libsql::Connection,
    translation_id: TranslationId,
    batch: Vec<NewChoice>,
) -> Result<Vec<Choice>, DatabaseError> {
    let mut created = Vec::with_capacity(batch.len());
    for (index, new) in batch.into_iter().enumerate() {
        conn.execute(
            "INSERT INTO choices (problem_translation_id, content, is_correct, seq)
             VALUES (?1, ?2, ?3, ?4)",
            libsql::params![
                translation_id.get(),
                new.content.as_str(),
                i64::from(new.is_correct),
                new.seq
            ],
        )
        .await
        .map_err(store_err(StoreOp::Insert, EntityKind::Choice))
        .map_err(|source| DatabaseError::TransactionAborted {
            step: AbortedStep::Choice { index },
            source: Box::new(source),
        })?;

        created.push(Choice {
            id: ChoiceId(conn.last_insert_rowid()),
            translation_id,
            content: new.content,
            is_correct: new.is_correct,
            seq: new.seq,
        });
    }
    Ok(created)
}

impl ExamService {
    /// Insert a batch of choices for one translation, all or nothing.
    ///
    /// # Errors
    ///
    /// `TransactionAborted` naming the first failing row; its source is the
    /// store error (a `ConstraintViolation` for a missing translation or
    /// empty content). No row of the batch is persisted.
    pub async fn create_choices(
        &self,
        translation_id: TranslationId,
        batch: Vec<NewChoice>,
    ) -> Result<Vec<Choice>, DatabaseError> {
        if batch.is_empty() {
            return Ok(Vec::new());
        }

        let tx = self.db().begin().await?;
        let result = insert_choices(&tx, translation_id, batch).await;
        let choices = finish(tx, result).await?;

        tracing::debug!(
            translation_id = %translation_id,
            count = choices.len(),
            "created choices"
        );
        Ok(choices)
    }

    /// Choices of a translation ordered by `seq`, ties broken by id.
    pub async fn list_choices(
        &self,
        translation_id: TranslationId,
    ) -> Result<Vec<Choice>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM choices
                     WHERE problem_translation_id = ?1 ORDER BY seq, id"
                ),
                [translation_id.get()],
            )
            .await
            .map_err(store_err(StoreOp::Select, EntityKind::Choice))?;

        let mut choices = Vec::new();
        while let Some(row) = rows.next().await? {
            choices.push(row_to_choice(&row)?);
        }
        Ok(choices)
    }
}
