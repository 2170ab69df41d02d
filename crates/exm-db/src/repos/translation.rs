//! Problem translation repository.

use exm_core::entities::ProblemTranslation;
use exm_core::enums::EntityKind;
use exm_core::errors::validate_locale;
use exm_core::ids::{ProblemId, TranslationId};

use crate::error::{DatabaseError, StoreOp, store_err};
use crate::inserts::NewTranslation;
use crate::service::ExamService;

pub(crate) const SELECT_COLS: &str = "id, problem_id, locale, title, content";

pub(crate) fn row_to_translation(row: &libsql::Row) -> Result<ProblemTranslation, DatabaseError> {
    Ok(ProblemTranslation {
        id: TranslationId(row.get(0)?),
        problem_id: ProblemId(row.get(1)?),
        locale: row.get(2)?,
        title: row.get(3)?,
        content: row.get(4)?,
    })
}

impl ExamService {
    /// Insert a translation of a problem.
    ///
    /// # Errors
    ///
    /// `Validation` for a malformed locale; `ConstraintViolation` if the
    /// problem does not exist or already has a translation for this locale.
    pub async fn create_translation(
        &self,
        new: NewTranslation,
    ) -> Result<ProblemTranslation, DatabaseError> {
        validate_locale(&new.locale)?;

        let conn = self.db().conn();
        conn.execute(
            "INSERT INTO problem_translations (problem_id, locale, title, content)
             VALUES (?1, ?2, ?3, ?4)",
            libsql::params![
                new.problem_id.get(),
                new.locale.as_str(),
                new.title.as_str(),
                new.content.as_str()
            ],
        )
        .await
        .map_err(store_err(StoreOp::Insert, EntityKind::Translation))?;

        let translation = ProblemTranslation {
            id: TranslationId(conn.last_insert_rowid()),
            problem_id: new.problem_id,
            locale: new.locale,
            title: new.title,
            content: new.content,
        };
        tracing::debug!(
            translation_id = %translation.id,
            problem_id = %translation.problem_id,
            locale = %translation.locale,
            "created translation"
        );
        Ok(translation)
    }

    pub async fn get_translation(
        &self,
        id: TranslationId,
    ) -> Result<ProblemTranslation, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM problem_translations WHERE id = ?1"),
                [id.get()],
            )
            .await
            .map_err(store_err(StoreOp::Select, EntityKind::Translation))?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityKind::Translation, format!("id={id}")))?;
        row_to_translation(&row)
    }

    /// The translation of `problem_id` for `locale`, if one exists.
    pub async fn find_translation(
        &self,
        problem_id: ProblemId,
        locale: &str,
    ) -> Result<Option<ProblemTranslation>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM problem_translations
                     WHERE problem_id = ?1 AND locale = ?2"
                ),
                libsql::params![problem_id.get(), locale],
            )
            .await
            .map_err(store_err(StoreOp::Select, EntityKind::Translation))?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_translation(&row)?)),
            None => Ok(None),
        }
    }

    /// Every translation of a problem, ordered by locale.
    pub async fn list_translations(
        &self,
        problem_id: ProblemId,
    ) -> Result<Vec<ProblemTranslation>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM problem_translations
                     WHERE problem_id = ?1 ORDER BY locale"
                ),
                [problem_id.get()],
            )
            .await
            .map_err(store_err(StoreOp::Select, EntityKind::Translation))?;

        let mut translations = Vec::new();
        while let Some(row) = rows.next().await? {
            translations.push(row_to_translation(&row)?);
        }
        Ok(translations)
    }
}
