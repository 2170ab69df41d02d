//! Unit repository.
//!
//! Every write goes through the placement enforcer first and then writes
//! `section_id` and `topic_id` together, so the stored row always carries
//! exactly one parent.

use exm_core::entities::{Placement, Unit};
use exm_core::enums::EntityKind;
use exm_core::ids::{ExamId, SectionId, TopicId, UnitId};

use crate::error::{DatabaseError, StoreOp, store_err};
use crate::finish;
use crate::helpers::{UpdateSet, get_opt_i64, opt_i64_value};
use crate::inserts::NewUnit;
use crate::placement;
use crate::service::ExamService;
use crate::updates::unit::UnitUpdate;

use super::{delete_by_id, ensure_no_dependents, ensure_parent_in_exam};

pub(crate) const SELECT_COLS: &str = "id, exam_id, title, seq, section_id, topic_id";

pub(crate) fn row_to_unit(row: &libsql::Row) -> Result<Unit, DatabaseError> {
    let id = UnitId(row.get(0)?);
    let placement = match (get_opt_i64(row, 4)?, get_opt_i64(row, 5)?) {
        (Some(section), None) => Placement::Section(SectionId(section)),
        (None, Some(topic)) => Placement::Topic(TopicId(topic)),
        (section, topic) => {
            return Err(DatabaseError::InvalidState(format!(
                "unit {id} has section_id={section:?} and topic_id={topic:?}"
            )));
        }
    };
    Ok(Unit {
        id,
        exam_id: ExamId(row.get(1)?),
        title: row.get(2)?,
        seq: row.get(3)?,
        placement,
    })
}

/// Check that the resolved parent exists and belongs to `exam_id`.
async fn ensure_placement_in_exam(
    conn: &libsql::Connection,
    op: StoreOp,
    placement: Placement,
    exam_id: ExamId,
) -> Result<(), DatabaseError> {
    let (parent, parent_id) = match placement {
        Placement::Section(id) => (EntityKind::Section, id.get()),
        Placement::Topic(id) => (EntityKind::Topic, id.get()),
    };
    ensure_parent_in_exam(conn, op, EntityKind::Unit, parent, parent_id, exam_id).await
}

async fn fetch_unit(conn: &libsql::Connection, id: UnitId) -> Result<Unit, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {SELECT_COLS} FROM units WHERE id = ?1"),
            [id.get()],
        )
        .await
        .map_err(store_err(StoreOp::Select, EntityKind::Unit))?;
    let row = rows
        .next()
        .await?
        .ok_or_else(|| DatabaseError::not_found(EntityKind::Unit, format!("id={id}")))?;
    row_to_unit(&row)
}

async fn query_units(
    conn: &libsql::Connection,
    column: &str,
    key: i64,
) -> Result<Vec<Unit>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {SELECT_COLS} FROM units WHERE {column} = ?1 ORDER BY seq, id"),
            [key],
        )
        .await
        .map_err(store_err(StoreOp::Select, EntityKind::Unit))?;

    let mut units = Vec::new();
    while let Some(row) = rows.next().await? {
        units.push(row_to_unit(&row)?);
    }
    Ok(units)
}

async fn insert_unit(
    conn: &libsql::Connection,
    new: &NewUnit,
    placement: Placement,
) -> Result<UnitId, DatabaseError> {
    ensure_placement_in_exam(conn, StoreOp::Insert, placement, new.exam_id).await?;

    let (section_id, topic_id) = placement.columns();
    conn.execute(
        "INSERT INTO units (exam_id, section_id, topic_id, title, seq)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        libsql::params![
            new.exam_id.get(),
            opt_i64_value(section_id.map(SectionId::get)),
            opt_i64_value(topic_id.map(TopicId::get)),
            new.title.as_str(),
            new.seq
        ],
    )
    .await
    .map_err(store_err(StoreOp::Insert, EntityKind::Unit))?;
    Ok(UnitId(conn.last_insert_rowid()))
}

async fn apply_unit_update(
    conn: &libsql::Connection,
    id: UnitId,
    update: UnitUpdate,
) -> Result<(), DatabaseError> {
    let current = fetch_unit(conn, id).await?;

    let mut set = UpdateSet::new();
    if update.moves_unit() {
        let resolved =
            placement::resolve_update(current.placement, update.section_id, update.topic_id)?;
        if resolved != current.placement {
            ensure_placement_in_exam(conn, StoreOp::Update, resolved, current.exam_id).await?;
        }
        let (section_id, topic_id) = resolved.columns();
        set.push("section_id", opt_i64_value(section_id.map(SectionId::get)));
        set.push("topic_id", opt_i64_value(topic_id.map(TopicId::get)));
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

    let (sql, params) = set.finish("units", id.get());
    conn.execute(&sql, libsql::params_from_iter(params))
        .await
        .map_err(store_err(StoreOp::Update, EntityKind::Unit))?;
    Ok(())
}

impl ExamService {
    /// Insert a unit after normalizing its parent fields.
    ///
    /// If both a section and a topic are proposed, the topic wins and the
    /// section is dropped.
    ///
    /// # Errors
    ///
    /// `InvariantViolation` if no parent is proposed or the parent belongs to
    /// another exam; `ConstraintViolation` if the parent does not exist.
    pub async fn create_unit(&self, new: NewUnit) -> Result<Unit, DatabaseError> {
        let placement = placement::resolve_create(new.section_id, new.topic_id)?;
        if new.section_id.is_some() && new.topic_id.is_some() {
            tracing::debug!(title = %new.title, "unit proposed under section and topic; keeping topic");
        }

        let tx = self.db().begin().await?;
        let result = insert_unit(&tx, &new, placement).await;
        let id = finish(tx, result).await?;

        tracing::debug!(unit_id = %id, ?placement, "created unit");
        Ok(Unit {
            id,
            exam_id: new.exam_id,
            title: new.title,
            seq: new.seq,
            placement,
        })
    }

    pub async fn get_unit(&self, id: UnitId) -> Result<Unit, DatabaseError> {
        fetch_unit(self.db().conn(), id).await
    }

    /// All units of an exam ordered by `seq`, ties broken by id.
    pub async fn list_units(&self, exam_id: ExamId) -> Result<Vec<Unit>, DatabaseError> {
        query_units(self.db().conn(), "exam_id", exam_id.get()).await
    }

    /// Units placed directly under a section.
    pub async fn list_units_for_section(
        &self,
        section_id: SectionId,
    ) -> Result<Vec<Unit>, DatabaseError> {
        query_units(self.db().conn(), "section_id", section_id.get()).await
    }

    /// Units placed under a topic.
    pub async fn list_units_for_topic(&self, topic_id: TopicId) -> Result<Vec<Unit>, DatabaseError> {
        query_units(self.db().conn(), "topic_id", topic_id.get()).await
    }

    /// Apply a partial update, re-normalizing the placement when either
    /// parent field is touched.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown unit, `InvariantViolation` if the update
    /// would leave the unit without a parent or move it to another exam.
    pub async fn update_unit(&self, id: UnitId, update: UnitUpdate) -> Result<Unit, DatabaseError> {
        let tx = self.db().begin().await?;
        let result = apply_unit_update(&tx, id, update).await;
        finish(tx, result).await?;
        self.get_unit(id).await
    }

    /// Delete a unit that has no problems left.
    pub async fn delete_unit(&self, id: UnitId) -> Result<(), DatabaseError> {
        let conn = self.db().conn();
        ensure_no_dependents(
            conn,
            EntityKind::Unit,
            id.get(),
            &[(EntityKind::Problem, "unit_id")],
        )
        .await?;
        delete_by_id(conn, EntityKind::Unit, id.get()).await?;
        tracing::debug!(unit_id = %id, "deleted unit");
        Ok(())
    }
}
