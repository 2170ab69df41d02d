//! Row counts of every level under one exam.

use exm_core::enums::EntityKind;
use exm_core::ids::ExamId;
use serde::Serialize;

use crate::error::DatabaseError;
use crate::scope::count_scoped;
use crate::service::ExamService;

/// How many rows each level of the hierarchy holds for one exam.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExamFootprint {
    pub exams: u64,
    pub sections: u64,
    pub topics: u64,
    pub units: u64,
    pub problems: u64,
    pub translations: u64,
    pub choices: u64,
}

impl ExamFootprint {
    /// `true` when nothing under the exam (nor the exam itself) remains.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.exams == 0
            && self.sections == 0
            && self.topics == 0
            && self.units == 0
            && self.problems == 0
            && self.translations == 0
            && self.choices == 0
    }
}

impl ExamService {
    /// Count rows at every level scoped to `exam_id`.
    ///
    /// An unknown exam yields an all-zero footprint rather than `NotFound`.
    pub async fn exam_footprint(&self, exam_id: ExamId) -> Result<ExamFootprint, DatabaseError> {
        let conn = self.db().conn();
        Ok(ExamFootprint {
            exams: count_scoped(conn, EntityKind::Exam, exam_id).await?,
            sections: count_scoped(conn, EntityKind::Section, exam_id).await?,
            topics: count_scoped(conn, EntityKind::Topic, exam_id).await?,
            units: count_scoped(conn, EntityKind::Unit, exam_id).await?,
            problems: count_scoped(conn, EntityKind::Problem, exam_id).await?,
            translations: count_scoped(conn, EntityKind::Translation, exam_id).await?,
            choices: count_scoped(conn, EntityKind::Choice, exam_id).await?,
        })
    }
}
