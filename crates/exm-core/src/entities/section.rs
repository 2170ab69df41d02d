use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ids::{ExamId, SectionId};

/// An ordered block of an exam.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Section {
    pub id: SectionId,
    pub exam_id: ExamId,
    pub title: String,
    pub seq: i64,
}
