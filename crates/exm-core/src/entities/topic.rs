use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ids::{ExamId, SectionId, TopicId};

/// A grouping of units inside a section.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Topic {
    pub id: TopicId,
    pub exam_id: ExamId,
    pub section_id: SectionId,
    pub title: String,
    pub seq: i64,
}
