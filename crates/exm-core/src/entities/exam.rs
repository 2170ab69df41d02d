use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ids::ExamId;

/// Root of the hierarchy. Owns every section, topic and unit below it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Exam {
    pub id: ExamId,
    pub title: String,
    pub description: Option<String>,
    /// Time limit in minutes.
    pub time_limit: i64,
    pub is_active: bool,
}
