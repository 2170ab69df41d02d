//! Ways of naming a single exam.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::ExamId;

/// Identifies the exam a cascade delete or tree load targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExamSelector {
    Id(ExamId),
    /// Exact title match. Must resolve to a single exam.
    Title(String),
}

impl From<ExamId> for ExamSelector {
    fn from(id: ExamId) -> Self {
        Self::Id(id)
    }
}

impl fmt::Display for ExamSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id={id}"),
            Self::Title(title) => write!(f, "title={title:?}"),
        }
    }
}
