use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ids::{ProblemId, UnitId};

/// A question inside a unit. Its text lives in per-locale translations.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Problem {
    pub id: ProblemId,
    pub unit_id: UnitId,
    #[serde(rename = "type")]
    pub problem_type: String,
    pub difficulty: i64,
    pub created_at: DateTime<Utc>,
}
