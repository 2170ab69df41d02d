use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ids::{ProblemId, TranslationId};

/// Locale-specific text of a problem. `locale` is unique per problem.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProblemTranslation {
    pub id: TranslationId,
    pub problem_id: ProblemId,
    pub locale: String,
    pub title: String,
    pub content: String,
}
