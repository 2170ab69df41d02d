use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ids::{ChoiceId, TranslationId};

/// One multiple-choice answer of a translation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Choice {
    pub id: ChoiceId,
    pub translation_id: TranslationId,
    pub content: String,
    pub is_correct: bool,
    pub seq: i64,
}
