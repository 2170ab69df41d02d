use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ids::{ExamId, SectionId, TopicId, UnitId};

/// Where a unit hangs in the tree: directly under a section, or under a topic.
///
/// Stored as two nullable columns (`section_id`, `topic_id`) of which exactly
/// one is set. Modelling it as an enum makes the "both" and "neither" states
/// unrepresentable once a row has been read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    Section(SectionId),
    Topic(TopicId),
}

impl Placement {
    /// Column values as written to the store: `(section_id, topic_id)`.
    #[must_use]
    pub const fn columns(self) -> (Option<SectionId>, Option<TopicId>) {
        match self {
            Self::Section(id) => (Some(id), None),
            Self::Topic(id) => (None, Some(id)),
        }
    }
}

/// A unit of problems, placed under either a section or a topic.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Unit {
    pub id: UnitId,
    pub exam_id: ExamId,
    pub title: String,
    pub seq: i64,
    pub placement: Placement,
}

impl Unit {
    #[must_use]
    pub const fn section_id(&self) -> Option<SectionId> {
        self.placement.columns().0
    }

    #[must_use]
    pub const fn topic_id(&self) -> Option<TopicId> {
        self.placement.columns().1
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn placement_sets_exactly_one_column() {
        assert_eq!(
            Placement::Section(SectionId(4)).columns(),
            (Some(SectionId(4)), None)
        );
        assert_eq!(Placement::Topic(TopicId(9)).columns(), (None, Some(TopicId(9))));
    }

    #[test]
    fn placement_serializes_as_tagged_id() {
        let json = serde_json::to_value(Placement::Topic(TopicId(2))).unwrap();
        assert_eq!(json, serde_json::json!({ "topic": 2 }));
    }
}
