//! Read-only, fully populated exam tree.
//!
//! Produced by the tree assembler in `exm-db`. Every sibling list is already
//! in presentation order: sections, topics, units and choices by `seq`
//! (insertion order on ties), problems by creation order. Each problem carries
//! at most one translation, the one for the requested locale.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Choice, Exam, Problem, ProblemTranslation, Section, Topic, Unit};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ExamTree {
    pub exam: Exam,
    /// Locale the translations were selected for.
    pub locale: String,
    pub sections: Vec<SectionNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SectionNode {
    pub section: Section,
    pub topics: Vec<TopicNode>,
    /// Units placed directly on the section (not through a topic).
    pub units: Vec<UnitNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TopicNode {
    pub topic: Topic,
    pub units: Vec<UnitNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UnitNode {
    pub unit: Unit,
    pub problems: Vec<ProblemNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProblemNode {
    pub problem: Problem,
    pub translation: LocalizedTranslation,
}

/// The requested-locale translation of a problem, or a marker that it has none.
///
/// A translation in another locale is never substituted.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LocalizedTranslation {
    Present(TranslationNode),
    Missing { locale: String },
}

impl LocalizedTranslation {
    #[must_use]
    pub const fn as_present(&self) -> Option<&TranslationNode> {
        match self {
            Self::Present(node) => Some(node),
            Self::Missing { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TranslationNode {
    pub translation: ProblemTranslation,
    pub choices: Vec<Choice>,
}

impl ExamTree {
    /// Every unit in the tree, in presentation order: for each section, its
    /// topics' units first, then the units placed directly on it.
    pub fn units(&self) -> impl Iterator<Item = &UnitNode> {
        self.sections.iter().flat_map(|section| {
            section
                .topics
                .iter()
                .flat_map(|topic| topic.units.iter())
                .chain(section.units.iter())
        })
    }

    /// Every problem in the tree, in presentation order.
    pub fn problems(&self) -> impl Iterator<Item = &ProblemNode> {
        self.units().flat_map(|unit| unit.problems.iter())
    }

    /// `true` when the exam has no sections at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ids::{ExamId, ProblemId, SectionId, TopicId, UnitId};
    use crate::entities::Placement;
    use chrono::Utc;

    fn unit(id: i64, placement: Placement) -> UnitNode {
        UnitNode {
            unit: Unit {
                id: UnitId(id),
                exam_id: ExamId(1),
                title: format!("U{id}"),
                seq: id,
                placement,
            },
            problems: vec![ProblemNode {
                problem: Problem {
                    id: ProblemId(id),
                    unit_id: UnitId(id),
                    problem_type: "SOURCE".into(),
                    difficulty: 1,
                    created_at: Utc::now(),
                },
                translation: LocalizedTranslation::Missing { locale: "en".into() },
            }],
        }
    }

    #[test]
    fn units_walk_topics_before_direct_units() {
        let tree = ExamTree {
            exam: Exam {
                id: ExamId(1),
                title: "E".into(),
                description: None,
                time_limit: 60,
                is_active: true,
            },
            locale: "en".into(),
            sections: vec![SectionNode {
                section: Section {
                    id: SectionId(1),
                    exam_id: ExamId(1),
                    title: "S".into(),
                    seq: 1,
                },
                topics: vec![TopicNode {
                    topic: Topic {
                        id: TopicId(1),
                        exam_id: ExamId(1),
                        section_id: SectionId(1),
                        title: "T".into(),
                        seq: 1,
                    },
                    units: vec![unit(2, Placement::Topic(TopicId(1)))],
                }],
                units: vec![unit(1, Placement::Section(SectionId(1)))],
            }],
        };

        let ids: Vec<i64> = tree.units().map(|u| u.unit.id.get()).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(tree.problems().count(), 2);
        assert!(tree.problems().all(|p| p.translation.is_missing()));
    }

    #[test]
    fn missing_translation_serializes_with_status_tag() {
        let json = serde_json::to_value(LocalizedTranslation::Missing { locale: "fr".into() })
            .unwrap();
        assert_eq!(json, serde_json::json!({ "status": "missing", "locale": "fr" }));
    }
}
