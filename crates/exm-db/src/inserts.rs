//! Insert payloads for entity creation.
//!
//! Each payload names its parent identities explicitly; nothing in the
//! hierarchy is auto-created. Optional attributes are set through chained
//! builder methods.

use chrono::{DateTime, Utc};
use exm_core::ids::{ExamId, ProblemId, SectionId, TopicId, UnitId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExam {
    pub title: String,
    pub description: Option<String>,
    pub time_limit: i64,
    pub is_active: bool,
}

impl NewExam {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            time_limit: 0,
            is_active: false,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Time limit in minutes.
    #[must_use]
    pub const fn time_limit(mut self, minutes: i64) -> Self {
        self.time_limit = minutes;
        self
    }

    #[must_use]
    pub const fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSection {
    pub exam_id: ExamId,
    pub title: String,
    pub seq: i64,
}

impl NewSection {
    #[must_use]
    pub fn new(exam_id: ExamId, title: impl Into<String>, seq: i64) -> Self {
        Self {
            exam_id,
            title: title.into(),
            seq,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTopic {
    pub exam_id: ExamId,
    pub section_id: SectionId,
    pub title: String,
    pub seq: i64,
}

impl NewTopic {
    #[must_use]
    pub fn new(exam_id: ExamId, section_id: SectionId, title: impl Into<String>, seq: i64) -> Self {
        Self {
            exam_id,
            section_id,
            title: title.into(),
            seq,
        }
    }
}

/// Proposed field set for a new unit.
///
/// Both parent fields may be proposed; the placement enforcer decides which
/// one survives before the row is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUnit {
    pub exam_id: ExamId,
    pub title: String,
    pub seq: i64,
    pub section_id: Option<SectionId>,
    pub topic_id: Option<TopicId>,
}

impl NewUnit {
    #[must_use]
    pub fn new(exam_id: ExamId, title: impl Into<String>, seq: i64) -> Self {
        Self {
            exam_id,
            title: title.into(),
            seq,
            section_id: None,
            topic_id: None,
        }
    }

    #[must_use]
    pub const fn section(mut self, section_id: SectionId) -> Self {
        self.section_id = Some(section_id);
        self
    }

    #[must_use]
    pub const fn topic(mut self, topic_id: TopicId) -> Self {
        self.topic_id = Some(topic_id);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProblem {
    pub unit_id: UnitId,
    pub problem_type: String,
    pub difficulty: i64,
    /// Defaults to the insert time.
    pub created_at: Option<DateTime<Utc>>,
}

impl NewProblem {
    #[must_use]
    pub fn new(unit_id: UnitId, problem_type: impl Into<String>) -> Self {
        Self {
            unit_id,
            problem_type: problem_type.into(),
            difficulty: 0,
            created_at: None,
        }
    }

    #[must_use]
    pub const fn difficulty(mut self, difficulty: i64) -> Self {
        self.difficulty = difficulty;
        self
    }

    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTranslation {
    pub problem_id: ProblemId,
    pub locale: String,
    pub title: String,
    pub content: String,
}

impl NewTranslation {
    #[must_use]
    pub fn new(
        problem_id: ProblemId,
        locale: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            problem_id,
            locale: locale.into(),
            title: title.into(),
            content: content.into(),
        }
    }
}

/// One row of a bulk choice insert. The parent translation is given once for
/// the whole batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChoice {
    pub content: String,
    pub is_correct: bool,
    pub seq: i64,
}

impl NewChoice {
    #[must_use]
    pub fn new(content: impl Into<String>, is_correct: bool, seq: i64) -> Self {
        Self {
            content: content.into(),
            is_correct,
            seq,
        }
    }

    #[must_use]
    pub fn correct(content: impl Into<String>, seq: i64) -> Self {
        Self::new(content, true, seq)
    }

    #[must_use]
    pub fn wrong(content: impl Into<String>, seq: i64) -> Self {
        Self::new(content, false, seq)
    }
}
