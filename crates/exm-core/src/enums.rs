//! Entity kinds and cascade levels for the exam hierarchy.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// The seven entity kinds persisted by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Exam,
    Section,
    Topic,
    Unit,
    Problem,
    Translation,
    Choice,
}

impl EntityKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exam => "exam",
            Self::Section => "section",
            Self::Topic => "topic",
            Self::Unit => "unit",
            Self::Problem => "problem",
            Self::Translation => "translation",
            Self::Choice => "choice",
        }
    }

    /// SQL table backing this kind.
    ///
    /// Uses exhaustive match, so adding a kind forces updating this.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Exam => "exams",
            Self::Section => "sections",
            Self::Topic => "topics",
            Self::Unit => "units",
            Self::Problem => "problems",
            Self::Translation => "problem_translations",
            Self::Choice => "choices",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CascadeLevel
// ---------------------------------------------------------------------------

/// One step of an exam cascade delete.
///
/// ```text
/// choices → translations → problems → units → topics → sections → exam
/// ```
///
/// Each level only references rows in levels to its right, so deleting in
/// `ORDER` never trips a still-referencing foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CascadeLevel {
    Choices,
    Translations,
    Problems,
    Units,
    Topics,
    Sections,
    Exam,
}

impl CascadeLevel {
    /// Bottom-up execution order.
    pub const ORDER: [Self; 7] = [
        Self::Choices,
        Self::Translations,
        Self::Problems,
        Self::Units,
        Self::Topics,
        Self::Sections,
        Self::Exam,
    ];

    /// Entity kind removed at this level.
    #[must_use]
    pub const fn entity(self) -> EntityKind {
        match self {
            Self::Choices => EntityKind::Choice,
            Self::Translations => EntityKind::Translation,
            Self::Problems => EntityKind::Problem,
            Self::Units => EntityKind::Unit,
            Self::Topics => EntityKind::Topic,
            Self::Sections => EntityKind::Section,
            Self::Exam => EntityKind::Exam,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Choices => "choices",
            Self::Translations => "translations",
            Self::Problems => "problems",
            Self::Units => "units",
            Self::Topics => "topics",
            Self::Sections => "sections",
            Self::Exam => "exam",
        }
    }
}

impl fmt::Display for CascadeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
