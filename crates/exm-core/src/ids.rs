//! Typed integer identifiers.
//!
//! Every entity is keyed by an `INTEGER PRIMARY KEY` in the store. Each kind
//! gets its own newtype so a `SectionId` can never be passed where a
//! `TopicId` is expected. All IDs serialize as bare integers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Raw row id as stored.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of an exam row.
    ExamId
);
entity_id!(
    /// Identifier of a section row.
    SectionId
);
entity_id!(
    /// Identifier of a topic row.
    TopicId
);
entity_id!(
    /// Identifier of a unit row.
    UnitId
);
entity_id!(
    /// Identifier of a problem row.
    ProblemId
);
entity_id!(
    /// Identifier of a problem translation row.
    TranslationId
);
entity_id!(
    /// Identifier of a choice row.
    ChoiceId
);
