//! Unit update builder.
//!
//! The parent fields are the proposed field set the placement enforcer
//! normalizes; see [`crate::placement::resolve_update`].

use exm_core::ids::{SectionId, TopicId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitUpdate {
    pub title: Option<String>,
    pub seq: Option<i64>,
    pub section_id: Option<Option<SectionId>>,
    pub topic_id: Option<Option<TopicId>>,
}

impl UnitUpdate {
    /// `true` when the mutation touches either parent column.
    #[must_use]
    pub const fn moves_unit(&self) -> bool {
        self.section_id.is_some() || self.topic_id.is_some()
    }
}

pub struct UnitUpdateBuilder(UnitUpdate);

impl UnitUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(UnitUpdate::default())
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub const fn seq(mut self, seq: i64) -> Self {
        self.0.seq = Some(seq);
        self
    }

    #[must_use]
    pub const fn section(mut self, section_id: SectionId) -> Self {
        self.0.section_id = Some(Some(section_id));
        self
    }

    #[must_use]
    pub const fn topic(mut self, topic_id: TopicId) -> Self {
        self.0.topic_id = Some(Some(topic_id));
        self
    }

    #[must_use]
    pub const fn clear_section(mut self) -> Self {
        self.0.section_id = Some(None);
        self
    }

    #[must_use]
    pub const fn clear_topic(mut self) -> Self {
        self.0.topic_id = Some(None);
        self
    }

    #[must_use]
    pub fn build(self) -> UnitUpdate {
        self.0
    }
}
