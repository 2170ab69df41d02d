//! Topic update builder.

use exm_core::ids::SectionId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicUpdate {
    pub title: Option<String>,
    pub seq: Option<i64>,
    /// Move the topic to another section of the same exam.
    pub section_id: Option<SectionId>,
}

pub struct TopicUpdateBuilder(TopicUpdate);

impl TopicUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(TopicUpdate::default())
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
        self.0.section_id = Some(section_id);
        self
    }

    #[must_use]
    pub fn build(self) -> TopicUpdate {
        self.0
    }
}
