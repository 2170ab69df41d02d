//! Section update builder.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionUpdate {
    pub title: Option<String>,
    pub seq: Option<i64>,
}

pub struct SectionUpdateBuilder(SectionUpdate);

impl SectionUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(SectionUpdate::default())
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
    pub fn build(self) -> SectionUpdate {
        self.0
    }
}
