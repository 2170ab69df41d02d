//! Exam update builder.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExamUpdate {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub time_limit: Option<i64>,
    pub is_active: Option<bool>,
}

pub struct ExamUpdateBuilder(ExamUpdate);

impl ExamUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(ExamUpdate::default())
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.0.description = Some(description);
        self
    }

    #[must_use]
    pub const fn time_limit(mut self, minutes: i64) -> Self {
        self.0.time_limit = Some(minutes);
        self
    }

    #[must_use]
    pub const fn active(mut self, is_active: bool) -> Self {
        self.0.is_active = Some(is_active);
        self
    }

    #[must_use]
    pub fn build(self) -> ExamUpdate {
        self.0
    }
}
