use clap::{Args, Subcommand, ValueEnum};
use exm_core::ids::ExamId;
use exm_core::selector::ExamSelector;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Populate the database with a named scenario.
    Seed(SeedArgs),
    /// Print one exam as a tree for a locale.
    Tree(TreeArgs),
    /// Delete one exam and everything under it.
    Delete(DeleteArgs),
    /// Walk through unit placement on a throwaway in-memory store.
    Lab,
}

/// Seed scenarios known to `exm seed`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SeedName {
    /// "Distributed Systems 101": one section, three units, three problems.
    #[value(name = "exam_preview")]
    ExamPreview,
}

#[derive(Clone, Debug, Args)]
pub struct SeedArgs {
    /// Scenario to seed.
    #[arg(long, value_enum, default_value = "exam_preview")]
    pub name: SeedName,
}

/// Names one exam, by id or by exact title.
#[derive(Clone, Debug, Args)]
#[group(required = true, multiple = false)]
pub struct ExamTarget {
    /// Exam id.
    #[arg(long)]
    pub id: Option<i64>,

    /// Exact exam title.
    #[arg(long)]
    pub title: Option<String>,
}

impl ExamTarget {
    /// Convert the parsed flags into a store selector.
    pub fn selector(&self) -> anyhow::Result<ExamSelector> {
        match (self.id, &self.title) {
            (Some(id), None) => Ok(ExamSelector::Id(ExamId(id))),
            (None, Some(title)) => Ok(ExamSelector::Title(title.clone())),
            _ => anyhow::bail!("pass exactly one of --id or --title"),
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct TreeArgs {
    #[command(flatten)]
    pub target: ExamTarget,

    /// Translation locale (defaults to `general.default_locale`).
    #[arg(long)]
    pub locale: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct DeleteArgs {
    #[command(flatten)]
    pub target: ExamTarget,
}
