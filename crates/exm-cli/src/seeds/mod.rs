//! Named seed scenarios for `exm seed`.

use exm_core::ids::ExamId;
use exm_db::cascade::CascadeReport;
use exm_db::repos::footprint::ExamFootprint;
use exm_db::service::ExamService;
use serde::Serialize;

use crate::cli::root_commands::SeedName;
use crate::output::Outline;
use crate::output::outline::line;

pub mod exam_preview;

/// What a seed run left in the database.
#[derive(Debug, Serialize)]
pub struct SeedSummary {
    pub seed: &'static str,
    pub exam_id: ExamId,
    pub title: String,
    /// Cascade deletes of earlier copies of the seeded exam.
    pub replaced: Vec<CascadeReport>,
    pub footprint: ExamFootprint,
}

impl Outline for SeedSummary {
    fn outline(&self) -> String {
        let mut out = String::new();
        line(
            &mut out,
            0,
            format!("Seeded '{}': exam #{} {}", self.seed, self.exam_id, self.title),
        );
        for report in &self.replaced {
            line(
                &mut out,
                1,
                format!("replaced exam #{} ({} rows)", report.exam_id, report.total()),
            );
        }
        let f = &self.footprint;
        line(
            &mut out,
            1,
            format!(
                "sections {}, topics {}, units {}, problems {}, translations {}, choices {}",
                f.sections, f.topics, f.units, f.problems, f.translations, f.choices
            ),
        );
        out
    }
}

/// Run the named scenario.
pub async fn run(name: SeedName, service: &ExamService) -> anyhow::Result<SeedSummary> {
    match name {
        SeedName::ExamPreview => exam_preview::seed(service).await,
    }
}
