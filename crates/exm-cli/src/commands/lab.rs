use exm_core::entities::{Placement, Unit};
use exm_core::tree::ExamTree;
use exm_db::IN_MEMORY;
use exm_db::inserts::{NewExam, NewSection, NewTopic, NewUnit};
use exm_db::service::ExamService;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::outline::line;
use crate::output::{Outline, output};

/// Result of the placement walkthrough.
#[derive(Debug, Serialize)]
pub struct LabReport {
    /// Proposed with both a section and a topic; stored under the topic only.
    pub unit: Unit,
    pub tree: ExamTree,
}

impl Outline for LabReport {
    fn outline(&self) -> String {
        let mut out = String::new();
        let placed = match self.unit.placement {
            Placement::Section(id) => format!("section #{id}"),
            Placement::Topic(id) => format!("topic #{id}"),
        };
        line(
            &mut out,
            0,
            format!(
                ">> Unit '{}' proposed under a section and a topic, placed under {placed}",
                self.unit.title
            ),
        );
        out.push('\n');
        out.push_str(&self.tree.outline());
        out
    }
}

/// Build Section → Topic → Unit on an in-memory store and show where the
/// unit ends up.
pub async fn run() -> anyhow::Result<LabReport> {
    let service = ExamService::new_local(IN_MEMORY).await?;

    let exam = service
        .create_exam(
            NewExam::new("Sungsil Univ 2024 Transfer Math")
                .description("The 2024 transfer examination for Sungsil University.")
                .time_limit(60),
        )
        .await?;
    let section = service
        .create_section(NewSection::new(exam.id, "Section A: Calculus", 1))
        .await?;
    let topic = service
        .create_topic(NewTopic::new(exam.id, section.id, "Limits", 1))
        .await?;
    let unit = service
        .create_unit(
            NewUnit::new(exam.id, "Limit Definition", 1)
                .section(section.id)
                .topic(topic.id),
        )
        .await?;

    let tree = service.load_exam_tree(&exam.id.into(), "en").await?;
    Ok(LabReport { unit, tree })
}

pub async fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    let report = run().await?;
    output(&report, flags.format)
}
