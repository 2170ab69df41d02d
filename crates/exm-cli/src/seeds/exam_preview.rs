//! "Distributed Systems 101": the exam preview scenario.

use anyhow::Context;
use exm_db::inserts::{NewChoice, NewExam, NewProblem, NewSection, NewTranslation, NewUnit};
use exm_db::service::ExamService;

use super::SeedSummary;

pub const EXAM_TITLE: &str = "Distributed Systems 101";
const EXAM_DESCRIPTION: &str =
    "An introductory exam covering fundamental concepts of distributed systems.";
const SECTION_TITLE: &str = "Data Consistency";
const LOCALE: &str = "en";

struct UnitSeed {
    title: &'static str,
    difficulty: i64,
    question_title: &'static str,
    content: &'static str,
    /// `(content, is_correct)` in `seq` order starting at 1.
    choices: &'static [(&'static str, bool)],
}

const EVENTUAL_CONSISTENCY: &str = "
### Understanding Eventual Consistency

Eventual consistency is a consistency model used in distributed computing to achieve high availability. It guarantees that, if no new updates are made to a given data item, eventually all accesses to that item will return the last updated value.

**Which of the following statements is true regarding Eventual Consistency?**
";

const GO_CHANNELS: &str = "What is the output of the following Go code?\n\n```go\npackage main\n\nimport \"fmt\"\n\nfunc main() {\n    ch := make(chan int, 1)\n    ch <- 1\n    fmt.Println(<-ch)\n}\n```";

const UNITS: [UnitSeed; 3] = [
    UnitSeed {
        title: "CAP Theorem Basics",
        difficulty: 1,
        question_title: "CAP Theorem",
        content: "In the CAP theorem, which two properties cannot be simultaneously guaranteed in a distributed system with network partitions?",
        choices: &[
            ("Consistency & Availability", true),
            ("Availability & Partition Tolerance", false),
            ("Consistency & Partition Tolerance", false),
            ("Reliability & Scalability", false),
        ],
    },
    UnitSeed {
        title: "Eventual Consistency",
        difficulty: 2,
        question_title: "Eventual Consistency Details",
        content: EVENTUAL_CONSISTENCY,
        choices: &[
            ("Data is instantly replicated to all nodes.", false),
            (
                "It allows for temporary inconsistencies but converges over time.",
                true,
            ),
        ],
    },
    UnitSeed {
        title: "Go Channel Behavior",
        difficulty: 3,
        question_title: "Go Channels",
        content: GO_CHANNELS,
        choices: &[("1", true), ("Deadlock", false), ("Runtime Error", false)],
    },
];

/// Replace any exam titled [`EXAM_TITLE`] with a fresh copy of the scenario.
pub async fn seed(service: &ExamService) -> anyhow::Result<SeedSummary> {
    let mut replaced = Vec::new();
    for existing in service.find_exams_by_title(EXAM_TITLE).await? {
        tracing::info!(exam_id = %existing.id, "deleting existing exam before reseeding");
        let report = service
            .delete_exam_cascade(existing.id)
            .await
            .with_context(|| format!("failed deleting existing exam {}", existing.id))?;
        replaced.push(report);
    }

    let exam = service
        .create_exam(
            NewExam::new(EXAM_TITLE)
                .description(EXAM_DESCRIPTION)
                .time_limit(60)
                .active(true),
        )
        .await
        .context("failed creating exam")?;

    let section = service
        .create_section(NewSection::new(exam.id, SECTION_TITLE, 1))
        .await
        .context("failed creating section")?;

    for (seq, seed) in (1_i64..).zip(UNITS.iter()) {
        let unit = service
            .create_unit(NewUnit::new(exam.id, seed.title, seq).section(section.id))
            .await
            .with_context(|| format!("failed creating unit {seq}"))?;

        let problem = service
            .create_problem(NewProblem::new(unit.id, "SOURCE").difficulty(seed.difficulty))
            .await
            .with_context(|| format!("failed creating problem {seq}"))?;

        let translation = service
            .create_translation(NewTranslation::new(
                problem.id,
                LOCALE,
                seed.question_title,
                seed.content,
            ))
            .await
            .with_context(|| format!("failed creating translation {seq}"))?;

        let choices = (1_i64..)
            .zip(seed.choices.iter())
            .map(|(choice_seq, (content, is_correct))| {
                NewChoice::new(*content, *is_correct, choice_seq)
            })
            .collect();
        service
            .create_choices(translation.id, choices)
            .await
            .with_context(|| format!("failed creating choices {seq}"))?;
    }

    let footprint = service.exam_footprint(exam.id).await?;
    tracing::info!(exam_id = %exam.id, title = %exam.title, "seeded exam preview");

    Ok(SeedSummary {
        seed: "exam_preview",
        exam_id: exam.id,
        title: exam.title,
        replaced,
        footprint,
    })
}

#[cfg(test)]
mod tests {
    use exm_core::selector::ExamSelector;
    use exm_db::IN_MEMORY;
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn seeds_the_preview_scenario() {
        let service = ExamService::new_local(IN_MEMORY).await.unwrap();
        let summary = seed(&service).await.unwrap();

        assert!(summary.replaced.is_empty());
        assert_eq!(summary.footprint.sections, 1);
        assert_eq!(summary.footprint.units, 3);
        assert_eq!(summary.footprint.problems, 3);
        assert_eq!(summary.footprint.translations, 3);
        assert_eq!(summary.footprint.choices, 9);

        let tree = service
            .load_exam_tree(&ExamSelector::Title(EXAM_TITLE.into()), "en")
            .await
            .unwrap();
        let counts: Vec<usize> = tree
            .problems()
            .map(|p| p.translation.as_present().unwrap().choices.len())
            .collect();
        assert_eq!(counts, vec![4, 2, 3]);
    }

    #[tokio::test]
    async fn reseeding_replaces_the_previous_exam() {
        let service = ExamService::new_local(IN_MEMORY).await.unwrap();
        let first = seed(&service).await.unwrap();
        let second = seed(&service).await.unwrap();

        assert_eq!(second.replaced.len(), 1);
        assert_eq!(second.replaced[0].exam_id, first.exam_id);
        assert_ne!(second.exam_id, first.exam_id);
        assert_eq!(service.find_exams_by_title(EXAM_TITLE).await.unwrap().len(), 1);
        assert!(service.exam_footprint(first.exam_id).await.unwrap().is_empty());
    }
}
