//! Indented plain-text rendering for terminals.

use std::fmt::Display;

use exm_core::tree::{ExamTree, LocalizedTranslation, ProblemNode, UnitNode};
use exm_db::cascade::CascadeReport;

/// Human-readable, indented rendering of a response.
pub trait Outline {
    fn outline(&self) -> String;
}

/// Append one line at `depth` (two spaces per level).
pub fn line(out: &mut String, depth: usize, text: impl Display) {
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(&"  ".repeat(depth));
    out.push_str(&text.to_string());
}

fn unit_lines(out: &mut String, depth: usize, node: &UnitNode) {
    line(out, depth, format!("Unit {}. {}", node.unit.seq, node.unit.title));
    for problem in &node.problems {
        problem_lines(out, depth + 1, problem);
    }
}

fn problem_lines(out: &mut String, depth: usize, node: &ProblemNode) {
    let problem = &node.problem;
    match &node.translation {
        LocalizedTranslation::Present(translation) => {
            line(
                out,
                depth,
                format!(
                    "Problem #{} {} (difficulty {}): {}",
                    problem.id, problem.problem_type, problem.difficulty, translation.translation.title
                ),
            );
            for choice in &translation.choices {
                let mark = if choice.is_correct { "[x]" } else { "[ ]" };
                line(out, depth + 1, format!("{mark} {}. {}", choice.seq, choice.content));
            }
        }
        LocalizedTranslation::Missing { locale } => {
            line(
                out,
                depth,
                format!(
                    "Problem #{} {} (difficulty {}): <no '{locale}' translation>",
                    problem.id, problem.problem_type, problem.difficulty
                ),
            );
        }
    }
}

impl Outline for ExamTree {
    fn outline(&self) -> String {
        let mut out = String::new();
        let status = if self.exam.is_active { "active" } else { "inactive" };
        line(
            &mut out,
            0,
            format!(
                "Exam #{} {} ({} min, {status}) [{}]",
                self.exam.id, self.exam.title, self.exam.time_limit, self.locale
            ),
        );
        if self.is_empty() {
            line(&mut out, 1, "(no sections)");
        }
        for section in &self.sections {
            line(
                &mut out,
                1,
                format!("Section {}. {}", section.section.seq, section.section.title),
            );
            for topic in &section.topics {
                line(
                    &mut out,
                    2,
                    format!("Topic {}. {}", topic.topic.seq, topic.topic.title),
                );
                for unit in &topic.units {
                    unit_lines(&mut out, 3, unit);
                }
            }
            for unit in &section.units {
                unit_lines(&mut out, 2, unit);
            }
        }
        out
    }
}

impl Outline for CascadeReport {
    fn outline(&self) -> String {
        let mut out = String::new();
        line(
            &mut out,
            0,
            format!(
                "Deleted exam #{} {} ({} rows)",
                self.exam_id,
                self.title,
                self.total()
            ),
        );
        for deletion in &self.levels {
            line(&mut out, 1, format!("{:<13}{}", deletion.level.as_str(), deletion.rows));
        }
        out
    }
}
