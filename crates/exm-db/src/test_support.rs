//! Shared test utilities for exm-db unit tests.

pub(crate) mod helpers {
    use exm_core::entities::{Choice, Exam, Problem, ProblemTranslation, Section, Unit};

    use crate::IN_MEMORY;
    use crate::inserts::{NewChoice, NewExam, NewProblem, NewSection, NewTranslation, NewUnit};
    use crate::service::ExamService;

    /// Create an in-memory ExamService.
    pub async fn test_service() -> ExamService {
        ExamService::new_local(IN_MEMORY).await.unwrap()
    }

    /// One exam with a single path down to two choices.
    pub struct Fixture {
        pub exam: Exam,
        pub section: Section,
        pub unit: Unit,
        pub problem: Problem,
        pub translation: ProblemTranslation,
        pub choices: Vec<Choice>,
    }

    /// Exam "E1" (60 min) → Section "S1" → Unit "U1" → one problem with an
    /// `en` translation and two choices (seq 1 correct, seq 2 wrong).
    pub async fn seed_minimal(svc: &ExamService, title: &str) -> Fixture {
        let exam = svc
            .create_exam(NewExam::new(title).time_limit(60).active(true))
            .await
            .unwrap();
        let section = svc
            .create_section(NewSection::new(exam.id, "S1", 1))
            .await
            .unwrap();
        let unit = svc
            .create_unit(NewUnit::new(exam.id, "U1", 1).section(section.id))
            .await
            .unwrap();
        let problem = svc
            .create_problem(NewProblem::new(unit.id, "SOURCE").difficulty(1))
            .await
            .unwrap();
        let translation = svc
            .create_translation(NewTranslation::new(
                problem.id,
                "en",
                "CAP Theorem",
                "Which two properties cannot hold together?",
            ))
            .await
            .unwrap();
        let choices = svc
            .create_choices(
                translation.id,
                vec![
                    NewChoice::correct("Consistency & Availability", 1),
                    NewChoice::wrong("Reliability & Scalability", 2),
                ],
            )
            .await
            .unwrap();

        Fixture {
            exam,
            section,
            unit,
            problem,
            translation,
            choices,
        }
    }
}
