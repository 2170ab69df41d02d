//! Tree assembler.
//!
//! Loads a whole exam for one locale with exactly one query per level, all
//! scoped to the exam and run inside one transaction. Rows are bucketed by
//! parent id and linked bottom-up; each query is already in presentation
//! order, so buckets keep that order without re-sorting.

use std::collections::HashMap;

use exm_core::entities::{Choice, Placement, Problem, ProblemTranslation, Section, Topic, Unit};
use exm_core::enums::EntityKind;
use exm_core::errors::validate_locale;
use exm_core::ids::{ProblemId, SectionId, TopicId, TranslationId, UnitId};
use exm_core::selector::ExamSelector;
use exm_core::tree::{
    ExamTree, LocalizedTranslation, ProblemNode, SectionNode, TopicNode, TranslationNode, UnitNode,
};
use libsql::params::IntoParams;

use crate::error::{DatabaseError, StoreOp, store_err};
use crate::finish;
use crate::repos::exam::resolve_exam;
use crate::repos::{choice, problem, section, topic, translation, unit};
use crate::scope::exam_predicate;
use crate::service::ExamService;

/// Run one level query and convert every row.
async fn load_level<T>(
    conn: &libsql::Connection,
    entity: EntityKind,
    sql: &str,
    params: impl IntoParams,
    convert: fn(&libsql::Row) -> Result<T, DatabaseError>,
) -> Result<Vec<T>, DatabaseError> {
    let mut rows = conn
        .query(sql, params)
        .await
        .map_err(store_err(StoreOp::Select, entity))?;
    let mut out = Vec::new();
    while let Some(row) = rows.next().await? {
        out.push(convert(&row)?);
    }
    Ok(out)
}

/// Append `item` to the bucket for `key`, keeping arrival order.
fn bucket<K: std::hash::Hash + Eq, V>(map: &mut HashMap<K, Vec<V>>, key: K, item: V) {
    map.entry(key).or_default().push(item);
}

/// Every level of one exam, as read from the store.
struct Levels {
    sections: Vec<Section>,
    topics: Vec<Topic>,
    units: Vec<Unit>,
    problems: Vec<Problem>,
    translations: Vec<ProblemTranslation>,
    choices: Vec<Choice>,
}

async fn read_levels(
    conn: &libsql::Connection,
    exam_id: i64,
    locale: &str,
) -> Result<Levels, DatabaseError> {
    let sections = load_level(
        conn,
        EntityKind::Section,
        &format!(
            "SELECT {} FROM sections WHERE {} ORDER BY seq, id",
            section::SELECT_COLS,
            exam_predicate(EntityKind::Section)
        ),
        [exam_id],
        section::row_to_section,
    )
    .await?;

    let topics = load_level(
        conn,
        EntityKind::Topic,
        &format!(
            "SELECT {} FROM topics WHERE {} ORDER BY seq, id",
            topic::SELECT_COLS,
            exam_predicate(EntityKind::Topic)
        ),
        [exam_id],
        topic::row_to_topic,
    )
    .await?;

    let units = load_level(
        conn,
        EntityKind::Unit,
        &format!(
            "SELECT {} FROM units WHERE {} ORDER BY seq, id",
            unit::SELECT_COLS,
            exam_predicate(EntityKind::Unit)
        ),
        [exam_id],
        unit::row_to_unit,
    )
    .await?;

    let problems = load_level(
        conn,
        EntityKind::Problem,
        &format!(
            "SELECT {} FROM problems WHERE {} ORDER BY created_at, id",
            problem::SELECT_COLS,
            exam_predicate(EntityKind::Problem)
        ),
        [exam_id],
        problem::row_to_problem,
    )
    .await?;

    let translations = load_level(
        conn,
        EntityKind::Translation,
        &format!(
            "SELECT {} FROM problem_translations WHERE {} AND locale = ?2",
            translation::SELECT_COLS,
            exam_predicate(EntityKind::Translation)
        ),
        libsql::params![exam_id, locale],
        translation::row_to_translation,
    )
    .await?;

    let choices = load_level(
        conn,
        EntityKind::Choice,
        &format!(
            "SELECT {} FROM choices WHERE problem_translation_id IN \
             (SELECT id FROM problem_translations WHERE {} AND locale = ?2) \
             ORDER BY seq, id",
            choice::SELECT_COLS,
            exam_predicate(EntityKind::Translation)
        ),
        libsql::params![exam_id, locale],
        choice::row_to_choice,
    )
    .await?;

    Ok(Levels {
        sections,
        topics,
        units,
        problems,
        translations,
        choices,
    })
}

/// Link the flat levels into sections, bottom-up.
fn link(levels: Levels, locale: &str) -> Vec<SectionNode> {
    let mut choices_by_translation: HashMap<TranslationId, Vec<Choice>> = HashMap::new();
    for choice in levels.choices {
        bucket(&mut choices_by_translation, choice.translation_id, choice);
    }

    let mut translation_by_problem: HashMap<ProblemId, TranslationNode> = HashMap::new();
    for translation in levels.translations {
        let choices = choices_by_translation
            .remove(&translation.id)
            .unwrap_or_default();
        translation_by_problem.insert(
            translation.problem_id,
            TranslationNode {
                translation,
                choices,
            },
        );
    }

    let mut problems_by_unit: HashMap<UnitId, Vec<ProblemNode>> = HashMap::new();
    for problem in levels.problems {
        let translation = translation_by_problem.remove(&problem.id).map_or_else(
            || LocalizedTranslation::Missing {
                locale: locale.to_owned(),
            },
            LocalizedTranslation::Present,
        );
        bucket(
            &mut problems_by_unit,
            problem.unit_id,
            ProblemNode {
                problem,
                translation,
            },
        );
    }

    let mut units_by_section: HashMap<SectionId, Vec<UnitNode>> = HashMap::new();
    let mut units_by_topic: HashMap<TopicId, Vec<UnitNode>> = HashMap::new();
    for unit in levels.units {
        let problems = problems_by_unit.remove(&unit.id).unwrap_or_default();
        let placement = unit.placement;
        let node = UnitNode { unit, problems };
        match placement {
            Placement::Section(id) => bucket(&mut units_by_section, id, node),
            Placement::Topic(id) => bucket(&mut units_by_topic, id, node),
        }
    }

    let mut topics_by_section: HashMap<SectionId, Vec<TopicNode>> = HashMap::new();
    for topic in levels.topics {
        let units = units_by_topic.remove(&topic.id).unwrap_or_default();
        bucket(
            &mut topics_by_section,
            topic.section_id,
            TopicNode { topic, units },
        );
    }

    levels
        .sections
        .into_iter()
        .map(|section| SectionNode {
            topics: topics_by_section.remove(&section.id).unwrap_or_default(),
            units: units_by_section.remove(&section.id).unwrap_or_default(),
            section,
        })
        .collect()
}

async fn assemble(
    conn: &libsql::Connection,
    selector: &ExamSelector,
    locale: &str,
) -> Result<ExamTree, DatabaseError> {
    let exam = resolve_exam(conn, selector).await?;
    let levels = read_levels(conn, exam.id.get(), locale).await?;
    Ok(ExamTree {
        sections: link(levels, locale),
        exam,
        locale: locale.to_owned(),
    })
}

impl ExamService {
    /// Load the full tree of one exam with translations for `locale`.
    ///
    /// Problems without a `locale` translation carry
    /// [`LocalizedTranslation::Missing`]; translations in other locales are
    /// never returned. An exam with no sections yields an empty tree.
    ///
    /// # Errors
    ///
    /// `Validation` for a malformed locale, `NotFound` if no exam matches,
    /// `AmbiguousSelector` if a title matches several.
    pub async fn load_exam_tree(
        &self,
        selector: &ExamSelector,
        locale: &str,
    ) -> Result<ExamTree, DatabaseError> {
        validate_locale(locale)?;

        let tx = self.db().begin().await?;
        let result = assemble(&tx, selector, locale).await;
        let tree = finish(tx, result).await?;

        tracing::debug!(
            exam_id = %tree.exam.id,
            locale,
            sections = tree.sections.len(),
            problems = tree.problems().count(),
            missing = tree.problems().filter(|p| p.translation.is_missing()).count(),
            "assembled exam tree"
        );
        Ok(tree)
    }
}
