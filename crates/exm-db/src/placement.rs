//! Unit placement enforcer.
//!
//! A unit hangs under a section XOR a topic. Every unit create and update
//! passes its proposed parent fields through this module before any SQL is
//! built; the resolved [`Placement`] then writes both columns in the same
//! statement, so no intermediate state with two parents (or none) ever
//! reaches the store.
//!
//! Rules, in precedence order:
//! 1. A non-null `topic_id` wins. `section_id` is cleared even if a section
//!    was proposed in the same mutation.
//! 2. A non-null `section_id` (with no topic proposed) clears `topic_id`.
//! 3. Otherwise the current placement is kept, minus any parent the mutation
//!    explicitly clears. Clearing the only parent is an invariant violation.

use exm_core::entities::Placement;
use exm_core::ids::{SectionId, TopicId};

use crate::error::DatabaseError;

const NO_PARENT: &str = "a unit must be placed under exactly one section or topic";

/// Resolve the placement of a new unit from its proposed parent fields.
///
/// # Errors
///
/// Returns `DatabaseError::InvariantViolation` if neither parent is given.
pub fn resolve_create(
    section_id: Option<SectionId>,
    topic_id: Option<TopicId>,
) -> Result<Placement, DatabaseError> {
    match (section_id, topic_id) {
        (_, Some(topic)) => Ok(Placement::Topic(topic)),
        (Some(section), None) => Ok(Placement::Section(section)),
        (None, None) => Err(DatabaseError::InvariantViolation(NO_PARENT.into())),
    }
}

/// Resolve the placement after applying a partial update to `current`.
///
/// `None` leaves a column untouched, `Some(None)` clears it, `Some(Some(id))`
/// sets it.
///
/// # Errors
///
/// Returns `DatabaseError::InvariantViolation` if the update would leave the
/// unit without a parent.
pub fn resolve_update(
    current: Placement,
    section_id: Option<Option<SectionId>>,
    topic_id: Option<Option<TopicId>>,
) -> Result<Placement, DatabaseError> {
    if let Some(Some(topic)) = topic_id {
        return Ok(Placement::Topic(topic));
    }
    if let Some(Some(section)) = section_id {
        return Ok(Placement::Section(section));
    }

    let kept = match current {
        Placement::Section(_) if section_id.is_some() => None,
        Placement::Topic(_) if topic_id.is_some() => None,
        other => Some(other),
    };
    kept.ok_or_else(|| DatabaseError::InvariantViolation(NO_PARENT.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const S1: SectionId = SectionId(1);
    const S2: SectionId = SectionId(2);
    const T1: TopicId = TopicId(1);
    const T2: TopicId = TopicId(2);

    #[rstest]
    #[case::section_only(Some(S1), None, Placement::Section(S1))]
    #[case::topic_only(None, Some(T1), Placement::Topic(T1))]
    #[case::topic_wins_over_section(Some(S1), Some(T1), Placement::Topic(T1))]
    fn create_resolves(
        #[case] section: Option<SectionId>,
        #[case] topic: Option<TopicId>,
        #[case] expected: Placement,
    ) {
        assert_eq!(resolve_create(section, topic).unwrap(), expected);
    }

    #[test]
    fn create_without_parent_is_rejected() {
        assert!(matches!(
            resolve_create(None, None),
            Err(DatabaseError::InvariantViolation(_))
        ));
    }

    #[rstest]
    #[case::untouched(Placement::Section(S1), None, None, Placement::Section(S1))]
    #[case::section_to_topic(Placement::Section(S1), None, Some(Some(T1)), Placement::Topic(T1))]
    #[case::topic_to_section(Placement::Topic(T1), Some(Some(S2)), None, Placement::Section(S2))]
    #[case::topic_to_topic(Placement::Topic(T1), None, Some(Some(T2)), Placement::Topic(T2))]
    #[case::both_proposed_topic_wins(
        Placement::Section(S1),
        Some(Some(S2)),
        Some(Some(T2)),
        Placement::Topic(T2)
    )]
    #[case::clear_section_set_topic(
        Placement::Section(S1),
        Some(None),
        Some(Some(T1)),
        Placement::Topic(T1)
    )]
    #[case::clearing_absent_parent_is_noop(Placement::Topic(T1), Some(None), None, Placement::Topic(T1))]
    fn update_resolves(
        #[case] current: Placement,
        #[case] section: Option<Option<SectionId>>,
        #[case] topic: Option<Option<TopicId>>,
        #[case] expected: Placement,
    ) {
        assert_eq!(resolve_update(current, section, topic).unwrap(), expected);
    }

    #[rstest]
    #[case::clear_only_section(Placement::Section(S1), Some(None), None)]
    #[case::clear_only_topic(Placement::Topic(T1), None, Some(None))]
    #[case::clear_both(Placement::Topic(T1), Some(None), Some(None))]
    fn update_leaving_no_parent_is_rejected(
        #[case] current: Placement,
        #[case] section: Option<Option<SectionId>>,
        #[case] topic: Option<Option<TopicId>>,
    ) {
        assert!(matches!(
            resolve_update(current, section, topic),
            Err(DatabaseError::InvariantViolation(_))
        ));
    }

    #[test]
    fn resolved_placement_never_sets_both_columns() {
        let proposals = [None, Some(None), Some(Some(S2))];
        let topic_proposals = [None, Some(None), Some(Some(T2))];
        for current in [Placement::Section(S1), Placement::Topic(T1)] {
            for section in proposals {
                for topic in topic_proposals {
                    if let Ok(placement) = resolve_update(current, section, topic) {
                        let (s, t) = placement.columns();
                        assert!(s.is_some() != t.is_some());
                    }
                }
            }
        }
    }
}
