//! Filters → remote query translation.

use discovery_sdk::{Cursor, Filters, LifecycleStatus, ViewMode};

use crate::config::DiscoveryConfig;
use crate::domain::ports::{Constraint, OrderField, TagField, TherapistQuery};

/// Build the store query for `filters`.
///
/// The `live` status predicate is always present, so an empty filter set never
/// exposes draft, pending or rejected records. Each non-empty tag category adds
/// one any-of constraint; the store ANDs them.
#[must_use]
pub fn translate(
    filters: &Filters,
    mode: ViewMode,
    cfg: &DiscoveryConfig,
    cursor: Option<Cursor>,
) -> TherapistQuery {
    let mut constraints = vec![Constraint::StatusEquals(LifecycleStatus::Live)];

    for (field, values) in [
        (TagField::Specializations, &filters.specializations),
        (TagField::Languages, &filters.languages),
        (TagField::Availability, &filters.availability),
    ] {
        let values: Vec<String> = values
            .iter()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
            .collect();
        if !values.is_empty() {
            constraints.push(Constraint::ArrayContainsAny { field, values });
        }
    }

    let query = TherapistQuery {
        constraints,
        order_by: OrderField::Name,
        limit: cfg.limit_for(mode),
        start_after: cursor,
    };
    tracing::debug!(
        constraints = query.constraints.len(),
        limit = query.limit,
        paging = query.start_after.is_some(),
        "translated discovery filters"
    );
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filters_still_require_live() {
        let q = translate(
            &Filters::default(),
            ViewMode::Spotlight,
            &DiscoveryConfig::default(),
            None,
        );
        assert_eq!(
            q.constraints,
            vec![Constraint::StatusEquals(LifecycleStatus::Live)]
        );
        assert_eq!(q.limit, 20);
        assert_eq!(q.order_by, OrderField::Name);
        assert!(q.start_after.is_none());
    }

    #[test]
    fn one_constraint_per_non_empty_category() {
        let filters = Filters::default()
            .with_specializations(["Anxiety Counseling"])
            .with_languages(["English", "Arabic"]);
        let q = translate(
            &filters,
            ViewMode::Grid,
            &DiscoveryConfig::default(),
            Some(Cursor::new("abc")),
        );
        assert_eq!(q.constraints.len(), 3);
        assert!(q.constraints.contains(&Constraint::ArrayContainsAny {
            field: TagField::Languages,
            values: vec!["English".to_owned(), "Arabic".to_owned()],
        }));
        assert_eq!(q.limit, 27);
        assert_eq!(q.start_after, Some(Cursor::new("abc")));
    }

    #[test]
    fn blank_tag_values_are_ignored() {
        let filters = Filters::default().with_availability(["  ", ""]);
        let q = translate(&filters, ViewMode::Map, &DiscoveryConfig::default(), None);
        assert_eq!(q.constraints.len(), 1);
    }

    #[test]
    fn text_filters_do_not_reach_the_store() {
        let filters = Filters::default()
            .with_search_term("ada")
            .with_location_search("cairo")
            .only_liked(true);
        let q = translate(
            &filters,
            ViewMode::Spotlight,
            &DiscoveryConfig::default(),
            None,
        );
        assert_eq!(q.constraints.len(), 1);
    }
}
