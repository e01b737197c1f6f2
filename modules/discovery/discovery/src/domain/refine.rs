//! Client-side refinement of a fetched page.
//!
//! Covers predicates the store cannot evaluate: substring search on name/bio,
//! substring search on practice addresses and the favorites intersection. It
//! only sees the current page, so a narrow text search over a broad server
//! filter can produce an empty page while later pages would still match.

use std::collections::BTreeSet;

use discovery_sdk::{Filters, Therapist};

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// `favorites` is `Some` only for authenticated callers.
#[must_use]
pub fn matches(
    therapist: &Therapist,
    filters: &Filters,
    favorites: Option<&BTreeSet<String>>,
) -> bool {
    let term = filters.search_term.trim().to_lowercase();
    if !term.is_empty()
        && !contains_ci(&therapist.name, &term)
        && !contains_ci(&therapist.bio, &term)
    {
        return false;
    }

    let location = filters.location_search.trim().to_lowercase();
    if !location.is_empty()
        && !therapist
            .locations
            .iter()
            .any(|l| contains_ci(&l.address, &location))
    {
        return false;
    }

    if filters.show_only_liked {
        if let Some(favorites) = favorites {
            return favorites.contains(&therapist.id);
        }
    }

    true
}

#[must_use]
pub fn refine(
    items: Vec<Therapist>,
    filters: &Filters,
    favorites: Option<&BTreeSet<String>>,
) -> Vec<Therapist> {
    items
        .into_iter()
        .filter(|t| matches(t, filters, favorites))
        .collect()
}
