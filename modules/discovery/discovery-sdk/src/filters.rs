use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Active discovery predicate. Pure value; no side effects.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Filters {
    pub search_term: String,
    pub specializations: Vec<String>,
    pub languages: Vec<String>,
    pub availability: Vec<String>,
    pub location_search: String,
    pub show_only_liked: bool,
}

impl Filters {
    #[must_use]
    pub fn with_specializations<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.specializations = values.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_languages<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = values.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_availability<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.availability = values.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    #[must_use]
    pub fn with_location_search(mut self, location: impl Into<String>) -> Self {
        self.location_search = location.into();
        self
    }

    #[must_use]
    pub fn only_liked(mut self, value: bool) -> Self {
        self.show_only_liked = value;
        self
    }
}

/// Presentation over the accumulated result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Spotlight,
    Grid,
    Map,
}

impl ViewMode {
    /// Spotlight pre-fetch size.
    pub const SPOTLIGHT_PAGE_SIZE: usize = 20;
    /// Grid fetch size: three client-side pages of [`Self::GRID_ITEMS_PER_PAGE`].
    pub const GRID_PAGE_SIZE: usize = 27;
    pub const GRID_ITEMS_PER_PAGE: usize = 9;

    /// Default remote page size for this mode. Map shares the grid size.
    #[must_use]
    pub fn page_size(self) -> usize {
        match self {
            ViewMode::Spotlight => Self::SPOTLIGHT_PAGE_SIZE,
            ViewMode::Grid | ViewMode::Map => Self::GRID_PAGE_SIZE,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ViewMode::Spotlight => "spotlight",
            ViewMode::Grid => "grid",
            ViewMode::Map => "map",
        })
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "spotlight" => Ok(ViewMode::Spotlight),
            "grid" => Ok(ViewMode::Grid),
            "map" => Ok(ViewMode::Map),
            other => Err(format!("unknown view mode '{other}'")),
        }
    }
}
