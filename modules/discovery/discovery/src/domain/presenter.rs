//! View-mode state over the accumulated result list.
//!
//! Spotlight, grid and map share one list. Spotlight owns `current_index`,
//! grid owns an independent 1-based page counter, map derives markers and a
//! viewport from the list. Switching mode touches none of the list state.

use discovery_sdk::{GeoPoint, Therapist, ViewMode};
use serde::Serialize;

/// Direction of the spotlight card exit animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideDirection {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowLeft,
    ArrowRight,
}

impl NavKey {
    #[must_use]
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(NavKey::ArrowLeft),
            "ArrowRight" => Some(NavKey::ArrowRight),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    pub therapist_id: String,
    pub therapist_name: String,
    pub address: String,
    pub position: GeoPoint,
    pub is_primary: bool,
}

/// Bounding box fitted to the current marker set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapViewport {
    pub south_west: GeoPoint,
    pub north_east: GeoPoint,
    pub center: GeoPoint,
}

impl MapViewport {
    #[must_use]
    pub fn fit(markers: &[MapMarker]) -> Option<Self> {
        let first = markers.first()?.position;
        let (mut south, mut west, mut north, mut east) = (first.lat, first.lng, first.lat, first.lng);
        for m in &markers[1..] {
            south = south.min(m.position.lat);
            north = north.max(m.position.lat);
            west = west.min(m.position.lng);
            east = east.max(m.position.lng);
        }
        Some(Self {
            south_west: GeoPoint::new(south, west),
            north_east: GeoPoint::new(north, east),
            center: GeoPoint::new(f64::midpoint(south, north), f64::midpoint(west, east)),
        })
    }
}

/// One marker per valid coordinate of every listed therapist.
#[must_use]
pub fn map_markers(list: &[Therapist]) -> Vec<MapMarker> {
    list.iter()
        .flat_map(|t| {
            t.locations.iter().filter_map(move |l| {
                let position = l.coordinates.filter(GeoPoint::is_valid)?;
                Some(MapMarker {
                    therapist_id: t.id.clone(),
                    therapist_name: t.name.clone(),
                    address: l.address.clone(),
                    position,
                    is_primary: l.is_primary,
                })
            })
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct ViewModePresenter {
    mode: ViewMode,
    current_index: usize,
    grid_page: usize,
    grid_page_size: usize,
    last_direction: Option<SlideDirection>,
    viewport: Option<MapViewport>,
}

impl ViewModePresenter {
    #[must_use]
    pub fn new(mode: ViewMode, grid_page_size: usize) -> Self {
        Self {
            mode,
            current_index: 0,
            grid_page: 1,
            grid_page_size: grid_page_size.max(1),
            last_direction: None,
            viewport: None,
        }
    }

    #[must_use]
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn grid_page(&self) -> usize {
        self.grid_page
    }

    #[must_use]
    pub fn last_direction(&self) -> Option<SlideDirection> {
        self.last_direction
    }

    #[must_use]
    pub fn viewport(&self) -> Option<MapViewport> {
        self.viewport
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    /// Back to the first card and first grid page (new filter set).
    pub fn reset(&mut self) {
        self.current_index = 0;
        self.grid_page = 1;
        self.last_direction = None;
        self.viewport = None;
    }

    /// No upper clamp: moving past the loaded window drives look-ahead fetching.
    pub fn advance(&mut self) -> SlideDirection {
        self.current_index += 1;
        self.last_direction = Some(SlideDirection::Left);
        SlideDirection::Left
    }

    pub fn retreat(&mut self) -> SlideDirection {
        self.current_index = self.current_index.saturating_sub(1);
        self.last_direction = Some(SlideDirection::Right);
        SlideDirection::Right
    }

    /// Keyboard navigation; only active in spotlight mode.
    pub fn handle_key(&mut self, key: NavKey) -> Option<SlideDirection> {
        if self.mode != ViewMode::Spotlight {
            return None;
        }
        Some(match key {
            NavKey::ArrowRight => self.advance(),
            NavKey::ArrowLeft => self.retreat(),
        })
    }

    pub fn focus(&mut self, index: usize) {
        self.current_index = index;
        self.last_direction = None;
    }

    #[must_use]
    pub fn spotlight_item<'a>(&self, list: &'a [Therapist]) -> Option<&'a Therapist> {
        list.get(self.current_index)
    }

    #[must_use]
    pub fn total_grid_pages(&self, len: usize) -> usize {
        len.div_ceil(self.grid_page_size)
    }

    /// Clamp to `1..=total_grid_pages` (page 1 when the list is empty).
    pub fn set_grid_page(&mut self, page: usize, len: usize) -> usize {
        let total = self.total_grid_pages(len).max(1);
        self.grid_page = page.clamp(1, total);
        self.grid_page
    }

    #[must_use]
    pub fn grid_items<'a>(&self, list: &'a [Therapist]) -> &'a [Therapist] {
        let start = (self.grid_page - 1) * self.grid_page_size;
        if start >= list.len() {
            return &[];
        }
        let end = (start + self.grid_page_size).min(list.len());
        &list[start..end]
    }

    /// Refit the map after any change to the list.
    pub fn on_list_changed(&mut self, list: &[Therapist]) {
        self.viewport = MapViewport::fit(&map_markers(list));
    }
}
