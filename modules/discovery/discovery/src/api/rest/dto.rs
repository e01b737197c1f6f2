//! REST DTOs for discovery.

use std::collections::BTreeSet;

use discovery_sdk::{
    Certification, Cursor, Filters, Page, PracticeLocation, Therapist, ViewMode,
};
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::presenter::{MapMarker, MapViewport, NavKey, SlideDirection};
use crate::domain::session::{SessionId, SessionStatus, SessionView};

/// Public therapist card. Moderation data never leaves the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TherapistDto {
    pub id: String,
    pub name: String,
    pub bio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intro_video_url: Option<String>,
    pub specializations: Vec<String>,
    pub languages: Vec<String>,
    pub qualifications: Vec<String>,
    pub availability: Vec<String>,
    pub locations: Vec<PracticeLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_number: Option<String>,
    pub certifications: Vec<Certification>,
}

impl From<Therapist> for TherapistDto {
    fn from(t: Therapist) -> Self {
        let mut specializations = t.specializations;
        specializations.extend(t.other_specializations.filter(|s| !s.trim().is_empty()));
        let mut languages = t.languages;
        languages.extend(t.other_languages.filter(|s| !s.trim().is_empty()));
        Self {
            id: t.id,
            name: t.name,
            bio: t.bio,
            profile_picture_url: t.profile_picture_url,
            intro_video_url: t.intro_video_url,
            specializations,
            languages,
            qualifications: t.qualifications,
            availability: t.availability,
            locations: t.locations,
            whatsapp_number: t.whatsapp_number,
            certifications: t.certifications.into_iter().filter(|c| c.verified).collect(),
        }
    }
}

/// `GET /find/therapists` query string. List parameters are comma-separated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub search: Option<String>,
    pub specializations: Option<String>,
    pub languages: Option<String>,
    pub availability: Option<String>,
    pub location: Option<String>,
    pub liked: Option<bool>,
    pub view: Option<String>,
    pub cursor: Option<String>,
}

fn split_list(raw: Option<String>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
            .collect()
    })
    .unwrap_or_default()
}

pub fn parse_view(raw: Option<&str>) -> Result<ViewMode, DomainError> {
    raw.map_or(Ok(ViewMode::default()), |v| {
        v.parse().map_err(|e: String| DomainError::validation("view", e))
    })
}

impl SearchParams {
    pub fn into_parts(self) -> Result<(Filters, ViewMode, Option<Cursor>), DomainError> {
        let mode = parse_view(self.view.as_deref())?;
        let cursor = self.cursor.filter(|c| !c.is_empty()).map(Cursor::new);
        let filters = Filters {
            search_term: self.search.unwrap_or_default(),
            specializations: split_list(self.specializations),
            languages: split_list(self.languages),
            availability: split_list(self.availability),
            location_search: self.location.unwrap_or_default(),
            show_only_liked: self.liked.unwrap_or(false),
        };
        Ok((filters, mode, cursor))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TherapistPageDto {
    pub items: Vec<TherapistDto>,
    pub next_cursor: Option<Cursor>,
    pub fetched: usize,
    pub is_last: bool,
}

impl From<Page<Therapist>> for TherapistPageDto {
    fn from(page: Page<Therapist>) -> Self {
        let page = page.map_items(TherapistDto::from);
        Self {
            items: page.items,
            next_cursor: page.next_cursor,
            fetched: page.fetched,
            is_last: page.is_last,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpenSessionRequest {
    pub filters: Filters,
    pub mode: ViewMode,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeRequest {
    pub mode: ViewMode,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridPageRequest {
    pub page: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigateRequest {
    pub key: String,
}

impl NavigateRequest {
    pub fn key(&self) -> Result<NavKey, DomainError> {
        NavKey::parse(&self.key)
            .ok_or_else(|| DomainError::validation("key", "expected ArrowLeft or ArrowRight"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub session_id: SessionId,
    pub status: SessionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub filters: Filters,
    pub mode: ViewMode,
    pub total_loaded: usize,
    pub exhausted: bool,
    pub current_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_direction: Option<SlideDirection>,
    pub grid_page: usize,
    pub total_grid_pages: usize,
    pub items: Vec<TherapistDto>,
    pub markers: Vec<MapMarker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewport: Option<MapViewport>,
    pub favorites: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<String>,
}

impl From<SessionView> for SessionDto {
    fn from(v: SessionView) -> Self {
        Self {
            session_id: v.session_id,
            status: v.status,
            error: v.error,
            filters: v.filters,
            mode: v.mode,
            total_loaded: v.total_loaded,
            exhausted: v.exhausted,
            current_index: v.current_index,
            last_direction: v.last_direction,
            grid_page: v.grid_page,
            total_grid_pages: v.total_grid_pages,
            items: v.items.into_iter().map(TherapistDto::from).collect(),
            markers: v.markers,
            viewport: v.viewport,
            favorites: v.favorites,
            flash: v.flash,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesDto {
    pub therapist_ids: BTreeSet<String>,
}
