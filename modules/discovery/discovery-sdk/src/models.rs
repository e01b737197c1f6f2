//! Public models for the discovery module.
//!
//! Field names follow the document layout of the `therapistsData` collection
//! (camelCase on the wire).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Visibility lifecycle shared by therapist and clinic records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStatus {
    #[default]
    Draft,
    PendingApproval,
    Live,
    Rejected,
}

impl LifecycleStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LifecycleStatus::Draft => "draft",
            LifecycleStatus::PendingApproval => "pending_approval",
            LifecycleStatus::Live => "live",
            LifecycleStatus::Rejected => "rejected",
        }
    }

    #[must_use]
    pub fn is_live(self) -> bool {
        self == LifecycleStatus::Live
    }
}

impl fmt::Display for LifecycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifecycleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(LifecycleStatus::Draft),
            "pending_approval" => Ok(LifecycleStatus::PendingApproval),
            "live" => Ok(LifecycleStatus::Live),
            "rejected" => Ok(LifecycleStatus::Rejected),
            other => Err(format!("unknown lifecycle status '{other}'")),
        }
    }
}

/// WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Finite and inside the latitude/longitude ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeLocation {
    pub address: String,
    #[serde(default)]
    pub coordinates: Option<GeoPoint>,
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub id: String,
    pub name: String,
    pub issuer: String,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub verified: bool,
}

/// Membership application or renewal attached to a listing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipApplication {
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub applied_at: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub renewal_due_at: Option<OffsetDateTime>,
    #[serde(default)]
    pub payment_receipt_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Therapist {
    pub id: String,
    pub name: String,
    pub bio: String,
    pub profile_picture_url: Option<String>,
    pub intro_video_url: Option<String>,
    pub specializations: Vec<String>,
    pub other_specializations: Option<String>,
    pub languages: Vec<String>,
    pub other_languages: Option<String>,
    pub qualifications: Vec<String>,
    pub availability: Vec<String>,
    pub locations: Vec<PracticeLocation>,
    pub whatsapp_number: Option<String>,
    pub account_status: LifecycleStatus,
    pub certifications: Vec<Certification>,
    pub membership: Option<MembershipApplication>,
    pub admin_notes: Option<String>,
}

impl Therapist {
    /// Empty draft profile created on first dashboard visit.
    #[must_use]
    pub fn draft(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn primary_location(&self) -> Option<&PracticeLocation> {
        self.locations
            .iter()
            .find(|l| l.is_primary)
            .or_else(|| self.locations.first())
    }

    /// Keep exactly one primary location when any location exists.
    ///
    /// The first location flagged primary wins; with none flagged the first
    /// location becomes primary.
    pub fn normalize_primary_location(&mut self) {
        let primary = self
            .locations
            .iter()
            .position(|l| l.is_primary)
            .unwrap_or(0);
        for (i, location) in self.locations.iter_mut().enumerate() {
            location.is_primary = i == primary;
        }
    }
}
