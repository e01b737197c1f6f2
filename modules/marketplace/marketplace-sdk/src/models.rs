//! Public models for the marketplace module.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use discovery_sdk::{LifecycleStatus, MembershipApplication, PracticeLocation};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Admin verdict on a listing awaiting approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationDecision {
    Approve,
    Reject,
}

impl ModerationDecision {
    #[must_use]
    pub fn target_status(self) -> LifecycleStatus {
        match self {
            ModerationDecision::Approve => LifecycleStatus::Live,
            ModerationDecision::Reject => LifecycleStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Clinic {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub description: String,
    pub address: String,
    pub amenities: Vec<String>,
    /// Day name to opening hours, e.g. `"monday" -> "09:00-17:00"`.
    pub operating_hours: BTreeMap<String, String>,
    pub whatsapp_number: Option<String>,
    pub account_status: LifecycleStatus,
    pub membership: Option<MembershipApplication>,
    pub admin_notes: Option<String>,
    pub listings: Vec<ClinicSpaceListing>,
}

impl Clinic {
    #[must_use]
    pub fn draft(id: impl Into<String>, owner_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            ..Self::default()
        }
    }
}

/// Rentable space inside a clinic. Clinic name and address are copied in for display.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClinicSpaceListing {
    pub id: String,
    pub clinic_id: String,
    pub clinic_name: String,
    pub clinic_address: String,
    pub name: String,
    pub description: String,
    pub photos: Vec<String>,
    pub rental_price: f64,
    pub rental_duration: String,
    pub rental_terms: String,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewSpaceListing {
    pub name: String,
    pub description: String,
    pub photos: Vec<String>,
    pub rental_price: f64,
    pub rental_duration: String,
    pub rental_terms: String,
    pub features: Vec<String>,
}

/// Partial update of a therapist profile; `None` leaves a field unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TherapistPatch {
    pub name: Option<String>,
    pub bio: Option<String>,
    /// Empty string clears the picture.
    pub profile_picture_url: Option<String>,
    /// Empty string clears the video.
    pub intro_video_url: Option<String>,
    pub specializations: Option<Vec<String>>,
    pub other_specializations: Option<String>,
    pub languages: Option<Vec<String>>,
    pub other_languages: Option<String>,
    pub qualifications: Option<Vec<String>>,
    pub availability: Option<Vec<String>>,
    pub locations: Option<Vec<PracticeLocation>>,
    pub whatsapp_number: Option<String>,
    pub payment_receipt_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClinicPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub amenities: Option<Vec<String>>,
    pub operating_hours: Option<BTreeMap<String, String>>,
    pub whatsapp_number: Option<String>,
    pub payment_receipt_url: Option<String>,
}

/// Certification uploaded by a therapist; admins verify it later.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewCertification {
    pub name: String,
    pub issuer: String,
    pub file_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InquiryStatus {
    #[default]
    Open,
    Closed,
    Escalated,
}

impl InquiryStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            InquiryStatus::Open => "open",
            InquiryStatus::Closed => "closed",
            InquiryStatus::Escalated => "escalated",
        }
    }

    /// Only open inquiries move, and only to closed or escalated.
    #[must_use]
    pub fn can_transition_to(self, next: InquiryStatus) -> bool {
        matches!(
            (self, next),
            (
                InquiryStatus::Open,
                InquiryStatus::Closed | InquiryStatus::Escalated
            )
        )
    }
}

impl fmt::Display for InquiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InquiryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(InquiryStatus::Open),
            "closed" => Ok(InquiryStatus::Closed),
            "escalated" => Ok(InquiryStatus::Escalated),
            other => Err(format!("unknown inquiry status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInquiry {
    pub id: String,
    pub user_id: Option<String>,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: InquiryStatus,
    pub admin_reply: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewInquiry {
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Append-only audit record of an administrative or owner action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub id: String,
    pub actor_id: String,
    pub action: String,
    pub target_id: String,
    pub details: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub at: OffsetDateTime,
}
