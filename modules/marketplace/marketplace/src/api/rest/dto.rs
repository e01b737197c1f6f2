use std::collections::BTreeMap;

use discovery_sdk::Therapist;
use marketplace_sdk::{InquiryStatus, ModerationDecision};
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Admin verdict on a pending listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ModerationRequest {
    pub decision: ModerationDecision,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InquiryStatusRequest {
    pub status: InquiryStatus,
    #[serde(default)]
    pub reply: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerifyCertificationRequest {
    pub verified: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InquiryListParams {
    #[serde(default)]
    pub status: Option<String>,
}

impl InquiryListParams {
    pub fn status(&self) -> Result<Option<InquiryStatus>, DomainError> {
        self.status
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| s.parse().map_err(|e: String| DomainError::validation("status", e)))
            .transpose()
    }
}

/// Saved therapist as shown on the client dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteCardDto {
    pub id: String,
    pub name: String,
    pub profile_picture_url: Option<String>,
    pub specializations: Vec<String>,
    pub primary_address: Option<String>,
}

impl From<Therapist> for FavoriteCardDto {
    fn from(t: Therapist) -> Self {
        let primary_address = t.primary_location().map(|l| l.address.clone());
        Self {
            id: t.id,
            name: t.name,
            profile_picture_url: t.profile_picture_url,
            specializations: t.specializations,
            primary_address,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDashboardDto {
    pub favorites: Vec<FavoriteCardDto>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleTableDto {
    pub lang: String,
    pub strings: BTreeMap<String, String>,
}
