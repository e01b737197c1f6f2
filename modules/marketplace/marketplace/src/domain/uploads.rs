//! File validation before anything reaches object storage.

use marketplace_sdk::{FileCandidate, FileCategory, UploadKind};
use uuid::Uuid;

use super::error::DomainError;
use crate::config::MarketplaceConfig;

/// Per-category size limits in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_image_bytes: u64,
    pub max_video_bytes: u64,
    pub max_document_bytes: u64,
}

impl From<&MarketplaceConfig> for UploadPolicy {
    fn from(cfg: &MarketplaceConfig) -> Self {
        Self {
            max_image_bytes: MarketplaceConfig::mib(cfg.max_image_mb),
            max_video_bytes: MarketplaceConfig::mib(cfg.max_video_mb),
            max_document_bytes: MarketplaceConfig::mib(cfg.max_document_mb),
        }
    }
}

impl UploadPolicy {
    #[must_use]
    pub fn limit_for(&self, category: FileCategory) -> u64 {
        match category {
            FileCategory::Image => self.max_image_bytes,
            FileCategory::Video => self.max_video_bytes,
            FileCategory::Document => self.max_document_bytes,
        }
    }

    /// Check size and content type for `kind`.
    pub fn validate(&self, kind: UploadKind, file: &FileCandidate) -> Result<(), DomainError> {
        let category = kind.category();
        if file.size_bytes == 0 {
            return Err(DomainError::file_rejected("file is empty"));
        }
        let limit = self.limit_for(category);
        if file.size_bytes > limit {
            return Err(DomainError::file_rejected(format!(
                "{} exceeds the {} MB limit for {kind}",
                file.file_name,
                limit / (1024 * 1024)
            )));
        }
        let mime: mime::Mime = file.content_type.parse().map_err(|_| {
            DomainError::file_rejected(format!(
                "content type '{}' is not a valid media type",
                file.content_type
            ))
        })?;
        let content_type = mime.essence_str();
        if !category
            .allowed_content_types()
            .iter()
            .any(|allowed| *allowed == content_type)
        {
            return Err(DomainError::file_rejected(format!(
                "content type '{content_type}' is not accepted for {kind}"
            )));
        }
        Ok(())
    }
}

/// `{owner}/{folder}/{uuid}-{name}` with the file name reduced to a safe charset.
#[must_use]
pub fn storage_path(owner_id: &str, kind: UploadKind, file_name: &str) -> String {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or_default();
    let mut safe: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if safe.trim_matches(['.', '_']).is_empty() {
        safe = "file".to_owned();
    }
    format!("{owner_id}/{}/{}-{safe}", kind.folder(), Uuid::new_v4())
}
