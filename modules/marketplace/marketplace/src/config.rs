use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const MIB: u64 = 1024 * 1024;

/// Configuration for the marketplace module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarketplaceConfig {
    /// Profile pictures, clinic and space photos.
    pub max_image_mb: u64,
    /// Therapist intro videos.
    pub max_video_mb: u64,
    /// Certification files and payment receipts.
    pub max_document_mb: u64,
    /// Directory holding `{lang}.json` string tables. Unset means no tables.
    pub locales_dir: Option<PathBuf>,
    pub default_locale: String,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            max_image_mb: 5,
            max_video_mb: 50,
            max_document_mb: 10,
            locales_dir: None,
            default_locale: "en".to_owned(),
        }
    }
}

impl MarketplaceConfig {
    /// Largest accepted request body: the biggest per-category limit.
    #[must_use]
    pub fn max_upload_bytes(&self) -> u64 {
        self.max_image_mb
            .max(self.max_video_mb)
            .max(self.max_document_mb)
            .saturating_mul(MIB)
    }

    #[must_use]
    pub(crate) fn mib(mb: u64) -> u64 {
        mb.saturating_mul(MIB)
    }
}
