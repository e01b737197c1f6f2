//! Upload kinds and file descriptors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Size and type limits are defined per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCategory {
    Image,
    Video,
    /// PDFs, plus scanned images.
    Document,
}

impl FileCategory {
    #[must_use]
    pub fn allowed_content_types(self) -> &'static [&'static str] {
        match self {
            FileCategory::Image => &["image/jpeg", "image/png", "image/webp", "image/gif"],
            FileCategory::Video => &["video/mp4", "video/webm", "video/quicktime"],
            FileCategory::Document => &["application/pdf", "image/jpeg", "image/png"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadKind {
    ProfilePicture,
    IntroVideo,
    CertificationFile,
    ClinicPhoto,
    SpacePhoto,
    PaymentReceipt,
}

impl UploadKind {
    #[must_use]
    pub fn category(self) -> FileCategory {
        match self {
            UploadKind::ProfilePicture | UploadKind::ClinicPhoto | UploadKind::SpacePhoto => {
                FileCategory::Image
            }
            UploadKind::IntroVideo => FileCategory::Video,
            UploadKind::CertificationFile | UploadKind::PaymentReceipt => FileCategory::Document,
        }
    }

    /// Storage folder for this kind.
    #[must_use]
    pub fn folder(self) -> &'static str {
        match self {
            UploadKind::ProfilePicture => "profile_pictures",
            UploadKind::IntroVideo => "intro_videos",
            UploadKind::CertificationFile => "certifications",
            UploadKind::ClinicPhoto => "clinic_photos",
            UploadKind::SpacePhoto => "space_photos",
            UploadKind::PaymentReceipt => "payment_receipts",
        }
    }
}

impl fmt::Display for UploadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.folder())
    }
}

impl FromStr for UploadKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "profile_picture" => Ok(UploadKind::ProfilePicture),
            "intro_video" => Ok(UploadKind::IntroVideo),
            "certification_file" => Ok(UploadKind::CertificationFile),
            "clinic_photo" => Ok(UploadKind::ClinicPhoto),
            "space_photo" => Ok(UploadKind::SpacePhoto),
            "payment_receipt" => Ok(UploadKind::PaymentReceipt),
            other => Err(format!("unknown upload kind '{other}'")),
        }
    }
}

/// File metadata as presented by the browser before upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileCandidate {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    pub path: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_categories() {
        assert_eq!(UploadKind::IntroVideo.category(), FileCategory::Video);
        assert_eq!(UploadKind::SpacePhoto.category(), FileCategory::Image);
        assert_eq!(
            UploadKind::PaymentReceipt.category(),
            FileCategory::Document
        );
        assert!(
            FileCategory::Document
                .allowed_content_types()
                .contains(&"application/pdf")
        );
    }

    #[test]
    fn kind_parses_from_path_segment() {
        assert_eq!(
            "certification_file".parse::<UploadKind>(),
            Ok(UploadKind::CertificationFile)
        );
        assert!("avatar".parse::<UploadKind>().is_err());
    }
}
