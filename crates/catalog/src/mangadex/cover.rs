//! Cover image URL derivation.
//!
//! Covers are not stored on the manga; the URL is built from the manga id
//! and the cover file name found in the `cover_art` relationship. No network
//! call is involved.

use serde::{Deserialize, Serialize};

/// Suffix selecting the upstream's downscaled thumbnail
const THUMBNAIL_SUFFIX: &str = ".512.jpg";

/// Requested cover size
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverQuality {
    Original,
    #[default]
    Medium,
    Small,
}

impl std::str::FromStr for CoverQuality {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "original" => Ok(CoverQuality::Original),
            "medium" => Ok(CoverQuality::Medium),
            "small" => Ok(CoverQuality::Small),
            _ => Err(anyhow::anyhow!("Invalid cover quality: {}", s)),
        }
    }
}

/// `{uploads_base}/covers/{manga_id}/{file_name}`, plus the thumbnail
/// suffix for anything but `Original`
pub fn cover_url(uploads_base: &str, manga_id: &str, file_name: &str, quality: CoverQuality) -> String {
    let base = uploads_base.trim_end_matches('/');
    match quality {
        CoverQuality::Original => format!("{}/covers/{}/{}", base, manga_id, file_name),
        CoverQuality::Medium | CoverQuality::Small => {
            format!("{}/covers/{}/{}{}", base, manga_id, file_name, THUMBNAIL_SUFFIX)
        }
    }
}
