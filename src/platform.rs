// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Platform keys and per-platform release metadata
//!
//! The set of distribution channels is fixed. Each channel publishes one
//! release at a time, described by a [`PlatformMetadata`] record.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CheckError;

/// A target distribution channel for the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKey {
    Android,
    Ios,
    Windows,
}

impl PlatformKey {
    /// Every known platform, in display order
    pub const ALL: [PlatformKey; 3] = [Self::Android, Self::Ios, Self::Windows];

    /// Lookup key as used in manifests and on the command line
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Android => "android",
            Self::Ios => "ios",
            Self::Windows => "windows",
        }
    }

    /// Human-readable platform name (e.g. "iOS")
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Android => "Android",
            Self::Ios => "iOS",
            Self::Windows => "Windows",
        }
    }
}

impl fmt::Display for PlatformKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformKey {
    type Err = CheckError;

    /// Keys are matched exactly; "Android" is not a platform key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| CheckError::UnrecognizedPlatform(s.to_string()))
    }
}

/// Published release information for one platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformMetadata {
    /// Latest published version (e.g. "1.0.0")
    pub version: String,
    /// Download location, usually relative to the page (e.g. "./files/app.apk")
    pub download_url: String,
    /// Release notes shown next to the download
    pub changelog: String,
    /// Display size of the download (e.g. "25 MB")
    pub file_size: String,
    /// Release date, serialised as `YYYY-MM-DD`
    pub release_date: NaiveDate,
}

impl PlatformMetadata {
    /// Build an absolute download link from the page origin
    ///
    /// A leading "./" or "/" on the stored URL is dropped and the remainder is
    /// joined to `origin` with a single slash. URLs that already carry a
    /// scheme are returned unchanged.
    ///
    /// # Examples
    /// ```
    /// use upcheck::ReleaseManifest;
    /// use upcheck::PlatformKey;
    ///
    /// let manifest = ReleaseManifest::builtin();
    /// let android = manifest.get(PlatformKey::Android).unwrap();
    /// assert_eq!(
    ///     android.download_link("https://example.org/"),
    ///     "https://example.org/files/2AC_College.apk"
    /// );
    /// ```
    #[must_use]
    pub fn download_link(&self, origin: &str) -> String {
        if self.download_url.contains("://") {
            return self.download_url.clone();
        }

        let path = self
            .download_url
            .strip_prefix("./")
            .unwrap_or(&self.download_url)
            .trim_start_matches('/');
        format!("{}/{}", origin.trim_end_matches('/'), path)
    }
}
