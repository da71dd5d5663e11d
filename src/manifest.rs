// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Release manifest: the immutable table of published platform metadata
//!
//! A manifest is built once at startup, either from the built-in defaults or
//! from a JSON file, and is only ever read afterwards. JSON manifests are an
//! object keyed by platform key:
//!
//! ```json
//! {
//!   "android": {
//!     "version": "1.0.0",
//!     "downloadUrl": "./files/2AC_College.apk",
//!     "changelog": "First release of the application",
//!     "fileSize": "25 MB",
//!     "releaseDate": "2026-02-08"
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ManifestError;
use crate::platform::{PlatformKey, PlatformMetadata};

/// Version published on every platform by the built-in manifest
pub const BUILTIN_VERSION: &str = "1.0.0";

/// Release date of every platform in the built-in manifest
pub const BUILTIN_RELEASE_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2026, 2, 8) {
    Some(date) => date,
    None => panic!("built-in release date is not a calendar date"),
};

const BUILTIN_CHANGELOG: &str = "First release of the application";

/// Immutable platform metadata table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReleaseManifest {
    entries: BTreeMap<PlatformKey, PlatformMetadata>,
}

impl ReleaseManifest {
    /// Build a manifest from explicit entries
    #[must_use]
    pub fn new(entries: BTreeMap<PlatformKey, PlatformMetadata>) -> Self {
        Self { entries }
    }

    /// The default table: every platform at 1.0.0, released 2026-02-08
    #[must_use]
    pub fn builtin() -> Self {
        let entry = |download_url: &str, file_size: &str| PlatformMetadata {
            version: BUILTIN_VERSION.to_string(),
            download_url: download_url.to_string(),
            changelog: BUILTIN_CHANGELOG.to_string(),
            file_size: file_size.to_string(),
            release_date: BUILTIN_RELEASE_DATE,
        };

        Self::new(BTreeMap::from([
            (
                PlatformKey::Android,
                entry("./files/2AC_College.apk", "25 MB"),
            ),
            (PlatformKey::Ios, entry("./files/2AC_College.ipa", "30 MB")),
            (
                PlatformKey::Windows,
                entry("./files/2AC_College.exe", "35 MB"),
            ),
        ]))
    }

    /// Parse a manifest from JSON text
    ///
    /// # Errors
    /// Returns [`ManifestError::Parse`] for malformed JSON, unknown platform
    /// keys, missing fields, or dates that are not `YYYY-MM-DD`.
    pub fn from_json_str(json: &str) -> Result<Self, ManifestError> {
        let manifest: Self = serde_json::from_str(json)?;
        debug!(platforms = manifest.entries.len(), "parsed release manifest");
        Ok(manifest)
    }

    /// Load a manifest from a JSON file
    ///
    /// # Errors
    /// Returns [`ManifestError::Read`] if the file cannot be read, or any
    /// error from [`ReleaseManifest::from_json_str`].
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        debug!(path = %path.display(), "loading release manifest");
        let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Metadata for a platform, if the manifest publishes it
    #[must_use]
    pub fn get(&self, key: PlatformKey) -> Option<&PlatformMetadata> {
        self.entries.get(&key)
    }

    /// Platforms published by this manifest, in display order
    #[must_use]
    pub fn platforms(&self) -> Vec<PlatformKey> {
        self.entries.keys().copied().collect()
    }

    /// One line per platform, e.g. "ANDROID: v1.0.0 - 25 MB"
    #[must_use]
    pub fn summary_lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(key, info)| {
                format!(
                    "{}: v{} - {}",
                    key.as_str().to_uppercase(),
                    info.version,
                    info.file_size
                )
            })
            .collect()
    }

    /// Absolute download link for a platform, if the manifest publishes it
    #[must_use]
    pub fn download_link(&self, key: PlatformKey, origin: &str) -> Option<String> {
        self.get(key).map(|info| info.download_link(origin))
    }
}

impl Default for ReleaseManifest {
    fn default() -> Self {
        Self::builtin()
    }
}
