// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Update checks against a release manifest
//!
//! A check compares the caller's installed version with the version the
//! manifest publishes for a platform. Checks are pure: the manifest is only
//! borrowed and no state is kept between calls.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::error::CheckError;
use crate::manifest::ReleaseManifest;
use crate::platform::PlatformKey;
use crate::version::compare_versions;

/// Status message when a newer version is published
pub const UPDATE_AVAILABLE_MESSAGE: &str = "A new update is available";

/// Status message when the installed version is current (or newer)
pub const UP_TO_DATE_MESSAGE: &str = "You are using the latest version";

/// Details of a successful update check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReport {
    #[serde(skip)]
    pub platform: PlatformKey,
    #[serde(rename = "isUpdateAvailable")]
    pub update_available: bool,
    pub current_version: String,
    pub latest_version: String,
    pub download_url: String,
    pub file_size: String,
    pub changelog: String,
    pub release_date: NaiveDate,
}

impl UpdateReport {
    #[must_use]
    pub fn message(&self) -> &'static str {
        if self.update_available {
            UPDATE_AVAILABLE_MESSAGE
        } else {
            UP_TO_DATE_MESSAGE
        }
    }
}

/// Outcome of an update check
///
/// Serialises to `{"success": true, "isUpdateAvailable": ..., "message": ...}`
/// on success and to `{"success": false, "message": ...}` on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateCheckResult {
    pub success: bool,
    #[serde(flatten)]
    pub report: Option<UpdateReport>,
    pub message: String,
}

impl UpdateCheckResult {
    #[must_use]
    pub fn is_update_available(&self) -> bool {
        self.report.as_ref().is_some_and(|r| r.update_available)
    }

    #[must_use]
    pub fn latest_version(&self) -> Option<&str> {
        self.report.as_ref().map(|r| r.latest_version.as_str())
    }
}

impl From<Result<UpdateReport, CheckError>> for UpdateCheckResult {
    fn from(result: Result<UpdateReport, CheckError>) -> Self {
        match result {
            Ok(report) => Self {
                success: true,
                message: report.message().to_string(),
                report: Some(report),
            },
            Err(e) => Self {
                success: false,
                report: None,
                message: e.to_string(),
            },
        }
    }
}

/// Checks installed versions against a borrowed manifest
#[derive(Debug, Clone, Copy)]
pub struct UpdateChecker<'a> {
    manifest: &'a ReleaseManifest,
}

impl<'a> UpdateChecker<'a> {
    #[must_use]
    pub fn new(manifest: &'a ReleaseManifest) -> Self {
        Self { manifest }
    }

    /// Check whether `current_version` is behind the published version
    ///
    /// # Errors
    /// Returns [`CheckError::UnrecognizedPlatform`] when `platform` is not a
    /// platform key or the manifest does not publish it.
    pub fn try_check(
        &self,
        platform: &str,
        current_version: &str,
    ) -> Result<UpdateReport, CheckError> {
        let key: PlatformKey = platform.parse()?;
        let Some(info) = self.manifest.get(key) else {
            return Err(CheckError::UnrecognizedPlatform(platform.to_string()));
        };

        let update_available = compare_versions(current_version, &info.version).is_lt();
        debug!(
            %key,
            current = current_version,
            latest = %info.version,
            update_available,
            "update check"
        );

        Ok(UpdateReport {
            platform: key,
            update_available,
            current_version: current_version.to_string(),
            latest_version: info.version.clone(),
            download_url: info.download_url.clone(),
            file_size: info.file_size.clone(),
            changelog: info.changelog.clone(),
            release_date: info.release_date,
        })
    }

    /// Same as [`UpdateChecker::try_check`], folded into a result record
    #[must_use]
    pub fn check(&self, platform: &str, current_version: &str) -> UpdateCheckResult {
        let result = self.try_check(platform, current_version);
        if let Err(e) = &result {
            debug!("update check failed: {e}");
        }
        result.into()
    }
}
