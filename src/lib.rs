// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Release metadata and update checks for multi-platform app downloads
//!
//! This library compares dotted version strings and checks an installed
//! version against the release manifest published for Android, iOS and
//! Windows builds.

pub mod checker;
pub mod error;
pub mod manifest;
pub mod platform;
pub mod version;

// Re-export commonly used items at the crate root for convenience
pub use checker::{UpdateCheckResult, UpdateChecker, UpdateReport};
pub use error::{CheckError, ManifestError};
pub use manifest::ReleaseManifest;
pub use platform::{PlatformKey, PlatformMetadata};
pub use version::{Version, compare, compare_versions, parse_component};
