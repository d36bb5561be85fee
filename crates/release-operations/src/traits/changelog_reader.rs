use std::path::Path;

use crate::Result;

pub trait ChangelogReader: Send + Sync {
    fn changelog_exists(&self, project_root: &Path) -> bool;

    /// Never fails: an unreadable changelog contains no versions.
    fn version_exists(&self, changelog_path: &Path, version: &str) -> bool;

    /// # Errors
    ///
    /// Returns an error if the changelog cannot be read or has no version
    /// headings.
    fn latest_version(&self, changelog_path: &Path) -> Result<String>;
}
