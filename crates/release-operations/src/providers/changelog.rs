use std::path::Path;

use crate::Result;
use crate::traits::ChangelogReader;

pub struct FileSystemChangelogReader;

impl FileSystemChangelogReader {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemChangelogReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangelogReader for FileSystemChangelogReader {
    fn changelog_exists(&self, project_root: &Path) -> bool {
        release_changelog::changelog_exists(project_root)
    }

    fn version_exists(&self, changelog_path: &Path, version: &str) -> bool {
        release_changelog::version_exists(changelog_path, version)
    }

    fn latest_version(&self, changelog_path: &Path) -> Result<String> {
        Ok(release_changelog::latest_version(changelog_path)?)
    }
}
