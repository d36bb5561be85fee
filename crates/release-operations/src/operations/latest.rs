use std::path::Path;

use release_core::ReleaseLayout;

use crate::traits::ChangelogReader;
use crate::{OperationError, Result};

/// Reports the topmost version heading of the project changelog.
pub struct LatestVersionOperation<L> {
    changelog_reader: L,
}

impl<L> LatestVersionOperation<L>
where
    L: ChangelogReader,
{
    pub fn new(changelog_reader: L) -> Self {
        Self { changelog_reader }
    }

    /// # Errors
    ///
    /// Returns `OperationError::ChangelogMissing` when there is no changelog,
    /// or an error if it cannot be read or has no version headings.
    pub fn execute(&self, project_root: &Path) -> Result<String> {
        let layout = ReleaseLayout::new(project_root);
        if !self.changelog_reader.changelog_exists(layout.root()) {
            return Err(OperationError::ChangelogMissing(project_root.to_path_buf()));
        }

        self.changelog_reader
            .latest_version(&layout.changelog_path())
    }
}
