use std::path::Path;

use release_stamp::StampReport;

use crate::Result;
use crate::traits::VersionStamper;

pub struct FileSystemVersionStamper;

impl FileSystemVersionStamper {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemVersionStamper {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionStamper for FileSystemVersionStamper {
    fn stamp_version(&self, path: &Path, version: &str) -> Result<StampReport> {
        Ok(release_stamp::stamp_version(path, version)?)
    }
}
