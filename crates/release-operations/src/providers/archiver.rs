use release_archive::{ArchiveTarget, StagingArea};
use release_core::ReleaseArtifact;

use crate::Result;
use crate::traits::Archiver;

pub struct FileSystemArchiver;

impl FileSystemArchiver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemArchiver {
    fn default() -> Self {
        Self::new()
    }
}

impl Archiver for FileSystemArchiver {
    fn archive(
        &self,
        staging: &StagingArea,
        target: &ArchiveTarget<'_>,
    ) -> Result<ReleaseArtifact> {
        Ok(release_archive::archive(staging, target)?)
    }
}
