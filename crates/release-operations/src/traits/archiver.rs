use release_archive::{ArchiveTarget, StagingArea};
use release_core::ReleaseArtifact;

use crate::Result;

pub trait Archiver: Send + Sync {
    /// Compresses the staged tree into the target artifact.
    ///
    /// # Errors
    ///
    /// Returns an error if the artifact exists already, nothing was staged, or
    /// the archive cannot be written.
    fn archive(&self, staging: &StagingArea, target: &ArchiveTarget<'_>)
    -> Result<ReleaseArtifact>;
}
