use release_archive::StagingArea;
use release_core::{ReleaseArtifact, ReleaseVersion};
use release_publish::Publication;
use release_stamp::StampReport;

/// Release state before anything is staged.
#[derive(Debug, Clone)]
pub struct PreparedRelease {
    pub version: ReleaseVersion,
    pub stamp: Option<StampReport>,
}

impl PreparedRelease {
    #[must_use]
    pub fn new(version: ReleaseVersion) -> Self {
        Self {
            version,
            stamp: None,
        }
    }
}

/// Release state while the staging tree is populated.
///
/// Owns the staging guard, so dropping this value removes the tree.
#[derive(Debug)]
pub struct StagedRelease {
    pub version: ReleaseVersion,
    pub stamp: Option<StampReport>,
    pub staging: StagingArea,
    pub staged_files: usize,
}

/// Release state once the archive is written and staging is gone.
#[derive(Debug, Clone)]
pub struct ArchivedRelease {
    pub artifact: ReleaseArtifact,
    pub stamp: Option<StampReport>,
    pub staged_files: usize,
    pub publication: Option<Publication>,
}
