use std::path::Path;

use release_stamp::StampReport;

use crate::Result;

pub trait VersionStamper: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or written back.
    fn stamp_version(&self, path: &Path, version: &str) -> Result<StampReport>;
}
