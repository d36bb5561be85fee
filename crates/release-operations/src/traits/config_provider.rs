use std::path::Path;

use release_core::ReleaseLayout;
use release_project::ProjectConfig;

use crate::Result;

pub trait ConfigProvider: Send + Sync {
    /// Loads the project config, `Ok(None)` when there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the config exists but cannot be read or parsed.
    fn load_config(&self, layout: &ReleaseLayout) -> Result<Option<ProjectConfig>>;

    /// # Errors
    ///
    /// Returns an error if the config already exists or cannot be written.
    fn write_config(&self, path: &Path, config: &ProjectConfig) -> Result<()>;
}
