use std::path::Path;

use release_core::ReleaseLayout;
use release_project::ProjectConfig;
use tracing::debug;

use crate::Result;
use crate::traits::ConfigProvider;

/// Reads and writes `wp-plugin-helper.toml`.
///
/// A token override, typically taken from the environment, replaces the
/// token stored in the file when it is not blank.
#[derive(Debug, Clone, Default)]
pub struct FileSystemConfigProvider {
    token_override: Option<String>,
}

impl FileSystemConfigProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token_override(mut self, token: Option<String>) -> Self {
        self.token_override = token.filter(|t| !t.trim().is_empty());
        self
    }
}

impl ConfigProvider for FileSystemConfigProvider {
    fn load_config(&self, layout: &ReleaseLayout) -> Result<Option<ProjectConfig>> {
        let Some(config) = release_project::load_config(layout)? else {
            return Ok(None);
        };

        let config = match &self.token_override {
            Some(token) => {
                debug!("using token from environment");
                config.with_token(token.clone())
            }
            None => config,
        };

        Ok(Some(config))
    }

    fn write_config(&self, path: &Path, config: &ProjectConfig) -> Result<()> {
        Ok(release_project::write_config(path, config)?)
    }
}
