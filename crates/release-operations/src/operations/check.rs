use std::path::{Path, PathBuf};

use release_core::ReleaseLayout;

use crate::traits::{ChangelogReader, ConfigProvider, GitProvider};
use crate::{OperationError, Result};

/// Environment report printed when the tool runs without arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub main_file: PathBuf,
    pub config_path: PathBuf,
    pub changelog_exists: bool,
    /// `None` when the changelog is missing or has no version headings.
    pub latest_version: Option<String>,
    /// `None` when the project is not a git repository.
    pub working_tree_clean: Option<bool>,
}

pub struct CheckOperation<C, L, G> {
    config_provider: C,
    changelog_reader: L,
    git_provider: G,
}

impl<C, L, G> CheckOperation<C, L, G>
where
    C: ConfigProvider,
    L: ChangelogReader,
    G: GitProvider,
{
    pub fn new(config_provider: C, changelog_reader: L, git_provider: G) -> Self {
        Self {
            config_provider,
            changelog_reader,
            git_provider,
        }
    }

    /// # Errors
    ///
    /// Returns `OperationError::ConfigMissing` without a config and
    /// `OperationError::NotAPluginRoot` when the main plugin file is absent.
    pub fn execute(&self, project_root: &Path) -> Result<CheckReport> {
        let layout = ReleaseLayout::new(project_root);
        let config = self
            .config_provider
            .load_config(&layout)?
            .ok_or_else(|| OperationError::ConfigMissing(project_root.to_path_buf()))?;

        let main_file = layout.root().join(config.main_file());
        if !main_file.is_file() {
            return Err(OperationError::NotAPluginRoot(main_file));
        }

        let changelog_exists = self.changelog_reader.changelog_exists(layout.root());
        let latest_version = if changelog_exists {
            self.changelog_reader
                .latest_version(&layout.changelog_path())
                .ok()
        } else {
            None
        };

        Ok(CheckReport {
            main_file,
            config_path: layout.config_path(),
            changelog_exists,
            latest_version,
            working_tree_clean: self.git_provider.is_working_tree_clean(project_root).ok(),
        })
    }
}
