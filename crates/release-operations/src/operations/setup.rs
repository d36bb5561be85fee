use std::path::{Path, PathBuf};

use release_core::ReleaseLayout;
use release_git::GitHubRemote;
use release_project::{PackageConfig, ProjectConfig, ProjectError, RemoteConfig};
use tracing::debug;

use crate::traits::{ConfigProvider, GitProvider, SetupDefaults, SetupInteraction};
use crate::{OperationError, Result};

#[derive(Debug, Clone)]
pub struct SetupOutput {
    pub config_path: PathBuf,
    pub config: ProjectConfig,
}

/// Creates `wp-plugin-helper.toml` from the answers of an interactive wizard.
pub struct SetupOperation<C, G, I> {
    config_provider: C,
    git_provider: G,
    interaction: I,
}

impl<C, G, I> SetupOperation<C, G, I>
where
    C: ConfigProvider,
    G: GitProvider,
    I: SetupInteraction,
{
    pub fn new(config_provider: C, git_provider: G, interaction: I) -> Self {
        Self {
            config_provider,
            git_provider,
            interaction,
        }
    }

    /// # Errors
    ///
    /// Returns `ProjectError::ConfigExists` (wrapped) when a config is already
    /// present, `OperationError::Cancelled` when the user aborts the wizard,
    /// or an error if the config cannot be written.
    pub fn execute(&self, project_root: &Path) -> Result<SetupOutput> {
        let layout = ReleaseLayout::new(project_root);
        let config_path = layout.config_path();
        if config_path.exists() {
            return Err(ProjectError::ConfigExists { path: config_path }.into());
        }

        let module_name = layout
            .directory_name()
            .ok_or_else(|| ProjectError::MissingModuleName {
                path: config_path.clone(),
            })?;
        let defaults = self.defaults(project_root, module_name);

        let answers = self
            .interaction
            .ask_remote(&defaults)?
            .ok_or(OperationError::Cancelled)?;

        let mut package = PackageConfig::new(&defaults.module_name);
        package.package_name = Some(format!("{}.zip", defaults.module_name));
        let config = ProjectConfig::new(RemoteConfig::new(answers.account, answers.repo), package)
            .with_token(answers.token.trim());

        self.config_provider.write_config(&config_path, &config)?;

        Ok(SetupOutput {
            config_path,
            config,
        })
    }

    fn defaults(&self, project_root: &Path, module_name: String) -> SetupDefaults {
        let remote = self
            .git_provider
            .remote_url(project_root)
            .ok()
            .flatten()
            .and_then(|url| match GitHubRemote::from_url(&url) {
                Ok(remote) => Some(remote),
                Err(e) => {
                    debug!(url, error = %e, "origin is not a GitHub remote");
                    None
                }
            });

        SetupDefaults {
            account: remote.as_ref().map(|r| r.owner.clone()),
            repo: remote.map(|r| r.repo),
            module_name,
        }
    }
}
