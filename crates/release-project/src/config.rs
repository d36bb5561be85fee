use std::path::Path;

use release_core::{ReleaseLayout, is_plain_file_name};
use serde::{Deserialize, Serialize};

use crate::error::ProjectError;
use crate::selection::FileSelection;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Contents of `wp-plugin-helper.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ProjectConfig {
    pub remote: RemoteConfig,
    pub package: PackageConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RemoteConfig {
    pub account: String,
    pub repo: String,
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl RemoteConfig {
    #[must_use]
    pub fn new(account: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            repo: repo.into(),
            token: String::new(),
            api_url: default_api_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// The configured token, `None` when blank.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        let token = self.token.trim();
        (!token.is_empty()).then_some(token)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PackageConfig {
    #[serde(default)]
    pub module_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_file: Option<String>,
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl PackageConfig {
    #[must_use]
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            package_name: None,
            main_file: None,
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }
}

impl ProjectConfig {
    #[must_use]
    pub fn new(remote: RemoteConfig, package: PackageConfig) -> Self {
        Self { remote, package }
    }

    #[must_use]
    pub fn module_name(&self) -> &str {
        &self.package.module_name
    }

    /// Archive file name, `<module>.zip` unless configured.
    #[must_use]
    pub fn package_name(&self) -> String {
        self.package
            .package_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| format!("{}.zip", self.package.module_name))
    }

    /// Plugin file carrying the version header, `<module>.php` unless configured.
    #[must_use]
    pub fn main_file(&self) -> String {
        self.package
            .main_file
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| format!("{}.php", self.package.module_name))
    }

    /// Checks that the module, package and main-file names each stay inside
    /// the directory they are joined onto.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::InvalidFileName` for the first name that is not
    /// a single plain path component.
    pub fn validate(&self) -> Result<(), ProjectError> {
        for (field, value) in [
            ("module-name", self.package.module_name.clone()),
            ("package-name", self.package_name()),
            ("main-file", self.main_file()),
        ] {
            if !is_plain_file_name(&value) {
                return Err(ProjectError::InvalidFileName { field, value });
            }
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ProjectError::GlobPattern` if an include or exclude pattern
    /// is not a valid glob.
    pub fn file_selection(&self) -> Result<FileSelection, ProjectError> {
        FileSelection::new(&self.package.include, &self.package.exclude)
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.remote.token = token.into();
        self
    }
}

/// Loads the project config, `Ok(None)` when no config file exists.
///
/// A missing `module-name` is derived from the project directory name.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(layout: &ReleaseLayout) -> Result<Option<ProjectConfig>, ProjectError> {
    let path = layout.config_path();
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path).map_err(|source| ProjectError::ConfigRead {
        path: path.clone(),
        source,
    })?;

    let mut config: ProjectConfig =
        toml::from_str(&content).map_err(|source| ProjectError::ConfigParse {
            path: path.clone(),
            source,
        })?;

    if config.package.module_name.trim().is_empty() {
        config.package.module_name = layout
            .directory_name()
            .ok_or(ProjectError::MissingModuleName { path })?;
    }
    config.validate()?;

    Ok(Some(config))
}

/// Writes a new config file. Never overwrites an existing one.
///
/// # Errors
///
/// Returns `ProjectError::ConfigExists` if the file is already present, or an
/// error if serialization or the write fails.
pub fn write_config(path: &Path, config: &ProjectConfig) -> Result<(), ProjectError> {
    if path.exists() {
        return Err(ProjectError::ConfigExists {
            path: path.to_path_buf(),
        });
    }

    let content = toml::to_string_pretty(config)?;

    std::fs::write(path, content).map_err(|source| ProjectError::ConfigWrite {
        path: path.to_path_buf(),
        source,
    })
}
