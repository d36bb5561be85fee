use std::path::{Component, Path, PathBuf};

use crate::types::ReleaseVersion;

pub const CHANGELOG_FILE: &str = "CHANGELOG.md";
pub const CONFIG_FILE: &str = "wp-plugin-helper.toml";
pub const RELEASES_DIR: &str = "releases";
pub const VERSIONS_DIR: &str = "versions";
pub const STAGING_DIR: &str = "tmp_dir";

/// True when `name` is exactly one normal path component: not empty, not `.`
/// or `..`, and free of `/` and `\` on every platform.
///
/// Module and package names are joined onto release directories, so anything
/// else could place files outside the release tree.
#[must_use]
pub fn is_plain_file_name(name: &str) -> bool {
    if name.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Filesystem locations of a plugin project's release tree.
///
/// ```text
/// <root>/releases/versions/<version>/<package>.zip
/// <root>/releases/tmp_dir/<module>/...
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseLayout {
    root: PathBuf,
}

impl ReleaseLayout {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn changelog_path(&self) -> PathBuf {
        self.root.join(CHANGELOG_FILE)
    }

    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    #[must_use]
    pub fn releases_dir(&self) -> PathBuf {
        self.root.join(RELEASES_DIR)
    }

    #[must_use]
    pub fn versions_dir(&self) -> PathBuf {
        self.releases_dir().join(VERSIONS_DIR)
    }

    #[must_use]
    pub fn staging_dir(&self) -> PathBuf {
        self.releases_dir().join(STAGING_DIR)
    }

    #[must_use]
    pub fn version_dir(&self, version: &ReleaseVersion) -> PathBuf {
        self.versions_dir().join(version.as_str())
    }

    #[must_use]
    pub fn artifact_path(&self, version: &ReleaseVersion, package_name: &str) -> PathBuf {
        self.version_dir(version).join(package_name)
    }

    /// Base name of the project directory, the default module name.
    #[must_use]
    pub fn directory_name(&self) -> Option<String> {
        let resolved = self.root.canonicalize().unwrap_or_else(|_| self.root.clone());
        resolved
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
    }
}
