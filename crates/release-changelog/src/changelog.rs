use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use release_core::CHANGELOG_FILE;

use crate::error::ChangelogError;

static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^## \[([^\]\r\n]+)\] -").expect("heading pattern is a valid regex")
});

/// A changelog document read from disk.
///
/// The content is read on construction and never refreshed; callers that
/// need the current state read the file again.
#[derive(Debug, Clone)]
pub struct Changelog {
    path: PathBuf,
    content: String,
}

impl Changelog {
    /// # Errors
    ///
    /// Returns `ChangelogError::Read` if the file cannot be read.
    pub fn from_file(path: &Path) -> Result<Self, ChangelogError> {
        let content = std::fs::read_to_string(path).map_err(|source| ChangelogError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            content,
        })
    }

    #[must_use]
    pub fn from_content(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// True when a `## [<version>] - ...` heading for `version` is present.
    #[must_use]
    pub fn has_version(&self, version: &str) -> bool {
        let pattern = format!(r"(?m)^## \[{}\] -", regex::escape(version));
        Regex::new(&pattern).is_ok_and(|re| re.is_match(&self.content))
    }

    /// Token of the topmost version heading.
    ///
    /// # Errors
    ///
    /// Returns `ChangelogError::NoEntries` if no heading matches.
    pub fn latest_version(&self) -> Result<&str, ChangelogError> {
        HEADING
            .captures(&self.content)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .ok_or_else(|| ChangelogError::NoEntries {
                path: self.path.clone(),
            })
    }

    /// All heading tokens in document order.
    #[must_use]
    pub fn versions(&self) -> Vec<&str> {
        HEADING
            .captures_iter(&self.content)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .collect()
    }
}

#[must_use]
pub fn changelog_exists(project_root: &Path) -> bool {
    project_root.join(CHANGELOG_FILE).is_file()
}

/// Fails closed: an unreadable changelog has no versions.
#[must_use]
pub fn version_exists(path: &Path, version: &str) -> bool {
    Changelog::from_file(path).is_ok_and(|changelog| changelog.has_version(version))
}

/// # Errors
///
/// Returns `ChangelogError::Read` if the file cannot be read and
/// `ChangelogError::NoEntries` if it has no version headings.
pub fn latest_version(path: &Path) -> Result<String, ChangelogError> {
    let changelog = Changelog::from_file(path)?;
    changelog.latest_version().map(str::to_string)
}
