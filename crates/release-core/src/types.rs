use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::VersionError;

/// A version token as written in changelog headings and plugin headers.
///
/// WordPress plugins commonly use versions that are not strict semver
/// (`1.2`, `2.0.1.3`), so the token is validated syntactically only: it must
/// start with a digit and contain nothing but ASCII alphanumerics, `.`, `+`
/// and `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReleaseVersion(String);

impl ReleaseVersion {
    /// # Errors
    ///
    /// Returns `VersionError::Empty` for blank input and
    /// `VersionError::Invalid` when the token contains characters that cannot
    /// appear in a tag or directory name.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(VersionError::Empty);
        }

        if !trimmed.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(VersionError::Invalid {
                version: trimmed.to_string(),
                reason: "must start with a digit",
            });
        }

        if let Some(bad) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '-')))
        {
            let reason = if bad.is_whitespace() {
                "must not contain whitespace"
            } else {
                "only ASCII letters, digits, '.', '+' and '-' are allowed"
            };
            return Err(VersionError::Invalid {
                version: trimmed.to_string(),
                reason,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Git tag name for this version (`v<version>`).
    #[must_use]
    pub fn tag(&self) -> String {
        format!("v{}", self.0)
    }

    /// True when the token parses as semver and carries a pre-release part.
    #[must_use]
    pub fn is_prerelease(&self) -> bool {
        semver::Version::parse(&self.0).is_ok_and(|v| !v.pre.is_empty())
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ReleaseVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parameters of a single `create-package` invocation.
#[derive(Debug, Clone)]
pub struct ReleaseRequest {
    pub target_version: Option<String>,
    pub release_message: Option<String>,
    pub skip_changelog_check: bool,
    pub publish_remote: bool,
}

impl ReleaseRequest {
    #[must_use]
    pub fn new(target_version: impl Into<String>) -> Self {
        Self {
            target_version: Some(target_version.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_release_message(mut self, message: impl Into<String>) -> Self {
        self.release_message = Some(message.into());
        self
    }

    #[must_use]
    pub fn skip_changelog_check(mut self, skip: bool) -> Self {
        self.skip_changelog_check = skip;
        self
    }

    #[must_use]
    pub fn publish_remote(mut self, publish: bool) -> Self {
        self.publish_remote = publish;
        self
    }
}

impl Default for ReleaseRequest {
    fn default() -> Self {
        Self {
            target_version: None,
            release_message: None,
            skip_changelog_check: false,
            publish_remote: true,
        }
    }
}

/// The packaged zip for one version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseArtifact {
    pub path: PathBuf,
    pub version: ReleaseVersion,
    pub module_name: String,
}

impl ReleaseArtifact {
    /// File name of the archive, used as the uploaded asset name.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(String::new, |n| n.to_string_lossy().into_owned())
    }

    /// Release title shown on the remote (`<module> v<version>`).
    #[must_use]
    pub fn release_title(&self) -> String {
        format!("{} {}", self.module_name, self.version.tag())
    }
}
