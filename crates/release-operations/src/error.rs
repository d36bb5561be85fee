use std::path::PathBuf;

use release_changelog::ChangelogError;
use release_pipeline::{PipelineError, StepWarning};
use release_publish::PublishError;
use thiserror::Error;

/// Coarse classification of an [`OperationError`], one per exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ConfigMissing,
    ChangelogMissing,
    ChangelogEntryMissing,
    VersionArgumentMissing,
    StampFailed,
    StagingIOFailed,
    ArchiveFailed,
    PublishAuthFailed,
    PublishNetworkFailed,
    PublishRejected,
    NotAPluginRoot,
    Internal,
}

impl ErrorKind {
    #[must_use]
    pub fn exit_code(self) -> u8 {
        match self {
            Self::StampFailed | Self::Internal => 1,
            Self::ConfigMissing => 10,
            Self::ChangelogMissing => 11,
            Self::ChangelogEntryMissing => 12,
            Self::VersionArgumentMissing => 13,
            Self::NotAPluginRoot => 14,
            Self::StagingIOFailed => 20,
            Self::ArchiveFailed => 21,
            Self::PublishAuthFailed => 30,
            Self::PublishNetworkFailed => 31,
            Self::PublishRejected => 32,
        }
    }
}

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("no wp-plugin-helper.toml found in '{0}'; run `wp-plugin-helper setup` to create one")]
    ConfigMissing(PathBuf),

    #[error("no CHANGELOG.md found in '{0}'")]
    ChangelogMissing(PathBuf),

    #[error(
        "CHANGELOG.md has no entry for version {version}; add a `## [{version}] - <date>` heading or pass --skip-check"
    )]
    ChangelogEntryMissing { version: String },

    #[error("no version given; pass --version=<version>")]
    VersionArgumentMissing,

    #[error(transparent)]
    InvalidVersion(#[from] release_core::VersionError),

    #[error("main plugin file '{0}' not found; this does not look like a plugin root")]
    NotAPluginRoot(PathBuf),

    #[error("failed to stamp version")]
    Stamp(#[from] release_stamp::StampError),

    #[error(transparent)]
    Changelog(#[from] ChangelogError),

    #[error(transparent)]
    Project(#[from] release_project::ProjectError),

    #[error("failed to stage release files")]
    Staging(#[from] release_archive::StagingError),

    #[error(transparent)]
    Archive(#[from] release_archive::ArchiveError),

    #[error("failed to publish release")]
    Publish(#[from] PublishError),

    #[error(transparent)]
    Git(#[from] release_git::GitError),

    #[error("setup needs an interactive terminal; create wp-plugin-helper.toml by hand instead")]
    InteractionRequired,

    #[error("operation cancelled")]
    Cancelled,

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("release pipeline failed at step '{step}'")]
    PipelineFailed {
        step: String,
        #[source]
        source: Box<OperationError>,
        warnings: Vec<StepWarning<OperationError>>,
    },
}

pub type Result<T> = std::result::Result<T, OperationError>;

impl OperationError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConfigMissing(_) => ErrorKind::ConfigMissing,
            Self::ChangelogMissing(_) | Self::Changelog(ChangelogError::Read { .. }) => {
                ErrorKind::ChangelogMissing
            }
            Self::ChangelogEntryMissing { .. } | Self::Changelog(_) => {
                ErrorKind::ChangelogEntryMissing
            }
            Self::VersionArgumentMissing | Self::InvalidVersion(_) => {
                ErrorKind::VersionArgumentMissing
            }
            Self::NotAPluginRoot(_) => ErrorKind::NotAPluginRoot,
            Self::Stamp(_) => ErrorKind::StampFailed,
            Self::Staging(_) => ErrorKind::StagingIOFailed,
            Self::Archive(_) => ErrorKind::ArchiveFailed,
            Self::Publish(e) => match e {
                PublishError::Auth { .. } => ErrorKind::PublishAuthFailed,
                PublishError::Network { .. } | PublishError::Client(_) => {
                    ErrorKind::PublishNetworkFailed
                }
                PublishError::Rejected { .. } | PublishError::Decode { .. } => {
                    ErrorKind::PublishRejected
                }
                _ => ErrorKind::Internal,
            },
            Self::PipelineFailed { source, .. } => source.kind(),
            Self::Project(_)
            | Self::Git(_)
            | Self::InteractionRequired
            | Self::Cancelled
            | Self::Io(_) => ErrorKind::Internal,
        }
    }

    #[must_use]
    pub fn exit_code(&self) -> u8 {
        self.kind().exit_code()
    }

    /// Best-effort failures collected before a pipeline abort.
    #[must_use]
    pub fn warnings(&self) -> &[StepWarning<OperationError>] {
        match self {
            Self::PipelineFailed { warnings, .. } => warnings,
            _ => &[],
        }
    }
}

impl From<PipelineError<OperationError>> for OperationError {
    fn from(err: PipelineError<OperationError>) -> Self {
        match err {
            PipelineError::StepFailed {
                step,
                source,
                warnings,
            } => Self::PipelineFailed {
                step,
                source: Box::new(source),
                warnings,
            },
            _ => Self::PipelineFailed {
                step: "unknown".to_string(),
                source: Box::new(Self::Cancelled),
                warnings: Vec::new(),
            },
        }
    }
}
