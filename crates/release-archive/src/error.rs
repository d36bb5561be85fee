use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StagingError {
    #[error("module name '{name}' is not a plain directory name")]
    InvalidModuleName { name: String },

    #[error("failed to create directory '{path}'")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to remove staging directory '{path}'")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk project tree at '{path}'")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to copy '{from}' to '{to}'")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ArchiveError {
    #[error("release artifact '{path}' already exists; bump the version or remove the file")]
    ArtifactExists { path: PathBuf },

    #[error("no files were staged from '{path}'; check the include patterns in the config")]
    EmptyStaging { path: PathBuf },

    #[error("failed to create directory '{path}'")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read staged files under '{path}'")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to write archive '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write archive '{path}'")]
    Zip {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
}
