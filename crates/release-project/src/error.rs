use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("failed to read config at '{path}'")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at '{path}'")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("failed to write config at '{path}'")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config already exists at '{path}'")]
    ConfigExists { path: PathBuf },

    #[error("config at '{path}' has no module-name and it cannot be derived from the directory")]
    MissingModuleName { path: PathBuf },

    #[error("{field} '{value}' must be a plain file name without path separators or '..'")]
    InvalidFileName { field: &'static str, value: String },

    #[error("invalid glob pattern '{pattern}'")]
    GlobPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}
