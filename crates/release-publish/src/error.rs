use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PublishError {
    #[error("GitHub rejected the credentials ({status}): {message}")]
    Auth { status: u16, message: String },

    #[error("could not reach '{url}'")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("GitHub rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("unexpected response from '{url}'")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read release archive '{path}'")]
    ReadArtifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
}
