use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("git operation failed")]
    Git(#[from] git2::Error),

    #[error("not a git repository: '{path}'")]
    NotARepository { path: PathBuf },

    #[error("failed to parse remote URL '{url}'")]
    UrlParse {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("remote '{url}' is not a GitHub repository")]
    NotGitHub { url: String },

    #[error("invalid repository path in URL '{url}': expected owner/repo format")]
    InvalidRepositoryPath { url: String },
}
