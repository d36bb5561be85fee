use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChangelogError {
    #[error("failed to read changelog at '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("changelog at '{path}' has no version headings like '## [1.0.0] - 2024-01-01'")]
    NoEntries { path: PathBuf },
}
