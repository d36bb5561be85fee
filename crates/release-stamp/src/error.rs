use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StampError {
    #[error("failed to read '{path}' for version stamping")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write stamped version to '{path}'")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
