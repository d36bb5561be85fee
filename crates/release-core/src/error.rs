use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error("version cannot be empty")]
    Empty,

    #[error("invalid version '{version}': {reason}")]
    Invalid {
        version: String,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, VersionError>;
