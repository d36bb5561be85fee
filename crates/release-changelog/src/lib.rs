mod changelog;
mod error;

pub use changelog::{Changelog, changelog_exists, latest_version, version_exists};
pub use error::ChangelogError;

pub type Result<T> = std::result::Result<T, ChangelogError>;
