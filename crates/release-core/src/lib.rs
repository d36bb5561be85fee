pub mod error;
mod layout;
pub mod types;

pub use error::*;
pub use layout::{
    CHANGELOG_FILE, CONFIG_FILE, RELEASES_DIR, ReleaseLayout, STAGING_DIR, VERSIONS_DIR,
    is_plain_file_name,
};
pub use types::*;
