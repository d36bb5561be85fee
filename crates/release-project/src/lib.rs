mod config;
mod error;
mod selection;

pub use config::{
    DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS, PackageConfig, ProjectConfig, RemoteConfig,
    load_config, write_config,
};
pub use error::ProjectError;
pub use selection::FileSelection;

pub type Result<T> = std::result::Result<T, ProjectError>;
