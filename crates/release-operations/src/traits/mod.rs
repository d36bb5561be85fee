mod archiver;
mod changelog_reader;
mod config_provider;
mod git_provider;
mod publisher;
mod setup_interaction;
mod version_stamper;

pub use archiver::Archiver;
pub use changelog_reader::ChangelogReader;
pub use config_provider::ConfigProvider;
pub use git_provider::GitProvider;
pub use publisher::ReleasePublisher;
pub use setup_interaction::{SetupAnswers, SetupDefaults, SetupInteraction};
pub use version_stamper::VersionStamper;
