mod archiver;
mod changelog;
mod config;
mod git;
mod publisher;
mod stamper;

pub use archiver::FileSystemArchiver;
pub use changelog::FileSystemChangelogReader;
pub use config::FileSystemConfigProvider;
pub use git::Git2Provider;
pub use publisher::GitHubReleasePublisher;
pub use stamper::FileSystemVersionStamper;
