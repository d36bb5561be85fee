//! GitHub release publishing.
//!
//! Three calls against the REST API, in order:
//!
//! 1. `GET /repos/{owner}/{repo}/releases/tags/{tag}` to find an existing release
//! 2. `POST /repos/{owner}/{repo}/releases` when there is none
//! 3. `POST <upload_url>?name=<file>` with the archive bytes
//!
//! No request is retried.

mod error;
mod github;
mod request;

pub use error::PublishError;
pub use github::{DEFAULT_TIMEOUT_SECS, GitHubPublisher, USER_AGENT};
pub use request::{Publication, PublishRequest};
