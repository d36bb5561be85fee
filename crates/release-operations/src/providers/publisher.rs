use std::time::Duration;

use release_core::ReleaseArtifact;
use release_project::RemoteConfig;
use release_publish::{GitHubPublisher, Publication, PublishRequest};

use crate::Result;
use crate::traits::ReleasePublisher;

/// Publishes through the GitHub REST API configured in `[remote]`.
pub struct GitHubReleasePublisher;

impl GitHubReleasePublisher {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for GitHubReleasePublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleasePublisher for GitHubReleasePublisher {
    fn publish(
        &self,
        artifact: &ReleaseArtifact,
        request: &PublishRequest,
        remote: &RemoteConfig,
    ) -> Result<Publication> {
        let timeout = Duration::from_secs(remote.timeout_secs);
        let client = GitHubPublisher::new(&remote.api_url, timeout)?;
        Ok(client.publish(artifact, request)?)
    }
}
