use release_core::ReleaseArtifact;
use release_project::RemoteConfig;
use release_publish::{Publication, PublishRequest};

use crate::Result;

pub trait ReleasePublisher: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the remote rejects the credentials or the request,
    /// or cannot be reached.
    fn publish(
        &self,
        artifact: &ReleaseArtifact,
        request: &PublishRequest,
        remote: &RemoteConfig,
    ) -> Result<Publication>;
}
