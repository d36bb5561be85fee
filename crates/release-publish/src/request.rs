use release_core::ReleaseArtifact;

/// What to publish and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    pub owner: String,
    pub repo: String,
    pub tag: String,
    pub title: String,
    pub body: Option<String>,
    pub token: Option<String>,
    pub prerelease: bool,
}

impl PublishRequest {
    /// Request for `artifact`, tagged `v<version>` and titled
    /// `<module> v<version>`.
    #[must_use]
    pub fn for_artifact(
        artifact: &ReleaseArtifact,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            tag: artifact.version.tag(),
            title: artifact.release_title(),
            body: None,
            token: None,
            prerelease: artifact.version.is_prerelease(),
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: Option<String>) -> Self {
        self.body = body;
        self
    }

    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }
}

/// Confirmation of a successful publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    pub release_id: u64,
    pub html_url: String,
    pub asset_url: String,
    /// False when an existing release for the tag was reused.
    pub created_release: bool,
}
