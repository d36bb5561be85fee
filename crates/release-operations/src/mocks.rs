use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use release_archive::{ArchiveError, ArchiveTarget, StagingArea};
use release_core::{ReleaseArtifact, ReleaseLayout};
use release_project::{ProjectConfig, ProjectError, RemoteConfig};
use release_publish::{Publication, PublishError, PublishRequest};
use release_stamp::{StampError, StampReport};

use crate::traits::{
    Archiver, ConfigProvider, GitProvider, ReleasePublisher, SetupAnswers, SetupDefaults,
    SetupInteraction, VersionStamper,
};
use crate::{OperationError, Result};

/// Serves a fixed config and records writes instead of touching disk.
pub struct MockConfigProvider {
    config: Option<ProjectConfig>,
    written: Mutex<Vec<(PathBuf, ProjectConfig)>>,
}

impl MockConfigProvider {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: None,
            written: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_config(config: ProjectConfig) -> Self {
        Self {
            config: Some(config),
            ..Self::new()
        }
    }

    #[must_use]
    pub fn written(&self) -> Vec<(PathBuf, ProjectConfig)> {
        self.written.lock().expect("lock poisoned").clone()
    }
}

impl Default for MockConfigProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigProvider for MockConfigProvider {
    fn load_config(&self, _layout: &ReleaseLayout) -> Result<Option<ProjectConfig>> {
        Ok(self.config.clone())
    }

    fn write_config(&self, path: &Path, config: &ProjectConfig) -> Result<()> {
        if self.config.is_some() {
            return Err(ProjectError::ConfigExists {
                path: path.to_path_buf(),
            }
            .into());
        }
        self.written
            .lock()
            .expect("lock poisoned")
            .push((path.to_path_buf(), config.clone()));
        Ok(())
    }
}

pub struct MockVersionStamper {
    fail: bool,
    calls: Mutex<Vec<(PathBuf, String)>>,
}

impl MockVersionStamper {
    #[must_use]
    pub fn new() -> Self {
        Self {
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    #[must_use]
    pub fn calls(&self) -> Vec<(PathBuf, String)> {
        self.calls.lock().expect("lock poisoned").clone()
    }
}

impl Default for MockVersionStamper {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionStamper for MockVersionStamper {
    fn stamp_version(&self, path: &Path, version: &str) -> Result<StampReport> {
        self.calls
            .lock()
            .expect("lock poisoned")
            .push((path.to_path_buf(), version.to_string()));

        if self.fail {
            return Err(StampError::Write {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            }
            .into());
        }

        Ok(StampReport {
            path: path.to_path_buf(),
            version_markers: 1,
            header_markers: 1,
        })
    }
}

#[derive(Default)]
struct ArchiverState {
    calls: usize,
    saw_staged_files: bool,
}

/// Archives for real unless told to fail; remembers what it was handed.
#[derive(Clone)]
pub struct MockArchiver {
    fail: bool,
    state: Arc<Mutex<ArchiverState>>,
}

impl MockArchiver {
    #[must_use]
    pub fn new() -> Self {
        Self {
            fail: false,
            state: Arc::default(),
        }
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    #[must_use]
    pub fn calls(&self) -> usize {
        self.state.lock().expect("lock poisoned").calls
    }

    /// True when the staging directory held files at the time of a call.
    #[must_use]
    pub fn saw_staged_files(&self) -> bool {
        self.state.lock().expect("lock poisoned").saw_staged_files
    }
}

impl Default for MockArchiver {
    fn default() -> Self {
        Self::new()
    }
}

impl Archiver for MockArchiver {
    fn archive(
        &self,
        staging: &StagingArea,
        target: &ArchiveTarget<'_>,
    ) -> Result<ReleaseArtifact> {
        {
            let mut state = self.state.lock().expect("lock poisoned");
            state.calls += 1;
            state.saw_staged_files = std::fs::read_dir(staging.module_dir())
                .map(|mut entries| entries.next().is_some())
                .unwrap_or(false);
        }

        if self.fail {
            return Err(ArchiveError::Io {
                path: target.artifact_path(),
                source: std::io::Error::other("disk full"),
            }
            .into());
        }

        Ok(release_archive::archive(staging, target)?)
    }
}

#[derive(Clone, Copy)]
enum PublishFailure {
    Auth,
    Rejected,
}

/// Records publish requests and answers with a canned publication.
#[derive(Clone)]
pub struct MockPublisher {
    failure: Option<PublishFailure>,
    published: Arc<Mutex<Vec<PublishRequest>>>,
}

impl MockPublisher {
    #[must_use]
    pub fn new() -> Self {
        Self {
            failure: None,
            published: Arc::default(),
        }
    }

    #[must_use]
    pub fn failing_auth() -> Self {
        Self {
            failure: Some(PublishFailure::Auth),
            ..Self::new()
        }
    }

    #[must_use]
    pub fn rejecting() -> Self {
        Self {
            failure: Some(PublishFailure::Rejected),
            ..Self::new()
        }
    }

    #[must_use]
    pub fn published(&self) -> Vec<PublishRequest> {
        self.published.lock().expect("lock poisoned").clone()
    }
}

impl Default for MockPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleasePublisher for MockPublisher {
    fn publish(
        &self,
        artifact: &ReleaseArtifact,
        request: &PublishRequest,
        remote: &RemoteConfig,
    ) -> Result<Publication> {
        match self.failure {
            Some(PublishFailure::Auth) => {
                return Err(PublishError::Auth {
                    status: 401,
                    message: "Bad credentials".to_string(),
                }
                .into());
            }
            Some(PublishFailure::Rejected) => {
                return Err(PublishError::Rejected {
                    status: 422,
                    message: "Validation Failed".to_string(),
                }
                .into());
            }
            None => {}
        }

        self.published
            .lock()
            .expect("lock poisoned")
            .push(request.clone());

        Ok(Publication {
            release_id: 1,
            html_url: format!(
                "https://github.com/{}/{}/releases/tag/{}",
                remote.account,
                remote.repo,
                artifact.version.tag()
            ),
            asset_url: format!(
                "https://github.com/{}/{}/releases/download/{}/{}",
                remote.account,
                remote.repo,
                artifact.version.tag(),
                artifact.file_name()
            ),
            created_release: true,
        })
    }
}

pub struct MockGitProvider {
    clean: Option<bool>,
    remote_url: Option<String>,
}

impl MockGitProvider {
    #[must_use]
    pub fn new() -> Self {
        Self {
            clean: Some(true),
            remote_url: None,
        }
    }

    /// Behaves like a directory that is not a git repository.
    #[must_use]
    pub fn not_a_repository() -> Self {
        Self {
            clean: None,
            remote_url: None,
        }
    }

    #[must_use]
    pub fn is_clean(mut self, clean: bool) -> Self {
        self.clean = Some(clean);
        self
    }

    #[must_use]
    pub fn with_remote_url(mut self, url: &str) -> Self {
        self.remote_url = Some(url.to_string());
        self
    }
}

impl Default for MockGitProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl GitProvider for MockGitProvider {
    fn is_working_tree_clean(&self, project_root: &Path) -> Result<bool> {
        self.clean.ok_or_else(|| {
            release_git::GitError::NotARepository {
                path: project_root.to_path_buf(),
            }
            .into()
        })
    }

    fn remote_url(&self, project_root: &Path) -> Result<Option<String>> {
        if self.clean.is_none() {
            return Err(release_git::GitError::NotARepository {
                path: project_root.to_path_buf(),
            }
            .into());
        }
        Ok(self.remote_url.clone())
    }
}

pub struct MockSetupInteraction {
    answers: Option<SetupAnswers>,
    interactive: bool,
    asked: Mutex<Vec<SetupDefaults>>,
}

impl MockSetupInteraction {
    #[must_use]
    pub fn answering(account: &str, repo: &str, token: &str) -> Self {
        Self {
            answers: Some(SetupAnswers {
                account: account.to_string(),
                repo: repo.to_string(),
                token: token.to_string(),
            }),
            interactive: true,
            asked: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn cancelling() -> Self {
        Self {
            answers: None,
            interactive: true,
            asked: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn non_interactive() -> Self {
        Self {
            interactive: false,
            ..Self::cancelling()
        }
    }

    #[must_use]
    pub fn asked(&self) -> Vec<SetupDefaults> {
        self.asked.lock().expect("lock poisoned").clone()
    }
}

impl SetupInteraction for MockSetupInteraction {
    fn ask_remote(&self, defaults: &SetupDefaults) -> Result<Option<SetupAnswers>> {
        if !self.interactive {
            return Err(OperationError::InteractionRequired);
        }
        self.asked
            .lock()
            .expect("lock poisoned")
            .push(defaults.clone());
        Ok(self.answers.clone())
    }
}
