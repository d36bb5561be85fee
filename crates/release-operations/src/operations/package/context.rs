use std::path::PathBuf;
use std::sync::Arc;

use release_core::{ReleaseLayout, ReleaseRequest};
use release_project::{FileSelection, ProjectConfig};

use crate::traits::{Archiver, ChangelogReader, GitProvider, ReleasePublisher, VersionStamper};

/// Shared, read-only inputs of one packaging run.
pub struct PackageContext<L, S, A, P, G> {
    layout: ReleaseLayout,
    config: ProjectConfig,
    selection: FileSelection,
    request: ReleaseRequest,
    changelog_reader: Arc<L>,
    version_stamper: Arc<S>,
    archiver: Arc<A>,
    publisher: Arc<P>,
    git_provider: Arc<G>,
}

impl<L, S, A, P, G> PackageContext<L, S, A, P, G>
where
    L: ChangelogReader,
    S: VersionStamper,
    A: Archiver,
    P: ReleasePublisher,
    G: GitProvider,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        layout: ReleaseLayout,
        config: ProjectConfig,
        selection: FileSelection,
        request: ReleaseRequest,
        changelog_reader: Arc<L>,
        version_stamper: Arc<S>,
        archiver: Arc<A>,
        publisher: Arc<P>,
        git_provider: Arc<G>,
    ) -> Self {
        Self {
            layout,
            config,
            selection,
            request,
            changelog_reader,
            version_stamper,
            archiver,
            publisher,
            git_provider,
        }
    }

    #[must_use]
    pub fn layout(&self) -> &ReleaseLayout {
        &self.layout
    }

    #[must_use]
    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    #[must_use]
    pub fn selection(&self) -> &FileSelection {
        &self.selection
    }

    #[must_use]
    pub fn request(&self) -> &ReleaseRequest {
        &self.request
    }

    #[must_use]
    pub fn main_file_path(&self) -> PathBuf {
        self.layout.root().join(self.config.main_file())
    }

    #[must_use]
    pub fn changelog_reader(&self) -> &L {
        &self.changelog_reader
    }

    #[must_use]
    pub fn version_stamper(&self) -> &S {
        &self.version_stamper
    }

    #[must_use]
    pub fn archiver(&self) -> &A {
        &self.archiver
    }

    #[must_use]
    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    #[must_use]
    pub fn git_provider(&self) -> &G {
        &self.git_provider
    }
}
