use std::marker::PhantomData;

use release_archive::{ArchiveTarget, StagingArea};
use release_pipeline::PipelineStep;
use release_publish::PublishRequest;
use tracing::{debug, info, warn};

use super::context::PackageContext;
use super::data::{ArchivedRelease, PreparedRelease, StagedRelease};
use crate::OperationError;
use crate::traits::{Archiver, ChangelogReader, GitProvider, ReleasePublisher, VersionStamper};

macro_rules! marker_step {
    ($name:ident) => {
        pub struct $name<L, S, A, P, G> {
            _marker: PhantomData<(L, S, A, P, G)>,
        }

        impl<L, S, A, P, G> $name<L, S, A, P, G> {
            #[must_use]
            pub fn new() -> Self {
                Self {
                    _marker: PhantomData,
                }
            }
        }

        impl<L, S, A, P, G> Default for $name<L, S, A, P, G> {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

marker_step!(VerifyChangelogEntryStep);
marker_step!(StampVersionStep);
marker_step!(StageFilesStep);
marker_step!(ArchiveReleaseStep);
marker_step!(PublishReleaseStep);

impl<L, S, A, P, G> PipelineStep for VerifyChangelogEntryStep<L, S, A, P, G>
where
    L: ChangelogReader,
    S: VersionStamper,
    A: Archiver,
    P: ReleasePublisher,
    G: GitProvider,
{
    type Input = PreparedRelease;
    type Output = PreparedRelease;
    type Context = PackageContext<L, S, A, P, G>;
    type Error = OperationError;

    fn name(&self) -> &'static str {
        "verify_changelog_entry"
    }

    fn execute(
        &self,
        ctx: &Self::Context,
        input: Self::Input,
    ) -> Result<Self::Output, Self::Error> {
        let changelog_path = ctx.layout().changelog_path();
        let version = input.version.as_str();

        if !ctx
            .changelog_reader()
            .version_exists(&changelog_path, version)
        {
            return Err(OperationError::ChangelogEntryMissing {
                version: version.to_string(),
            });
        }

        debug!(version, "changelog entry found");
        Ok(input)
    }
}

impl<L, S, A, P, G> PipelineStep for StampVersionStep<L, S, A, P, G>
where
    L: ChangelogReader,
    S: VersionStamper,
    A: Archiver,
    P: ReleasePublisher,
    G: GitProvider,
{
    type Input = PreparedRelease;
    type Output = PreparedRelease;
    type Context = PackageContext<L, S, A, P, G>;
    type Error = OperationError;

    fn name(&self) -> &'static str {
        "stamp_version"
    }

    fn execute(
        &self,
        ctx: &Self::Context,
        mut input: Self::Input,
    ) -> Result<Self::Output, Self::Error> {
        let main_file = ctx.main_file_path();
        let report = ctx
            .version_stamper()
            .stamp_version(&main_file, input.version.as_str())?;

        if report.total() == 0 {
            warn!(file = %main_file.display(), "no version markers found to stamp");
        }
        info!(
            file = %main_file.display(),
            version = %input.version,
            version_markers = report.version_markers,
            header_markers = report.header_markers,
            "stamped version"
        );

        input.stamp = Some(report);
        Ok(input)
    }
}

impl<L, S, A, P, G> PipelineStep for StageFilesStep<L, S, A, P, G>
where
    L: ChangelogReader,
    S: VersionStamper,
    A: Archiver,
    P: ReleasePublisher,
    G: GitProvider,
{
    type Input = PreparedRelease;
    type Output = StagedRelease;
    type Context = PackageContext<L, S, A, P, G>;
    type Error = OperationError;

    fn name(&self) -> &'static str {
        "stage_files"
    }

    fn execute(
        &self,
        ctx: &Self::Context,
        input: Self::Input,
    ) -> Result<Self::Output, Self::Error> {
        let staging = StagingArea::prepare(ctx.layout(), ctx.config().module_name())?;
        let staged_files = staging.populate(ctx.layout().root(), ctx.selection())?;

        info!(
            files = staged_files,
            path = %staging.module_dir().display(),
            "staged release files"
        );

        Ok(StagedRelease {
            version: input.version,
            stamp: input.stamp,
            staging,
            staged_files,
        })
    }
}

impl<L, S, A, P, G> PipelineStep for ArchiveReleaseStep<L, S, A, P, G>
where
    L: ChangelogReader,
    S: VersionStamper,
    A: Archiver,
    P: ReleasePublisher,
    G: GitProvider,
{
    type Input = StagedRelease;
    type Output = ArchivedRelease;
    type Context = PackageContext<L, S, A, P, G>;
    type Error = OperationError;

    fn name(&self) -> &'static str {
        "archive_release"
    }

    fn execute(
        &self,
        ctx: &Self::Context,
        input: Self::Input,
    ) -> Result<Self::Output, Self::Error> {
        let package_name = ctx.config().package_name();
        let target = ArchiveTarget {
            layout: ctx.layout(),
            version: &input.version,
            package_name: &package_name,
        };

        let archived = ctx.archiver().archive(&input.staging, &target);
        let cleanup = input.staging.cleanup();

        let artifact = archived?;
        cleanup?;

        info!(path = %artifact.path.display(), "created release archive");
        Ok(ArchivedRelease {
            artifact,
            stamp: input.stamp,
            staged_files: input.staged_files,
            publication: None,
        })
    }
}

impl<L, S, A, P, G> PipelineStep for PublishReleaseStep<L, S, A, P, G>
where
    L: ChangelogReader,
    S: VersionStamper,
    A: Archiver,
    P: ReleasePublisher,
    G: GitProvider,
{
    type Input = ArchivedRelease;
    type Output = ArchivedRelease;
    type Context = PackageContext<L, S, A, P, G>;
    type Error = OperationError;

    fn name(&self) -> &'static str {
        "publish_release"
    }

    fn execute(
        &self,
        ctx: &Self::Context,
        mut input: Self::Input,
    ) -> Result<Self::Output, Self::Error> {
        let remote = &ctx.config().remote;
        let request = PublishRequest::for_artifact(&input.artifact, &remote.account, &remote.repo)
            .with_body(ctx.request().release_message.clone())
            .with_token(remote.token().map(str::to_string));

        debug!(
            owner = %request.owner,
            repo = %request.repo,
            tag = %request.tag,
            authenticated = request.token.is_some(),
            "publishing release"
        );

        let publication = ctx
            .publisher()
            .publish(&input.artifact, &request, remote)?;

        info!(url = %publication.html_url, "published release");
        input.publication = Some(publication);
        Ok(input)
    }
}
