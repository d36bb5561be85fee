use std::path::Path;
use std::sync::Arc;

use release_archive::ArchiveError;
use release_core::{ReleaseArtifact, ReleaseLayout, ReleaseRequest, ReleaseVersion};
use release_pipeline::{PipelineBuilder, StepWarning};
use release_project::ProjectConfig;
use release_publish::Publication;
use release_stamp::StampReport;
use tracing::{debug, info, warn};

use super::context::PackageContext;
use super::data::{ArchivedRelease, PreparedRelease};
use super::steps::{
    ArchiveReleaseStep, PublishReleaseStep, StageFilesStep, StampVersionStep,
    VerifyChangelogEntryStep,
};
use crate::traits::{
    Archiver, ChangelogReader, ConfigProvider, GitProvider, ReleasePublisher, VersionStamper,
};
use crate::{OperationError, Result};

/// Result of a successful `create-package` run.
#[derive(Debug)]
pub struct PackageOutput {
    pub artifact: ReleaseArtifact,
    pub staged_files: usize,
    /// `None` when stamping failed; the failure is in `warnings`.
    pub stamp: Option<StampReport>,
    /// `None` when publishing was disabled.
    pub publication: Option<Publication>,
    /// `None` when the project is not a git repository.
    pub working_tree_clean: Option<bool>,
    pub warnings: Vec<StepWarning<OperationError>>,
}

pub struct PackageOperation<C, L, S, A, P, G> {
    config_provider: C,
    changelog_reader: Arc<L>,
    version_stamper: Arc<S>,
    archiver: Arc<A>,
    publisher: Arc<P>,
    git_provider: Arc<G>,
}

impl<C, L, S, A, P, G> PackageOperation<C, L, S, A, P, G>
where
    C: ConfigProvider,
    L: ChangelogReader + 'static,
    S: VersionStamper + 'static,
    A: Archiver + 'static,
    P: ReleasePublisher + 'static,
    G: GitProvider + 'static,
{
    pub fn new(
        config_provider: C,
        changelog_reader: L,
        version_stamper: S,
        archiver: A,
        publisher: P,
        git_provider: G,
    ) -> Self {
        Self {
            config_provider,
            changelog_reader: Arc::new(changelog_reader),
            version_stamper: Arc::new(version_stamper),
            archiver: Arc::new(archiver),
            publisher: Arc::new(publisher),
            git_provider: Arc::new(git_provider),
        }
    }

    /// Runs the release pipeline for `request` in `project_root`.
    ///
    /// Preconditions are checked before anything on disk changes: the config
    /// and changelog exist, a valid version was given and no artifact exists
    /// for it yet.
    ///
    /// # Errors
    ///
    /// Returns the first failed precondition, or `OperationError::PipelineFailed`
    /// wrapping the error of the step that stopped the pipeline.
    pub fn execute(&self, project_root: &Path, request: &ReleaseRequest) -> Result<PackageOutput> {
        let layout = ReleaseLayout::new(project_root);
        let (config, version) = self.check_preconditions(&layout, request)?;
        let selection = config.file_selection()?;

        let working_tree_clean = self.git_provider.is_working_tree_clean(project_root).ok();
        if working_tree_clean == Some(false) {
            warn!(
                file = %config.main_file(),
                "working tree has uncommitted changes; the version stamp has no backup"
            );
        }

        info!(
            version = %version,
            module = config.module_name(),
            publish = request.publish_remote,
            "packaging release"
        );

        let context = PackageContext::new(
            layout,
            config,
            selection,
            request.clone(),
            Arc::clone(&self.changelog_reader),
            Arc::clone(&self.version_stamper),
            Arc::clone(&self.archiver),
            Arc::clone(&self.publisher),
            Arc::clone(&self.git_provider),
        );

        let pipeline = PipelineBuilder::new()
            .first_step_when(
                VerifyChangelogEntryStep::<L, S, A, P, G>::new(),
                |ctx: &PackageContext<L, S, A, P, G>, _: &PreparedRelease| {
                    !ctx.request().skip_changelog_check
                },
            )
            .then_best_effort(StampVersionStep::<L, S, A, P, G>::new())
            .then(StageFilesStep::<L, S, A, P, G>::new())
            .then(ArchiveReleaseStep::<L, S, A, P, G>::new())
            .then_when(
                PublishReleaseStep::<L, S, A, P, G>::new(),
                |ctx: &PackageContext<L, S, A, P, G>, _: &ArchivedRelease| {
                    ctx.request().publish_remote
                },
            )
            .build();

        let (result, audit) = pipeline.execute_with_audit(&context, PreparedRelease::new(version));
        debug!("release pipeline audit:\n{}", audit.summary());

        let run = result?;
        for warning in &run.warnings {
            warn!(step = %warning.step, error = %warning.error, "step failed, continuing");
        }

        let released = run.output;
        Ok(PackageOutput {
            artifact: released.artifact,
            staged_files: released.staged_files,
            stamp: released.stamp,
            publication: released.publication,
            working_tree_clean,
            warnings: run.warnings,
        })
    }

    fn check_preconditions(
        &self,
        layout: &ReleaseLayout,
        request: &ReleaseRequest,
    ) -> Result<(ProjectConfig, ReleaseVersion)> {
        let config = self
            .config_provider
            .load_config(layout)?
            .ok_or_else(|| OperationError::ConfigMissing(layout.root().to_path_buf()))?;
        config.validate()?;

        if !self.changelog_reader.changelog_exists(layout.root()) {
            return Err(OperationError::ChangelogMissing(layout.root().to_path_buf()));
        }

        let raw_version = request
            .target_version
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .ok_or(OperationError::VersionArgumentMissing)?;
        let version = ReleaseVersion::parse(raw_version)?;

        let artifact_path = layout.artifact_path(&version, &config.package_name());
        if artifact_path.exists() {
            return Err(ArchiveError::ArtifactExists {
                path: artifact_path,
            }
            .into());
        }

        Ok((config, version))
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::path::PathBuf;

    use release_project::{PackageConfig, ProjectError, RemoteConfig};
    use tempfile::TempDir;

    use super::*;
    use crate::ErrorKind;
    use crate::mocks::{
        MockArchiver, MockConfigProvider, MockGitProvider, MockPublisher, MockVersionStamper,
    };
    use crate::providers::{
        FileSystemArchiver, FileSystemChangelogReader, FileSystemConfigProvider,
        FileSystemVersionStamper,
    };

    const PLUGIN_FILE: &str = "<?php
/**
 * Plugin Name: My Plugin
 * Version:     1.0.0
 *
 * @version 1.0.0
 */
";

    const CHANGELOG: &str = "# Changelog

## [2.0.0] - 2024-01-01
- Shiny

## [1.0.0] - 2023-01-01
- First
";

    const CONFIG: &str = r#"[remote]
account = "octocat"
repo = "my-plugin"
token = "ghp_secret"

[package]
module-name = "my-plugin"
include = ["*.php", "includes/**"]
exclude = ["**/*.map"]
"#;

    struct Project {
        dir: TempDir,
    }

    impl Project {
        fn new() -> anyhow::Result<Self> {
            let dir = TempDir::new()?;
            std::fs::write(dir.path().join("my-plugin.php"), PLUGIN_FILE)?;
            std::fs::write(dir.path().join("CHANGELOG.md"), CHANGELOG)?;
            std::fs::write(dir.path().join("wp-plugin-helper.toml"), CONFIG)?;
            std::fs::create_dir_all(dir.path().join("includes"))?;
            std::fs::write(dir.path().join("includes/helpers.php"), "<?php // helpers")?;
            std::fs::write(dir.path().join("includes/helpers.js.map"), "{}")?;
            std::fs::write(dir.path().join("notes.md"), "not shipped")?;
            Ok(Self { dir })
        }

        fn root(&self) -> &Path {
            self.dir.path()
        }

        fn path(&self, relative: &str) -> PathBuf {
            self.dir.path().join(relative)
        }

        fn main_file(&self) -> String {
            std::fs::read_to_string(self.path("my-plugin.php")).unwrap_or_default()
        }
    }

    type FsOperation = PackageOperation<
        FileSystemConfigProvider,
        FileSystemChangelogReader,
        FileSystemVersionStamper,
        FileSystemArchiver,
        MockPublisher,
        MockGitProvider,
    >;

    fn fs_operation(publisher: MockPublisher) -> FsOperation {
        PackageOperation::new(
            FileSystemConfigProvider::new(),
            FileSystemChangelogReader::new(),
            FileSystemVersionStamper::new(),
            FileSystemArchiver::new(),
            publisher,
            MockGitProvider::new(),
        )
    }

    fn zip_names(path: &Path) -> anyhow::Result<Vec<String>> {
        let archive = zip::ZipArchive::new(File::open(path)?)?;
        let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
        names.sort();
        Ok(names)
    }

    #[test]
    fn packages_publishes_and_cleans_up() -> anyhow::Result<()> {
        let project = Project::new()?;
        let publisher = MockPublisher::new();
        let operation = fs_operation(publisher.clone());

        let output = operation.execute(
            project.root(),
            &ReleaseRequest::new("2.0.0").with_release_message("Shiny things"),
        )?;

        let expected = project.path("releases/versions/2.0.0/my-plugin.zip");
        assert_eq!(output.artifact.path, expected);
        assert_eq!(output.staged_files, 2);
        assert!(output.warnings.is_empty());
        assert!(output.publication.is_some());
        assert_eq!(
            zip_names(&expected)?,
            vec![
                "my-plugin/",
                "my-plugin/includes/",
                "my-plugin/includes/helpers.php",
                "my-plugin/my-plugin.php",
            ]
        );
        assert!(!project.path("releases/tmp_dir").exists());

        let main_file = project.main_file();
        assert!(main_file.contains(" * Version:     2.0.0"));
        assert!(main_file.contains(" * @version 2.0.0"));

        let published = publisher.published();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].tag, "v2.0.0");
        assert_eq!(published[0].title, "my-plugin v2.0.0");
        assert_eq!(published[0].body.as_deref(), Some("Shiny things"));
        assert_eq!(published[0].token.as_deref(), Some("ghp_secret"));

        Ok(())
    }

    #[test]
    fn git_release_false_never_publishes() -> anyhow::Result<()> {
        let project = Project::new()?;
        let publisher = MockPublisher::new();
        let operation = fs_operation(publisher.clone());

        let output = operation.execute(
            project.root(),
            &ReleaseRequest::new("2.0.0").publish_remote(false),
        )?;

        assert!(output.publication.is_none());
        assert!(publisher.published().is_empty());
        assert!(output.artifact.path.is_file());

        Ok(())
    }

    #[test]
    fn missing_changelog_entry_aborts_without_mutation() -> anyhow::Result<()> {
        let project = Project::new()?;
        let publisher = MockPublisher::new();
        let operation = fs_operation(publisher.clone());

        let err = operation
            .execute(project.root(), &ReleaseRequest::new("9.9.9"))
            .expect_err("9.9.9 has no changelog entry");

        assert_eq!(err.kind(), ErrorKind::ChangelogEntryMissing);
        assert_eq!(project.main_file(), PLUGIN_FILE);
        assert!(!project.path("releases/versions/9.9.9").exists());
        assert!(!project.path("releases/tmp_dir").exists());
        assert!(publisher.published().is_empty());

        Ok(())
    }

    #[test]
    fn skip_check_packages_unlisted_version() -> anyhow::Result<()> {
        let project = Project::new()?;
        let operation = fs_operation(MockPublisher::new());

        let output = operation.execute(
            project.root(),
            &ReleaseRequest::new("9.9.9")
                .skip_changelog_check(true)
                .publish_remote(false),
        )?;

        assert!(project.path("releases/versions/9.9.9/my-plugin.zip").is_file());
        assert_eq!(output.artifact.version.as_str(), "9.9.9");

        Ok(())
    }

    #[test]
    fn second_run_fails_with_artifact_exists_before_mutation() -> anyhow::Result<()> {
        let project = Project::new()?;
        let operation = fs_operation(MockPublisher::new());
        let request = ReleaseRequest::new("2.0.0").publish_remote(false);
        operation.execute(project.root(), &request)?;
        std::fs::write(project.path("my-plugin.php"), PLUGIN_FILE)?;

        let err = operation
            .execute(project.root(), &request)
            .expect_err("artifact already exists");

        assert!(matches!(
            err,
            OperationError::Archive(ArchiveError::ArtifactExists { .. })
        ));
        assert_eq!(err.exit_code(), 21);
        assert_eq!(project.main_file(), PLUGIN_FILE);

        Ok(())
    }

    #[test]
    fn missing_config_is_reported_first() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let operation = fs_operation(MockPublisher::new());

        let err = operation
            .execute(dir.path(), &ReleaseRequest::new("1.0.0"))
            .expect_err("no config");

        assert_eq!(err.kind(), ErrorKind::ConfigMissing);

        Ok(())
    }

    #[test]
    fn missing_changelog_is_reported() -> anyhow::Result<()> {
        let project = Project::new()?;
        std::fs::remove_file(project.path("CHANGELOG.md"))?;
        let operation = fs_operation(MockPublisher::new());

        let err = operation
            .execute(project.root(), &ReleaseRequest::new("2.0.0"))
            .expect_err("no changelog");

        assert_eq!(err.kind(), ErrorKind::ChangelogMissing);
        assert_eq!(err.exit_code(), 11);

        Ok(())
    }

    #[test]
    fn missing_version_is_reported() -> anyhow::Result<()> {
        let project = Project::new()?;
        let operation = fs_operation(MockPublisher::new());

        let err = operation
            .execute(project.root(), &ReleaseRequest::default())
            .expect_err("no version");

        assert!(matches!(err, OperationError::VersionArgumentMissing));
        assert_eq!(project.main_file(), PLUGIN_FILE);

        Ok(())
    }

    #[test]
    fn invalid_version_is_rejected_before_mutation() -> anyhow::Result<()> {
        let project = Project::new()?;
        let operation = fs_operation(MockPublisher::new());

        let err = operation
            .execute(
                project.root(),
                &ReleaseRequest::new("../../etc").skip_changelog_check(true),
            )
            .expect_err("invalid version");

        assert_eq!(err.exit_code(), 13);
        assert_eq!(project.main_file(), PLUGIN_FILE);
        assert!(!project.path("releases").exists());

        Ok(())
    }

    #[test]
    fn module_name_with_parent_dir_is_rejected_before_mutation() -> anyhow::Result<()> {
        let project = Project::new()?;
        std::fs::write(
            project.path("wp-plugin-helper.toml"),
            CONFIG.replace(r#"module-name = "my-plugin""#, r#"module-name = "../escape""#),
        )?;
        let operation = fs_operation(MockPublisher::new());

        let err = operation
            .execute(
                project.root(),
                &ReleaseRequest::new("2.0.0").publish_remote(false),
            )
            .expect_err("module name escapes the staging root");

        assert!(matches!(
            err,
            OperationError::Project(ProjectError::InvalidFileName { field: "module-name", .. })
        ));
        assert!(!project.path("releases").exists());
        assert_eq!(project.main_file(), PLUGIN_FILE);

        Ok(())
    }

    #[test]
    fn package_name_outside_version_dir_is_rejected() -> anyhow::Result<()> {
        let project = Project::new()?;
        let mut package = PackageConfig::new("my-plugin");
        package.package_name = Some("../../../outside.zip".to_string());
        package.include = vec!["*.php".to_string()];
        let config = ProjectConfig::new(RemoteConfig::new("octocat", "my-plugin"), package);
        let operation = PackageOperation::new(
            MockConfigProvider::with_config(config),
            FileSystemChangelogReader::new(),
            FileSystemVersionStamper::new(),
            FileSystemArchiver::new(),
            MockPublisher::new(),
            MockGitProvider::new(),
        );

        let err = operation
            .execute(
                project.root(),
                &ReleaseRequest::new("2.0.0").publish_remote(false),
            )
            .expect_err("package name escapes the version directory");

        assert!(matches!(
            err,
            OperationError::Project(ProjectError::InvalidFileName { field: "package-name", .. })
        ));
        assert!(!project.path("outside.zip").exists());
        assert!(!project.path("releases").exists());

        Ok(())
    }

    #[test]
    fn stamp_failure_is_a_warning() -> anyhow::Result<()> {
        let project = Project::new()?;
        let operation = PackageOperation::new(
            FileSystemConfigProvider::new(),
            FileSystemChangelogReader::new(),
            MockVersionStamper::failing(),
            FileSystemArchiver::new(),
            MockPublisher::new(),
            MockGitProvider::new(),
        );

        let output = operation.execute(
            project.root(),
            &ReleaseRequest::new("2.0.0").publish_remote(false),
        )?;

        assert!(output.stamp.is_none());
        assert_eq!(output.warnings.len(), 1);
        assert_eq!(output.warnings[0].step, "stamp_version");
        assert_eq!(output.warnings[0].error.kind(), ErrorKind::StampFailed);
        assert!(output.artifact.path.is_file());

        Ok(())
    }

    #[test]
    fn archive_failure_still_removes_staging() -> anyhow::Result<()> {
        let project = Project::new()?;
        let archiver = MockArchiver::failing();
        let publisher = MockPublisher::new();
        let operation = PackageOperation::new(
            FileSystemConfigProvider::new(),
            FileSystemChangelogReader::new(),
            FileSystemVersionStamper::new(),
            archiver.clone(),
            publisher.clone(),
            MockGitProvider::new(),
        );

        let err = operation
            .execute(project.root(), &ReleaseRequest::new("2.0.0"))
            .expect_err("archive fails");

        assert_eq!(err.kind(), ErrorKind::ArchiveFailed);
        assert!(matches!(
            err,
            OperationError::PipelineFailed { ref step, .. } if step == "archive_release"
        ));
        assert_eq!(archiver.calls(), 1);
        assert!(archiver.saw_staged_files());
        assert!(!project.path("releases/tmp_dir").exists());
        assert!(publisher.published().is_empty());

        Ok(())
    }

    #[test]
    fn empty_selection_fails_and_cleans_up() -> anyhow::Result<()> {
        let project = Project::new()?;
        let config = ProjectConfig::new(
            RemoteConfig::new("octocat", "my-plugin"),
            PackageConfig::new("my-plugin"),
        );
        let operation = PackageOperation::new(
            MockConfigProvider::with_config(config),
            FileSystemChangelogReader::new(),
            FileSystemVersionStamper::new(),
            FileSystemArchiver::new(),
            MockPublisher::new(),
            MockGitProvider::new(),
        );

        let err = operation
            .execute(project.root(), &ReleaseRequest::new("2.0.0"))
            .expect_err("nothing staged");

        assert!(matches!(
            err,
            OperationError::PipelineFailed { ref source, .. }
                if matches!(**source, OperationError::Archive(ArchiveError::EmptyStaging { .. }))
        ));
        assert!(!project.path("releases/tmp_dir").exists());
        assert!(!project.path("releases/versions/2.0.0").exists());

        Ok(())
    }

    #[test]
    fn publish_failure_keeps_local_artifact() -> anyhow::Result<()> {
        let project = Project::new()?;
        let operation = fs_operation(MockPublisher::failing_auth());

        let err = operation
            .execute(project.root(), &ReleaseRequest::new("2.0.0"))
            .expect_err("publish fails");

        assert_eq!(err.kind(), ErrorKind::PublishAuthFailed);
        assert_eq!(err.exit_code(), 30);
        assert!(project.path("releases/versions/2.0.0/my-plugin.zip").is_file());

        Ok(())
    }

    #[test]
    fn dirty_tree_is_reported_but_not_enforced() -> anyhow::Result<()> {
        let project = Project::new()?;
        let operation = PackageOperation::new(
            FileSystemConfigProvider::new(),
            FileSystemChangelogReader::new(),
            FileSystemVersionStamper::new(),
            FileSystemArchiver::new(),
            MockPublisher::new(),
            MockGitProvider::new().is_clean(false),
        );

        let output = operation.execute(
            project.root(),
            &ReleaseRequest::new("2.0.0").publish_remote(false),
        )?;

        assert_eq!(output.working_tree_clean, Some(false));
        assert!(output.stamp.is_some());

        Ok(())
    }

    #[test]
    fn warnings_survive_a_later_abort() -> anyhow::Result<()> {
        let project = Project::new()?;
        let operation = PackageOperation::new(
            FileSystemConfigProvider::new(),
            FileSystemChangelogReader::new(),
            MockVersionStamper::failing(),
            MockArchiver::failing(),
            MockPublisher::new(),
            MockGitProvider::new(),
        );

        let err = operation
            .execute(project.root(), &ReleaseRequest::new("2.0.0"))
            .expect_err("archive fails");

        assert_eq!(err.warnings().len(), 1);
        assert_eq!(err.warnings()[0].step, "stamp_version");

        Ok(())
    }
}
