use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use release_core::{ReleaseArtifact, ReleaseLayout, ReleaseVersion};
use tracing::debug;
use walkdir::WalkDir;
use zip::CompressionMethod;
use zip::write::FileOptions;

use crate::error::ArchiveError;
use crate::staging::StagingArea;

const PARTIAL_SUFFIX: &str = ".partial";

/// Where an archive goes.
#[derive(Debug, Clone, Copy)]
pub struct ArchiveTarget<'a> {
    pub layout: &'a ReleaseLayout,
    pub version: &'a ReleaseVersion,
    pub package_name: &'a str,
}

impl ArchiveTarget<'_> {
    #[must_use]
    pub fn artifact_path(&self) -> PathBuf {
        self.layout.artifact_path(self.version, self.package_name)
    }
}

/// Compresses the staging root into `releases/versions/<version>/<package>`.
///
/// Entries are stored as `<module_name>/<relative path>`. The archive is
/// written next to its final location with a `.partial` suffix and renamed
/// once complete.
///
/// # Errors
///
/// Returns `ArchiveError::ArtifactExists` when the artifact is already
/// present, `ArchiveError::EmptyStaging` when nothing was staged, and an I/O
/// or zip error when the archive cannot be written.
pub fn archive(
    staging: &StagingArea,
    target: &ArchiveTarget<'_>,
) -> Result<ReleaseArtifact, ArchiveError> {
    let artifact_path = target.artifact_path();
    if artifact_path.exists() {
        return Err(ArchiveError::ArtifactExists {
            path: artifact_path,
        });
    }

    let entries = collect_entries(staging.root())?;
    if !entries.iter().any(|entry| entry.is_file) {
        return Err(ArchiveError::EmptyStaging {
            path: staging.module_dir(),
        });
    }

    let version_dir = target.layout.version_dir(target.version);
    std::fs::create_dir_all(&version_dir).map_err(|source| ArchiveError::CreateDir {
        path: version_dir.clone(),
        source,
    })?;

    let partial_path = partial_path(&artifact_path);
    if let Err(e) = write_zip(&partial_path, &entries) {
        let _ = std::fs::remove_file(&partial_path);
        return Err(e);
    }

    std::fs::rename(&partial_path, &artifact_path).map_err(|source| {
        let _ = std::fs::remove_file(&partial_path);
        ArchiveError::Io {
            path: artifact_path.clone(),
            source,
        }
    })?;

    debug!(
        path = %artifact_path.display(),
        entries = entries.len(),
        "wrote release archive"
    );

    Ok(ReleaseArtifact {
        path: artifact_path,
        version: target.version.clone(),
        module_name: staging.module_name().to_string(),
    })
}

struct Entry {
    source: PathBuf,
    name: String,
    is_file: bool,
}

fn partial_path(artifact_path: &Path) -> PathBuf {
    let mut name = artifact_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(PARTIAL_SUFFIX);
    artifact_path.with_file_name(name)
}

fn collect_entries(root: &Path) -> Result<Vec<Entry>, ArchiveError> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|source| ArchiveError::Walk {
            path: root.to_path_buf(),
            source,
        })?;
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };

        let mut name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let is_file = entry.file_type().is_file();
        if !is_file {
            name.push('/');
        }

        entries.push(Entry {
            source: entry.path().to_path_buf(),
            name,
            is_file,
        });
    }

    Ok(entries)
}

fn write_zip(path: &Path, entries: &[Entry]) -> Result<(), ArchiveError> {
    let io_error = |source| ArchiveError::Io {
        path: path.to_path_buf(),
        source,
    };
    let zip_error = |source| ArchiveError::Zip {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_error)?;
    let mut writer = zip::ZipWriter::new(BufWriter::new(file));
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);

    for entry in entries {
        if entry.is_file {
            writer
                .start_file(entry.name.as_str(), options)
                .map_err(zip_error)?;
            let mut source = File::open(&entry.source).map_err(io_error)?;
            std::io::copy(&mut source, &mut writer).map_err(io_error)?;
        } else {
            writer
                .add_directory(entry.name.as_str(), options.unix_permissions(0o755))
                .map_err(zip_error)?;
        }
    }

    let mut buffered = writer.finish().map_err(zip_error)?;
    buffered.flush().map_err(io_error)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use release_project::FileSelection;
    use tempfile::TempDir;

    use super::*;

    fn write(root: &Path, relative: &str, content: &str) -> anyhow::Result<()> {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    fn staged(project: &Path, include: &[&str]) -> anyhow::Result<StagingArea> {
        let layout = ReleaseLayout::new(project);
        let area = StagingArea::prepare(&layout, "my-plugin")?;
        area.populate(project, &FileSelection::new(include, &[])?)?;
        Ok(area)
    }

    fn zip_names(path: &Path) -> anyhow::Result<Vec<String>> {
        let archive = zip::ZipArchive::new(File::open(path)?)?;
        let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
        names.sort();
        Ok(names)
    }

    #[test]
    fn archive_writes_module_prefixed_entries() -> anyhow::Result<()> {
        let project = TempDir::new()?;
        write(project.path(), "my-plugin.php", "<?php // main")?;
        write(project.path(), "includes/helpers.php", "<?php // helpers")?;
        let layout = ReleaseLayout::new(project.path());
        let version = ReleaseVersion::parse("2.0.0")?;
        let area = staged(project.path(), &["*.php", "includes/**"])?;

        let artifact = archive(
            &area,
            &ArchiveTarget {
                layout: &layout,
                version: &version,
                package_name: "my-plugin.zip",
            },
        )?;

        assert_eq!(
            artifact.path,
            project.path().join("releases/versions/2.0.0/my-plugin.zip")
        );
        assert_eq!(artifact.module_name, "my-plugin");
        assert_eq!(artifact.version, version);
        assert_eq!(
            zip_names(&artifact.path)?,
            vec![
                "my-plugin/",
                "my-plugin/includes/",
                "my-plugin/includes/helpers.php",
                "my-plugin/my-plugin.php",
            ]
        );

        Ok(())
    }

    #[test]
    fn archive_preserves_file_content() -> anyhow::Result<()> {
        let project = TempDir::new()?;
        write(project.path(), "my-plugin.php", "<?php // main")?;
        let layout = ReleaseLayout::new(project.path());
        let version = ReleaseVersion::parse("1.0.0")?;
        let area = staged(project.path(), &["*.php"])?;

        let artifact = archive(
            &area,
            &ArchiveTarget {
                layout: &layout,
                version: &version,
                package_name: "my-plugin.zip",
            },
        )?;

        let mut zip = zip::ZipArchive::new(File::open(&artifact.path)?)?;
        let mut content = String::new();
        zip.by_name("my-plugin/my-plugin.php")?
            .read_to_string(&mut content)?;
        assert_eq!(content, "<?php // main");

        Ok(())
    }

    #[test]
    fn archive_refuses_existing_artifact() -> anyhow::Result<()> {
        let project = TempDir::new()?;
        write(project.path(), "my-plugin.php", "<?php")?;
        write(project.path(), "releases/versions/1.0.0/my-plugin.zip", "old")?;
        let layout = ReleaseLayout::new(project.path());
        let version = ReleaseVersion::parse("1.0.0")?;
        let area = staged(project.path(), &["*.php"])?;

        let result = archive(
            &area,
            &ArchiveTarget {
                layout: &layout,
                version: &version,
                package_name: "my-plugin.zip",
            },
        );

        assert!(matches!(result, Err(ArchiveError::ArtifactExists { .. })));
        assert_eq!(
            std::fs::read_to_string(project.path().join("releases/versions/1.0.0/my-plugin.zip"))?,
            "old"
        );

        Ok(())
    }

    #[test]
    fn archive_refuses_empty_staging() -> anyhow::Result<()> {
        let project = TempDir::new()?;
        write(project.path(), "my-plugin.php", "<?php")?;
        let layout = ReleaseLayout::new(project.path());
        let version = ReleaseVersion::parse("1.0.0")?;
        let area = staged(project.path(), &["*.js"])?;

        let result = archive(
            &area,
            &ArchiveTarget {
                layout: &layout,
                version: &version,
                package_name: "my-plugin.zip",
            },
        );

        assert!(matches!(result, Err(ArchiveError::EmptyStaging { .. })));
        assert!(!layout.version_dir(&version).exists());

        Ok(())
    }

    #[test]
    fn archive_leaves_no_partial_file() -> anyhow::Result<()> {
        let project = TempDir::new()?;
        write(project.path(), "my-plugin.php", "<?php")?;
        let layout = ReleaseLayout::new(project.path());
        let version = ReleaseVersion::parse("1.0.0")?;
        let area = staged(project.path(), &["*.php"])?;

        archive(
            &area,
            &ArchiveTarget {
                layout: &layout,
                version: &version,
                package_name: "my-plugin.zip",
            },
        )?;

        let names: Vec<_> = std::fs::read_dir(layout.version_dir(&version))?
            .filter_map(Result::ok)
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["my-plugin.zip"]);

        Ok(())
    }

    #[test]
    fn partial_path_appends_suffix() {
        let path = partial_path(Path::new("releases/versions/1.0.0/my-plugin.zip"));

        assert_eq!(
            path,
            Path::new("releases/versions/1.0.0/my-plugin.zip.partial")
        );
    }
}
