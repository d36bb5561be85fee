use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use release_core::{RELEASES_DIR, ReleaseLayout, is_plain_file_name};
use release_project::FileSelection;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::StagingError;

const GIT_DIR: &str = ".git";

/// Exclusive owner of `releases/tmp_dir/` for one packaging run.
///
/// Dropping the guard removes the staging tree. [`StagingArea::cleanup`]
/// does the same but reports failures.
#[derive(Debug)]
pub struct StagingArea {
    root: PathBuf,
    module_name: String,
    released: bool,
}

impl StagingArea {
    /// Creates a fresh `releases/tmp_dir/<module_name>/`.
    ///
    /// `releases/` and `releases/versions/` are created when missing and left
    /// alone otherwise. A staging tree left behind by an earlier run is
    /// removed first.
    ///
    /// # Errors
    ///
    /// Returns `StagingError::InvalidModuleName` when `module_name` is not a
    /// single directory name, and `StagingError::CreateDir` or
    /// `StagingError::Remove` when the directories cannot be set up.
    pub fn prepare(layout: &ReleaseLayout, module_name: &str) -> Result<Self, StagingError> {
        if !is_plain_file_name(module_name) {
            return Err(StagingError::InvalidModuleName {
                name: module_name.to_string(),
            });
        }

        let versions_dir = layout.versions_dir();
        std::fs::create_dir_all(&versions_dir).map_err(|source| StagingError::CreateDir {
            path: versions_dir.clone(),
            source,
        })?;

        let root = layout.staging_dir();
        if root.exists() {
            warn!(path = %root.display(), "removing stale staging directory");
            std::fs::remove_dir_all(&root).map_err(|source| StagingError::Remove {
                path: root.clone(),
                source,
            })?;
        }

        let area = Self {
            root,
            module_name: module_name.to_string(),
            released: false,
        };

        let module_dir = area.module_dir();
        std::fs::create_dir_all(&module_dir).map_err(|source| StagingError::CreateDir {
            path: module_dir.clone(),
            source,
        })?;

        debug!(path = %module_dir.display(), "prepared staging directory");
        Ok(area)
    }

    /// The temporary root, `releases/tmp_dir/`.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `releases/tmp_dir/<module_name>/`, where selected files are copied.
    #[must_use]
    pub fn module_dir(&self) -> PathBuf {
        self.root.join(&self.module_name)
    }

    #[must_use]
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// Copies every selected file under `project_root` into the module
    /// directory, keeping its relative path. Returns the number of files copied.
    ///
    /// The `releases/` tree and the `.git/` directory are never walked.
    /// Selected symlinks are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns `StagingError::Walk` if the tree cannot be traversed and
    /// `StagingError::Copy`/`StagingError::CreateDir` if a file cannot be
    /// copied.
    pub fn populate(
        &self,
        project_root: &Path,
        selection: &FileSelection,
    ) -> Result<usize, StagingError> {
        let CollectedFiles {
            files,
            skipped_links,
        } = collect_selected(project_root, selection)?;
        for link in &skipped_links {
            warn!(
                file = %link.display(),
                "skipping symlink; only regular files are packaged"
            );
        }

        let module_dir = self.module_dir();

        for relative in &files {
            let from = project_root.join(relative);
            let to = module_dir.join(relative);

            if let Some(parent) = to.parent() {
                std::fs::create_dir_all(parent).map_err(|source| StagingError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }

            std::fs::copy(&from, &to).map_err(|source| StagingError::Copy {
                from: from.clone(),
                to: to.clone(),
                source,
            })?;
            debug!(file = %relative.display(), "staged");
        }

        debug!(count = files.len(), "staged files");
        Ok(files.len())
    }

    /// Removes `releases/tmp_dir/`.
    ///
    /// # Errors
    ///
    /// Returns `StagingError::Remove` if the tree cannot be deleted.
    pub fn cleanup(mut self) -> Result<(), StagingError> {
        self.released = true;
        remove_tree(&self.root)
    }
}

impl Drop for StagingArea {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = remove_tree(&self.root) {
            warn!(error = %e, path = %self.root.display(), "failed to remove staging directory");
        }
    }
}

fn remove_tree(root: &Path) -> Result<(), StagingError> {
    match std::fs::remove_dir_all(root) {
        Ok(()) => {
            debug!(path = %root.display(), "removed staging directory");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(StagingError::Remove {
            path: root.to_path_buf(),
            source,
        }),
    }
}

#[derive(Debug, Default)]
struct CollectedFiles {
    /// Root-relative paths of selected regular files, sorted and deduplicated.
    files: BTreeSet<PathBuf>,
    /// Selected paths that are symlinks; these are not packaged.
    skipped_links: Vec<PathBuf>,
}

fn collect_selected(
    project_root: &Path,
    selection: &FileSelection,
) -> Result<CollectedFiles, StagingError> {
    let mut collected = CollectedFiles::default();
    if selection.is_empty() {
        return Ok(collected);
    }

    let walker = WalkDir::new(project_root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() != 1 || !entry.file_type().is_dir() {
                return true;
            }
            let name = entry.file_name();
            name != RELEASES_DIR && name != GIT_DIR
        });

    for entry in walker {
        let entry = entry.map_err(|source| StagingError::Walk {
            path: project_root.to_path_buf(),
            source,
        })?;
        let file_type = entry.file_type();
        if !file_type.is_file() && !file_type.is_symlink() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(project_root) else {
            continue;
        };
        if !selection.is_selected(relative) {
            continue;
        }

        if file_type.is_symlink() {
            collected.skipped_links.push(relative.to_path_buf());
        } else {
            collected.files.insert(relative.to_path_buf());
        }
    }

    Ok(collected)
}
