mod remote;
mod status;

use std::path::{Path, PathBuf};

use crate::{GitError, Result};

/// The git repository enclosing a plugin project.
pub struct Repository {
    pub(crate) inner: git2::Repository,
    workdir: PathBuf,
}

impl Repository {
    /// Finds the repository containing `path`, searching parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::NotARepository`] when no enclosing repository with a
    /// working directory exists.
    pub fn open(path: &Path) -> Result<Self> {
        let not_a_repository = || GitError::NotARepository {
            path: path.to_path_buf(),
        };

        let inner = git2::Repository::discover(path).map_err(|_| not_a_repository())?;
        // Bare repositories have no working tree to package from.
        let workdir = inner
            .workdir()
            .map(|dir| dunce::simplified(dir).to_path_buf())
            .ok_or_else(not_a_repository)?;

        Ok(Self { inner, workdir })
    }

    #[must_use]
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }
}
