//! Git queries used while packaging a plugin: working-tree state, the
//! `origin` URL and GitHub remote parsing.

mod error;
mod github;
mod repository;

use std::path::Path;

pub use error::GitError;
pub use github::GitHubRemote;
pub use repository::Repository;

pub type Result<T> = std::result::Result<T, GitError>;

/// True when the repository enclosing `path` has no uncommitted changes
/// outside `releases/`.
///
/// # Errors
///
/// Returns `GitError::NotARepository` outside a repository, or the git error
/// if the status cannot be computed.
pub fn is_working_tree_clean(path: &Path) -> Result<bool> {
    Repository::open(path)?.is_working_tree_clean()
}

/// # Errors
///
/// Returns `GitError::NotARepository` outside a repository.
pub fn origin_url(path: &Path) -> Result<Option<String>> {
    Repository::open(path)?.remote_url()
}
