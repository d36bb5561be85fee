use std::path::Path;

use crate::Result;

/// Read-only view of the repository enclosing a plugin project.
pub trait GitProvider: Send + Sync {
    /// Whether the working tree has no uncommitted changes. Release output
    /// under `releases/` does not count.
    ///
    /// # Errors
    ///
    /// Fails outside a git repository.
    fn is_working_tree_clean(&self, project_root: &Path) -> Result<bool>;

    /// URL of the `origin` remote, if any.
    ///
    /// # Errors
    ///
    /// Fails outside a git repository.
    fn remote_url(&self, project_root: &Path) -> Result<Option<String>>;
}
