use std::path::PathBuf;

use git2::{Status, StatusOptions};

use super::Repository;
use crate::Result;

/// Directory the tool writes its own output to; changes there are expected.
const OUTPUT_DIR: &str = "releases/";

impl Repository {
    /// Paths with uncommitted changes, untracked files included.
    ///
    /// Anything under `releases/` is left out since packaging writes there.
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot compute the status.
    pub fn uncommitted_paths(&self) -> Result<Vec<PathBuf>> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = self.inner.statuses(Some(&mut options))?;

        Ok(statuses
            .iter()
            .filter(|entry| entry.status() != Status::CURRENT)
            .filter_map(|entry| entry.path().map(str::to_owned))
            .filter(|path| !path.starts_with(OUTPUT_DIR))
            .map(PathBuf::from)
            .collect())
    }

    /// # Errors
    ///
    /// Returns an error if git cannot compute the status.
    pub fn is_working_tree_clean(&self) -> Result<bool> {
        Ok(self.uncommitted_paths()?.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use crate::repository::tests::init_plugin_repo;

    #[test]
    fn fresh_repository_is_clean() -> anyhow::Result<()> {
        let (_dir, repo) = init_plugin_repo()?;

        assert!(repo.is_working_tree_clean()?);

        Ok(())
    }

    #[test]
    fn untracked_plugin_file_is_reported() -> anyhow::Result<()> {
        let (dir, repo) = init_plugin_repo()?;
        fs::write(dir.path().join("my-plugin.php"), "<?php\n")?;

        assert!(!repo.is_working_tree_clean()?);
        assert_eq!(
            repo.uncommitted_paths()?,
            vec![PathBuf::from("my-plugin.php")]
        );

        Ok(())
    }

    #[test]
    fn release_output_does_not_dirty_the_tree() -> anyhow::Result<()> {
        let (dir, repo) = init_plugin_repo()?;
        fs::create_dir_all(dir.path().join("releases/versions/1.0.0"))?;
        fs::write(dir.path().join("releases/versions/1.0.0/my-plugin.zip"), b"PK")?;

        assert!(repo.is_working_tree_clean()?);

        Ok(())
    }
}
