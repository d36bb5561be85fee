use std::path::Path;

use crate::Result;
use crate::traits::GitProvider;

pub struct Git2Provider;

impl Git2Provider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for Git2Provider {
    fn default() -> Self {
        Self::new()
    }
}

impl GitProvider for Git2Provider {
    fn is_working_tree_clean(&self, project_root: &Path) -> Result<bool> {
        Ok(release_git::is_working_tree_clean(project_root)?)
    }

    fn remote_url(&self, project_root: &Path) -> Result<Option<String>> {
        Ok(release_git::origin_url(project_root)?)
    }
}
