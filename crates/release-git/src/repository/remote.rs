use crate::{Repository, Result};

const DEFAULT_REMOTE: &str = "origin";

impl Repository {
    /// URL of the `origin` remote; `None` when there is no such remote or it
    /// has no URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote exists but cannot be read.
    pub fn remote_url(&self) -> Result<Option<String>> {
        match self.inner.find_remote(DEFAULT_REMOTE) {
            Ok(remote) => Ok(remote.url().map(str::to_owned)),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
