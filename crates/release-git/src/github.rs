use url::Url;

use crate::error::GitError;

/// Owner and repository name of a GitHub remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubRemote {
    pub owner: String,
    pub repo: String,
}

impl GitHubRemote {
    /// Parses `https://github.com/owner/repo(.git)`, `ssh://git@github.com/owner/repo`
    /// and the scp-like `git@github.com:owner/repo.git` form.
    ///
    /// # Errors
    ///
    /// Returns `GitError::UrlParse` for malformed URLs, `GitError::NotGitHub`
    /// for other hosts and `GitError::InvalidRepositoryPath` when the path has
    /// no `owner/repo` segments.
    pub fn from_url(url_str: &str) -> Result<Self, GitError> {
        let normalized = normalize_scp_url(url_str);
        let url = Url::parse(&normalized).map_err(|source| GitError::UrlParse {
            url: url_str.to_string(),
            source,
        })?;

        let host = url.host_str().unwrap_or_default().to_lowercase();
        if host != "github.com" && !host.ends_with(".github.com") {
            return Err(GitError::NotGitHub {
                url: url_str.to_string(),
            });
        }

        let path = url.path().trim_start_matches('/').trim_end_matches('/');
        let path = path.strip_suffix(".git").unwrap_or(path);
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let [owner, repo, ..] = segments.as_slice() else {
            return Err(GitError::InvalidRepositoryPath {
                url: url_str.to_string(),
            });
        };

        Ok(Self {
            owner: (*owner).to_string(),
            repo: (*repo).to_string(),
        })
    }
}

fn normalize_scp_url(url_str: &str) -> String {
    if url_str.contains("://") {
        return url_str.to_string();
    }

    match url_str.split_once(':') {
        Some((user_host, path)) if user_host.contains('@') => {
            format!("ssh://{user_host}/{}", path.trim_start_matches('/'))
        }
        _ => url_str.to_string(),
    }
}
