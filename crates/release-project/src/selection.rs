use std::path::Path;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::error::ProjectError;

/// Include/exclude glob rules selecting the files that go into a package.
///
/// Patterns are matched against paths relative to the project root using
/// shell semantics: `*` stops at `/`, `**` crosses directories. Exclude
/// patterns take precedence over include patterns.
#[derive(Debug, Clone)]
pub struct FileSelection {
    include: GlobSet,
    exclude: GlobSet,
    include_count: usize,
}

impl FileSelection {
    /// # Errors
    ///
    /// Returns `ProjectError::GlobPattern` for the first invalid pattern.
    pub fn new<S: AsRef<str>>(include: &[S], exclude: &[S]) -> Result<Self, ProjectError> {
        Ok(Self {
            include: build_glob_set(include)?,
            exclude: build_glob_set(exclude)?,
            include_count: include.len(),
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.include_count == 0
    }

    #[must_use]
    pub fn is_selected(&self, relative_path: &Path) -> bool {
        self.include.is_match(relative_path) && !self.exclude.is_match(relative_path)
    }
}

fn build_glob_set<S: AsRef<str>>(patterns: &[S]) -> Result<GlobSet, ProjectError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let raw = pattern.as_ref();
        let normalized = raw.trim().trim_start_matches("./");
        let glob = GlobBuilder::new(normalized)
            .literal_separator(true)
            .build()
            .map_err(|source| ProjectError::GlobPattern {
                pattern: raw.to_string(),
                source,
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| ProjectError::GlobPattern {
        pattern: patterns
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(", "),
        source,
    })
}
