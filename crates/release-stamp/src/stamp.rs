use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::StampError;

static DOC_VERSION_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\*[ \t]*@version[ \t]+)[^\r\n]*").expect("@version pattern is a valid regex")
});

static HEADER_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\*[ \t]*Version:[ \t]+)[^\r\n]*").expect("Version: pattern is a valid regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampReport {
    pub path: PathBuf,
    /// Rewritten `@version` doc-comment tags.
    pub version_markers: usize,
    /// Rewritten `Version:` plugin-header lines.
    pub header_markers: usize,
}

impl StampReport {
    #[must_use]
    pub fn total(&self) -> usize {
        self.version_markers + self.header_markers
    }
}

/// Rewrites every `* @version ...` and `* Version: ...` line in `content`.
///
/// Returns the new content and the number of replacements per pattern.
#[must_use]
pub fn stamp_content(content: &str, version: &str) -> (String, usize, usize) {
    let version_markers = DOC_VERSION_TAG.find_iter(content).count();
    let stamped = DOC_VERSION_TAG.replace_all(content, |caps: &Captures<'_>| {
        format!("{}{version}", &caps[1])
    });

    let header_markers = HEADER_VERSION.find_iter(&stamped).count();
    let stamped = HEADER_VERSION.replace_all(&stamped, |caps: &Captures<'_>| {
        format!("{}{version}", &caps[1])
    });

    (stamped.into_owned(), version_markers, header_markers)
}

/// Stamps `version` into the plugin file at `path`, in place.
///
/// There is no backup: the file is expected to be under version control.
///
/// # Errors
///
/// Returns `StampError::Read` if the file cannot be read and
/// `StampError::Write` if the result cannot be written back.
pub fn stamp_version(path: &Path, version: &str) -> Result<StampReport, StampError> {
    let content = std::fs::read_to_string(path).map_err(|source| StampError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let (stamped, version_markers, header_markers) = stamp_content(&content, version);

    std::fs::write(path, stamped).map_err(|source| StampError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(StampReport {
        path: path.to_path_buf(),
        version_markers,
        header_markers,
    })
}
