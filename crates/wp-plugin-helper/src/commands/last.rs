use std::path::Path;

use release_operations::operations::LatestVersionOperation;
use release_operations::providers::FileSystemChangelogReader;

use crate::error::Result;

pub(crate) fn run(project_root: &Path) -> Result<()> {
    let operation = LatestVersionOperation::new(FileSystemChangelogReader::new());
    let version = operation.execute(project_root)?;

    println!("Current plugin version is: {version}");

    Ok(())
}
