use std::path::Path;

use release_core::ReleaseRequest;
use release_operations::operations::{PackageOperation, PackageOutput};
use release_operations::providers::{
    FileSystemArchiver, FileSystemChangelogReader, FileSystemConfigProvider,
    FileSystemVersionStamper, Git2Provider, GitHubReleasePublisher,
};

use super::CreatePackageArgs;
use crate::environment::token_override;
use crate::error::Result;

pub(crate) fn run(args: CreatePackageArgs, project_root: &Path) -> Result<()> {
    let request = ReleaseRequest {
        target_version: args.version,
        release_message: args.release_message,
        skip_changelog_check: args.skip_check,
        publish_remote: args.git_release,
    };

    let operation = PackageOperation::new(
        FileSystemConfigProvider::new().with_token_override(token_override()),
        FileSystemChangelogReader::new(),
        FileSystemVersionStamper::new(),
        FileSystemArchiver::new(),
        GitHubReleasePublisher::new(),
        Git2Provider::new(),
    );
    let output = operation.execute(project_root, &request)?;

    print_output(&output);

    Ok(())
}

fn print_output(output: &PackageOutput) {
    super::print_warnings(&output.warnings);

    println!(
        "Packaged {} file(s) into {}",
        output.staged_files,
        output.artifact.path.display()
    );
    if let Some(publication) = &output.publication {
        println!("Published release: {}", publication.html_url);
    }
}
