use std::path::Path;

use release_operations::operations::{CheckOperation, CheckReport};
use release_operations::providers::{
    FileSystemChangelogReader, FileSystemConfigProvider, Git2Provider,
};

use crate::error::Result;

pub(crate) fn run(project_root: &Path) -> Result<()> {
    let operation = CheckOperation::new(
        FileSystemConfigProvider::new(),
        FileSystemChangelogReader::new(),
        Git2Provider::new(),
    );
    let report = operation.execute(project_root)?;

    print_report(&report);

    Ok(())
}

fn print_report(report: &CheckReport) {
    println!("Plugin file:    {} (found)", report.main_file.display());
    println!("Config:         {} (found)", report.config_path.display());
    println!(
        "Changelog:      {}",
        if report.changelog_exists {
            "found"
        } else {
            "missing"
        }
    );
    println!(
        "Latest version: {}",
        report.latest_version.as_deref().unwrap_or("none")
    );
    println!(
        "Working tree:   {}",
        match report.working_tree_clean {
            Some(true) => "clean",
            Some(false) => "uncommitted changes",
            None => "not a git repository",
        }
    );
}
