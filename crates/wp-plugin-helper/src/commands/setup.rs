use std::path::Path;

use release_operations::operations::SetupOperation;
use release_operations::providers::{FileSystemConfigProvider, Git2Provider};

use crate::error::Result;
use crate::interaction::TerminalSetupInteraction;

pub(crate) fn run(project_root: &Path) -> Result<()> {
    let operation = SetupOperation::new(
        FileSystemConfigProvider::new(),
        Git2Provider::new(),
        TerminalSetupInteraction::new(),
    );
    let output = operation.execute(project_root)?;

    println!("Wrote {}", output.config_path.display());
    println!(
        "Add include patterns under [package] before running `wp-plugin-helper create-package`."
    );

    Ok(())
}
