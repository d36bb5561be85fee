mod check;
mod create_package;
pub(crate) mod last;
mod setup;

use std::path::Path;

use clap::{ArgAction, Args, Subcommand};
use release_core::ReleaseLayout;
use release_operations::OperationError;
use release_pipeline::StepWarning;

use crate::error::Result;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Verify, stamp, package and publish a release
    #[command(disable_version_flag = true)]
    CreatePackage(CreatePackageArgs),
    /// Create wp-plugin-helper.toml interactively
    Setup,
}

#[derive(Args)]
pub(crate) struct CreatePackageArgs {
    /// Version to release; must have a CHANGELOG.md entry
    #[arg(long, value_name = "VERSION")]
    pub version: Option<String>,

    /// Body of the GitHub release
    #[arg(long, value_name = "TEXT")]
    pub release_message: Option<String>,

    /// Do not require a CHANGELOG.md entry for the version
    #[arg(long)]
    pub skip_check: bool,

    /// Publish the archive as a GitHub release
    #[arg(
        long,
        value_name = "BOOL",
        action = ArgAction::Set,
        default_value_t = true,
        num_args = 1
    )]
    pub git_release: bool,
}

impl Commands {
    pub(crate) fn execute(self, project_root: &Path) -> Result<()> {
        match self {
            Self::CreatePackage(args) => create_package::run(args, project_root),
            Self::Setup => setup::run(project_root),
        }
    }
}

/// Runs the wizard for an unconfigured project, the environment report otherwise.
pub(crate) fn run_default(project_root: &Path) -> Result<()> {
    if ReleaseLayout::new(project_root).config_path().exists() {
        check::run(project_root)
    } else {
        setup::run(project_root)
    }
}

pub(crate) fn print_warnings(warnings: &[StepWarning<OperationError>]) {
    for warning in warnings {
        eprintln!("warning: {warning}");
        crate::print_causes(warning);
    }
}
