mod commands;
mod environment;
mod error;
mod interaction;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};

use crate::commands::Commands;
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "wp-plugin-helper")]
#[command(bin_name = "wp-plugin-helper")]
#[command(version = env!("WP_PLUGIN_HELPER_VERSION"))]
#[command(about = "Package, version-stamp and publish WordPress plugin releases")]
#[command(
    long_about = "Package, version-stamp and publish WordPress plugin releases.\n\n\
    Without arguments, runs the setup wizard when no wp-plugin-helper.toml exists \
    and prints an environment report otherwise."
)]
struct Cli {
    /// Project root (default: current directory)
    #[arg(long = "path", short = 'C', global = true)]
    path: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Print the most recent version listed in CHANGELOG.md and exit
    #[arg(long)]
    last: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let project_root = match resolve_project_root(cli.path) {
        Ok(path) => path,
        Err(e) => {
            print_error(&e);
            return ExitCode::from(e.exit_code());
        }
    };

    let result = if cli.last {
        commands::last::run(&project_root)
    } else {
        match cli.command {
            Some(command) => command.execute(&project_root),
            None => commands::run_default(&project_root),
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            e.print_warnings();
            print_error(&e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn resolve_project_root(path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    match path {
        Some(p) => Ok(p),
        None => std::env::current_dir().map_err(CliError::CurrentDir),
    }
}

fn print_error(error: &CliError) {
    eprintln!("error: {error}");
    print_causes(error);
}

pub(crate) fn print_causes(error: &dyn std::error::Error) {
    let mut source = error.source();
    while let Some(cause) = source {
        eprintln!("caused by: {cause}");
        source = cause.source();
    }
}
