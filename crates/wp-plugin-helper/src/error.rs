use release_operations::OperationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error("cannot determine the current directory")]
    CurrentDir(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;

impl CliError {
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Operation(e) => e.exit_code(),
            Self::CurrentDir(_) => 1,
        }
    }

    /// Prints warnings collected before a pipeline abort.
    pub fn print_warnings(&self) {
        if let Self::Operation(e) = self {
            crate::commands::print_warnings(e.warnings());
        }
    }
}
