use dialoguer::{Confirm, Input, Password};
use release_operations::traits::{SetupAnswers, SetupDefaults, SetupInteraction};
use release_operations::{OperationError, Result};
use tracing::debug;

use crate::environment::non_interactive_reason;

/// Setup wizard prompts on the controlling terminal.
pub struct TerminalSetupInteraction;

impl TerminalSetupInteraction {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalSetupInteraction {
    fn default() -> Self {
        Self::new()
    }
}

impl SetupInteraction for TerminalSetupInteraction {
    fn ask_remote(&self, defaults: &SetupDefaults) -> Result<Option<SetupAnswers>> {
        if let Some(reason) = non_interactive_reason() {
            debug!(?reason, "refusing to prompt");
            return Err(OperationError::InteractionRequired);
        }

        println!("Setting up wp-plugin-helper for '{}'.", defaults.module_name);

        let account = ask_required("GitHub account", defaults.account.as_deref())?;
        let repo = ask_required("GitHub repository", defaults.repo.as_deref())?;
        let token = Password::new()
            .with_prompt("GitHub token (leave empty to set WP_PLUGIN_HELPER_TOKEN instead)")
            .allow_empty_password(true)
            .interact()
            .map_err(into_operation_error)?;

        let confirmed = Confirm::new()
            .with_prompt("Write wp-plugin-helper.toml?")
            .default(true)
            .interact_opt()
            .map_err(into_operation_error)?;

        Ok(match confirmed {
            Some(true) => Some(SetupAnswers {
                account,
                repo,
                token,
            }),
            _ => None,
        })
    }
}

fn ask_required(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input = Input::<String>::new().with_prompt(prompt).validate_with(
        |value: &String| -> std::result::Result<(), &str> {
            if value.trim().is_empty() {
                Err("a value is required")
            } else {
                Ok(())
            }
        },
    );
    if let Some(default) = default {
        input = input.default(default.to_string());
    }

    input
        .interact_text()
        .map(|value| value.trim().to_string())
        .map_err(into_operation_error)
}

fn into_operation_error(e: dialoguer::Error) -> OperationError {
    match e {
        dialoguer::Error::IO(io_err) => OperationError::Io(io_err),
    }
}
