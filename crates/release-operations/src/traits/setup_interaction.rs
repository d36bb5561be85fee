use crate::Result;

/// Values offered as defaults by the setup wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupDefaults {
    pub account: Option<String>,
    pub repo: Option<String>,
    pub module_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupAnswers {
    pub account: String,
    pub repo: String,
    pub token: String,
}

pub trait SetupInteraction: Send + Sync {
    /// Asks for the GitHub account, repository and token. Returns `None` if
    /// the user cancels.
    ///
    /// # Errors
    ///
    /// Returns an error if the interaction cannot be completed.
    fn ask_remote(&self, defaults: &SetupDefaults) -> Result<Option<SetupAnswers>>;
}
