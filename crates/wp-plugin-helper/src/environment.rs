use std::io::IsTerminal;

pub(crate) const NO_TTY_ENV_VAR: &str = "WP_PLUGIN_HELPER_NO_TTY";
pub(crate) const FORCE_TTY_ENV_VAR: &str = "WP_PLUGIN_HELPER_FORCE_TTY";
pub(crate) const TOKEN_ENV_VAR: &str = "WP_PLUGIN_HELPER_TOKEN";

/// Variables set by common CI services.
const CI_ENV_VARS: &[&str] = &[
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "TRAVIS",
    "JENKINS_URL",
    "BUILDKITE",
    "TF_BUILD",
];

/// Why the setup wizard must not prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NonInteractiveReason {
    ExplicitDisable,
    CiDetected { env_var: String },
    NoTerminal,
}

/// `WP_PLUGIN_HELPER_NO_TTY` wins over `WP_PLUGIN_HELPER_FORCE_TTY`, which in
/// turn suppresses CI and terminal detection.
pub fn non_interactive_reason() -> Option<NonInteractiveReason> {
    let is_set = |var: &str| std::env::var_os(var).is_some();

    if is_set(NO_TTY_ENV_VAR) {
        Some(NonInteractiveReason::ExplicitDisable)
    } else if is_set(FORCE_TTY_ENV_VAR) {
        None
    } else if let Some(env_var) = ci_env_var() {
        Some(NonInteractiveReason::CiDetected {
            env_var: env_var.to_string(),
        })
    } else if std::io::stdin().is_terminal() {
        None
    } else {
        Some(NonInteractiveReason::NoTerminal)
    }
}

/// Token from the environment; overrides the one in the config file.
pub fn token_override() -> Option<String> {
    std::env::var(TOKEN_ENV_VAR)
        .ok()
        .filter(|token| !token.trim().is_empty())
}

fn ci_env_var() -> Option<&'static str> {
    CI_ENV_VARS
        .iter()
        .copied()
        .find(|var| std::env::var_os(var).is_some())
}

#[cfg(test)]
mod tests {
    use std::sync::{Mutex, MutexGuard};

    use super::*;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Clears every variable this module reads, applies `vars`, and puts the
    /// previous values back on drop.
    struct ScopedEnv {
        saved: Vec<(&'static str, Option<std::ffi::OsString>)>,
        _lock: MutexGuard<'static, ()>,
    }

    impl ScopedEnv {
        fn new(vars: &[(&str, &str)]) -> Self {
            let lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            let saved: Vec<_> = CI_ENV_VARS
                .iter()
                .copied()
                .chain([NO_TTY_ENV_VAR, FORCE_TTY_ENV_VAR, TOKEN_ENV_VAR])
                .map(|var| (var, std::env::var_os(var)))
                .collect();

            // SAFETY: every test touching the environment holds ENV_LOCK.
            unsafe {
                for (var, _) in &saved {
                    std::env::remove_var(var);
                }
                for (key, value) in vars {
                    std::env::set_var(key, value);
                }
            }

            Self { saved, _lock: lock }
        }
    }

    impl Drop for ScopedEnv {
        fn drop(&mut self) {
            // SAFETY: ENV_LOCK is still held until `_lock` drops.
            unsafe {
                for (var, value) in &self.saved {
                    match value {
                        Some(value) => std::env::set_var(var, value),
                        None => std::env::remove_var(var),
                    }
                }
            }
        }
    }

    #[test]
    fn no_tty_beats_everything() {
        let _env = ScopedEnv::new(&[(NO_TTY_ENV_VAR, "1"), (FORCE_TTY_ENV_VAR, "1"), ("CI", "true")]);

        assert_eq!(
            non_interactive_reason(),
            Some(NonInteractiveReason::ExplicitDisable)
        );
    }

    #[test]
    fn force_tty_suppresses_ci_detection() {
        let _env = ScopedEnv::new(&[("CI", "true"), (FORCE_TTY_ENV_VAR, "1")]);

        assert_eq!(non_interactive_reason(), None);
    }

    #[test]
    fn ci_reason_names_the_variable() {
        let _env = ScopedEnv::new(&[("GITHUB_ACTIONS", "true")]);

        assert_eq!(
            non_interactive_reason(),
            Some(NonInteractiveReason::CiDetected {
                env_var: "GITHUB_ACTIONS".to_string()
            })
        );
    }

    #[test]
    fn jenkins_is_a_ci_service() {
        let _env = ScopedEnv::new(&[("JENKINS_URL", "http://jenkins.local")]);

        assert_eq!(ci_env_var(), Some("JENKINS_URL"));
    }

    #[test]
    fn clean_environment_is_not_ci() {
        let _env = ScopedEnv::new(&[]);

        assert_eq!(ci_env_var(), None);
    }

    #[test]
    fn blank_token_is_not_an_override() {
        let _env = ScopedEnv::new(&[(TOKEN_ENV_VAR, "  ")]);

        assert_eq!(token_override(), None);
    }

    #[test]
    fn token_is_read_from_the_environment() {
        let _env = ScopedEnv::new(&[(TOKEN_ENV_VAR, "ghp_env")]);

        assert_eq!(token_override().as_deref(), Some("ghp_env"));
    }
}
