//! Dry-run validation of rendered configuration.
//!
//! The check itself is an external collaborator (typically the real daemon in
//! check mode). The compiler only decides whether it runs and passes the
//! outcome through untouched.

use logroute_model::LoggingSystem;
use tracing::debug;

/// Result of a dry-run check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The daemon accepted the configuration.
    Passed,
    /// The daemon rejected the configuration, with its diagnostics.
    Failed(String),
    /// The logging system disables checks.
    Skipped,
}

impl CheckOutcome {
    /// Returns true unless the check ran and failed.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }
}

/// Validates rendered configuration outside the compiler.
pub trait ConfigCheck {
    /// Checks `rendered` and reports the outcome.
    fn check(&self, rendered: &str) -> CheckOutcome;
}

/// Runs `checker` unless `system` disables flow config checks.
pub fn run_check(system: &LoggingSystem, checker: &dyn ConfigCheck, rendered: &str) -> CheckOutcome {
    if system.flow_config_check_disabled {
        debug!(system = %system.name, "flow config check disabled");
        return CheckOutcome::Skipped;
    }
    checker.check(rendered)
}
