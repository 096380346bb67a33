use super::downgrade;
use crate::config::{RuntimeConfig, Settings};
use crate::WsError;
use std::path::PathBuf;
use ws_core::WarningBudget;

pub fn check_user(
    settings: &Settings,
    runtime: &RuntimeConfig,
    budget: &mut WarningBudget,
) -> Result<(), WsError> {
    if runtime.username == settings.required_user {
        return Ok(());
    }

    downgrade(
        budget,
        || {
            format!(
                "Current user is '{}', expected '{}'",
                runtime.username, settings.required_user
            )
        },
        WsError::UnexpectedUser {
            actual: runtime.username.clone(),
            expected: settings.required_user.clone(),
        },
    )
}

/// Every required binary is checked on its own, so each missing one costs a
/// separate unit of the warning budget.
pub fn check_binaries(
    settings: &Settings,
    runtime: &RuntimeConfig,
    budget: &mut WarningBudget,
) -> Result<(), WsError> {
    for binary in &settings.required_binaries {
        match find_binary(binary, runtime) {
            Some(path) => tracing::debug!("Found {} at {}", binary, path.display()),
            None => downgrade(
                budget,
                || format!("Binary '{}' not found in PATH", binary),
                WsError::MissingBinary(binary.clone()),
            )?,
        }
    }
    Ok(())
}

fn find_binary(name: &str, runtime: &RuntimeConfig) -> Option<PathBuf> {
    which::which_in(name, runtime.search_path.as_ref(), &runtime.working_dir).ok()
}
