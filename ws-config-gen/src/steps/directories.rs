use super::downgrade;
use crate::config::{RuntimeConfig, Settings};
use crate::WsError;
use std::fs;
use std::path::{Component, Path, PathBuf};
use ws_core::WarningBudget;

/// Check the invocation directory name and return the base directory.
pub fn validate_working_directory(
    settings: &Settings,
    runtime: &RuntimeConfig,
) -> Result<PathBuf, WsError> {
    let work_dir = &runtime.working_dir;
    let name = work_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if name != settings.project_dir_name {
        return Err(WsError::WrongWorkingDirectory {
            expected: settings.project_dir_name.clone(),
            actual: name,
        });
    }

    work_dir.parent().map(Path::to_path_buf).ok_or_else(|| {
        WsError::Environment(format!(
            "current directory {} has no parent directory",
            work_dir.display()
        ))
    })
}

/// Identity and containment run before the cleanliness check, so a base
/// directory in the wrong place fails even when `--force` is unlimited.
pub fn validate_base_directory(
    settings: &Settings,
    runtime: &RuntimeConfig,
    base_dir: &Path,
    budget: &mut WarningBudget,
) -> Result<(), WsError> {
    let base = absolute(base_dir, &runtime.working_dir);
    let home = absolute(&runtime.home_dir, &runtime.working_dir);

    if base == home {
        return Err(WsError::BaseIsHome(runtime.home_dir.clone()));
    }

    if !base.starts_with(&home) {
        return Err(WsError::BaseOutsideHome {
            base: base_dir.to_path_buf(),
            home: runtime.home_dir.clone(),
        });
    }

    check_base_is_clean(settings, base_dir, budget)
}

/// Every entry besides the invocation directory is a separate warning.
///
/// Entries are visited in name order. Once the budget runs out, the error
/// lists the offending entry together with every extra entry after it.
fn check_base_is_clean(
    settings: &Settings,
    base_dir: &Path,
    budget: &mut WarningBudget,
) -> Result<(), WsError> {
    let read = fs::read_dir(base_dir)
        .map_err(|e| WsError::io("failed to read base directory", base_dir, e))?;

    let mut extras = Vec::new();
    for entry in read {
        let entry = entry.map_err(|e| WsError::io("failed to read base directory", base_dir, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name != settings.project_dir_name {
            extras.push(name);
        }
    }
    extras.sort();

    for (idx, name) in extras.iter().enumerate() {
        downgrade(
            budget,
            || format!("Base directory contains '{}'", name),
            WsError::BaseNotEmpty {
                allowed: settings.project_dir_name.clone(),
                found: extras[idx..].to_vec(),
            },
        )?;
    }

    Ok(())
}

fn absolute(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize_path(path)
    } else {
        normalize_path(&cwd.join(path))
    }
}

/// Resolve `.` and `..` lexically, without touching the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let last = out.components().next_back();
                let can_pop = matches!(last, Some(Component::Normal(_)));
                let at_root = matches!(last, Some(Component::RootDir | Component::Prefix(_)));
                if can_pop {
                    out.pop();
                } else if !at_root {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}
