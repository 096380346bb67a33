use crate::config::Settings;
use crate::WsError;
use std::fs::DirBuilder;
use std::path::{Path, PathBuf};

/// Create the fixed directory layout under `base_dir`.
///
/// Existing directories are left alone. Returns the directories that did
/// not exist before.
pub fn create_directories(settings: &Settings, base_dir: &Path) -> Result<Vec<PathBuf>, WsError> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(settings.dir_mode);
    }

    let mut created = Vec::new();
    for relative in &settings.directories {
        let dir = base_dir.join(relative);
        let existed = dir.is_dir();
        builder
            .create(&dir)
            .map_err(|e| WsError::io("failed to create directory", &dir, e))?;
        if !existed {
            tracing::debug!("Created {}", dir.display());
            created.push(dir);
        }
    }

    Ok(created)
}
