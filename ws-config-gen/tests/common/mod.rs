#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use ws_config_gen::{ForceLevel, RuntimeConfig, Settings};

pub use ws_config_gen::vcs::testing::RecordingVcs;

/// `<tmp>` acts as home, `<tmp>/work/stai-vscode` as the invocation
/// directory.
pub struct Workspace {
    pub home: TempDir,
    pub settings: Settings,
    pub runtime: RuntimeConfig,
}

impl Workspace {
    pub fn new(force: ForceLevel) -> Self {
        let home = tempfile::tempdir().unwrap();
        let settings = Settings::default();
        let working_dir = home.path().join("work").join(&settings.project_dir_name);
        std::fs::create_dir_all(&working_dir).unwrap();

        let bin = home.path().join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        for name in &settings.required_binaries {
            install_fake_binary(&bin.join(name));
        }

        let runtime = RuntimeConfig {
            working_dir,
            home_dir: home.path().to_path_buf(),
            username: settings.required_user.clone(),
            search_path: Some(bin.into_os_string()),
            force,
        };
        Self {
            home,
            settings,
            runtime,
        }
    }

    pub fn base(&self) -> PathBuf {
        self.home.path().join("work")
    }

    pub fn workspace_file(&self) -> PathBuf {
        self.base().join(&self.settings.workspace_file)
    }
}

#[cfg(unix)]
fn install_fake_binary(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    std::fs::write(path, "#!/bin/sh\nexit 0\n").unwrap();
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

#[cfg(windows)]
fn install_fake_binary(path: &Path) {
    std::fs::write(path.with_extension("exe"), "").unwrap();
}
