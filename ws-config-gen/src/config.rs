use crate::WsError;
use std::ffi::OsString;
use std::path::PathBuf;
use ws_core::ForceLevel;

/// Fixed names and paths of the stai-vscode workspace layout.
#[derive(Debug, Clone)]
pub struct Settings {
    pub required_user: String,
    pub required_binaries: Vec<String>,
    /// Name the current directory must have; its parent is the base directory.
    pub project_dir_name: String,
    /// Directories created under the base directory, parents first.
    pub directories: Vec<PathBuf>,
    pub local_repo_dir: String,
    pub readme_file: String,
    pub initial_commit_message: String,
    /// Output path relative to the base directory.
    pub workspace_file: PathBuf,
    /// Prefix turning a repository name into a path relative to the
    /// workspace file's directory.
    pub folder_prefix: String,
    pub dir_mode: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            required_user: "stai".to_string(),
            required_binaries: vec!["git".to_string(), "code-insiders".to_string()],
            project_dir_name: "stai-vscode".to_string(),
            directories: vec![
                PathBuf::from("vscode"),
                PathBuf::from("stai-temp"),
                PathBuf::from("stai-temp").join("aitsk"),
            ],
            local_repo_dir: "stai-temp".to_string(),
            readme_file: "readme.md".to_string(),
            initial_commit_message: "Initial commit - stai-temp workspace".to_string(),
            workspace_file: PathBuf::from("vscode").join("stai-all.code-workspace"),
            folder_prefix: "../".to_string(),
            dir_mode: 0o750,
        }
    }
}

/// Facts about the invoking process, gathered once at startup.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub working_dir: PathBuf,
    pub home_dir: PathBuf,
    pub username: String,
    /// Value used in place of `PATH` when resolving executables.
    pub search_path: Option<OsString>,
    pub force: ForceLevel,
}

pub fn create_runtime_config(force: ForceLevel) -> Result<RuntimeConfig, WsError> {
    let working_dir = std::env::current_dir().map_err(|e| {
        WsError::Environment(format!("failed to get current directory: {}", e))
    })?;
    let home_dir = dirs::home_dir()
        .ok_or_else(|| WsError::Environment("failed to get home directory".to_string()))?;
    let username = whoami::fallible::username()
        .map_err(|e| WsError::Environment(format!("failed to get current user: {}", e)))?;

    Ok(RuntimeConfig {
        working_dir,
        home_dir,
        username,
        search_path: std::env::var_os("PATH"),
        force,
    })
}
