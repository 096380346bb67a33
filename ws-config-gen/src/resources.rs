//! Files embedded into the binary at compile time.

use crate::WsError;
use ws_core::ReposConfig;

pub const REPOS_JSON: &str = include_str!("../resources/repos.json");
pub const README_TEMPLATE: &str = include_str!("../resources/readme.md.tmpl");
pub const WORKSPACE_TEMPLATE: &str = include_str!("../resources/stai-all.code-workspace.tmpl");

/// Parse a repository list such as [`REPOS_JSON`]. Names must be unique.
pub fn parse_repos_config(content: &str) -> Result<ReposConfig, WsError> {
    let config = ReposConfig::from_json(content).map_err(|source| WsError::Json {
        context: "parse embedded repository config",
        source,
    })?;

    if let Some(name) = config.duplicate_name() {
        return Err(WsError::Config(format!(
            "repository '{}' is listed more than once",
            name
        )));
    }

    Ok(config)
}
