use serde::{Deserialize, Serialize};
use std::fmt;

mod budget;
pub mod output;
mod template;

pub use budget::{ForceLevel, Remaining, WarningBudget};
pub use output::{ListItemStatus, ListOutput};
pub use template::{Template, TemplateData, TemplateError};

/// Kind of a managed repository, as spelled in `repos.json`.
///
/// Unknown spellings are kept in [`RepoKind::Other`] instead of failing the
/// whole parse, so the error can name the descriptor that carries them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RepoKind {
    /// `git-repo`: cloned from a remote source.
    Remote,
    /// `local-git-repo`: created empty on this machine.
    Local,
    Other(String),
}

impl From<String> for RepoKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "git-repo" => RepoKind::Remote,
            "local-git-repo" => RepoKind::Local,
            _ => RepoKind::Other(value),
        }
    }
}

impl From<RepoKind> for String {
    fn from(kind: RepoKind) -> Self {
        kind.to_string()
    }
}

impl fmt::Display for RepoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepoKind::Remote => write!(f, "git-repo"),
            RepoKind::Local => write!(f, "local-git-repo"),
            RepoKind::Other(other) => write!(f, "{}", other),
        }
    }
}

/// One managed repository from the static list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryDescriptor {
    /// Directory name under the base directory.
    pub name: String,
    #[serde(rename = "git-repo", default)]
    pub git_repo: Option<String>,
    #[serde(rename = "type")]
    pub kind: RepoKind,
}

impl RepositoryDescriptor {
    /// Source location, treating an empty string the same as a missing one.
    pub fn source(&self) -> Option<&str> {
        self.git_repo.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// The `repos.json` document bundled with the tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReposConfig {
    #[serde(default)]
    pub repos: Vec<RepositoryDescriptor>,
}

impl ReposConfig {
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.repos.iter().map(|r| r.name.as_str())
    }

    /// First name that appears more than once, if any.
    pub fn duplicate_name(&self) -> Option<&str> {
        let mut seen = std::collections::HashSet::new();
        self.names().find(|name| !seen.insert(*name))
    }
}

/// One entry of the `folders` array in a `.code-workspace` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceFolderEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub path: String,
}

impl WorkspaceFolderEntry {
    pub fn for_repository(prefix: &str, repo: &RepositoryDescriptor) -> Self {
        Self {
            name: None,
            path: format!("{}{}", prefix, repo.name),
        }
    }
}
