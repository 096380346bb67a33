use crate::config::Settings;
use crate::vcs::Vcs;
use crate::WsError;
use colored::*;
use std::fs;
use std::path::Path;
use ws_core::output::format_skip;
use ws_core::{RepoKind, ReposConfig, RepositoryDescriptor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Cloned,
    Initialized,
    /// The target directory was already there.
    AlreadyExists,
    /// Handled by the local repository step.
    ManagedLocally,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchReport {
    pub name: String,
    pub outcome: FetchOutcome,
}

/// Clone or create every repository of the static list, in list order.
///
/// The first failure stops the loop; repositories after it are not touched.
pub fn fetch_repositories(
    settings: &Settings,
    base_dir: &Path,
    config: &ReposConfig,
    vcs: &dyn Vcs,
) -> Result<Vec<FetchReport>, WsError> {
    let mut reports = Vec::with_capacity(config.repos.len());
    for repo in &config.repos {
        let outcome = fetch_one(settings, base_dir, repo, vcs)?;
        reports.push(FetchReport {
            name: repo.name.clone(),
            outcome,
        });
    }
    Ok(reports)
}

fn fetch_one(
    settings: &Settings,
    base_dir: &Path,
    repo: &RepositoryDescriptor,
    vcs: &dyn Vcs,
) -> Result<FetchOutcome, WsError> {
    let repo_dir = base_dir.join(&repo.name);

    // The local repository step owns this directory, and it already exists
    // by the time repositories are fetched.
    if repo.kind == RepoKind::Local && repo.name == settings.local_repo_dir {
        return Ok(FetchOutcome::ManagedLocally);
    }

    if repo_dir.exists() {
        println!(
            "{}",
            format_skip(&format!("Repository {} already exists, skipping", repo.name))
        );
        return Ok(FetchOutcome::AlreadyExists);
    }

    match &repo.kind {
        RepoKind::Remote => {
            let source = repo.source().ok_or_else(|| {
                WsError::Config(format!("git-repo type requires git-repo URL for {}", repo.name))
            })?;

            println!(
                "  {} {}",
                "📦".blue(),
                format!("Cloning {} into '{}'", source, repo_dir.display()).bright_white()
            );
            vcs.clone_repo(source, &repo_dir)
                .map_err(|e| WsError::git(format!("failed to clone repository {}", repo.name), e))?;
            Ok(FetchOutcome::Cloned)
        }
        RepoKind::Local => {
            println!("  {} {}", "🌱".green(), format!("Initializing {}", repo.name).bright_white());
            fs::create_dir_all(&repo_dir)
                .map_err(|e| WsError::io("failed to create directory", &repo_dir, e))?;
            vcs.init(&repo_dir).map_err(|e| {
                WsError::git(format!("failed to initialize git repository for {}", repo.name), e)
            })?;
            Ok(FetchOutcome::Initialized)
        }
        RepoKind::Other(kind) => Err(WsError::Config(format!(
            "unknown repository type '{}' for {}",
            kind, repo.name
        ))),
    }
}
