use crate::config::Settings;
use crate::resources::README_TEMPLATE;
use crate::vcs::Vcs;
use crate::WsError;
use std::fs;
use std::path::Path;
use ws_core::output::format_skip;
use ws_core::{Template, TemplateData};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalRepoOutcome {
    Initialized,
    AlreadyPresent,
}

/// Turn the local scratch directory into a repository with one commit.
///
/// A half-finished repository (say, `git commit` failed) is left as is;
/// the next run sees `.git` and skips it.
pub fn init_local_repo(
    settings: &Settings,
    base_dir: &Path,
    vcs: &dyn Vcs,
) -> Result<LocalRepoOutcome, WsError> {
    let name = &settings.local_repo_dir;
    let repo_dir = base_dir.join(name);

    if repo_dir.join(".git").exists() {
        println!(
            "{}",
            format_skip(&format!("{} is already a git repository, skipping initialization", name))
        );
        return Ok(LocalRepoOutcome::AlreadyPresent);
    }

    vcs.init(&repo_dir)
        .map_err(|e| WsError::git(format!("failed to initialize git repository in {}", name), e))?;

    let readme = Template::parse(&settings.readme_file, README_TEMPLATE)?
        .render_to_string(&TemplateData::new())?;
    let readme_path = repo_dir.join(&settings.readme_file);
    fs::write(&readme_path, readme)
        .map_err(|e| WsError::io("failed to write", &readme_path, e))?;

    vcs.add(&repo_dir, &settings.readme_file)
        .map_err(|e| WsError::git(format!("failed to add {} to git", settings.readme_file), e))?;
    vcs.commit(&repo_dir, &settings.initial_commit_message)
        .map_err(|e| WsError::git("failed to commit initial files", e))?;

    tracing::info!("Initialized local repository {}", repo_dir.display());
    Ok(LocalRepoOutcome::Initialized)
}
