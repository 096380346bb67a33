//! The bootstrap pipeline.
//!
//! Steps run strictly in order and the first fatal error aborts the run.
//! Nothing is rolled back: directories and repositories created before a
//! failure stay on disk for the operator to inspect.

mod directories;
mod environment;
mod fetch;
mod local_repo;
mod provision;
mod workspace;

pub use directories::{normalize_path, validate_base_directory, validate_working_directory};
pub use environment::{check_binaries, check_user};
pub use fetch::{fetch_repositories, FetchOutcome, FetchReport};
pub use local_repo::{init_local_repo, LocalRepoOutcome};
pub use provision::create_directories;
pub use workspace::{folder_entries, folders_json, generate_workspace};

use crate::config::{RuntimeConfig, Settings};
use crate::resources::parse_repos_config;
use crate::vcs::Vcs;
use crate::WsError;
use std::path::PathBuf;
use ws_core::output::format_warning;
use ws_core::WarningBudget;

/// What a successful run did.
#[derive(Debug)]
pub struct PipelineSummary {
    pub base_dir: PathBuf,
    pub warnings_ignored: u32,
    pub created_dirs: Vec<PathBuf>,
    pub local_repo: LocalRepoOutcome,
    pub repositories: Vec<FetchReport>,
    pub workspace_file: PathBuf,
}

/// Run every step against the repository list in `repos_json`.
///
/// The list is parsed only once the checks and local setup are done, so a
/// broken list never hides an environment problem.
pub fn run_pipeline(
    settings: &Settings,
    runtime: &RuntimeConfig,
    repos_json: &str,
    vcs: &dyn Vcs,
) -> Result<PipelineSummary, WsError> {
    let mut budget = WarningBudget::new(runtime.force);
    tracing::debug!("Warning budget: {:?}", budget.level());

    println!("Checking user and environment...");
    check_user(settings, runtime, &mut budget)?;
    check_binaries(settings, runtime, &mut budget)?;

    let base_dir = validate_working_directory(settings, runtime)?;
    validate_base_directory(settings, runtime, &base_dir, &mut budget)?;

    println!("Creating directories...");
    let created_dirs = create_directories(settings, &base_dir)?;
    let local_repo = init_local_repo(settings, &base_dir, vcs)?;

    println!("Cloning repositories...");
    let repos = parse_repos_config(repos_json)?;
    let repositories = fetch_repositories(settings, &base_dir, &repos, vcs)?;

    println!("Generating workspace file...");
    let workspace_file = generate_workspace(settings, &base_dir, &repos)?;

    Ok(PipelineSummary {
        base_dir,
        warnings_ignored: budget.used(),
        created_dirs,
        local_repo,
        repositories,
        workspace_file,
    })
}

/// Let a failed check pass as an advisory if the budget allows it.
///
/// `warning` is printed when the budget absorbs the failure; otherwise
/// `fatal` is returned and the run stops.
pub(crate) fn downgrade(
    budget: &mut WarningBudget,
    warning: impl FnOnce() -> String,
    fatal: WsError,
) -> Result<(), WsError> {
    if budget.try_consume() {
        let message = format!("Warning: {} (continuing due to --force)", warning());
        tracing::debug!("Downgraded to advisory: {}", fatal);
        println!("{}", format_warning(&message));
        Ok(())
    } else {
        Err(fatal)
    }
}
