mod common;

use common::{RecordingVcs, Workspace};
use std::fs;
use ws_config_gen::steps::{FetchOutcome, LocalRepoOutcome};
use ws_config_gen::{run_pipeline, ForceLevel, WsError};

const THREE_REPOS: &str = r#"{"repos":[
    {"name":"alpha","git-repo":"https://example.com/alpha.git","type":"git-repo"},
    {"name":"stai-temp","git-repo":null,"type":"local-git-repo"},
    {"name":"beta","git-repo":"https://example.com/beta.git","type":"git-repo"}
]}"#;

fn folder_paths(content: &str) -> Vec<String> {
    let value: serde_json::Value = serde_json::from_str(content).unwrap();
    value["folders"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["path"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_three_repositories_into_empty_base() {
    let ws = Workspace::new(ForceLevel::Disabled);
    let git = RecordingVcs::default();

    let summary = run_pipeline(&ws.settings, &ws.runtime, THREE_REPOS, &git).unwrap();
    assert_eq!(summary.warnings_ignored, 0);

    for name in ["alpha", "stai-temp", "beta"] {
        assert!(ws.base().join(name).is_dir(), "{} missing", name);
    }
    assert!(ws.base().join("stai-temp/.git").exists());
    assert!(ws.base().join("stai-temp/readme.md").is_file());

    let content = fs::read_to_string(ws.workspace_file()).unwrap();
    assert_eq!(folder_paths(&content), vec!["../alpha", "../stai-temp", "../beta"]);

    let outcomes: Vec<_> = summary.repositories.iter().map(|r| r.outcome).collect();
    assert_eq!(
        outcomes,
        vec![FetchOutcome::Cloned, FetchOutcome::ManagedLocally, FetchOutcome::Cloned]
    );
}

#[test]
fn test_rerun_only_regenerates_workspace_file() {
    // The second run sees its own output in the base directory, so it needs
    // --force to get past the cleanliness check.
    let ws = Workspace::new(ForceLevel::Unlimited);

    run_pipeline(&ws.settings, &ws.runtime, THREE_REPOS, &RecordingVcs::default()).unwrap();
    let readme = fs::read_to_string(ws.base().join("stai-temp/readme.md")).unwrap();
    fs::write(ws.workspace_file(), "edited by hand").unwrap();

    let git = RecordingVcs::default();
    let summary = run_pipeline(&ws.settings, &ws.runtime, THREE_REPOS, &git).unwrap();

    assert!(git.calls().is_empty(), "unexpected git calls: {:?}", git.calls());
    assert!(summary.created_dirs.is_empty());
    assert_eq!(summary.local_repo, LocalRepoOutcome::AlreadyPresent);
    let outcomes: Vec<_> = summary.repositories.iter().map(|r| r.outcome).collect();
    assert_eq!(
        outcomes,
        vec![
            FetchOutcome::AlreadyExists,
            FetchOutcome::ManagedLocally,
            FetchOutcome::AlreadyExists
        ]
    );
    assert_eq!(
        fs::read_to_string(ws.base().join("stai-temp/readme.md")).unwrap(),
        readme
    );

    let content = fs::read_to_string(ws.workspace_file()).unwrap();
    assert_eq!(folder_paths(&content).len(), 3);
}

#[test]
fn test_budget_of_n_absorbs_exactly_n_warnings() {
    let mut ws = Workspace::new(ForceLevel::Limited(3));
    ws.runtime.username = "intruder".to_string();
    fs::write(ws.base().join("leftover-1"), "").unwrap();
    fs::write(ws.base().join("leftover-2"), "").unwrap();

    let summary = run_pipeline(&ws.settings, &ws.runtime, THREE_REPOS, &RecordingVcs::default()).unwrap();
    assert_eq!(summary.warnings_ignored, 3);
}

#[test]
fn test_warning_past_budget_is_fatal() {
    let mut ws = Workspace::new(ForceLevel::Limited(2));
    ws.runtime.username = "intruder".to_string();
    for name in ["leftover-1", "leftover-2", "leftover-3"] {
        fs::write(ws.base().join(name), "").unwrap();
    }
    let git = RecordingVcs::default();

    let err = run_pipeline(&ws.settings, &ws.runtime, THREE_REPOS, &git).unwrap_err();
    match err {
        WsError::BaseNotEmpty { found, .. } => assert_eq!(found, vec!["leftover-2", "leftover-3"]),
        other => panic!("unexpected error: {}", other),
    }
    assert!(git.calls().is_empty());
    assert!(!ws.base().join("vscode").exists());
}

#[test]
fn test_base_is_home_fails_before_cleanliness() {
    let mut ws = Workspace::new(ForceLevel::Unlimited);
    ws.runtime.home_dir = ws.base();
    fs::write(ws.base().join("stray"), "").unwrap();

    let err = run_pipeline(&ws.settings, &ws.runtime, THREE_REPOS, &RecordingVcs::default()).unwrap_err();
    assert!(matches!(err, WsError::BaseIsHome(_)));
}

#[test]
fn test_base_outside_home_fails() {
    let mut ws = Workspace::new(ForceLevel::Unlimited);
    ws.runtime.home_dir = ws.home.path().join("elsewhere");

    let err = run_pipeline(&ws.settings, &ws.runtime, THREE_REPOS, &RecordingVcs::default()).unwrap_err();
    assert!(err.to_string().starts_with("base directory must be under home directory"));
}

#[test]
fn test_wrong_invocation_directory_is_fatal_even_when_forced() {
    let mut ws = Workspace::new(ForceLevel::Unlimited);
    ws.runtime.working_dir = ws.base();

    let err = run_pipeline(&ws.settings, &ws.runtime, THREE_REPOS, &RecordingVcs::default()).unwrap_err();
    assert!(matches!(err, WsError::WrongWorkingDirectory { .. }));
}

#[test]
fn test_remote_without_source_names_descriptor() {
    let ws = Workspace::new(ForceLevel::Disabled);
    let repos = r#"{"repos":[
        {"name":"nowhere","git-repo":null,"type":"git-repo"},
        {"name":"after","git-repo":"https://example.com/after.git","type":"git-repo"}
    ]}"#;
    let git = RecordingVcs::default();

    let err = run_pipeline(&ws.settings, &ws.runtime, repos, &git).unwrap_err();
    assert!(err.to_string().contains("nowhere"));
    assert!(git.calls().iter().all(|c| !c.starts_with("clone")));
    assert!(!ws.base().join("after").exists());
    assert!(!ws.workspace_file().exists());
}

#[test]
fn test_malformed_repository_list_fails_after_local_setup() {
    let ws = Workspace::new(ForceLevel::Disabled);
    let git = RecordingVcs::default();

    let err = run_pipeline(&ws.settings, &ws.runtime, r#"{"repos": [}"#, &git).unwrap_err();
    assert!(matches!(err, WsError::Json { .. }), "{}", err);
    assert!(ws.base().join("vscode").is_dir());
    assert!(ws.base().join("stai-temp/.git").exists());
    assert!(git.calls().iter().all(|c| !c.starts_with("clone")));
    assert!(!ws.workspace_file().exists());
}
