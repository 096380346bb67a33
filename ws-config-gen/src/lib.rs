pub mod cli;
pub mod config;
pub mod resources;
pub mod steps;
pub mod vcs;

pub use cli::WsConfigGenCli;
pub use config::{create_runtime_config, RuntimeConfig, Settings};
pub use steps::{run_pipeline, PipelineSummary};
pub use vcs::{GitCli, Vcs, VcsError};
pub use ws_core::{ForceLevel, ReposConfig, RepositoryDescriptor, WarningBudget};

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum WsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Environment(String),

    #[error("current user is '{actual}', expected '{expected}'. Use --force to ignore this check")]
    UnexpectedUser { actual: String, expected: String },

    #[error("required binary '{0}' not found in PATH. Use --force to ignore this check")]
    MissingBinary(String),

    #[error("current directory must be named '{expected}', got '{actual}'")]
    WrongWorkingDirectory { expected: String, actual: String },

    #[error("base directory cannot be the home directory ({})", .0.display())]
    BaseIsHome(PathBuf),

    #[error("base directory must be under home directory ({}), got {}", .home.display(), .base.display())]
    BaseOutsideHome { base: PathBuf, home: PathBuf },

    #[error("base directory must be empty except for '{allowed}' directory. Found: {}. Use --force to ignore this check", .found.join(", "))]
    BaseNotEmpty { allowed: String, found: Vec<String> },

    #[error("{context} {}: {source}", .path.display())]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{context}: {source}")]
    Git {
        context: String,
        #[source]
        source: VcsError,
    },

    #[error("failed to {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Template(#[from] ws_core::TemplateError),

    #[error("failed to write to terminal: {0}")]
    Output(#[source] std::io::Error),
}

impl WsError {
    pub(crate) fn io(context: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WsError::Io {
            context,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn git(context: impl Into<String>, source: VcsError) -> Self {
        WsError::Git {
            context: context.into(),
            source,
        }
    }
}
