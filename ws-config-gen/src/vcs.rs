use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, thiserror::Error)]
pub enum VcsError {
    #[error("could not run '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' exited with {status}{}", format_stderr(.stderr))]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

/// Version-control operations the bootstrap needs.
pub trait Vcs {
    /// Create an empty repository in an existing directory.
    fn init(&self, dir: &Path) -> Result<(), VcsError>;

    /// Stage one file, given relative to `dir`.
    fn add(&self, dir: &Path, file: &str) -> Result<(), VcsError>;

    fn commit(&self, dir: &Path, message: &str) -> Result<(), VcsError>;

    /// Clone `source` into `dest`, which must not exist yet.
    fn clone_repo(&self, source: &str, dest: &Path) -> Result<(), VcsError>;
}

/// [`Vcs`] backed by the `git` executable found on `PATH`.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
}

impl GitCli {
    pub fn new() -> Self {
        Self::with_program("git")
    }

    pub fn with_program<P: Into<PathBuf>>(program: P) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run<I, S>(&self, dir: Option<&Path>, args: I) -> Result<(), VcsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new(&self.program);
        cmd.args(args);
        if let Some(dir) = dir {
            cmd.current_dir(dir);
        }

        let command = describe(&cmd);
        tracing::debug!("Running {} in {:?}", command, dir);

        let output = cmd.output().map_err(|source| VcsError::Spawn {
            command: command.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(VcsError::Failed {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(())
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl Vcs for GitCli {
    fn init(&self, dir: &Path) -> Result<(), VcsError> {
        self.run(Some(dir), ["init"])
    }

    fn add(&self, dir: &Path, file: &str) -> Result<(), VcsError> {
        self.run(Some(dir), ["add", "--", file])
    }

    fn commit(&self, dir: &Path, message: &str) -> Result<(), VcsError> {
        self.run(Some(dir), ["commit", "-m", message])
    }

    fn clone_repo(&self, source: &str, dest: &Path) -> Result<(), VcsError> {
        self.run(
            None,
            [OsStr::new("clone"), OsStr::new("--"), OsStr::new(source), dest.as_os_str()],
        )
    }
}

fn describe(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|s| s.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// In-memory [`Vcs`] for tests: records calls and fakes the `.git` marker
/// so idempotency checks behave like a real repository.
///
/// Built for unit tests and, through the `testing` feature, for the
/// integration tests under `tests/`.
#[cfg(any(test, feature = "testing"))]
pub mod testing {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    pub struct RecordingVcs {
        pub calls: RefCell<Vec<String>>,
        pub fail_on: Option<&'static str>,
    }

    impl RecordingVcs {
        pub fn failing_on(op: &'static str) -> Self {
            Self {
                fail_on: Some(op),
                ..Default::default()
            }
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn record(&self, op: &'static str, detail: String) -> Result<(), VcsError> {
            self.calls.borrow_mut().push(format!("{} {}", op, detail));
            if self.fail_on == Some(op) {
                return Err(VcsError::Failed {
                    command: format!("git {}", op),
                    status: "exit status: 128".to_string(),
                    stderr: "fatal: simulated failure".to_string(),
                });
            }
            Ok(())
        }
    }

    impl Vcs for RecordingVcs {
        fn init(&self, dir: &Path) -> Result<(), VcsError> {
            self.record("init", dir.display().to_string())?;
            fake_marker(dir, "git init")
        }

        fn add(&self, dir: &Path, file: &str) -> Result<(), VcsError> {
            self.record("add", dir.join(file).display().to_string())
        }

        fn commit(&self, _dir: &Path, message: &str) -> Result<(), VcsError> {
            self.record("commit", message.to_string())
        }

        fn clone_repo(&self, source: &str, dest: &Path) -> Result<(), VcsError> {
            self.record("clone", format!("{} {}", source, dest.display()))?;
            fake_marker(dest, "git clone")
        }
    }

    fn fake_marker(dir: &Path, command: &str) -> Result<(), VcsError> {
        std::fs::create_dir_all(dir.join(".git")).map_err(|source| VcsError::Spawn {
            command: command.to_string(),
            source,
        })
    }
}
