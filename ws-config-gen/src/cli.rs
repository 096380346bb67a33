use crate::config::{create_runtime_config, Settings};
use crate::resources::REPOS_JSON;
use crate::steps::{run_pipeline, FetchOutcome, LocalRepoOutcome, PipelineSummary};
use crate::vcs::GitCli;
use crate::WsError;
use anyhow::Result;
use clap::{Arg, ArgMatches, ColorChoice, Command};
use ws_core::output::{format_info, format_section, format_success};
use ws_core::{ForceLevel, ListItemStatus, ListOutput};

pub struct WsConfigGenCli;

impl WsConfigGenCli {
    pub fn new() -> Self {
        Self
    }

    pub fn build_app(&self) -> Command {
        let styles = clap::builder::styling::Styles::styled()
            .header(clap::builder::styling::AnsiColor::BrightCyan.on_default() | clap::builder::styling::Effects::BOLD)
            .usage(clap::builder::styling::AnsiColor::BrightGreen.on_default() | clap::builder::styling::Effects::BOLD)
            .literal(clap::builder::styling::AnsiColor::BrightWhite.on_default())
            .placeholder(clap::builder::styling::AnsiColor::BrightYellow.on_default())
            .error(clap::builder::styling::AnsiColor::BrightRed.on_default() | clap::builder::styling::Effects::BOLD)
            .valid(clap::builder::styling::AnsiColor::BrightGreen.on_default())
            .invalid(clap::builder::styling::AnsiColor::BrightRed.on_default());

        Command::new("ws-config-gen")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Generate Visual Studio Code workspace configuration for Tate AI development environment")
            .long_about(
                "Run from inside the 'stai-vscode' checkout. The parent directory becomes the base \
                 directory: it gets the working directories, the local 'stai-temp' repository, clones \
                 of every listed repository and vscode/stai-all.code-workspace.",
            )
            .override_usage("ws-config-gen [--force[=N|-1]] [--version] [--help]")
            .styles(styles)
            .color(ColorChoice::Auto)
            .disable_help_subcommand(true)
            .arg(
                Arg::new("force")
                    .long("force")
                    .value_name("N")
                    .num_args(0..=1)
                    .require_equals(true)
                    .default_missing_value("true")
                    .allow_hyphen_values(true)
                    .value_parser(|s: &str| s.parse::<ForceLevel>())
                    .help("Force execution, ignore warnings. Default ignores 1 warning. Use --force=N for specific count, --force=-1 for unlimited"),
            )
    }

    /// Parse `args` and run the whole bootstrap.
    ///
    /// `--help` and `--version` print and return `Ok`. Any other argument
    /// problem is a configuration error raised before the first check.
    pub fn run(&self, args: Vec<String>) -> Result<()> {
        self.init_logging();

        let Some(force) = self.parse_force(args)? else {
            return Ok(());
        };

        let config = create_runtime_config(force)?;
        let summary = run_pipeline(&Settings::default(), &config, REPOS_JSON, &GitCli::new())?;

        print!("{}", format_summary(&summary));
        println!("{}", format_success("Setup complete"));
        Ok(())
    }

    /// `None` when clap already handled `--help` or `--version`.
    pub fn parse_force(&self, args: Vec<String>) -> Result<Option<ForceLevel>, WsError> {
        let matches: ArgMatches = match self.build_app().try_get_matches_from(args) {
            Ok(matches) => matches,
            Err(e) => {
                use clap::error::ErrorKind;
                return match e.kind() {
                    ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                        e.print().map_err(WsError::Output)?;
                        Ok(None)
                    }
                    _ => Err(WsError::Config(clap_message(&e))),
                };
            }
        };

        Ok(Some(
            matches
                .get_one::<ForceLevel>("force")
                .copied()
                .unwrap_or_default(),
        ))
    }

    fn init_logging(&self) {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("ws_config_gen=info"));

        // A second call (tests run the CLI repeatedly) keeps the first subscriber.
        let _ = fmt()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr)
            .try_init();
    }
}

impl Default for WsConfigGenCli {
    fn default() -> Self {
        Self::new()
    }
}

fn clap_message(e: &clap::Error) -> String {
    let rendered = e.render().to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.trim_start_matches("error: ").trim().to_string()
}

fn format_summary(summary: &PipelineSummary) -> String {
    let mut out = format!("{}\n", format_section("Summary"));
    out.push_str(&format!(
        "{}\n",
        format_info(&format!("Base directory: {}", summary.base_dir.display()))
    ));

    if summary.warnings_ignored > 0 {
        out.push_str(&format!(
            "{}\n",
            format_info(&format!("{} warning(s) ignored due to --force", summary.warnings_ignored))
        ));
    }

    let mut list = ListOutput::new();
    for dir in &summary.created_dirs {
        let label = dir
            .strip_prefix(&summary.base_dir)
            .unwrap_or(dir)
            .display()
            .to_string();
        list.add_item(label, "created".to_string(), Some(ListItemStatus::Success));
    }

    let local = match summary.local_repo {
        LocalRepoOutcome::Initialized => ("initialized", ListItemStatus::Success),
        LocalRepoOutcome::AlreadyPresent => ("already a git repository", ListItemStatus::Skipped),
    };
    for report in &summary.repositories {
        let (value, status) = match report.outcome {
            FetchOutcome::Cloned => ("cloned", ListItemStatus::Success),
            FetchOutcome::Initialized => ("initialized", ListItemStatus::Success),
            FetchOutcome::AlreadyExists => ("already exists", ListItemStatus::Skipped),
            FetchOutcome::ManagedLocally => local,
        };
        list.add_item(report.name.clone(), value.to_string(), Some(status));
    }
    list.add_item(
        "workspace".to_string(),
        summary.workspace_file.display().to_string(),
        Some(ListItemStatus::Info),
    );
    out.push_str(&list.format());
    out
}
