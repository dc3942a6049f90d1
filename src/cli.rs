use std::path::{Path, PathBuf};

mod config;
mod init;
mod login;
mod matches;
mod seed;
mod session;
mod show;
mod status;
mod submit;
mod terminal;

use clap::ArgAction;
use terminal::{Colorize, is_narrow};
use unimatch::{Config, FileBackend, ParticipantId, Store, domain::seed::demo_participants};

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The directory holding the nomination store
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::Status(status::Command::default()))
            .run(self.root)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Show participant counts and matched pairs (default)
    Status(status::Command),

    /// Initialize a new nomination store
    Init(init::Command),

    /// Log in as a participant, registering them on first use
    Login(login::Command),

    /// Replace a participant's three nominations
    Submit(submit::Command),

    /// List a participant's matches
    Matches(matches::Command),

    /// Show a participant's record
    Show(show::Command),

    /// Populate an empty store with demonstration participants
    Seed(seed::Command),

    /// Log in and submit nominations interactively
    Session(session::Command),

    /// Show or modify configuration settings
    Config(config::Command),
}

impl Command {
    fn run(self, root: PathBuf) -> anyhow::Result<()> {
        match self {
            Self::Status(command) => command.run(&root)?,
            Self::Init(command) => command.run(&root)?,
            Self::Login(command) => command.run(&root)?,
            Self::Submit(command) => command.run(&root)?,
            Self::Matches(command) => command.run(&root)?,
            Self::Show(command) => command.run(&root)?,
            Self::Seed(command) => command.run(&root)?,
            Self::Session(command) => command.run(&root)?,
            Self::Config(command) => command.run(&root)?,
        }
        Ok(())
    }
}

/// Open the store under `root`.
///
/// An empty store is seeded with the demonstration participants when the
/// configuration asks for it.
fn open_store(root: &Path) -> anyhow::Result<Store<FileBackend>> {
    let config = Config::load_or_default(root);
    let mut store = Store::open(FileBackend::for_root(root, &config))?;

    if config.seed_demo && store.seed_if_empty(demo_participants())? {
        tracing::info!("Seeded demonstration participants");
    }

    Ok(store)
}

/// Parse an identifier at the CLI boundary.
fn parse_id(s: &str) -> Result<ParticipantId, String> {
    s.parse().map_err(|e| format!("{e}"))
}

/// Join identifiers for display.
fn join(ids: &[ParticipantId]) -> String {
    ids.iter()
        .map(ParticipantId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Print a participant's matches.
fn print_matches(matches: &[ParticipantId]) {
    if matches.is_empty() {
        println!("{}", "No matches yet".dim());
        println!(
            "{}",
            "A match appears once someone you nominated nominates you back.".dim()
        );
        return;
    }

    let heading = if matches.len() == 1 {
        "1 match".to_string()
    } else {
        format!("{} matches", matches.len())
    };
    println!("{}", heading.success());

    if is_narrow() {
        println!("  {}", join(matches).matched());
    } else {
        for id in matches {
            println!("  ♥ {}", id.as_str().matched());
        }
    }
}
