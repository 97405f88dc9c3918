use crate::search::{run_search, run_skills, SearchArgs, SkillsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use skills_directory::config::DirectoryConfig;
use skills_directory::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Skills Directory",
    about = "Search consultant profiles by skills, availability and location",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Rank profiles against a filter and print or export the results
    Search(SearchArgs),
    /// List the active skill catalog grouped by category
    Skills(SkillsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

/// Directory file overrides shared by every command.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct DataArgs {
    /// Profile JSON export (defaults to APP_PROFILES_PATH, then the sample directory)
    #[arg(long)]
    pub(crate) profiles: Option<PathBuf>,
    /// Skill catalog JSON (defaults to APP_CATALOG_PATH, then the built-in catalog)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

impl DataArgs {
    pub(crate) fn apply(self, config: &mut DirectoryConfig) {
        if let Some(path) = self.profiles {
            config.profiles_path = Some(path);
        }
        if let Some(path) = self.catalog {
            config.catalog_path = Some(path);
        }
    }
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Search(args) => run_search(args),
        Command::Skills(args) => run_skills(args),
    }
}
