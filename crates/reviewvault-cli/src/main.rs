use clap::{ArgAction, Parser, Subcommand};
use commands::{cache, config, fetch};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "reviewvault")]
#[command(about = "ReviewVault - Archive your published Steam reviews as Markdown")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a user's published Steam reviews
    #[command(long_about = "Fetch the published Steam reviews of a community profile and print them to the console, or write one Markdown file per review with --save.")]
    Fetch {
        /// Steam community profile name (defaults to steam.username from the config file)
        #[arg(long)]
        username: Option<String>,

        /// Walk every listing page instead of only the first
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,

        /// Write one Markdown file per review instead of printing
        #[arg(long, action = ArgAction::SetTrue)]
        save: bool,

        /// Directory saved reviews go to (defaults to archive.output_dir, then the working directory)
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
    /// Manage the app name cache
    #[command(long_about = "Manage the cached Steam app name table used to resolve app ids to game names. The table refreshes automatically once it is older than cache.staleness_days.")]
    Cache {
        #[command(subcommand)]
        cmd: CacheCommands,
    },
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum CacheCommands {
    /// Re-download the app name table regardless of its age
    Refresh,
    /// Delete the cached app name table
    Clear,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the current configuration and where it was loaded from
    Show,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Fetch {
            username,
            all,
            save,
            output_dir,
        } => fetch::run_fetch(username, all, save, output_dir, &output).await,
        Commands::Cache { cmd } => match cmd {
            CacheCommands::Refresh => cache::run_refresh(&output).await,
            CacheCommands::Clear => cache::run_clear(&output).await,
        },
        Commands::Config { cmd } => match cmd {
            ConfigCommands::Show => config::run_show(&output).await,
        },
    }
}
