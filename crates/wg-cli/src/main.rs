//! CLI frontend for the Wegweiser story player.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wg_engine::EngineConfig;

#[derive(Parser)]
#[command(
    name = "wg",
    about = "Wegweiser: play branching stories and collect their endings",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding one folder per story
    #[arg(
        short,
        long,
        global = true,
        default_value = "stories",
        env = "WEGWEISER_STORIES"
    )]
    dir: PathBuf,

    /// Stop path analysis after this many visits (0 = unbounded)
    #[arg(long, global = true, default_value_t = wg_engine::config::DEFAULT_MAX_PATH_VISITS)]
    max_visits: usize,

    /// Log engine activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List stories and how many endings have been found
    List,

    /// Check a story for choices that lead nowhere
    Check {
        /// Story folder name
        story: String,
    },

    /// Show a story's endings and path lengths
    Info {
        /// Story folder name
        story: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Play a story, reading choice numbers from stdin
    Play {
        /// Story folder name
        story: String,
    },

    /// Erase discovered endings for one or more stories
    Reset {
        /// Story folder names
        #[arg(required = true)]
        stories: Vec<String>,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // Logs go to stderr; stdout carries the story.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_env_filter(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let max_visits = (cli.max_visits > 0).then_some(cli.max_visits);
    let config = EngineConfig::default()
        .with_stories_dir(cli.dir)
        .with_max_path_visits(max_visits);
    let library = wg_engine::StoryLibrary::new(config);

    let result = match cli.command {
        Commands::List => commands::list::run(&library),
        Commands::Check { story } => commands::check::run(&library, &story),
        Commands::Info { story, json } => commands::info::run(&library, &story, json),
        Commands::Play { story } => commands::play::run(&library, &story),
        Commands::Reset { stories, yes } => commands::reset::run(&library, &stories, yes),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
