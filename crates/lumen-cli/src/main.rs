use clap::{Parser, Subcommand};
use lumen_cli::cmd;
use lumen_cli::session::Options;
use lumen_core::paths::{DEFAULT_CLOUD_URL, DEFAULT_DISCOVERY_URL};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "lumen",
    about = "Query and control smart-light hubs from a launcher palette",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding config.json (default: $XDG_CONFIG_HOME/lumen)
    #[arg(long, global = true, env = "LUMEN_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Directory holding cache.json (default: $XDG_CACHE_HOME/lumen)
    #[arg(long, global = true, env = "LUMEN_CACHE_DIR")]
    cache_dir: Option<PathBuf>,

    /// Hub discovery endpoint
    #[arg(long, global = true, env = "LUMEN_DISCOVERY_URL", default_value = DEFAULT_DISCOVERY_URL)]
    discovery_url: String,

    /// Cloud account API base URL
    #[arg(long, global = true, env = "LUMEN_CLOUD_URL", default_value = DEFAULT_CLOUD_URL)]
    cloud_url: String,

    /// Output as JSON (launcher items for `query` and `select`)
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Accept confirmation prompts without asking
    #[arg(long, global = true, short = 'y')]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List menu items for the palette input, e.g. `lumen query lights desk`
    Query {
        /// Data bound by a previously selected item
        #[arg(long)]
        data: Option<String>,

        /// Palette input: a command keyword followed by its text
        words: Vec<String>,
    },

    /// Run a command's action, e.g. `lumen do scenes <scene-id>`
    Do {
        keyword: String,

        /// Action payload (joined with spaces)
        payload: Vec<String>,
    },

    /// Follow an item's SELECT value as printed by `lumen query`
    Select { arg: String },

    /// Show pairing, login and cache state
    Status,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let opts = Options {
        data_dir: cli.data_dir,
        cache_dir: cli.cache_dir,
        discovery_url: cli.discovery_url,
        cloud_url: cli.cloud_url,
        assume_yes: cli.yes,
    };

    let result = match cli.command {
        Commands::Query { data, words } => cmd::query::run(&opts, &words, data.as_deref(), cli.json),
        Commands::Do { keyword, payload } => cmd::action::run(&opts, &keyword, &payload, cli.json),
        Commands::Select { arg } => cmd::select::run(&opts, &arg, cli.json),
        Commands::Status => cmd::status::run(&opts, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
