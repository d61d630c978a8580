//! bale CLI — validation front end for bale package specifications.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bale", version, about = "Author and validate bale package specifications")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a specification document
    Lint {
        /// Path to the manifest (.balespec, .json, or .toml)
        path: PathBuf,
        /// Restrict analysis to one platform (e.g. ios, osx)
        #[arg(long)]
        platform: Option<String>,
        /// Output format (human, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// List the attributes the toolchain knows about
    Attributes,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Lint {
            path,
            platform,
            format,
        } => commands::lint::run(&path, platform.as_deref(), format.as_deref()),
        Commands::Attributes => commands::attributes::run(),
    }
}
