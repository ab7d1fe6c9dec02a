//! quire CLI - static site generator for numbered page files.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "quire")]
#[command(about = "Static site generator for numbered Markdown and HTML pages")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the config file, relative to --dir
    #[arg(short, long, default_value = "config.json", global = true)]
    config: PathBuf,

    /// Project directory
    #[arg(short, long, default_value = ".", global = true)]
    dir: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a default project in the project directory
    Init,

    /// Create an empty page with the next free sequence number
    Create {
        /// Page name, shown in navigation
        #[arg(short, long)]
        name: String,

        /// Page type: md, html or link
        #[arg(short = 't', long = "type", default_value = "md")]
        kind: String,
    },

    /// Build the site
    Build,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Init => {
            commands::init::run(&cli.dir)?;
        }
        Commands::Create { name, kind } => {
            commands::create::run(&cli.dir, &name, &kind)?;
        }
        Commands::Build => {
            commands::build::run(&cli.dir, &cli.config)?;
        }
    }

    Ok(())
}
