pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "snag")]
#[command(about = "Extract product metadata from shop pages", long_about = None)]
pub struct Cli {
    /// Path to the config file (default: ~/.config/snag/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract metadata from one or more product pages and print JSON
    Extract {
        /// Product page URLs
        #[arg(required = true)]
        urls: Vec<String>,

        /// Never launch a browser, even for incomplete results
        #[arg(long)]
        static_only: bool,

        /// Single-line JSON output
        #[arg(long)]
        compact: bool,

        /// Include which tier produced each record
        #[arg(long)]
        with_source: bool,
    },
    /// Show the config file location and effective settings
    Config,
}
