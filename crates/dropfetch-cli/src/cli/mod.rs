//! CLI for the dropfetch remote file fetcher.

mod commands;
mod listing;
mod terminal;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use dropfetch_core::config;
use std::path::PathBuf;
use url::Url;

use commands::{run_config, run_fetch, run_list};

/// Top-level CLI for dropfetch.
#[derive(Debug, Parser)]
#[command(name = "dropfetch")]
#[command(about = "dropfetch: pick a remote file and save it locally", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Pick one remote file and save it locally.
    Fetch(FetchArgs),

    /// List everything saved under the document and library roots.
    List,

    /// Show the config file location and effective settings.
    Config,
}

/// Options for `dropfetch fetch`.
#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Save under the library root.
    #[arg(long, conflicts_with = "document")]
    pub library: bool,

    /// Save under the document root (default unless config says otherwise).
    #[arg(long)]
    pub document: bool,

    /// Sub-path below the chosen root.
    #[arg(long, value_name = "SUB")]
    pub path: Option<String>,

    /// Refuse files of this many MB or more (overrides config).
    #[arg(long, value_name = "MB")]
    pub max_size_mb: Option<u64>,

    /// Refuse this extension; repeat for more. Replaces the configured list.
    #[arg(long = "restrict", value_name = "EXT")]
    pub restrict: Vec<String>,

    /// JSON file with chooser results to pick from interactively.
    #[arg(long, value_name = "FILE", conflicts_with = "link", required_unless_present = "link")]
    pub listing: Option<PathBuf>,

    /// Direct link to download (skips the interactive chooser).
    #[arg(long, value_name = "URL", value_parser = Url::parse, requires = "name")]
    pub link: Option<Url>,

    /// File name to save the direct link as.
    #[arg(long, requires = "link")]
    pub name: Option<String>,

    /// Size reported for the direct link, in bytes.
    #[arg(long, value_name = "BYTES", requires = "link")]
    pub size: Option<u64>,

    /// Icon link for the direct link.
    #[arg(long, value_name = "URL", value_parser = Url::parse, requires = "link")]
    pub icon: Option<Url>,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch(args) => run_fetch(&cfg, args).await?,
            CliCommand::List => run_list(&cfg)?,
            CliCommand::Config => run_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
