use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use epg_console::logging::{self, LogTarget};
use epg_console::model::ConsoleConfig;

use crate::Commands;

#[derive(Parser)]
#[command(name = "epg-console")]
#[command(about = "EPG and broadcast operations console", long_about = None)]
pub(crate) struct Cli {
    /// Configuration file (JSON); defaults to ./epg-console.json when present
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, overriding the configuration
    #[arg(long, value_name = "URL", global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ConsoleConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.url {
        config.base_url = url;
    }

    match cli.command {
        None | Some(Commands::Tui) => {
            // The terminal belongs to the UI; logs go to a file.
            logging::init(LogTarget::File(config.log_dir.clone()))
                .context("initialize logging")?;
            epg_console::tui::run(config)?;
        }
        Some(command) => {
            logging::init(LogTarget::Stderr).context("initialize logging")?;
            crate::cli_exec::handle_command(config, command)?;
        }
    }

    Ok(())
}
