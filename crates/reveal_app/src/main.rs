mod cli;
mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.verbose, cli.log_file.as_deref());

    match cli.command {
        Command::Enhance(args) => commands::enhance(&args)?,
        Command::Trace(args) => commands::trace(&args)?,
        Command::Panels { output } => commands::panels(output.as_deref())?,
    }

    Ok(())
}
