//! qpsdk - relocatable Qt + PyQt SDK builder
//!
//! This is the CLI that sequences the ICU/Qt/SIP/PyQt builds into one
//! install root (`build`) and relocates/activates an installed SDK
//! (`setup`).

mod cli;
mod commands;
mod error;
mod logging;

use crate::cli::{Cli, Commands};
use clap::Parser;
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.global.verbose);

    let result = match cli.command {
        Commands::Build(args) => commands::build::run(args).await,
        Commands::Setup(args) => commands::setup::run(args).await,
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
