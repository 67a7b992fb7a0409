//! pathindex CLI Binary
//!
//! Command-line interface for building and searching a path index.

use anyhow::Context;
use clap::Parser;
use pathindex::logging::init_logging;
use pathindex::tooling::cli::{Cli, CliContext};
use std::process;

fn run(cli: &Cli) -> anyhow::Result<String> {
    let config = CliContext::load_config(&cli.workspace, cli.config.as_deref())
        .context("loading configuration")?;
    init_logging(Some(&cli.logging_config(&config.logging))).context("initializing logging")?;

    let context = CliContext::from_config(cli.workspace.clone(), config)
        .context("opening path index")?;
    Ok(context.execute(&cli.command)?)
}

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}
