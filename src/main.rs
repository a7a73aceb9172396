//! envspec command-line tool
//!
//! Loads a typed configuration and checks, reads, dumps or exports it.

use anyhow::Result;
use clap::Parser;
use envspec::cli::{Cli, Command};
use envspec::format::{OutputFormat, format_exports, format_table};
use envspec::logging::{self, LogTarget};
use tracing::debug;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let target: LogTarget = cli.log.parse()?;
    logging::init(&target, cli.verbose)?;

    let loader = cli.loader();
    debug!(?loader, "Loading configuration");
    let table = loader.load()?;

    match cli.command {
        Command::Check => {
            println!("ok ({} variables)", table.len());
        }
        Command::Get { ref name } => match table.get(name) {
            Some(value) => println!("{}", value),
            None => std::process::exit(1),
        },
        Command::Dump { format } => {
            print!("{}", format_table(&table, format));
            if format == OutputFormat::Json {
                println!();
            }
        }
        Command::Export => {
            print!("{}", format_exports(&table));
        }
    }

    Ok(())
}
