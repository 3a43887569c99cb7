//! `daybook` command line entry point.
//!
//! # Responsibility
//! - Parse arguments, load configuration and open the database.
//! - Print command results as JSON or a text month grid.

mod cli;
mod commands;
mod render;

use clap::Parser;

fn main() {
    let args = cli::Cli::parse();
    if let Err(err) = commands::run(args) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
