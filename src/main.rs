mod changelog;
mod cli;
mod manifest;
mod output;
mod release;

use anyhow::Result;
use clap::{Parser, error::ErrorKind};
use cli::Cli;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) if matches!(error.kind(), ErrorKind::DisplayHelp) => error.exit(),
        Err(error) => {
            let _ = error.print();
            std::process::exit(1);
        }
    };

    if let Err(error) = run(cli) {
        output::print_error(format!("{error:#}"));
        output::print_hint("run `pkg-changelog --help` for usage");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    release::run(cli)
}
