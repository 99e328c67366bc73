mod cli;
mod commands;
mod logging;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.quiet);
    let operation = cli.command.operation();
    match commands::run(&cli.vault, cli.settings.as_deref(), cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            commands::report_failure(&err, operation, &cli.vault);
            ExitCode::FAILURE
        }
    }
}
