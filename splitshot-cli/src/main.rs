use std::io;
use std::process::ExitCode;

use clap::Parser;
use splitshot_cli::cli::Cli;
use splitshot_cli::commands::execute;

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let stdout = io::stdout();
    match execute(cli, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
