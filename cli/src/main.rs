mod commands;
mod terminal;

use std::process::ExitCode;

use anyhow::Context;
use commands::{CommandLine, check};
use dbprobe_common::{error, warn};
use terminal::{logging, print};

fn main() -> ExitCode {
    let env_file = dotenvy::dotenv();
    let commands = CommandLine::parse_args();

    if commands.no_color {
        colored::control::set_override(false);
    }

    if let Err(err) = logging::init(commands.verbose) {
        eprintln!("Unexpected error: {err:#}");
        return ExitCode::FAILURE;
    }

    match env_file {
        Err(err) if !err.not_found() => warn!("Ignoring unreadable .env file: {err}"),
        _ => {}
    }

    match run(&commands) {
        Ok(passed) => exit_code(passed),
        Err(err) => {
            error!("Unexpected error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(commands: &CommandLine) -> anyhow::Result<bool> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;

    print::header("database connectivity check");

    let passed: bool = runtime.block_on(check::check(&commands.probe_config()));

    print::end_of_program();
    Ok(passed)
}

fn exit_code(passed: bool) -> ExitCode {
    if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
