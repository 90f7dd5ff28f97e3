//! Go/WebAssembly host
//!
//! Entry point. Parses CLI arguments, installs logging and delegates to the
//! Runtime; the process exit status is the guest's exit code.

use clap::Parser as ClapParser;
use std::process::ExitCode;
use wasm_host::{logging, Cli, CliError, Runtime};

fn run(cli: &Cli) -> Result<i32, CliError> {
    Runtime::from_config_file(cli.config.as_deref())?.execute_file(&cli.module)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log_level, cli.log_format);

    match run(&cli) {
        Ok(code) => ExitCode::from(code as u8),
        Err(err) => {
            tracing::debug!(exit_code = err.exit_code(), "host stopped");
            match err.exit_code() {
                2 => eprintln!("fatal: {}", err),
                _ => eprintln!("error: {}", err),
            }
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
