use std::io;
use std::process::ExitCode;

use clap::Parser;
use redlite::logging::{LogConfig, LogFormat, LogOutput};

mod cli;
use cli::{execute_command, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so command output on stdout stays pipeable
    let _guard = LogConfig::warn()
        .with_level(cli.log_level.as_str())
        .with_output(LogOutput::Stderr)
        .with_format(LogFormat::Compact)
        .init();

    let stdout = io::stdout();
    match execute_command(&cli, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
