use std::process::ExitCode;

use clap::Parser;

use cli::Cli;
use commands::Store;
use error::CliError;
use settings::Settings;

mod cli;
mod commands;
mod error;
mod settings;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            eprintln!("error[{}]: {err}", err.kind());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = Settings::new(&cli.config)?;

    let level = match cli.verbose {
        0 => settings.log.level.as_str(),
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(format!("gym={level},gym_engine={level}"))
        .with_writer(std::io::stderr)
        .init();

    let store = Store::new(cli.store.unwrap_or(settings.store.path));
    tracing::debug!(store = %store.path().display(), command = ?cli.command, "dispatching");
    commands::run(cli.command, &store)
}
