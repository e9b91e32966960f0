//! nextslot CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use nextslot_client::cli::{Cli, Command, ConfigAction};
use nextslot_client::commands;
use nextslot_client::config::ClientConfig;
use nextslot_client::error::{ClientError, ClientResult};
use nextslot_core::tracing::{init_tracing, TracingConfig};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(ClientConfig::default_path);
    let loaded = if cli.config.is_some() {
        ClientConfig::load_from(&config_path)
    } else {
        ClientConfig::load()
    };

    let debug = cli.debug || loaded.as_ref().is_ok_and(|config| config.debug);
    if let Err(e) = init_tracing(TracingConfig::for_debug(debug)) {
        eprintln!("warning: {}", e);
    }

    let result = loaded
        .map_err(ClientError::Config)
        .and_then(|config| run(cli, &config, &config_path));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, config: &ClientConfig, config_path: &std::path::Path) -> ClientResult<()> {
    tracing::debug!(config = %config_path.display(), "configuration loaded");

    match cli.command {
        Some(Command::Resolve(args)) => commands::resolve::run(&args, config),
        Some(Command::EndTime { start, minutes }) => commands::end_time::run(&start, minutes),
        Some(Command::Config { action }) => match action {
            ConfigAction::Dump => commands::config::dump(config, config_path),
            ConfigAction::Validate => commands::config::validate(config),
            ConfigAction::Path => commands::config::path(config_path),
        },
        None => {
            println!("nextslot - When does each recurring meeting happen next");
            println!();
            println!("Run 'nextslot --help' for usage information.");
            println!();
            println!("Quick start:");
            println!("  1. Resolve meetings: nextslot resolve meetings.json");
            println!("  2. Check an end time: nextslot end-time 09:00:00 45");
            Ok(())
        }
    }
}
