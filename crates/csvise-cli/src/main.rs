//! csvise command-line entry point.

use clap::Parser;
use csvise_cli::logging::{LogConfig, init_logging};

mod cli;
mod commands;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match commands::run(&cli) {
        Ok(()) => 0,
        Err(error) => {
            tracing::error!("{error:#}");
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Logging settings from the global flags.
///
/// `--log-level` beats `-v/-q`; either one stops `RUST_LOG` from overriding.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let config = match cli.log_level {
        Some(level) => LogConfig::default().with_explicit_level(level.into()),
        None if cli.verbosity.is_present() => {
            LogConfig::default().with_explicit_level(cli.verbosity.tracing_level_filter())
        }
        None => LogConfig::default().with_level(cli.verbosity.tracing_level_filter()),
    };
    config
        .with_format(cli.log_format.into())
        .with_log_file(cli.log_file.clone())
        .with_color(cli.color.color)
}
