//! depscribe-go -- one-shot Go manifest/lock handler
//!
//! ```text
//! depscribe-go [--config depscribe.toml] [--ecosystem dep] <manifest> [<lock>]
//! ```
//!
//! Prints the canonical result as one JSON line on stdout and exits 0.
//! On failure prints a diagnostic on stderr and exits with [`CliError::exit_code`].

mod cli;
mod error;
mod logging;
mod output;

use clap::Parser;
use tracing::debug;

use depscribe_core::config::{DepscribeConfig, VALID_LOG_LEVELS};
use depscribe_core::error::DepscribeError;
use depscribe_go_handler::{GoHandlerConfig, Invocation};

use crate::cli::{Cli, DEFAULT_CONFIG_FILE};
use crate::error::CliError;
use crate::output::OutputWriter;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("depscribe-go: {err}");
        std::process::exit(err.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = match &cli.config {
        Some(path) => DepscribeConfig::load(path)?,
        None => DepscribeConfig::load_or_default(DEFAULT_CONFIG_FILE)?,
    };

    if let Some(level) = cli.log_level {
        if !VALID_LOG_LEVELS.contains(&level.as_str()) {
            return Err(CliError::Config(format!(
                "invalid log level '{level}', expected one of: {}",
                VALID_LOG_LEVELS.join(", ")
            )));
        }
        config.general.log_level = level;
    }

    logging::init_tracing(&config.general)?;

    let handler_config = GoHandlerConfig::from_core(&config.handler).map_err(DepscribeError::from)?;
    debug!(
        max_file_size = handler_config.max_file_size,
        default_ecosystem = %handler_config.default_ecosystem,
        "configuration loaded"
    );

    let invocation = Invocation {
        manifest: cli.manifest,
        lock: cli.lock,
        ecosystem: cli.ecosystem,
    };
    let result = invocation.run(&handler_config).map_err(DepscribeError::from)?;

    OutputWriter::stdout().emit(&result)
}
