//! `HfM` CLI - Command-line driver for the `HfM` project window core
//!
//! Loads project outline fixtures, replays selection scripts through the
//! composition controller, scans playground files, parses compiler output
//! and manages preferences.

mod cli;
mod commands;
mod error;
mod util;

use clap::Parser;
use cli::Cli;
use hfm_core::tracing::{TracingConfig, TracingLevel, TracingOutput, init_tracing};

fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    if !cli.quiet {
        let mut config = TracingConfig::new()
            .with_level(TracingLevel::from_verbosity(cli.verbose))
            .with_verbose_metadata(cli.verbose > 2)
            .with_filter(cli.log_filter.clone());
        if let Some(path) = &cli.log_file {
            config = config.with_output(TracingOutput::File { path: path.clone() });
        }
        if let Err(e) = init_tracing(&config) {
            eprintln!("Warning: could not initialize logging: {e}");
        }
    }

    let result = commands::dispatch(config_path, cli.command);

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}
