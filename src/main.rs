//! pma-export CLI entry point.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use clap::Parser;

use pma_export::cli::{Cli, execute};
use pma_export::core::logging;
use pma_export::error::ExitCode;
use pma_export::render::{Reporter, render_error};
use pma_export::util::env::{Stream, should_use_color_for};

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    logging::init(&logging::LogSettings::from_env(
        cli.log_level.as_deref(),
        cli.json_output,
        cli.verbose,
    ));

    let reporter = Reporter::new(should_use_color_for(Stream::Stdout, cli.no_color));

    match execute(&cli, reporter).await {
        Ok(_) => ExitCode::Success.into(),
        Err(e) => {
            tracing::error!("{e}");
            let stderr = Reporter::new(should_use_color_for(Stream::Stderr, cli.no_color));
            eprintln!("{}", render_error(&e, &stderr));
            e.exit_code().into()
        }
    }
}
