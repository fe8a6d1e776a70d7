#![forbid(unsafe_code)]

//! `formbind-demo`: a parent-owned form with a bounded numeric field.
//!
//! Interactive by default; `--headless` reads one attempted value per line
//! of stdin and prints each outcome.

mod app;
mod config;
mod logging;

use std::io;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use config::Cli;

fn main() -> ExitCode {
    let config = match Cli::parse().into_config(|key| std::env::var(key).ok()) {
        Ok(config) => config,
        Err(e) => Cli::command().error(ErrorKind::ArgumentConflict, e).exit(),
    };

    if let Err(e) = logging::init(config.headless, |key| std::env::var(key).ok()) {
        eprintln!("formbind-demo: cannot open log file: {e}");
        return ExitCode::FAILURE;
    }

    let result = if config.headless {
        app::run_headless(&config, io::stdin().lock(), io::stdout().lock())
    } else {
        app::run_interactive(&config)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "demo failed");
            eprintln!("formbind-demo: {e}");
            ExitCode::FAILURE
        }
    }
}
