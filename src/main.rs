use anyhow::Result;
use clap::Parser;
use std::io;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod detect;
mod error;
mod pack;
mod reporter;
mod repository;
mod resolve;
mod routes;
mod util;
mod workflow;

use cli::{Command, RootArgs};
use config::Settings;
use detect::ExtensionDetector;
use error::{exit_code, exit_code_for};
use reporter::Reporter;

fn main() -> ExitCode {
    let args = RootArgs::parse();
    init_tracing(args.debug);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut reporter = Reporter::new(&mut out, args.debug);
    match run(&args, &mut reporter) {
        Ok(()) => ExitCode::from(exit_code::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_code_for(&err) as u8)
        }
    }
}

fn run(args: &RootArgs, reporter: &mut Reporter<'_>) -> Result<()> {
    match &args.command {
        Command::Route(route_args) => workflow::run_route(route_args, reporter),
        Command::Create(create_args) => {
            let settings = Settings::from_env()?;
            workflow::run_create(create_args, &settings, &ExtensionDetector, reporter)
        }
        Command::Detect(detect_args) => {
            let settings = Settings::from_env()?;
            workflow::run_detect(detect_args, &settings, &ExtensionDetector, reporter)
        }
        Command::Packs(packs_args) => {
            let settings = Settings::from_env()?;
            workflow::run_packs(packs_args, &settings, reporter)
        }
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the level chosen by `--debug`.
fn init_tracing(debug: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            EnvFilter::new("packgen=debug")
        } else {
            EnvFilter::new("packgen=warn")
        }
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
