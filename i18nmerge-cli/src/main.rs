use std::{env, process::ExitCode};

use clap::Parser;
use i18nmerge_cli::{Args, run_merge_command};
use tracing::error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging(default_level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.log_level());

    let cwd = match env::current_dir() {
        Ok(cwd) => cwd,
        Err(e) => {
            error!("Cannot read the current directory: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run_merge_command(&args, &cwd) {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
