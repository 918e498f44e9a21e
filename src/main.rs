//! Hoist - deploy a bot worker to Heroku in one command.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hoist::cli::output;
use hoist::cli::{execute, Cli};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("HOIST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("hoist=debug")
        } else {
            EnvFilter::new("hoist=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    match execute(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            output::error(&e.to_string());
            if let Some(hint) = e.hint() {
                output::hint(&hint);
            }
            std::process::exit(e.exit_code());
        }
    }
}
