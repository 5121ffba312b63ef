//! Flowdoc CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, info};
use miette::GraphicalReportHandler;

use flowdoc_cli::{Args, render_report};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level `{}`, falling back to `warn`",
            args.log_level
        );
        LevelFilter::Warn
    });
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Flowdoc");
    debug!(args:?; "Parsed arguments");

    if let Err(err) = flowdoc_cli::run(&args) {
        // Reports go straight to stderr so `--log-level off` cannot hide them
        let report = render_report(&err, &GraphicalReportHandler::new());
        eprintln!("{report}");
        debug!(error:? = err; "Run failed");
        process::exit(1);
    }

    info!("Completed successfully");
}
