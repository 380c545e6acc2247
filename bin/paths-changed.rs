#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::process::ExitCode;

use clap::Parser as ClapParser;
use paths_changed::Args;
use tracing_subscriber::filter::LevelFilter;

/// Parse a log level, falling back to `info` for unknown values.
fn log_level(level: &str) -> Result<LevelFilter, LevelFilter> {
    match level.trim() {
        "" => Ok(LevelFilter::INFO),
        level => level.parse().map_err(|_| LevelFilter::INFO),
    }
}

fn init_logging(level: &str) {
    let (filter, unknown) = match log_level(level) {
        Ok(filter) => (filter, false),
        Err(filter) => (filter, true),
    };
    tracing_subscriber::fmt()
        .without_time()
        .with_target(false)
        .with_max_level(filter)
        .init();
    if unknown {
        tracing::warn!("unknown log level {level:?}, using {filter}");
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    match paths_changed::exec(&args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            for message in error.messages() {
                eprintln!("{message}");
            }
            ExitCode::FAILURE
        }
    }
}
