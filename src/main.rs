use clap::Parser;
use sitebuild::cli::{self, Cli};
use sitebuild::logger::Logger;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("sitebuild=debug,arkive=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let mut logger = Logger::new_real();
    cli::execute(cli, &mut logger)
}
