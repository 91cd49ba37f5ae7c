//! Bucketfill - command-line paint-bucket fills with undo/redo

use std::process::ExitCode;

use bucketfill::cli;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    cli::run()
}
