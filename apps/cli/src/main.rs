//! # Nimbus ERP Entry Point
//!
//! Exit status 0 on success, 1 on any error.

use std::process::ExitCode;

use clap::Parser;

use nimbus_cli::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    nimbus_cli::init_tracing(cli.verbose);

    match nimbus_cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
