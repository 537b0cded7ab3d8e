//! xxdupe - duplicate file finder
//!
//! Entry point for the xxdupe CLI application.

use std::panic::{self, AssertUnwindSafe};

use clap::Parser;
use xxdupe::{
    cli::Cli, config::Config, describe_error, error::ExitCode, logging::init_logging, FORCED_EXIT,
};

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    let error_format = Config::output_format(&cli);

    // Keep panic traces away from the user; they go to the log instead
    panic::set_hook(Box::new(|info| {
        log::error!("Unexpected failure: {info}");
    }));

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| xxdupe::run_app(cli)));

    match outcome {
        Ok(Ok(code)) => std::process::exit(code.as_i32()),
        Ok(Err(err)) => {
            let (exit_code, message) = describe_error(&err, error_format);
            eprintln!("{message}");
            std::process::exit(exit_code.as_i32());
        }
        Err(_) => {
            eprintln!("{FORCED_EXIT}");
            std::process::exit(ExitCode::GeneralError.as_i32());
        }
    }
}
