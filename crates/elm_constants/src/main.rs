//! `elm-constants` binary.

use std::process::ExitCode;

use clap::Parser;
use elm_constants::cli::{Cli, VERSION};
use elm_constants::{EnvSnapshot, Generator, logging};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            if let Err(e) = err.print() {
                logging::init(false);
                tracing::warn!(error = %e, "failed to print usage");
            }
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    logging::init(cli.verbose);

    if cli.version {
        println!("{VERSION}");
    }

    let generator = Generator::new(cli.options());
    match generator.run(EnvSnapshot::from_process()) {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("{err}");
            tracing::debug!("{:?}", elm_constants::miette::Report::new(err));
            ExitCode::FAILURE
        }
    }
}
