//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

use crate::pipeline::Options;

/// Version printed by `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generate an Elm module of String constants from environment variables.
#[derive(Clone, Debug, Parser)]
#[command(name = "elm-constants", disable_version_flag = true)]
pub struct Cli {
    /// Print the installed version
    #[arg(short = 'v', long)]
    pub version: bool,

    /// Don't load variables from a .env file
    #[arg(long)]
    pub no_dotenv: bool,

    /// Path to env file
    #[arg(short = 'p', long, value_name = "PATH")]
    pub env_path: Option<PathBuf>,

    /// Path to config file
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log what each step does to stderr
    #[arg(long)]
    pub verbose: bool,
}

impl Cli {
    /// Pipeline options for this invocation, relative to the current directory.
    #[must_use]
    pub fn options(&self) -> Options {
        Options {
            config_path: self.config.clone(),
            env_path: self.env_path.clone(),
            dotenv: !self.no_dotenv,
            ..Options::default()
        }
    }
}
