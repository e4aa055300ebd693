//! # elm-constants
//!
//! Generates an Elm module that exposes environment variables as `String`
//! constants.
//!
//! A JSON config names the variables and where the module goes:
//!
//! ```json
//! {
//!   "path": "src",
//!   "moduleName": "Env",
//!   "values": ["API_URL", ["GIT_SHA", "commit"]]
//! }
//! ```
//!
//! Bare names are camelCased (`API_URL` → `apiUrl`); pairs give the Elm name
//! explicitly. Running the tool writes `src/Env.elm`:
//!
//! ```elm
//! module Env exposing (apiUrl, commit)
//!
//!
//! apiUrl : String
//! apiUrl =
//!     "https://api.example.com"
//!
//! commit : String
//! commit =
//!     "4f2a9c1"
//! ```
//!
//! ## Pipeline
//!
//! | Step | Module |
//! |------|--------|
//! | Load and validate the config | [`config`] |
//! | Merge a `.env` file into the environment snapshot | [`env`] |
//! | Turn `values` into `(env name, Elm name)` pairs | [`entry`] |
//! | Look the names up | [`resolve`] |
//! | Render the module text | [`render`] |
//! | Write the file | [`output`] |
//!
//! [`Generator`] runs all of them:
//!
//! ```rust,ignore
//! use elm_constants::{EnvSnapshot, Generator, Options};
//!
//! let report = Generator::new(Options::default()).run(EnvSnapshot::from_process())?;
//! println!("{report}");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description | Default |
//! |---------|-------------|---------|
//! | `dotenv` | Load `.env` files with [`dotenvy`] | **Yes** |

#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod cli;
pub mod config;
pub mod entry;
pub mod env;
mod error;
pub mod logging;
pub mod output;
pub mod paths;
pub mod pipeline;
pub mod render;
pub mod resolve;

pub use config::{Config, RawEntry};
pub use entry::{Identifier, ValueEntry};
pub use env::{DotenvSource, EnvFile, EnvSnapshot};
pub use error::Error;
pub use output::Report;
pub use pipeline::{Generator, Options};
pub use resolve::ResolvedConstant;

/// Re-export miette so callers can render [`Error`] diagnostics.
pub use miette;

/// Re-export dotenvy when the dotenv feature is enabled.
#[cfg(feature = "dotenv")]
pub use dotenvy;

/// Result type of the pipeline stages.
pub type Result<T, E = Error> = std::result::Result<T, E>;
