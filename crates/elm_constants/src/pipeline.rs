//! The generator pipeline: config → env file → normalize → resolve →
//! render → write.

use std::path::{Path, PathBuf};

use crate::config::{Config, DEFAULT_CONFIG_PATH};
use crate::env::{self, EnvSnapshot};
use crate::error::Error;
use crate::output::{self, Report};
use crate::{entry, paths, render, resolve};

/// Inputs of one run, besides the environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Explicit config file; [`DEFAULT_CONFIG_PATH`] otherwise.
    pub config_path: Option<PathBuf>,

    /// Explicit env file; `.env` in `working_dir` otherwise.
    pub env_path: Option<PathBuf>,

    /// Whether to load an env file at all.
    pub dotenv: bool,

    /// Directory relative paths are resolved against.
    pub working_dir: PathBuf,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            config_path: None,
            env_path: None,
            dotenv: true,
            working_dir: PathBuf::from("."),
        }
    }
}

impl Options {
    /// Sets the config file.
    #[must_use]
    pub fn config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Sets the env file.
    #[must_use]
    pub fn env_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_path = Some(path.into());
        self
    }

    /// Enables or disables env file loading.
    #[must_use]
    pub const fn dotenv(mut self, enabled: bool) -> Self {
        self.dotenv = enabled;
        self
    }

    /// Sets the directory relative paths are resolved against.
    #[must_use]
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = dir.into();
        self
    }

    /// The config file path as shown to the user.
    #[must_use]
    pub fn config_display_path(&self) -> PathBuf {
        let path = self
            .config_path
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
        paths::normalize(path)
    }
}

/// Runs the whole pipeline once.
#[derive(Clone, Debug, Default)]
pub struct Generator {
    options: Options,
}

impl Generator {
    /// Creates a generator for `options`.
    #[must_use]
    pub const fn new(options: Options) -> Self {
        Self { options }
    }

    /// The options this generator runs with.
    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    /// Generates the module and writes it to `{path}/{moduleName}.elm`.
    ///
    /// `env` is the process environment captured by the caller. The env file
    /// step merges into this copy only.
    ///
    /// # Errors
    ///
    /// The first failing stage's [`Error`]; nothing is written in that case.
    pub fn run(&self, mut env: EnvSnapshot) -> Result<Report, Error> {
        let options = &self.options;

        let config_path = options.config_display_path();
        let config = Config::load(&paths::resolve_against(&options.working_dir, &config_path))
            .map_err(|e| match e {
                Error::ConfigNotFound { .. } => Error::ConfigNotFound { path: config_path },
                other => other,
            })?;

        if options.dotenv {
            env::load_env_file(&mut env, options.env_path.as_deref(), &options.working_dir)?;
        } else {
            tracing::debug!("env file loading disabled");
        }

        let entries = entry::normalize(&config.values)?;
        let constants = resolve::resolve(&entries, &env)?;
        let text = render::render(&config.module_name, &constants);

        let target = output::target_path(&config);
        output::write_module(
            &paths::resolve_against(&options.working_dir, &target),
            &config.path,
            &text,
        )?;

        Ok(Report {
            count: constants.len(),
            path: target,
        })
    }
}
