//! Environment snapshot and `.env` file loading.
//!
//! The process environment is captured once into an [`EnvSnapshot`].
//! Resolution only reads the snapshot, so tests never need to mutate the
//! real environment.
//!
//! Env files are read with [`dotenvy`] (behind the default `dotenv`
//! feature) and merged into the snapshot without overriding variables that
//! are already set. Lines that do not parse are logged and skipped.
//!
//! dotenvy expands `$VAR` and `${VAR}` in unquoted and double-quoted
//! values. A reference is looked up in the live process environment, then
//! in earlier lines of the same file, and is empty when neither has it. The
//! snapshot is not consulted. Use single quotes to keep a `$` literal.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::Error;

/// Env file looked up in the working directory when `--env-path` is not given.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Variable that switches off env file loading when set to [`PRODUCTION`].
pub const MODE_VAR: &str = "NODE_ENV";

/// Value of [`MODE_VAR`] that marks a production run.
pub const PRODUCTION: &str = "production";

/// `.env`, `.env.local`, `config/.env.test`...
static ENV_FILE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.*\.(env)($|\..+$)").expect("valid regex"));

/// Immutable view of environment variables.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
    /// Names whose values are not valid UTF-8.
    non_unicode: BTreeSet<String>,
}

impl EnvSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures the current process environment.
    ///
    /// Variables with a non-UTF-8 name are skipped. Variables with a
    /// non-UTF-8 value are remembered by name so resolution can report them.
    #[must_use]
    pub fn from_process() -> Self {
        let mut snapshot = Self::new();

        for (key, value) in std::env::vars_os() {
            let Ok(key) = key.into_string() else {
                continue;
            };

            match value.into_string() {
                Ok(value) => {
                    snapshot.vars.insert(key, value);
                }
                Err(_) => {
                    snapshot.non_unicode.insert(key);
                }
            }
        }

        snapshot
    }

    /// Returns the value of `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Whether `name` is set but its value is not valid UTF-8.
    #[must_use]
    pub fn is_non_unicode(&self, name: &str) -> bool {
        self.non_unicode.contains(name)
    }

    /// Whether [`MODE_VAR`] is set to [`PRODUCTION`].
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.get(MODE_VAR) == Some(PRODUCTION)
    }

    /// Number of readable variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether the snapshot holds no readable variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Adds every pair whose name is not already present.
    ///
    /// Returns how many variables were added.
    pub fn merge_missing<I>(&mut self, pairs: I) -> usize
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut added = 0;

        for (key, value) in pairs {
            if self.vars.contains_key(&key) || self.non_unicode.contains(&key) {
                continue;
            }
            self.vars.insert(key, value);
            added += 1;
        }

        added
    }
}

impl<K, V> FromIterator<(K, V)> for EnvSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            non_unicode: BTreeSet::new(),
        }
    }
}

/// Which env file to load, if any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnvFile {
    /// `.env` in the working directory; silently skipped if absent.
    Default(PathBuf),

    /// A path given with `--env-path`; already checked to exist.
    Explicit(PathBuf),
}

impl EnvFile {
    /// Picks the env file for this run.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EnvFileNotFound`] if `explicit` does not exist or is
    /// not named like an env file.
    pub fn select(explicit: Option<&Path>, working_dir: &Path) -> Result<Self, Error> {
        let Some(path) = explicit else {
            return Ok(Self::Default(working_dir.join(DEFAULT_ENV_FILE)));
        };

        let resolved = crate::paths::resolve_against(working_dir, path);
        if !resolved.is_file() || !is_env_file_name(path) {
            return Err(Error::EnvFileNotFound {
                path: path.to_path_buf(),
            });
        }

        Ok(Self::Explicit(resolved))
    }

    /// The file location.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Default(path) | Self::Explicit(path) => path,
        }
    }
}

/// Whether `path` ends with `.env` or `.env.<suffix>`.
#[must_use]
pub fn is_env_file_name(path: &Path) -> bool {
    ENV_FILE_PATTERN.is_match(&path.to_string_lossy())
}

/// Variables read from one env file.
///
/// Reading never modifies the process environment.
#[derive(Clone, Debug, Default)]
pub struct DotenvSource {
    path: Option<PathBuf>,
    values: Vec<(String, String)>,
}

impl DotenvSource {
    /// Reads the env file at `path`.
    ///
    /// # Errors
    ///
    /// Malformed lines are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EnvFileParse`] if the file cannot be read.
    #[cfg(feature = "dotenv")]
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();
        let parse_err = |source: dotenvy::Error| Error::EnvFileParse {
            path: path.clone(),
            source: Box::new(source),
        };

        let mut values = Vec::new();
        for item in dotenvy::from_path_iter(&path).map_err(parse_err)? {
            match item {
                Ok(pair) => values.push(pair),
                // The line may hold a secret, so only the file is named.
                Err(dotenvy::Error::LineParse(..)) => {
                    tracing::warn!(path = %path.display(), "skipping malformed env file line");
                }
                Err(e) => return Err(parse_err(e)),
            }
        }

        Ok(Self {
            path: Some(path),
            values,
        })
    }

    /// Reads the env file at `path`, or returns an empty source if it does
    /// not exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EnvFileParse`] if the file exists but cannot be
    /// read.
    #[cfg(feature = "dotenv")]
    pub fn from_path_optional(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_path(path)
    }

    /// Without the `dotenv` feature env files are never read.
    #[cfg(not(feature = "dotenv"))]
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();
        tracing::warn!(
            path = %path.display(),
            "built without the `dotenv` feature; env file ignored"
        );
        Ok(Self::default())
    }

    /// Without the `dotenv` feature env files are never read.
    #[cfg(not(feature = "dotenv"))]
    pub fn from_path_optional(path: impl Into<PathBuf>) -> Result<Self, Error> {
        Self::from_path(path)
    }

    /// The file that was read, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The variables in file order.
    #[must_use]
    pub fn values(&self) -> &[(String, String)] {
        &self.values
    }

    /// Merges the variables into `snapshot` without overriding it.
    ///
    /// Returns how many variables were added.
    pub fn apply(self, snapshot: &mut EnvSnapshot) -> usize {
        snapshot.merge_missing(self.values)
    }
}

/// Runs the optional env file step against `snapshot`.
///
/// The explicit path is validated first; the file is then skipped in
/// production mode.
///
/// # Errors
///
/// [`Error::EnvFileNotFound`] for a bad `--env-path`,
/// [`Error::EnvFileParse`] for an unreadable file.
pub fn load_env_file(
    snapshot: &mut EnvSnapshot,
    explicit: Option<&Path>,
    working_dir: &Path,
) -> Result<usize, Error> {
    let file = EnvFile::select(explicit, working_dir)?;
    tracing::debug!(path = %file.path().display(), "selected env file");

    if snapshot.is_production() {
        if let EnvFile::Explicit(path) = &file {
            tracing::warn!(path = %path.display(), "{MODE_VAR}={PRODUCTION}; env file not loaded");
        } else {
            tracing::debug!("{MODE_VAR}={PRODUCTION}; skipping env file");
        }
        return Ok(0);
    }

    let source = match file {
        EnvFile::Default(path) => DotenvSource::from_path_optional(path)?,
        EnvFile::Explicit(path) => DotenvSource::from_path(path)?,
    };

    let path = source.path().map(Path::to_path_buf);
    let added = source.apply(snapshot);

    match path {
        Some(path) => tracing::debug!(path = %path.display(), added, "loaded env file"),
        None => tracing::debug!("no env file found"),
    }

    Ok(added)
}
