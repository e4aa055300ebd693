//! Writing the generated module.

use std::fmt::{self, Display, Formatter};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::Builder;

use crate::config::Config;
use crate::error::Error;
use crate::paths;

/// Outcome of a successful run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    /// Number of constants written.
    pub count: usize,

    /// Target file, as shown to the user.
    pub path: PathBuf,
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} constants written to {}", self.count, self.path.display())
    }
}

/// `{path}/{moduleName}.elm`, normalized.
#[must_use]
pub fn target_path(config: &Config) -> PathBuf {
    paths::normalize(&Path::new(&config.path).join(format!("{}.elm", config.module_name)))
}

/// Replaces `target` with `contents`.
///
/// The text goes to a temporary file next to `target` which is then renamed
/// over it, so the target is never left half written.
///
/// # Errors
///
/// [`Error::OutputPathNotFound`] (naming `configured_dir`) when the target
/// directory does not exist, [`Error::WriteError`] otherwise.
pub fn write_module(target: &Path, configured_dir: &str, contents: &str) -> Result<(), Error> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let classify = |source: std::io::Error| {
        if source.kind() == ErrorKind::NotFound {
            Error::output_path_not_found(configured_dir)
        } else {
            Error::WriteError {
                path: target.to_path_buf(),
                source,
            }
        }
    };

    let mut builder = Builder::new();
    builder.prefix(".elm-constants-");
    // Same mode as a plain `fs::write`; the umask still applies.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }

    let mut file = builder.tempfile_in(dir).map_err(classify)?;
    file.write_all(contents.as_bytes()).map_err(classify)?;
    file.persist(target).map_err(|e| classify(e.error))?;

    tracing::info!(path = %target.display(), bytes = contents.len(), "wrote module");

    Ok(())
}
