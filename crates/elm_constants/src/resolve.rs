//! Looking up normalized entries in the environment snapshot.

use crate::entry::{Identifier, ValueEntry};
use crate::env::EnvSnapshot;
use crate::error::Error;

/// An Elm name paired with the value read from the environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedConstant {
    /// Exposed Elm name.
    pub name: Identifier,

    /// Raw environment value, inserted verbatim into the module.
    pub value: String,
}

/// Resolves every entry against `env`, keeping input order.
///
/// Every unset variable is logged; the first one is returned.
///
/// # Errors
///
/// - [`Error::EnvVarNotFound`] for the first unset variable
/// - [`Error::InvalidUtf8`] for a variable whose value is not UTF-8
/// - [`Error::NothingToGenerate`] if `entries` is empty
pub fn resolve(entries: &[ValueEntry], env: &EnvSnapshot) -> Result<Vec<ResolvedConstant>, Error> {
    let mut constants = Vec::with_capacity(entries.len());
    let mut errors = Vec::new();

    for entry in entries {
        match env.get(&entry.env_name) {
            Some(value) => constants.push(ResolvedConstant {
                name: entry.exposed_name.clone(),
                value: value.to_string(),
            }),
            None if env.is_non_unicode(&entry.env_name) => errors.push(Error::InvalidUtf8 {
                var: entry.env_name.clone(),
            }),
            None => errors.push(Error::env_var_not_found(&entry.env_name)),
        }
    }

    if let Some(err) = Error::first_of(errors) {
        return Err(err);
    }

    if constants.is_empty() {
        return Err(Error::NothingToGenerate);
    }

    tracing::debug!(count = constants.len(), "resolved environment values");

    Ok(constants)
}
