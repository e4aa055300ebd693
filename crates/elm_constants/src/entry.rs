//! Normalizing `values` entries into `(env name, Elm name)` pairs.

use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::config::RawEntry;
use crate::error::Error;

/// A lowercase letter followed by one or more ASCII word characters.
static IDENTIFIER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][A-Za-z0-9_]+$").expect("valid regex"));

/// A name that can be exposed from the generated Elm module.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

impl Identifier {
    /// Checks `name` against the identifier pattern.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        is_valid_identifier(name).then(|| Self(name.to_string()))
    }

    /// The name as written in Elm source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Whether `name` matches `^[a-z]\w+$` with ASCII word characters.
#[must_use]
pub fn is_valid_identifier(name: &str) -> bool {
    IDENTIFIER_PATTERN.is_match(name)
}

/// Converts an env var name to camelCase.
///
/// The name is lowercased and split on `_`; every segment gets an uppercase
/// first letter, the segments are joined and the very first letter is
/// lowercased again. `API_KEY` becomes `apiKey`.
#[must_use]
pub fn camel_case(name: &str) -> String {
    let joined: String = name.to_lowercase().split('_').map(capitalize).collect();
    lowercase_first(&joined)
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// One requested constant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueEntry {
    /// Variable looked up in the environment.
    pub env_name: String,

    /// Name exposed from the Elm module.
    pub exposed_name: Identifier,
}

impl ValueEntry {
    /// Normalizes the entry at position `index` of `values`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidValueEntry`] for arrays that are not pairs and for
    ///   non-string, non-array entries
    /// - [`Error::NotAString`] if a pair element is not a string
    /// - [`Error::InvalidIdentifier`] if an alias is not a valid Elm name
    /// - [`Error::AutoConversionFailed`] if a bare name does not convert
    pub fn from_raw(index: usize, raw: &RawEntry) -> Result<Self, Error> {
        match raw {
            RawEntry::Alias(pair) => {
                let [env_name, alias] = pair.as_slice() else {
                    return Err(Error::invalid_entry(
                        index,
                        "The array to alias a value can only have two elements.",
                    ));
                };

                let env_name = expect_string(env_name)?;
                let alias = expect_string(alias)?;

                let exposed_name = Identifier::parse(alias).ok_or_else(|| {
                    Error::InvalidIdentifier {
                        name: alias.to_string(),
                    }
                })?;

                Ok(Self {
                    env_name: env_name.to_string(),
                    exposed_name,
                })
            }

            RawEntry::Name(name) => {
                let converted = camel_case(name);
                let exposed_name = Identifier::parse(&converted)
                    .ok_or_else(|| Error::auto_conversion_failed(name, &converted))?;

                Ok(Self {
                    env_name: name.clone(),
                    exposed_name,
                })
            }

            RawEntry::Other(_) => Err(Error::invalid_entry(
                index,
                "If you're specifying a value, it must be a string that's the name of an env variable.",
            )),
        }
    }
}

fn expect_string(value: &Value) -> Result<&str, Error> {
    value.as_str().ok_or_else(|| Error::NotAString {
        value: value.to_string(),
    })
}

/// Normalizes every entry, keeping input order.
///
/// Every invalid entry is logged and the first one is returned. A name
/// exposed twice is an [`Error::DuplicateName`].
///
/// # Errors
///
/// The first error of [`ValueEntry::from_raw`], see [`Error::first_of`].
pub fn normalize(values: &[RawEntry]) -> Result<Vec<ValueEntry>, Error> {
    let mut entries = Vec::with_capacity(values.len());
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (index, raw) in values.iter().enumerate() {
        match ValueEntry::from_raw(index, raw) {
            Ok(entry) => {
                if !seen.insert(entry.exposed_name.clone()) {
                    errors.push(Error::DuplicateName {
                        name: entry.exposed_name.to_string(),
                    });
                    continue;
                }
                entries.push(entry);
            }
            Err(e) => errors.push(e),
        }
    }

    if let Some(err) = Error::first_of(errors) {
        return Err(err);
    }

    Ok(entries)
}
