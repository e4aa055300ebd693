//! Loading and validating `elm-constants.json`.
//!
//! The document is parsed into a [`serde_json::Value`] first so that an
//! absent field, a mistyped field and an empty `values` list each produce
//! their own error.
//!
//! ```json
//! {
//!   "path": "src",
//!   "moduleName": "Env",
//!   "values": ["API_URL", ["GIT_SHA", "commit"]]
//! }
//! ```

use std::path::Path;

use miette::{NamedSource, SourceSpan};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::Error;

/// Config file used when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "./elm-constants.json";

/// A validated configuration document.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Directory the module is written into.
    pub path: String,

    /// Elm module name, also the file stem.
    pub module_name: String,

    /// Requested constants in declaration order. Never empty.
    pub values: Vec<RawEntry>,
}

/// One element of the `values` array before normalization.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawEntry {
    /// `"API_KEY"`: the Elm name is derived from the env var name.
    Name(String),

    /// `["API_KEY", "apiKey"]`: explicit alias. Length and element types
    /// are checked during normalization.
    Alias(Vec<Value>),

    /// Anything else.
    Other(Value),
}

impl From<Value> for RawEntry {
    fn from(value: Value) -> Self {
        match value {
            Value::String(name) => Self::Name(name),
            Value::Array(items) => Self::Alias(items),
            other => Self::Other(other),
        }
    }
}

impl Config {
    /// Reads and validates the config file at `path`.
    ///
    /// # Errors
    ///
    /// [`Error::ConfigNotFound`] if the file does not exist,
    /// [`Error::ConfigRead`] if it cannot be read, [`Error::ConfigParse`] for
    /// invalid JSON, and the validation errors of [`Config::from_value`].
    pub fn load(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_json_str(&content, &path.display().to_string())?;

        tracing::debug!(
            path = %path.display(),
            output_dir = %config.path,
            module = %config.module_name,
            values = config.values.len(),
            "loaded config"
        );

        Ok(config)
    }

    /// Parses and validates a config document.
    ///
    /// `name` is only used to label parse diagnostics.
    ///
    /// # Errors
    ///
    /// [`Error::ConfigParse`] for invalid JSON, otherwise see
    /// [`Config::from_value`].
    pub fn from_json_str(content: &str, name: &str) -> Result<Self, Error> {
        let value: Value =
            serde_json::from_str(content).map_err(|e| parse_error(&e, content, name))?;

        Self::from_value(value)
    }

    /// Validates an already parsed document.
    ///
    /// # Errors
    ///
    /// - [`Error::WrongType`] if the document is not an object, or a field
    ///   has the wrong type
    /// - [`Error::MissingField`] for an absent, `null` or empty field
    /// - [`Error::EmptyValues`] if `values` is an empty array
    pub fn from_value(value: Value) -> Result<Self, Error> {
        let Value::Object(mut object) = value else {
            return Err(Error::wrong_type("<root>", "an object"));
        };

        let path = required_string(&object, "path")?;
        let module_name = required_string(&object, "moduleName")?;

        let values = match object.remove("values") {
            None => return Err(Error::missing_field("values")),
            Some(v) if is_falsy(&v) => return Err(Error::missing_field("values")),
            Some(Value::Array(items)) if items.is_empty() => return Err(Error::EmptyValues),
            Some(Value::Array(items)) => items
                .into_iter()
                .map(RawEntry::from)
                .collect(),
            Some(_) => return Err(Error::wrong_type("values", "an array")),
        };

        Ok(Self {
            path,
            module_name,
            values,
        })
    }
}

fn required_string(object: &Map<String, Value>, field: &'static str) -> Result<String, Error> {
    match object.get(field) {
        None => Err(Error::missing_field(field)),
        Some(v) if is_falsy(v) => Err(Error::missing_field(field)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(Error::wrong_type(field, "a string")),
    }
}

/// `null`, `false`, `0` and `""` count as not provided.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn parse_error(err: &serde_json::Error, content: &str, name: &str) -> Error {
    let offset = line_col_to_offset(content, err.line(), err.column());
    let message = strip_position(&err.to_string());

    Error::ConfigParse {
        path: name.to_string(),
        src: NamedSource::new(name, content.to_string()),
        span: offset_to_span(offset, content),
        help: "check for trailing commas, missing quotes or unbalanced brackets".to_string(),
        message,
    }
}

/// serde_json appends " at line X column Y"; the span already says that.
fn strip_position(message: &str) -> String {
    message
        .rfind(" at line ")
        .map_or(message, |pos| &message[..pos])
        .to_string()
}

/// Convert line/column (1-indexed) to a byte offset.
fn line_col_to_offset(content: &str, line: usize, col: usize) -> usize {
    let mut offset = 0;

    for (i, l) in content.lines().enumerate() {
        if (i + 1) == line {
            return (offset + col.saturating_sub(1)).min(content.len());
        }

        offset += l.len() + 1;
    }

    offset.min(content.len())
}

/// Span from `offset` to the next JSON delimiter, at least one byte long and
/// inside `content` whenever `content` is non-empty.
fn offset_to_span(offset: usize, content: &str) -> SourceSpan {
    let mut offset = offset.min(content.len());
    if offset == content.len() && offset > 0 {
        offset = content
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i);
    }
    while !content.is_char_boundary(offset) {
        offset -= 1;
    }

    let remaining = &content[offset..];
    let len = remaining
        .find(|c: char| c.is_whitespace() || c == ',' || c == '}' || c == ']')
        .unwrap_or_else(|| remaining.len().min(20))
        .max(1);

    SourceSpan::new(offset.into(), len)
}
