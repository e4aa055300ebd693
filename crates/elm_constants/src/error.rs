//! Error types for the generator pipeline.
//!
//! Every stage returns [`Error`]. The binary turns it into a single line on
//! stdout and exit code 1; library users can render the full diagnostic with
//! `miette::Report::from(error)`.
//!
//! # Error Variants
//!
//! | Variant | Stage |
//! |---------|-------|
//! | [`Error::ConfigNotFound`], [`Error::ConfigRead`], [`Error::ConfigParse`] | config load |
//! | [`Error::MissingField`], [`Error::WrongType`], [`Error::EmptyValues`] | config validation |
//! | [`Error::EnvFileNotFound`], [`Error::EnvFileParse`] | env file load |
//! | [`Error::InvalidValueEntry`], [`Error::NotAString`], [`Error::InvalidIdentifier`], [`Error::AutoConversionFailed`], [`Error::DuplicateName`] | value normalization |
//! | [`Error::EnvVarNotFound`], [`Error::InvalidUtf8`], [`Error::NothingToGenerate`] | resolution |
//! | [`Error::OutputPathNotFound`], [`Error::WriteError`] | output |

use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};

/// Errors that can occur while generating an Elm constants module.
#[derive(Debug, Diagnostic, thiserror::Error)]
pub enum Error {
    /// The configuration file does not exist.
    #[error("I couldn't find the config file at \"{}\"", .path.display())]
    #[diagnostic(
        code(elm_constants::config_not_found),
        help("create elm-constants.json or pass --config <path>")
    )]
    ConfigNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The configuration file exists but could not be read.
    #[error("I couldn't read the config file at \"{}\": {source}", .path.display())]
    #[diagnostic(
        code(elm_constants::config_read),
        help("check that the path is a readable file")
    )]
    ConfigRead {
        /// Path that was read.
        path: PathBuf,

        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON.
    #[error("the config file \"{path}\" is not valid JSON: {message}")]
    #[diagnostic(code(elm_constants::config_parse))]
    ConfigParse {
        /// Path to the configuration file.
        path: String,

        /// The file content for display.
        #[source_code]
        src: NamedSource<String>,

        /// Location of the syntax error.
        #[label("{message}")]
        span: SourceSpan,

        /// Description from the JSON parser.
        message: String,

        #[help]
        help: String,
    },

    /// A required configuration field is absent, `null` or empty.
    #[error("I couldn't find the field \"{field}\" in the config file.")]
    #[diagnostic(code(elm_constants::missing_field))]
    MissingField {
        /// Name of the field.
        field: &'static str,

        #[help]
        help: String,
    },

    /// A configuration field has the wrong JSON type.
    #[error("The field \"{field}\" in the config file wasn't {expected}.")]
    #[diagnostic(code(elm_constants::wrong_type))]
    WrongType {
        /// Name of the field.
        field: &'static str,

        /// Expected type, with its article (`a string`, `an array`).
        expected: &'static str,
    },

    /// The `values` array is empty.
    #[error("The field \"values\" in the config file was empty. There's nothing for me to do!")]
    #[diagnostic(
        code(elm_constants::empty_values),
        help("list at least one environment variable in \"values\"")
    )]
    EmptyValues,

    /// The explicit env file is missing or does not look like an env file.
    #[error("I couldn't find an env file at \"{}\"", .path.display())]
    #[diagnostic(
        code(elm_constants::env_file_not_found),
        help("the env file must exist and be named `.env` or `.env.<suffix>`")
    )]
    EnvFileNotFound {
        /// Path passed with `--env-path`.
        path: PathBuf,
    },

    /// The env file exists but could not be read or parsed.
    #[error("I couldn't read the env file at \"{}\": {source}", .path.display())]
    #[diagnostic(code(elm_constants::env_file_parse))]
    EnvFileParse {
        /// Path to the env file.
        path: PathBuf,

        /// Underlying loader error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An entry of `values` has an unsupported shape.
    #[error("{reason} (entry {index} of \"values\")")]
    #[diagnostic(code(elm_constants::invalid_value_entry))]
    InvalidValueEntry {
        /// Zero-based position in `values`.
        index: usize,

        /// What is wrong with the entry.
        reason: String,

        #[help]
        help: String,
    },

    /// An alias pair contains something other than a string.
    #[error("\"{value}\" is not a string")]
    #[diagnostic(
        code(elm_constants::not_a_string),
        help("alias pairs look like [\"ENV_NAME\", \"elmName\"]")
    )]
    NotAString {
        /// JSON rendering of the offending element.
        value: String,
    },

    /// An alias is not a valid Elm variable name.
    #[error("\"{name}\" is not a valid Elm variable.")]
    #[diagnostic(
        code(elm_constants::invalid_identifier),
        help("Elm variables start with a lowercase letter followed by letters, digits or underscores")
    )]
    InvalidIdentifier {
        /// The rejected alias.
        name: String,
    },

    /// A bare env var name did not convert into a valid Elm variable name.
    #[error(
        "The env var \"{name}\" could not be automatically converted into a valid Elm variable name. Try aliasing it instead."
    )]
    #[diagnostic(code(elm_constants::auto_conversion_failed))]
    AutoConversionFailed {
        /// The env var name from the config.
        name: String,

        /// What the conversion produced.
        converted: String,

        #[help]
        help: String,
    },

    /// A configured environment variable is not set.
    #[error("The env variable \"{var}\" wasn't found. Maybe you forgot to set it?")]
    #[diagnostic(code(elm_constants::env_var_not_found))]
    EnvVarNotFound {
        /// The missing variable.
        var: String,

        #[help]
        help: String,
    },

    /// A configured environment variable holds non-UTF-8 data.
    #[error("The env variable \"{var}\" contains invalid UTF-8.")]
    #[diagnostic(
        code(elm_constants::invalid_utf8),
        help("ensure the variable contains valid UTF-8 text")
    )]
    InvalidUtf8 {
        /// The offending variable.
        var: String,
    },

    /// Two entries expose the same Elm name.
    #[error("\"{name}\" is exposed more than once.")]
    #[diagnostic(
        code(elm_constants::duplicate_name),
        help("alias one of the values with [\"ENV_NAME\", \"otherName\"]")
    )]
    DuplicateName {
        /// The repeated Elm name.
        name: String,
    },

    /// Resolution produced no constants.
    #[error(
        "I couldn't find any of the environment variables you specified, so I have nothing to generate!"
    )]
    #[diagnostic(code(elm_constants::nothing_to_generate))]
    NothingToGenerate,

    /// The configured output directory does not exist.
    #[error("I couldn't find the path \"{path}\" you specified in the config. Maybe you forgot to create it?")]
    #[diagnostic(code(elm_constants::output_path_not_found))]
    OutputPathNotFound {
        /// The `path` field from the config.
        path: String,

        #[help]
        help: String,
    },

    /// Writing the module failed for another reason.
    #[error("failed to write \"{}\": {source}", .path.display())]
    #[diagnostic(
        code(elm_constants::write_error),
        help("check permissions on the output directory")
    )]
    WriteError {
        /// Target file.
        path: PathBuf,

        #[source]
        source: std::io::Error,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Constructor helpers
// ─────────────────────────────────────────────────────────────────────────────

impl Error {
    /// Creates a `MissingField` error.
    #[must_use]
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField {
            field,
            help: format!("add a non-empty \"{field}\" to the config file"),
        }
    }

    /// Creates a `WrongType` error.
    #[must_use]
    pub const fn wrong_type(field: &'static str, expected: &'static str) -> Self {
        Self::WrongType { field, expected }
    }

    /// Creates an `InvalidValueEntry` error.
    pub fn invalid_entry(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidValueEntry {
            index,
            reason: reason.into(),
            help: "use \"ENV_NAME\" or [\"ENV_NAME\", \"elmName\"]".to_string(),
        }
    }

    /// Creates an `AutoConversionFailed` error.
    pub fn auto_conversion_failed(name: impl Into<String>, converted: impl Into<String>) -> Self {
        let name = name.into();
        let converted = converted.into();
        let help = format!("\"{name}\" became \"{converted}\"; alias it with [\"{name}\", \"myName\"]");
        Self::AutoConversionFailed {
            name,
            converted,
            help,
        }
    }

    /// Creates an `EnvVarNotFound` error.
    pub fn env_var_not_found(var: impl Into<String>) -> Self {
        let var = var.into();
        let help = format!("set {var} in your environment or .env file");
        Self::EnvVarNotFound { var, help }
    }

    /// Creates an `OutputPathNotFound` error.
    pub fn output_path_not_found(path: impl Into<String>) -> Self {
        let path = path.into();
        let help = format!("create the directory \"{path}\" first");
        Self::OutputPathNotFound { path, help }
    }

    /// Picks the first of the errors collected by a stage.
    ///
    /// The others are logged as warnings so that every problem shows up in
    /// one run. Returns `None` for an empty list.
    #[must_use]
    pub fn first_of(errors: Vec<Self>) -> Option<Self> {
        let mut errors = errors.into_iter();
        let first = errors.next()?;
        for other in errors {
            tracing::warn!("{other}");
        }
        Some(first)
    }
}
