//! Error types for openapi4aws.
//!
//! Every failure is fatal for the whole run. Errors carry their own context
//! (argument token, file path, document location) so the binary can report
//! them as a single line.

use std::path::PathBuf;

/// Top-level error type for configuration parsing and document augmentation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid, duplicated or incomplete configuration.
    #[error("{message}")]
    Config { message: String },

    /// Failure while consuming a single argument token.
    #[error("{token} : {source}")]
    Argument {
        token: String,
        #[source]
        source: Box<Error>,
    },

    #[error("IOError reading file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IOError writing file '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A value in the document does not have the expected type.
    #[error("unexpected openapi type on {location}")]
    Shape { location: String },

    /// A mapping key or list element that should be a string is not.
    #[error("unexpected openapi content on {location}:{entry}")]
    NonStringEntry { location: String, entry: String },

    /// The document does not hold a mapping at its top level.
    #[error("invalid openapi content")]
    InvalidContent,

    /// The document is not valid YAML.
    #[error("malformed yaml: {source}")]
    Malformed {
        #[source]
        source: serde_yaml::Error,
    },

    /// The augmented document could not be serialized.
    #[error("cannot render yaml: {source}")]
    Render {
        #[source]
        source: serde_yaml::Error,
    },

    /// Any document error, qualified with the file it was found in.
    #[error("{}: {source}", path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn already_specified() -> Self {
        Self::config("already specified")
    }

    pub fn unexpected() -> Self {
        Self::config("unexpected")
    }

    pub fn shape(location: impl Into<String>) -> Self {
        Self::Shape { location: location.into() }
    }

    /// Prefix this error with the argument token being consumed.
    pub fn in_argument(self, token: impl Into<String>) -> Self {
        Self::Argument { token: token.into(), source: Box::new(self) }
    }

    /// Prefix this error with the file it relates to.
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        Self::InFile { path: path.into(), source: Box::new(self) }
    }
}
