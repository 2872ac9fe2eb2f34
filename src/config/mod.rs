//! Configuration loading and building
//!
//! Argument tokens (from the command line or from `configuration=` files)
//! are split into assignments and folded into the authorizer and
//! integration registries plus the input file selection.

pub mod builder;
pub mod loader;

pub use builder::ConfigurationBuilder;
pub use loader::{expand_tokens, parse_token, Area, Assignment};

use crate::authorizer::{AuthorizerRegistry, ResolvedAuthorizer};
use crate::error::Result;
use crate::integration::Integrations;
use std::path::PathBuf;

/// Files selected for augmentation, before they are resolved on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSelection {
    pub filenames: Vec<String>,
    pub globs: Vec<String>,
}

impl InputSelection {
    pub fn is_empty(&self) -> bool {
        self.filenames.is_empty() && self.globs.is_empty()
    }
}

/// Fully parsed and validated configuration. Immutable once built.
#[derive(Debug)]
pub struct Configuration {
    pub authorizers: AuthorizerRegistry,
    pub integrations: Integrations,
    pub inputs: InputSelection,
    pub output_folder: Option<PathBuf>,
}

impl Configuration {
    /// Build a configuration from raw argument tokens, expanding any
    /// `configuration=<file>` token in place.
    pub fn from_tokens<I, S>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = ConfigurationBuilder::new();
        for token in expand_tokens(tokens)? {
            builder.consume_token(&token)?;
        }
        builder.finish()
    }

    pub fn public_authorizers(&self) -> Result<Vec<ResolvedAuthorizer>> {
        self.authorizers.export_public()
    }
}
