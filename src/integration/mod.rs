//! Integration targets keyed by exact route path or by tag
//!
//! An exact path entry always wins; otherwise the operation's tags are tried
//! in document order and the first tag with an entry is used.

use crate::authorizer::AuthorizerRegistry;
use crate::error::{Error, Result};
use std::collections::HashMap;

/// How the keys of an [`IntegrationRegistry`] are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// Exact route path; the configured URI is used verbatim.
    Path,
    /// Lowercase tag name; the configured URI is a prefix for the route path.
    Tag,
}

/// Authorizer (and scopes) required by an integration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizerBinding {
    pub name: String,
    pub scopes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrationTarget {
    uri: String,
    kind: KeyKind,
    authorizer: Option<AuthorizerBinding>,
}

impl IntegrationTarget {
    /// Final URI for the given route path.
    pub fn uri_for(&self, path: &str) -> String {
        match self.kind {
            KeyKind::Path => self.uri.clone(),
            KeyKind::Tag => format!("{}{}", self.uri, path),
        }
    }

    pub fn authorizer(&self) -> Option<&AuthorizerBinding> {
        self.authorizer.as_ref()
    }
}

#[derive(Debug)]
pub struct IntegrationRegistry {
    kind: KeyKind,
    targets: HashMap<String, IntegrationTarget>,
}

impl IntegrationRegistry {
    pub fn new(kind: KeyKind) -> Self {
        Self { kind, targets: HashMap::new() }
    }

    pub fn kind(&self) -> KeyKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Register a target under `key`.
    ///
    /// Tag keys are stored lowercase and their URI loses one trailing slash,
    /// since the route path is appended to it.
    pub fn add(
        &mut self,
        key: &str,
        uri: &str,
        authorizer: Option<AuthorizerBinding>,
        authorizers: &AuthorizerRegistry,
    ) -> Result<()> {
        let key = match self.kind {
            KeyKind::Path => key.to_string(),
            KeyKind::Tag => key.to_lowercase(),
        };
        if self.targets.contains_key(&key) {
            return Err(Error::already_specified());
        }
        if let Some(binding) = &authorizer {
            if !authorizers.contains(&binding.name) {
                return Err(Error::config(format!(
                    "{} is not a provided authorizer name",
                    binding.name
                )));
            }
        }
        let uri = match self.kind {
            KeyKind::Path => uri,
            KeyKind::Tag => uri.strip_suffix('/').unwrap_or(uri),
        };
        tracing::debug!(kind = ?self.kind, key = %key, uri, "integration registered");
        self.targets.insert(
            key,
            IntegrationTarget { uri: uri.to_string(), kind: self.kind, authorizer },
        );
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&IntegrationTarget> {
        self.targets.get(key)
    }
}

/// The by-path and by-tag registries, consulted together.
#[derive(Debug)]
pub struct Integrations {
    pub paths: IntegrationRegistry,
    pub tags: IntegrationRegistry,
}

impl Default for Integrations {
    fn default() -> Self {
        Self::new()
    }
}

impl Integrations {
    pub fn new() -> Self {
        Self {
            paths: IntegrationRegistry::new(KeyKind::Path),
            tags: IntegrationRegistry::new(KeyKind::Tag),
        }
    }

    /// Exact path first, then the first tag (in the given order) with an entry.
    pub fn resolve<S: AsRef<str>>(&self, path: &str, tags: &[S]) -> Option<&IntegrationTarget> {
        self.paths.get(path).or_else(|| {
            tags.iter().find_map(|tag| self.tags.get(&tag.as_ref().to_lowercase()))
        })
    }
}
