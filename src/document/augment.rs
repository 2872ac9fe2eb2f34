//! Injection of API Gateway extensions into an OpenAPI document

use super::value::{child_mapping, key_str, string_list};
use crate::authorizer::{ResolvedAuthorizer, AUTHORIZATION_TYPE, AUTHORIZER_TYPE};
use crate::config::Configuration;
use crate::error::{Error, Result};
use crate::integration::{AuthorizerBinding, Integrations};
use serde_yaml::{Mapping, Value};

pub const PATHS: &str = "paths";
pub const COMPONENTS: &str = "components";
pub const SECURITY_SCHEMES: &str = "securitySchemes";
pub const INTEGRATION_KEY: &str = "x-amazon-apigateway-integration";
pub const AUTHORIZER_KEY: &str = "x-amazon-apigateway-authorizer";
pub const SECURITY_KEY: &str = "security";

const PAYLOAD_FORMAT_VERSION: &str = "1.0";
const INTEGRATION_TYPE: &str = "http_proxy";
const CONNECTION_TYPE: &str = "INTERNET";

/// Counters describing what one augmentation pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AugmentStats {
    pub security_schemes: usize,
    pub operations: usize,
    pub secured_operations: usize,
}

/// Applies the configured authorizers and integrations to documents.
pub struct Augmenter<'a> {
    authorizers: Vec<ResolvedAuthorizer>,
    integrations: &'a Integrations,
}

impl<'a> Augmenter<'a> {
    pub fn new(authorizers: Vec<ResolvedAuthorizer>, integrations: &'a Integrations) -> Self {
        Self { authorizers, integrations }
    }

    pub fn from_configuration(config: &'a Configuration) -> Result<Self> {
        Ok(Self::new(config.public_authorizers()?, &config.integrations))
    }

    /// Augment `document` in place.
    ///
    /// The first shape violation aborts the pass; the document may then be
    /// partially modified and must not be written back.
    pub fn augment(&self, document: &mut Value) -> Result<AugmentStats> {
        let root = document.as_mapping_mut().ok_or(Error::InvalidContent)?;
        let mut stats = AugmentStats::default();

        if !self.authorizers.is_empty() {
            let components = child_mapping(root, COMPONENTS, COMPONENTS)?;
            let location = format!("{COMPONENTS}:{SECURITY_SCHEMES}");
            let schemes = child_mapping(components, SECURITY_SCHEMES, &location)?;
            for authorizer in &self.authorizers {
                schemes.insert(Value::from(authorizer.name.as_str()), security_scheme(authorizer));
                stats.security_schemes += 1;
            }
        }

        let paths = child_mapping(root, PATHS, PATHS)?;
        for (path_key, path_item) in paths.iter_mut() {
            let path = key_str(path_key, PATHS)?;
            let location = format!("{PATHS}:{path}");
            let methods = match path_item {
                Value::Null => continue,
                Value::Mapping(methods) => methods,
                _ => return Err(Error::shape(location)),
            };
            for (method_key, operation) in methods.iter_mut() {
                let method = key_str(method_key, &location)?;
                let sub_location = format!("{location}:{method}");
                if self.augment_operation(path, method, operation, &sub_location, &mut stats)? {
                    tracing::debug!(path, method, "integration injected");
                }
            }
        }

        Ok(stats)
    }

    fn augment_operation(
        &self,
        path: &str,
        method: &str,
        operation: &mut Value,
        location: &str,
        stats: &mut AugmentStats,
    ) -> Result<bool> {
        let tags = match &*operation {
            Value::Null => Vec::new(),
            Value::Mapping(spec) => {
                for key in spec.keys() {
                    key_str(key, location)?;
                }
                string_list(spec.get("tags"), location)?
            }
            _ => return Err(Error::shape(location)),
        };

        let Some(target) = self.integrations.resolve(path, &tags) else {
            return Ok(false);
        };

        if operation.is_null() {
            *operation = Value::Mapping(Mapping::new());
        }
        let spec = operation.as_mapping_mut().ok_or_else(|| Error::shape(location))?;
        spec.insert(Value::from(INTEGRATION_KEY), integration(method, &target.uri_for(path)));
        stats.operations += 1;
        if let Some(binding) = target.authorizer() {
            spec.insert(Value::from(SECURITY_KEY), security(binding));
            stats.secured_operations += 1;
        }
        Ok(true)
    }
}

fn mapping<const N: usize>(entries: [(&str, Value); N]) -> Value {
    Value::Mapping(entries.into_iter().map(|(key, value)| (Value::from(key), value)).collect())
}

fn string_sequence(items: &[String]) -> Value {
    Value::Sequence(items.iter().map(|item| Value::from(item.as_str())).collect())
}

fn security_scheme(authorizer: &ResolvedAuthorizer) -> Value {
    mapping([
        ("type", Value::from(AUTHORIZATION_TYPE)),
        ("flows", Value::Mapping(Mapping::new())),
        (
            AUTHORIZER_KEY,
            mapping([
                ("identitySource", Value::from(authorizer.identity_source.as_str())),
                ("type", Value::from(AUTHORIZER_TYPE)),
                (
                    "jwtConfiguration",
                    mapping([
                        ("audience", string_sequence(&authorizer.audience)),
                        ("issuer", Value::from(authorizer.issuer.as_str())),
                    ]),
                ),
            ]),
        ),
    ])
}

fn integration(method: &str, uri: &str) -> Value {
    mapping([
        ("payloadFormatVersion", Value::from(PAYLOAD_FORMAT_VERSION)),
        ("type", Value::from(INTEGRATION_TYPE)),
        ("connectionType", Value::from(CONNECTION_TYPE)),
        ("httpMethod", Value::from(method.to_uppercase())),
        ("uri", Value::from(uri)),
    ])
}

fn security(binding: &AuthorizerBinding) -> Value {
    let requirement = mapping([(binding.name.as_str(), string_sequence(&binding.scopes))]);
    Value::Sequence(vec![requirement])
}
