//! Folds assignments into a [`Configuration`]

use super::loader::{parse_token, Area, Assignment};
use super::{Configuration, InputSelection};
use crate::authorizer::{AuthorizerField, AuthorizerRegistry, FieldValue};
use crate::error::{Error, Result};
use crate::integration::{AuthorizerBinding, IntegrationRegistry, Integrations};
use std::path::PathBuf;

/// Key of the assignment that declares the authorizer set.
const AUTHORIZER_NAMES: &str = "name";

#[derive(Debug, Default)]
pub struct ConfigurationBuilder {
    authorizers: AuthorizerRegistry,
    integrations: Integrations,
    inputs: InputSelection,
    output_folder: Option<PathBuf>,
}

impl ConfigurationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split and apply one raw argument token; errors carry the token text.
    pub fn consume_token(&mut self, token: &str) -> Result<()> {
        parse_token(token)
            .and_then(|assignment| self.apply(&assignment))
            .map_err(|err| err.in_argument(token))
    }

    pub fn apply(&mut self, assignment: &Assignment) -> Result<()> {
        let Assignment { area, key, value } = assignment;
        tracing::debug!(area = area.prefix(), key = %key, "applying assignment");
        match area {
            Area::Authorizer => self.apply_authorizer(key, value),
            Area::Tag => {
                if key.is_empty() {
                    return Err(Error::unexpected());
                }
                let tags = &mut self.integrations.tags;
                add_integration(tags, key, value, &self.authorizers)
            }
            Area::Path => {
                let route = format!("/{}", key.replace('.', "/"));
                let paths = &mut self.integrations.paths;
                add_integration(paths, &route, value, &self.authorizers)
            }
            Area::Filename => {
                no_key(key)?;
                self.inputs.filenames.push(value.clone());
                Ok(())
            }
            Area::Glob => {
                no_key(key)?;
                self.inputs.globs.push(value.clone());
                Ok(())
            }
            Area::OutputFolder => {
                no_key(key)?;
                if self.output_folder.is_some() {
                    return Err(Error::already_specified());
                }
                self.output_folder = Some(PathBuf::from(value));
                Ok(())
            }
            // Expanded before reaching the builder.
            Area::Configuration => Err(Error::unexpected()),
        }
    }

    /// Validate what was consumed and produce the final configuration.
    pub fn finish(self) -> Result<Configuration> {
        if self.inputs.is_empty() {
            return Err(Error::config(format!(
                "Missing {} or {}",
                Area::Filename.prefix(),
                Area::Glob.prefix()
            )));
        }
        self.authorizers.validate_complete()?;
        Ok(Configuration {
            authorizers: self.authorizers,
            integrations: self.integrations,
            inputs: self.inputs,
            output_folder: self.output_folder,
        })
    }

    fn apply_authorizer(&mut self, key: &str, value: &str) -> Result<()> {
        if key == AUTHORIZER_NAMES {
            return self.authorizers.define(parse_list(value)?);
        }
        // `field` addresses the template, `field.NAME` a declared authorizer.
        let (field, name) = match AuthorizerField::from_key(key) {
            Some(field) => (field, ""),
            None => {
                let (field, name) = key.rsplit_once('.').ok_or_else(Error::unexpected)?;
                let field = AuthorizerField::from_key(field.trim()).ok_or_else(Error::unexpected)?;
                (field, name.trim())
            }
        };
        let value = match field {
            AuthorizerField::Audience => FieldValue::List(parse_list(value)?),
            _ => FieldValue::Text(value.to_string()),
        };
        self.authorizers.set_field(name, field, value)
    }
}

fn add_integration(
    registry: &mut IntegrationRegistry,
    key: &str,
    value: &str,
    authorizers: &AuthorizerRegistry,
) -> Result<()> {
    let mut parts = parse_list(value)?.into_iter();
    let uri = parts.next().ok_or_else(|| invalid_value(value))?;
    let binding = parts.next().map(|name| AuthorizerBinding { name, scopes: parts.collect() });
    registry.add(key, &uri, binding, authorizers)
}

fn no_key(key: &str) -> Result<()> {
    if key.is_empty() {
        Ok(())
    } else {
        Err(Error::unexpected())
    }
}

/// Split a comma-separated value into trimmed, non-blank elements.
pub fn parse_list(value: &str) -> Result<Vec<String>> {
    let list: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.to_string())
        .collect();
    if list.is_empty() {
        return Err(invalid_value(value));
    }
    Ok(list)
}

fn invalid_value(value: &str) -> Error {
    Error::config(format!("invalid value: {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(tokens: &[&str]) -> Result<Configuration> {
        Configuration::from_tokens(tokens.iter().copied().chain(["filename=api.yaml"]))
    }

    const COMPLETE_DEFAULT: [&str; 4] = [
        "authorizer.name=A",
        "authorizer.identity-source=$request.header.x",
        "authorizer.issuer=https://example",
        "authorizer.audience=aud1, aud2",
    ];

    #[test]
    fn parse_list_trims_and_drops_blanks() {
        assert_eq!(parse_list(" a, ,b ,,").unwrap(), vec!["a", "b"]);
        assert_eq!(parse_list(" , ").unwrap_err().to_string(), "invalid value:  , ");
    }

    #[test]
    fn path_keys_become_routes() {
        let config = build(&["path.users.{id}=https://backend/users"]).unwrap();
        let target = config.integrations.paths.get("/users/{id}").expect("route");
        assert_eq!(target.uri_for("/users/{id}"), "https://backend/users");
        assert!(target.authorizer().is_none());
    }

    #[test]
    fn tag_spec_carries_authorizer_and_scopes() {
        let mut tokens = COMPLETE_DEFAULT.to_vec();
        tokens.push("--tag.Orders=https://backend/, A, read, write");
        let config = build(&tokens).unwrap();

        let target = config.integrations.tags.get("orders").expect("tag");
        assert_eq!(target.uri_for("/orders/1"), "https://backend/orders/1");
        let binding = target.authorizer().expect("binding");
        assert_eq!(binding.name, "A");
        assert_eq!(binding.scopes, vec!["read", "write"]);
    }

    #[test]
    fn authorizer_without_scopes_has_empty_scope_list() {
        let mut tokens = COMPLETE_DEFAULT.to_vec();
        tokens.push("tag.x=https://x,A");
        let config = build(&tokens).unwrap();
        let binding = config.integrations.tags.get("x").and_then(|t| t.authorizer()).unwrap();
        assert!(binding.scopes.is_empty());
    }

    #[test]
    fn named_fields_override_template() {
        let mut tokens = COMPLETE_DEFAULT.to_vec();
        tokens.push("authorizer.issuer.A=https://specific");
        let config = build(&tokens).unwrap();
        let exported = config.public_authorizers().unwrap();
        assert_eq!(exported[0].issuer, "https://specific");
        assert_eq!(exported[0].audience, vec!["aud1", "aud2"]);
    }

    #[test]
    fn duplicated_field_reports_token() {
        let mut tokens = COMPLETE_DEFAULT.to_vec();
        tokens.push("authorizer.issuer=https://example");
        let err = build(&tokens).unwrap_err();
        assert_eq!(err.to_string(), "authorizer.issuer=https://example : already specified");
    }

    #[test]
    fn unknown_authorizer_reference_is_rejected() {
        let mut tokens = COMPLETE_DEFAULT.to_vec();
        tokens.push("path.a=https://a,B");
        let err = build(&tokens).unwrap_err();
        assert_eq!(err.to_string(), "path.a=https://a,B : B is not a provided authorizer name");
    }

    #[test]
    fn authorizer_reference_requires_declared_set() {
        assert!(build(&["tag.x=https://x,A"]).is_err());
    }

    #[test]
    fn missing_authorizer_field_is_fatal() {
        let err = build(&COMPLETE_DEFAULT[..3]).unwrap_err();
        assert_eq!(err.to_string(), "Missing authorizer.audience or authorizer.audience.A");
    }

    #[test]
    fn unknown_authorizer_field_is_unexpected() {
        let mut tokens = COMPLETE_DEFAULT.to_vec();
        tokens.push("authorizer.colour.A=blue");
        let err = build(&tokens).unwrap_err();
        assert_eq!(err.to_string(), "authorizer.colour.A=blue : unexpected");
    }

    #[test]
    fn inputs_and_output_folder() {
        let config = Configuration::from_tokens([
            "glob=specs/*.yaml",
            "filename=a.yaml",
            "output-folder=out",
        ])
        .unwrap();
        assert_eq!(config.inputs.globs, vec!["specs/*.yaml"]);
        assert_eq!(config.inputs.filenames, vec!["a.yaml"]);
        assert_eq!(config.output_folder, Some(PathBuf::from("out")));

        let err =
            Configuration::from_tokens(["glob=*.yaml", "output-folder=a", "output-folder=b"])
                .unwrap_err();
        assert_eq!(err.to_string(), "output-folder=b : already specified");
        assert!(Configuration::from_tokens(["filename.x=a.yaml"]).is_err());
    }

    #[test]
    fn input_selection_is_required() {
        let err = Configuration::from_tokens(["tag.x=https://x"]).unwrap_err();
        assert_eq!(err.to_string(), "Missing filename or glob");
    }

    #[test]
    fn duplicated_tag_is_rejected_case_insensitively() {
        let err = build(&["tag.Users=https://a", "tag.users=https://b"]).unwrap_err();
        assert_eq!(err.to_string(), "tag.users=https://b : already specified");
    }
}
