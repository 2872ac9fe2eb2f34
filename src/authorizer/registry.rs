//! Named authorizers chained to a shared default template

use super::{AuthorizerDefinition, AuthorizerField, FieldValue};
use crate::error::{Error, Result};

/// An authorizer with every field resolved, ready to be written as a
/// security scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAuthorizer {
    pub name: String,
    pub identity_source: String,
    pub issuer: String,
    pub audience: Vec<String>,
}

/// Registry of authorizers, in the order their names were declared.
///
/// The empty name addresses the default template.
#[derive(Debug, Default)]
pub struct AuthorizerRegistry {
    template: Option<AuthorizerDefinition>,
    named: Vec<(String, AuthorizerDefinition)>,
}

impl AuthorizerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the default template plus one authorizer per name.
    ///
    /// The authorizer set can only be defined once.
    pub fn define<I, S>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.template.is_some() {
            return Err(Error::already_specified());
        }
        let mut named: Vec<(String, AuthorizerDefinition)> = Vec::new();
        for name in names {
            let name = name.into();
            if name.is_empty() || named.iter().any(|(existing, _)| *existing == name) {
                return Err(Error::config(format!("invalid authorizer name: '{name}'")));
            }
            named.push((name, AuthorizerDefinition::new()));
        }
        tracing::debug!(count = named.len(), "authorizer set defined");
        self.template = Some(AuthorizerDefinition::new());
        self.named = named;
        Ok(())
    }

    pub fn is_defined(&self) -> bool {
        self.template.is_some()
    }

    /// True if `name` is one of the declared (non-default) authorizers.
    pub fn contains(&self, name: &str) -> bool {
        self.named.iter().any(|(existing, _)| existing == name)
    }

    pub fn set_field(&mut self, name: &str, field: AuthorizerField, value: FieldValue) -> Result<()> {
        let definition = self.entry_mut(name)?;
        definition.set(field, value)
    }

    /// The authorizer's own value, else the template's, else `None`.
    pub fn get_field(&self, name: &str, field: AuthorizerField) -> Option<FieldValue> {
        let template = self.template.as_ref()?;
        if name.is_empty() {
            return template.own(field);
        }
        let (_, definition) = self.named.iter().find(|(existing, _)| existing == name)?;
        definition.own(field).or_else(|| template.own(field))
    }

    /// Fail on the first declared authorizer that cannot resolve a field.
    pub fn validate_complete(&self) -> Result<()> {
        self.export_public().map(|_| ())
    }

    /// Every declared authorizer, resolved, excluding the default template.
    pub fn export_public(&self) -> Result<Vec<ResolvedAuthorizer>> {
        self.named.iter().map(|(name, _)| self.resolve(name)).collect()
    }

    fn resolve(&self, name: &str) -> Result<ResolvedAuthorizer> {
        Ok(ResolvedAuthorizer {
            name: name.to_string(),
            identity_source: self.resolve_text(name, AuthorizerField::IdentitySource)?,
            issuer: self.resolve_text(name, AuthorizerField::Issuer)?,
            audience: self.resolve_list(name, AuthorizerField::Audience)?,
        })
    }

    fn resolve_field(&self, name: &str, field: AuthorizerField) -> Result<FieldValue> {
        self.get_field(name, field).ok_or_else(|| {
            let missing = format!("authorizer.{}", field.key());
            Error::config(format!("Missing {missing} or {missing}.{name}"))
        })
    }

    fn resolve_text(&self, name: &str, field: AuthorizerField) -> Result<String> {
        let value = self.resolve_field(name, field)?;
        value
            .as_text()
            .map(str::to_string)
            .ok_or_else(|| Error::config(format!("invalid value for {}", field.key())))
    }

    fn resolve_list(&self, name: &str, field: AuthorizerField) -> Result<Vec<String>> {
        let value = self.resolve_field(name, field)?;
        value
            .as_list()
            .map(<[String]>::to_vec)
            .ok_or_else(|| Error::config(format!("invalid value for {}", field.key())))
    }

    fn entry_mut(&mut self, name: &str) -> Result<&mut AuthorizerDefinition> {
        let Some(template) = self.template.as_mut() else {
            return Err(Error::config("authorizer.name must be specified first"));
        };
        if name.is_empty() {
            return Ok(template);
        }
        self.named
            .iter_mut()
            .find(|(existing, _)| existing == name)
            .map(|(_, definition)| definition)
            .ok_or_else(|| Error::config(format!("{name} is not a provided authorizer name")))
    }
}
