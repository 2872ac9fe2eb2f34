//! JWT authorizer definitions
//!
//! Authorizers are declared by name on the command line and share an unnamed
//! default template: any field left unset on a named authorizer is read from
//! the template when the registry resolves it.

pub mod registry;

pub use registry::{AuthorizerRegistry, ResolvedAuthorizer};

use crate::error::{Error, Result};

/// Security scheme type written for every authorizer.
pub const AUTHORIZATION_TYPE: &str = "oauth2";
/// API Gateway authorizer type written for every authorizer.
pub const AUTHORIZER_TYPE: &str = "jwt";

/// A configurable authorizer field, addressed by its argument key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizerField {
    IdentitySource,
    Issuer,
    Audience,
    AuthorizationType,
    AuthorizerType,
}

impl AuthorizerField {
    pub const ALL: [AuthorizerField; 5] = [
        AuthorizerField::IdentitySource,
        AuthorizerField::Issuer,
        AuthorizerField::Audience,
        AuthorizerField::AuthorizationType,
        AuthorizerField::AuthorizerType,
    ];

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "identity-source" => Some(Self::IdentitySource),
            "issuer" => Some(Self::Issuer),
            "audience" => Some(Self::Audience),
            "authorization-type" => Some(Self::AuthorizationType),
            "authorizer-type" => Some(Self::AuthorizerType),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::IdentitySource => "identity-source",
            Self::Issuer => "issuer",
            Self::Audience => "audience",
            Self::AuthorizationType => "authorization-type",
            Self::AuthorizerType => "authorizer-type",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(list) => Some(list),
            Self::Text(_) => None,
        }
    }
}

/// The fields explicitly assigned to one authorizer (or to the template).
///
/// Each field can be assigned once; inheritance is resolved by the registry.
#[derive(Debug, Clone, Default)]
pub struct AuthorizerDefinition {
    identity_source: Option<String>,
    issuer: Option<String>,
    audience: Option<Vec<String>>,
    authorization_type: Option<String>,
    authorizer_type: Option<String>,
}

impl AuthorizerDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// The value set on this definition only, ignoring any template.
    pub fn own(&self, field: AuthorizerField) -> Option<FieldValue> {
        match field {
            AuthorizerField::IdentitySource => self.identity_source.clone().map(FieldValue::Text),
            AuthorizerField::Issuer => self.issuer.clone().map(FieldValue::Text),
            AuthorizerField::Audience => self.audience.clone().map(FieldValue::List),
            AuthorizerField::AuthorizationType => {
                self.authorization_type.clone().map(FieldValue::Text)
            }
            AuthorizerField::AuthorizerType => self.authorizer_type.clone().map(FieldValue::Text),
        }
    }

    pub fn set(&mut self, field: AuthorizerField, value: FieldValue) -> Result<()> {
        match (field, value) {
            (AuthorizerField::Audience, FieldValue::List(list)) => {
                set_once(&mut self.audience, list)
            }
            (AuthorizerField::IdentitySource, FieldValue::Text(text)) => {
                set_once(&mut self.identity_source, text)
            }
            (AuthorizerField::Issuer, FieldValue::Text(text)) => set_once(&mut self.issuer, text),
            (AuthorizerField::AuthorizationType, FieldValue::Text(text)) => {
                set_once(&mut self.authorization_type, text)
            }
            (AuthorizerField::AuthorizerType, FieldValue::Text(text)) => {
                set_once(&mut self.authorizer_type, text)
            }
            (field, _) => Err(Error::config(format!("invalid value for {}", field.key()))),
        }
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T) -> Result<()> {
    if slot.is_some() {
        return Err(Error::already_specified());
    }
    *slot = Some(value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_keys_round_trip_through_lookup() {
        for field in AuthorizerField::ALL {
            assert_eq!(AuthorizerField::from_key(field.key()), Some(field));
        }
        assert_eq!(AuthorizerField::from_key("name"), None);
    }

    #[test]
    fn set_rejects_second_assignment_even_with_same_value() {
        let mut def = AuthorizerDefinition::new();
        def.set(AuthorizerField::Issuer, FieldValue::Text("https://a".into())).expect("first");
        let err = def
            .set(AuthorizerField::Issuer, FieldValue::Text("https://a".into()))
            .expect_err("second assignment must fail");
        assert_eq!(err.to_string(), "already specified");
    }

    #[test]
    fn audience_requires_a_list() {
        let mut def = AuthorizerDefinition::new();
        assert!(def.set(AuthorizerField::Audience, FieldValue::Text("aud".into())).is_err());
        def.set(AuthorizerField::Audience, FieldValue::List(vec!["aud".into()])).expect("list");
        assert_eq!(
            def.own(AuthorizerField::Audience),
            Some(FieldValue::List(vec!["aud".to_string()]))
        );
    }
}
