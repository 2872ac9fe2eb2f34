//! Located accessors over the untyped YAML tree
//!
//! Each accessor returns the typed view it was asked for or an error naming
//! the document location (`paths:/users:get`) where the shape was wrong.

use crate::error::{Error, Result};
use serde_yaml::{Mapping, Value};

/// The mapping stored under `key`, inserting an empty one if the key is
/// absent or null. All of its keys must be strings.
pub fn child_mapping<'a>(
    parent: &'a mut Mapping,
    key: &str,
    location: &str,
) -> Result<&'a mut Mapping> {
    let slot = parent.entry(Value::from(key)).or_insert(Value::Null);
    if slot.is_null() {
        *slot = Value::Mapping(Mapping::new());
    }
    let mapping = slot.as_mapping_mut().ok_or_else(|| Error::shape(location))?;
    for child_key in mapping.keys() {
        key_str(child_key, location)?;
    }
    Ok(mapping)
}

/// `key` as a string, or a located error describing the offending key.
pub fn key_str<'a>(key: &'a Value, location: &str) -> Result<&'a str> {
    key.as_str().ok_or_else(|| non_string(key, location))
}

/// A list of strings; a missing or null value is an empty list.
pub fn string_list(value: Option<&Value>, location: &str) -> Result<Vec<String>> {
    let items = match value {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Sequence(items)) => items,
        Some(_) => return Err(Error::shape(location)),
    };
    items
        .iter()
        .map(|item| item.as_str().map(str::to_string).ok_or_else(|| non_string(item, location)))
        .collect()
}

fn non_string(entry: &Value, location: &str) -> Error {
    Error::NonStringEntry { location: location.to_string(), entry: describe(entry) }
}

/// Short human-readable rendering of a value for error messages.
pub fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        Value::Sequence(_) => "<sequence>".to_string(),
        Value::Mapping(_) => "<mapping>".to_string(),
        Value::Tagged(tagged) => tagged.tag.to_string(),
    }
}
