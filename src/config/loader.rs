//! Argument token splitting and configuration file loading

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Area prefix of an argument token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Area {
    Authorizer,
    Tag,
    Path,
    Filename,
    Glob,
    OutputFolder,
    Configuration,
}

impl Area {
    const ALL: [Area; 7] = [
        Area::Authorizer,
        Area::Tag,
        Area::Path,
        Area::Filename,
        Area::Glob,
        Area::OutputFolder,
        Area::Configuration,
    ];

    pub fn prefix(self) -> &'static str {
        match self {
            Area::Authorizer => "authorizer.",
            Area::Tag => "tag.",
            Area::Path => "path.",
            Area::Filename => "filename",
            Area::Glob => "glob",
            Area::OutputFolder => "output-folder",
            Area::Configuration => "configuration",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|area| area.prefix() == prefix)
    }
}

/// One `[--]area[key]=value` token, split and trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub area: Area,
    pub key: String,
    pub value: String,
}

static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let areas: Vec<String> = Area::ALL.iter().map(|area| regex::escape(area.prefix())).collect();
    Regex::new(&format!("^(?:--)?({})([^=]*)=(.+)$", areas.join("|"))).expect("valid regex")
});

pub fn parse_token(token: &str) -> Result<Assignment> {
    let captures = TOKEN_PATTERN.captures(token).ok_or_else(Error::unexpected)?;
    let area = Area::from_prefix(&captures[1]).ok_or_else(Error::unexpected)?;
    let key = captures[2].trim().to_string();
    let value = captures[3].trim().to_string();
    if value.is_empty() {
        return Err(Error::unexpected());
    }
    Ok(Assignment { area, key, value })
}

/// Replace every `configuration=<file>` token with the tokens listed in that
/// file, keeping the order in which they appear.
pub fn expand_tokens<I, S>(tokens: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut expanded = Vec::new();
    for token in tokens {
        let token = token.as_ref();
        match parse_token(token) {
            Ok(Assignment { area: Area::Configuration, key, value }) => {
                if !key.is_empty() {
                    return Err(Error::unexpected().in_argument(token));
                }
                let lines = load_configuration_file(Path::new(&value))
                    .map_err(|err| err.in_argument(token))?;
                tracing::debug!(file = %value, tokens = lines.len(), "configuration file loaded");
                expanded.extend(lines);
            }
            _ => expanded.push(token.to_string()),
        }
    }
    Ok(expanded)
}

/// Read the argument tokens listed in a configuration file, one per line.
///
/// Blank lines and lines starting with `#` are ignored. Configuration files
/// cannot include further configuration files.
pub fn load_configuration_file(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .map_err(|source| Error::Read { path: path.to_path_buf(), source })?;
    let mut tokens = Vec::new();
    for line in content.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if matches!(parse_token(line), Ok(Assignment { area: Area::Configuration, .. })) {
            return Err(Error::config(format!("nested configuration not supported: {line}")));
        }
        tokens.push(line.to_string());
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn splits_area_key_and_value() {
        let assignment = parse_token("--path.users.{id}= https://backend ,A ").expect("token");
        assert_eq!(assignment.area, Area::Path);
        assert_eq!(assignment.key, "users.{id}");
        assert_eq!(assignment.value, "https://backend ,A");

        let assignment = parse_token("filename=api.yaml").expect("token");
        assert_eq!(assignment.area, Area::Filename);
        assert_eq!(assignment.key, "");
    }

    #[test]
    fn value_may_contain_equals_signs() {
        let assignment = parse_token("tag.x=https://h/?a=b").expect("token");
        assert_eq!(assignment.key, "x");
        assert_eq!(assignment.value, "https://h/?a=b");
    }

    #[test]
    fn rejects_unknown_areas_and_blank_values() {
        assert!(parse_token("tags.x=y").is_err());
        assert!(parse_token("authorizer=y").is_err());
        assert!(parse_token("tag.x=   ").is_err());
        assert!(parse_token("glob").is_err());
    }

    #[test]
    fn configuration_file_is_spliced_in_place() {
        let tmp = TempDir::new().expect("tmp");
        let file = tmp.path().join("args.conf");
        fs::write(&file, "# authorizers\n\n  authorizer.name=A  \ntag.x=https://x\n").expect("write");

        let configuration = format!("configuration={}", file.display());
        let tokens = expand_tokens(["glob=*.yaml", configuration.as_str(), "path.a=https://a"])
            .expect("expand");
        assert_eq!(
            tokens,
            vec!["glob=*.yaml", "authorizer.name=A", "tag.x=https://x", "path.a=https://a"]
        );
    }

    #[test]
    fn nested_configuration_is_rejected() {
        let tmp = TempDir::new().expect("tmp");
        let file = tmp.path().join("args.conf");
        fs::write(&file, "configuration=other.conf\n").expect("write");
        assert!(load_configuration_file(&file).is_err());
    }

    #[test]
    fn missing_configuration_file_reports_token() {
        let err = expand_tokens(["configuration=/definitely/missing.conf"]).unwrap_err();
        assert!(err.to_string().starts_with("configuration=/definitely/missing.conf : IOError reading"));
    }
}
