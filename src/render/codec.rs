//! YAML load and dump
//!
//! `serde_yaml` keeps mapping order and always emits block style, so a
//! rewritten document stays close to its source and reviewable in a diff.

use crate::error::{Error, Result};
use serde_yaml::Value;
use std::fs;
use std::path::Path;

pub fn parse_document(content: &str) -> Result<Value> {
    serde_yaml::from_str(content).map_err(|source| Error::Malformed { source })
}

pub fn load_document(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .map_err(|source| Error::Read { path: path.to_path_buf(), source })?;
    parse_document(&content).map_err(|err| err.in_file(path))
}

pub fn render_document(document: &Value) -> Result<String> {
    serde_yaml::to_string(document).map_err(|source| Error::Render { source })
}

pub fn write_document(path: &Path, document: &Value) -> Result<()> {
    let rendered = render_document(document).map_err(|err| err.in_file(path))?;
    fs::write(path, rendered).map_err(|source| Error::Write { path: path.to_path_buf(), source })
}
