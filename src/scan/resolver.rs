//! Resolves the configured filenames and globs to a set of files

use crate::config::InputSelection;
use crate::error::{Error, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Resolve `selection` relative to `base`.
///
/// Literal filenames are kept whether or not they exist (reading them later
/// reports the problem). Globs are matched against every file below `base`;
/// a glob matching nothing is not an error and unreadable entries are
/// skipped. The result is deduplicated and sorted.
pub fn resolve_inputs(base: &Path, selection: &InputSelection) -> Result<Vec<PathBuf>> {
    let mut found: BTreeSet<PathBuf> =
        selection.filenames.iter().map(|name| located(base, Path::new(name))).collect();

    if let Some(matcher) = build_globset(&selection.globs)? {
        for entry in WalkDir::new(base).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!("skipping unreadable entry: {err}");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(base) else {
                continue;
            };
            if matcher.is_match(slash_path(relative)) {
                found.insert(located(base, relative));
            }
        }
    }

    tracing::debug!(files = found.len(), "inputs resolved");
    Ok(found.into_iter().collect())
}

fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|err| Error::config(format!("invalid glob {pattern}: {err}")))?;
        builder.add(glob);
    }
    let set = builder.build().map_err(|err| Error::config(format!("invalid glob: {err}")))?;
    Ok(Some(set))
}

/// Paths under the working directory are reported relative to it.
fn located(base: &Path, relative: &Path) -> PathBuf {
    if base == Path::new(".") {
        relative.to_path_buf()
    } else {
        base.join(relative)
    }
}

fn slash_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
