//! Output placement and the per-file augmentation loop

use super::codec::{load_document, write_document};
use crate::document::Augmenter;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Totals over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files: usize,
    pub operations: usize,
}

/// Where the augmented version of `input` is written: in place, or under
/// `output_folder` with the input's file name.
pub fn output_path(input: &Path, output_folder: Option<&Path>) -> Result<PathBuf> {
    let Some(folder) = output_folder else {
        return Ok(input.to_path_buf());
    };
    let name = input
        .file_name()
        .ok_or_else(|| Error::config(format!("invalid input file: {}", input.display())))?;
    Ok(folder.join(name))
}

/// Load, augment and write back each file in turn.
///
/// The first failure stops the run; files already written stay written.
pub fn augment_files(
    augmenter: &Augmenter<'_>,
    files: &[PathBuf],
    output_folder: Option<&Path>,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();
    for input in files {
        let mut document = load_document(input)?;
        let stats = augmenter.augment(&mut document).map_err(|err| err.in_file(input))?;
        let target = output_path(input, output_folder)?;
        write_document(&target, &document)?;

        tracing::info!(
            input = %input.display(),
            output = %target.display(),
            operations = stats.operations,
            secured = stats.secured_operations,
            "document augmented"
        );
        summary.files += 1;
        summary.operations += stats.operations;
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Configuration;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn output_path_uses_file_name_only() {
        let input = Path::new("specs/v1/api.yaml");
        assert_eq!(output_path(input, None).unwrap(), input);
        assert_eq!(
            output_path(input, Some(Path::new("out"))).unwrap(),
            Path::new("out").join("api.yaml")
        );
        assert!(output_path(Path::new(".."), Some(Path::new("out"))).is_err());
    }

    #[test]
    fn files_are_rewritten_in_place() {
        let tmp = TempDir::new().expect("tmp");
        let input = tmp.path().join("api.yaml");
        fs::write(&input, "openapi: 3.0.0\npaths:\n  /users:\n    get:\n      tags: [users]\n")
            .expect("write");

        let config =
            Configuration::from_tokens(["tag.users=https://backend/", "filename=api.yaml"])
                .expect("configuration");
        let augmenter = Augmenter::from_configuration(&config).expect("augmenter");
        let summary = augment_files(&augmenter, &[input.clone()], None).expect("augment");
        assert_eq!(summary, RunSummary { files: 1, operations: 1 });

        let written = fs::read_to_string(&input).expect("read back");
        assert!(written.starts_with("openapi: 3.0.0\npaths:\n"));
        assert!(written.contains("uri: https://backend/users"));
    }

    #[test]
    fn shape_error_leaves_file_untouched_and_names_it() {
        let tmp = TempDir::new().expect("tmp");
        let input = tmp.path().join("api.yaml");
        let original = "paths:\n  /users:\n    get:\n      tags: not-a-list\n";
        fs::write(&input, original).expect("write");

        let config = Configuration::from_tokens(["tag.users=https://backend", "filename=api.yaml"])
            .expect("configuration");
        let augmenter = Augmenter::from_configuration(&config).expect("augmenter");
        let err = augment_files(&augmenter, &[input.clone()], None).unwrap_err();

        assert!(err.to_string().ends_with(": unexpected openapi type on paths:/users:get"));
        assert!(err.to_string().contains("api.yaml"));
        assert_eq!(fs::read_to_string(&input).expect("read back"), original);
    }
}
