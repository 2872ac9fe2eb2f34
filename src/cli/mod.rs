//! Command-line interface for openapi4aws
//!
//! Arguments are free-form `[--]area[.key]=value` tokens; only `--verbose`,
//! `--help` and `--version` are handled by clap itself.

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::Configuration;
use crate::document::Augmenter;
use crate::render::{augment_files, RunSummary};
use crate::scan::resolve_inputs;

/// Augment OpenAPI documents with AWS API Gateway integrations and authorizers
#[derive(Parser)]
#[command(name = "openapi4aws")]
#[command(author, version, about, long_about = None)]
#[command(after_help = ARGUMENTS_HELP)]
pub struct Cli {
    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    verbose: bool,

    /// Configuration tokens, e.g. `tag.users=https://backend/,jwt,read`
    #[arg(value_name = "ARGUMENT", allow_hyphen_values = true)]
    arguments: Vec<String>,
}

const ARGUMENTS_HELP: &str = "\
Arguments:
  authorizer.name=N1,N2,...            declare the authorizers
  authorizer.FIELD[.NAME]=VALUE        set a field on one authorizer, or on all by default;
                                       FIELD: identity-source, issuer, audience,
                                       authorization-type, authorizer-type
  tag.TAG=URI[,AUTHORIZER[,SCOPE...]]  integration for operations tagged TAG
  path.SEG1.SEG2=URI[,AUTHORIZER[,SCOPE...]]
                                       integration for the route /SEG1/SEG2
  filename=FILE                        document to augment (repeatable)
  glob=PATTERN                         documents to augment (repeatable)
  output-folder=DIR                    write results to DIR instead of in place
  configuration=FILE                   read further arguments from FILE, one per line";

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    let filter = log_filter(cli.verbose, &rust_log);
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let summary = execute(&cli.arguments, Path::new("."))?;
    println!("augmented {} operation(s) in {} file(s)", summary.operations, summary.files);
    Ok(())
}

/// RUST_LOG directives when given; otherwise WARN, or DEBUG with `--verbose`.
fn log_filter(verbose: bool, rust_log: &str) -> EnvFilter {
    let fallback = if verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    EnvFilter::builder().with_default_directive(fallback.into()).parse_lossy(rust_log)
}

/// Parse `arguments`, resolve the input files under `base` and augment them.
pub fn execute(arguments: &[String], base: &Path) -> Result<RunSummary> {
    let config = Configuration::from_tokens(arguments)?;
    let files = resolve_inputs(base, &config.inputs)?;
    tracing::debug!(
        files = files.len(),
        paths = config.integrations.paths.len(),
        tags = config.integrations.tags.len(),
        "processing inputs"
    );

    let augmenter = Augmenter::from_configuration(&config)?;
    let output_folder = config.output_folder.as_deref();
    Ok(augment_files(&augmenter, &files, output_folder)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_defaults_follow_verbose_flag() {
        assert_eq!(log_filter(false, "").max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(log_filter(true, "").max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn rust_log_overrides_default_level() {
        assert_eq!(log_filter(false, "debug").max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(log_filter(true, "error").max_level_hint(), Some(LevelFilter::ERROR));
    }
}
