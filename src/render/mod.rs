//! Output rendering (YAML codec, output placement, the per-file loop)

pub mod codec;
pub mod output;

pub use codec::{load_document, parse_document, render_document, write_document};
pub use output::{augment_files, output_path, RunSummary};
