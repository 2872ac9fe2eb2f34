//! Input file discovery (literal filenames and glob patterns)

pub mod resolver;

pub use resolver::resolve_inputs;
