//! openapi4aws: augment OpenAPI 3 documents with AWS API Gateway extensions
//!
//! The pipeline is: argument tokens → [`config::Configuration`] (authorizer
//! and integration registries plus input selection) → [`scan`] resolves the
//! input files → [`document::Augmenter`] rewrites each document →
//! [`render`] writes it back.

pub mod authorizer;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod integration;
pub mod render;
pub mod scan;

pub use config::Configuration;
pub use document::{AugmentStats, Augmenter};
pub use error::{Error, Result};
