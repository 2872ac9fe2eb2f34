//! OpenAPI document augmentation
//!
//! Documents are handled as untyped [`serde_yaml::Value`] trees so that any
//! content the tool does not touch survives a round trip unchanged.

pub mod augment;
pub mod value;

pub use augment::{AugmentStats, Augmenter};
