//! Heredity common types, IDs, and errors.
//!
//! This crate provides foundational types shared across the heredity crates:
//! - Person identity and gene-count types
//! - Report schema versioning
//! - The unified error type
//! - Output format selection

pub mod error;
pub mod gene;
pub mod id;
pub mod output;
pub mod schema;

pub use error::{Error, Result};
pub use gene::GeneCount;
pub use id::PersonId;
pub use output::OutputFormat;
pub use schema::SCHEMA_VERSION;
