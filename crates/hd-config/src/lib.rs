//! Heredity configuration loading and validation.
//!
//! This crate provides:
//! - The typed probability model (gene prior, trait emission, mutation rate)
//! - Model resolution (CLI → env → XDG → embedded defaults)
//! - Semantic validation of model files

pub mod model;
pub mod resolve;
pub mod validate;

pub use model::{GeneTable, ProbabilityModel};
pub use resolve::{resolve_config, ConfigPaths, ModelSource, ResolvedModel, MODEL_ENV_VAR};
pub use validate::{ValidationError, ValidationResult};
