//! Heredity core: exact pedigree inference.
//!
//! Given a family tree with partially observed traits, computes for every
//! person the posterior distribution over gene-copy count and trait
//! expression by summing over every consistent hypothesis.

pub mod exit_codes;
pub mod inference;
pub mod logging;
pub mod output;
pub mod pedigree;

pub use hd_common as common;
pub use hd_config as config;

pub use exit_codes::ExitCode;
pub use inference::{infer, EngineConfig, InferenceOutcome};
pub use pedigree::{load_csv, Pedigree, Person, PersonIndex, PersonRecord};
