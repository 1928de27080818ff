//! Semantic validation for probability models.

use hd_common::schema::{is_compatible, major_version};
use hd_common::SCHEMA_VERSION;
use thiserror::Error;

use crate::model::{GeneTable, ProbabilityModel};

/// Tolerance for the gene prior summing to one.
pub const PRIOR_SUM_TOLERANCE: f64 = 1e-9;

/// Validation errors for model files.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("parse error: {0}")]
    ParseError(String),

    #[error("unsupported schema version {found:?} (expected major version {expected})")]
    SchemaVersion { found: String, expected: u32 },

    #[error("{field} = {value} is not a probability in [0, 1]")]
    OutOfRange { field: String, value: f64 },

    #[error("gene prior sums to {sum}, expected 1")]
    PriorSum { sum: f64 },
}

pub type ValidationResult<T = ()> = std::result::Result<T, ValidationError>;

impl From<ValidationError> for hd_common::Error {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::IoError(msg) => hd_common::Error::Config(msg),
            other => hd_common::Error::InvalidModel(other.to_string()),
        }
    }
}

fn check_probability(field: &str, value: f64) -> ValidationResult {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field: field.to_string(),
            value,
        })
    }
}

fn check_table(prefix: &str, table: &GeneTable) -> ValidationResult {
    for (gene, value) in table.entries() {
        check_probability(&format!("{prefix}[{gene}]"), value)?;
    }
    Ok(())
}

/// Validate a parsed model.
pub fn validate_model(model: &ProbabilityModel) -> ValidationResult {
    if !is_compatible(&model.schema_version) {
        return Err(ValidationError::SchemaVersion {
            found: model.schema_version.clone(),
            expected: major_version(SCHEMA_VERSION).unwrap_or(1),
        });
    }

    check_table("gene", &model.gene)?;
    check_table("trait_given_gene", &model.trait_given_gene)?;
    check_probability("mutation_rate", model.mutation_rate)?;

    let sum = model.gene.sum();
    if (sum - 1.0).abs() > PRIOR_SUM_TOLERANCE {
        return Err(ValidationError::PriorSum { sum });
    }
    Ok(())
}
