//! Probability model types.
//!
//! The model is an immutable value handed to the inference engine. It is
//! never read from ambient global state.

use hd_common::GeneCount;
use serde::{Deserialize, Serialize};

use crate::validate::{validate_model, ValidationError, ValidationResult};

/// Complete probability model for trio inheritance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityModel {
    pub schema_version: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Unconditional gene-count distribution for founders.
    pub gene: GeneTable,

    /// P(trait = true | gene count).
    pub trait_given_gene: GeneTable,

    /// Probability that an allele flips during transmission.
    pub mutation_rate: f64,
}

/// One value per gene count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneTable {
    pub zero: f64,
    pub one: f64,
    pub two: f64,

    #[serde(rename = "_comment", default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl GeneTable {
    pub fn new(zero: f64, one: f64, two: f64) -> Self {
        Self {
            zero,
            one,
            two,
            comment: None,
        }
    }

    pub fn get(&self, gene: GeneCount) -> f64 {
        match gene {
            GeneCount::Zero => self.zero,
            GeneCount::One => self.one,
            GeneCount::Two => self.two,
        }
    }

    pub fn sum(&self) -> f64 {
        self.zero + self.one + self.two
    }

    /// Values paired with the gene count they belong to.
    pub fn entries(&self) -> [(GeneCount, f64); 3] {
        [
            (GeneCount::Zero, self.zero),
            (GeneCount::One, self.one),
            (GeneCount::Two, self.two),
        ]
    }
}

impl ProbabilityModel {
    /// Load a model from a JSON file.
    pub fn from_file(path: &std::path::Path) -> ValidationResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::parse_json(&content)
    }

    /// Parse a model from a JSON string. Does not validate.
    pub fn parse_json(json: &str) -> ValidationResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| ValidationError::ParseError(format!("Invalid JSON: {}", e)))
    }

    /// Check that every value is a probability and the prior is a distribution.
    pub fn validate(&self) -> ValidationResult {
        validate_model(self)
    }

    /// Founder prior P(gene = g).
    pub fn gene_prior(&self, gene: GeneCount) -> f64 {
        self.gene.get(gene)
    }

    /// Emission probability P(trait = expressed | gene = g).
    pub fn trait_probability(&self, gene: GeneCount, expressed: bool) -> f64 {
        let p_true = self.trait_given_gene.get(gene);
        if expressed {
            p_true
        } else {
            1.0 - p_true
        }
    }
}

/// Embedded default model JSON for fallback.
const DEFAULT_MODEL_JSON: &str = include_str!("schemas/model.default.json");

impl Default for ProbabilityModel {
    fn default() -> Self {
        // The embedded file is checked by `default_model_is_valid` below.
        Self::parse_json(DEFAULT_MODEL_JSON).expect("Embedded default model JSON is invalid")
    }
}
