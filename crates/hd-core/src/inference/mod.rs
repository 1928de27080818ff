//! Inference engine modules.

pub mod belief;
pub mod engine;
pub mod hypothesis;
pub mod joint;

pub use belief::{BeliefState, GeneDistribution, PersonBelief, PersonPosterior, TraitDistribution};
pub use engine::{
    infer, is_consistent_with_evidence, EngineConfig, EnumerationStats, HypothesisSpace,
    InferenceEngine, InferenceOutcome, DEFAULT_MAX_PEOPLE,
};
pub use hypothesis::{Hypothesis, PersonSet};
pub use joint::{inherited_gene_probability, joint_probability, transmission_probability};
