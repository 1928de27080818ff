//! Joint probability of a full hypothesis.
//!
//! Conditioned on the parents' gene counts, each person's gene count and
//! trait are independent of everyone else, so the joint probability is a
//! product of per-person factors:
//!
//! ```text
//! P(H) = Π_person  P(gene | parents' genes) · P(trait | gene)
//! ```
//!
//! Founders take the model's unconditional gene prior. Children use the
//! closed-form transmission model in [`hd_math::transmission`].

use hd_common::{GeneCount, Result};
use hd_config::ProbabilityModel;
use hd_math::{child_gene_distribution, transmit};

use super::hypothesis::Hypothesis;
use crate::pedigree::{Parents, Pedigree, Person};

/// Probability that `parent_gene` copies are passed on under `model`.
pub fn transmission_probability(model: &ProbabilityModel, parent_gene: GeneCount) -> f64 {
    transmit(parent_gene.copies(), model.mutation_rate)
}

/// P(child gene = `gene` | mother and father gene counts).
pub fn inherited_gene_probability(
    model: &ProbabilityModel,
    mother: GeneCount,
    father: GeneCount,
    gene: GeneCount,
) -> f64 {
    let from_mother = transmission_probability(model, mother);
    let from_father = transmission_probability(model, father);
    child_gene_distribution(from_mother, from_father)[gene.index()]
}

fn gene_factor(
    model: &ProbabilityModel,
    hypothesis: &Hypothesis,
    person: &Person,
    gene: GeneCount,
) -> Result<f64> {
    match person.parents {
        None => Ok(model.gene_prior(gene)),
        Some(Parents { mother, father }) => {
            let mother = hypothesis.gene_count(mother)?;
            let father = hypothesis.gene_count(father)?;
            Ok(inherited_gene_probability(model, mother, father, gene))
        }
    }
}

/// Probability that every person matches `hypothesis` exactly.
///
/// Fails with an invariant violation when the hypothesis names people
/// outside the pedigree or puts someone in both gene sets.
pub fn joint_probability(
    pedigree: &Pedigree,
    model: &ProbabilityModel,
    hypothesis: &Hypothesis,
) -> Result<f64> {
    hypothesis.check_bounds(pedigree.len())?;

    let mut probability = 1.0;
    for (idx, person) in pedigree.iter() {
        let gene = hypothesis.gene_count(idx)?;
        let expressed = hypothesis.has_trait(idx);
        probability *=
            gene_factor(model, hypothesis, person, gene)? * model.trait_probability(gene, expressed);
    }
    Ok(probability)
}
