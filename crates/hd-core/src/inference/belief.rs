//! Belief accumulation and normalization.

use hd_common::{Error, GeneCount, PersonId, Result};
use hd_math::normalize_in_place;
use serde::{Deserialize, Serialize};

use super::hypothesis::Hypothesis;
use crate::pedigree::{Pedigree, PersonIndex};

/// Unnormalized weights for one person.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PersonBelief {
    /// Indexed by [`GeneCount::index`].
    pub gene: [f64; 3],
    /// Index 0 is "no trait", index 1 is "trait".
    pub traits: [f64; 2],
}

impl PersonBelief {
    pub fn gene_weight(&self, gene: GeneCount) -> f64 {
        self.gene[gene.index()]
    }

    pub fn trait_weight(&self, expressed: bool) -> f64 {
        self.traits[usize::from(expressed)]
    }
}

/// Running per-person weights for one inference run.
#[derive(Debug, Clone, PartialEq)]
pub struct BeliefState {
    beliefs: Vec<PersonBelief>,
}

impl BeliefState {
    /// Zeroed state for `people` persons.
    pub fn new(people: usize) -> Self {
        Self {
            beliefs: vec![PersonBelief::default(); people],
        }
    }

    pub fn len(&self) -> usize {
        self.beliefs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beliefs.is_empty()
    }

    pub fn get(&self, person: PersonIndex) -> Option<&PersonBelief> {
        self.beliefs.get(person.0)
    }

    /// Add `probability` to every person's bucket under `hypothesis`.
    pub fn accumulate(&mut self, hypothesis: &Hypothesis, probability: f64) -> Result<()> {
        for (i, belief) in self.beliefs.iter_mut().enumerate() {
            let person = PersonIndex(i);
            let gene = hypothesis.gene_count(person)?;
            belief.gene[gene.index()] += probability;
            belief.traits[usize::from(hypothesis.has_trait(person))] += probability;
        }
        Ok(())
    }

    /// Elementwise sum of two partial states.
    pub fn merge(mut self, other: BeliefState) -> Result<Self> {
        if self.beliefs.len() != other.beliefs.len() {
            return Err(Error::invariant(format!(
                "cannot merge belief states of {} and {} people",
                self.beliefs.len(),
                other.beliefs.len()
            )));
        }
        for (mine, theirs) in self.beliefs.iter_mut().zip(other.beliefs) {
            for (a, b) in mine.gene.iter_mut().zip(theirs.gene) {
                *a += b;
            }
            for (a, b) in mine.traits.iter_mut().zip(theirs.traits) {
                *a += b;
            }
        }
        Ok(self)
    }

    /// Rescale every distribution to sum to one.
    ///
    /// A distribution with zero total means the enumeration never reached
    /// this person, which is reported as an invariant violation.
    pub fn normalize(self, pedigree: &Pedigree) -> Result<Vec<PersonPosterior>> {
        if self.beliefs.len() != pedigree.len() {
            return Err(Error::invariant(format!(
                "belief state covers {} people but pedigree has {}",
                self.beliefs.len(),
                pedigree.len()
            )));
        }

        self.beliefs
            .into_iter()
            .zip(pedigree.people())
            .map(|(mut belief, person)| -> Result<PersonPosterior> {
                normalize_in_place(&mut belief.gene).ok_or_else(|| {
                    Error::invariant(format!("gene distribution for {} has no mass", person.id))
                })?;
                normalize_in_place(&mut belief.traits).ok_or_else(|| {
                    Error::invariant(format!("trait distribution for {} has no mass", person.id))
                })?;
                Ok(PersonPosterior {
                    name: person.id.clone(),
                    gene: GeneDistribution::from_weights(belief.gene),
                    traits: TraitDistribution::from_weights(belief.traits),
                })
            })
            .collect()
    }
}

/// Posterior over gene counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneDistribution {
    #[serde(rename = "2")]
    pub two: f64,
    #[serde(rename = "1")]
    pub one: f64,
    #[serde(rename = "0")]
    pub zero: f64,
}

impl GeneDistribution {
    fn from_weights(w: [f64; 3]) -> Self {
        Self {
            zero: w[0],
            one: w[1],
            two: w[2],
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
}

/// Posterior over trait expression.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraitDistribution {
    #[serde(rename = "true")]
    pub expressed: f64,
    #[serde(rename = "false")]
    pub absent: f64,
}

impl TraitDistribution {
    fn from_weights(w: [f64; 2]) -> Self {
        Self {
            absent: w[0],
            expressed: w[1],
        }
    }

    pub fn get(&self, expressed: bool) -> f64 {
        if expressed {
            self.expressed
        } else {
            self.absent
        }
    }

    pub fn sum(&self) -> f64 {
        self.expressed + self.absent
    }
}

/// Final beliefs for one person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonPosterior {
    pub name: PersonId,
    pub gene: GeneDistribution,
    #[serde(rename = "trait")]
    pub traits: TraitDistribution,
}
