//! Exact inference by enumeration.
//!
//! The engine sums joint probabilities over every hypothesis consistent
//! with the observed traits:
//!
//! 1. every `have_trait` subset that agrees with the evidence,
//! 2. every `one_gene` subset of the pedigree,
//! 3. every `two_genes` subset of the people left over,
//!
//! folding each score into a [`BeliefState`] and normalizing at the end.
//! The cost is O(3^n · 2^n) for n people, so pedigrees above
//! [`EngineConfig::max_people`] (and never above [`MAX_ENUMERABLE_PEOPLE`])
//! are refused up front.
//!
//! In parallel mode each rayon worker folds a private zeroed state and the
//! partial states are summed in a final reduction. No state is shared while
//! scoring.

use std::time::{Duration, Instant};

use hd_common::{Error, Result};
use hd_config::ProbabilityModel;
use hd_math::powerset;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::belief::{BeliefState, PersonPosterior};
use super::hypothesis::{Hypothesis, PersonSet};
use super::joint::joint_probability;
use crate::pedigree::{Pedigree, PersonIndex};

/// Default upper bound on pedigree size.
pub const DEFAULT_MAX_PEOPLE: usize = 10;

/// Hard ceiling on pedigree size, whatever the configured limit.
///
/// The gene partitions are materialized up front; 3^16 of them already
/// take several hundred megabytes.
pub const MAX_ENUMERABLE_PEOPLE: usize = 16;

/// Hypotheses scored between deadline checks. The first batch is always
/// scored, so a deadline hit still has mass to normalize.
const DEADLINE_CHECK_INTERVAL: u64 = 256;

/// Engine settings.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Refuse pedigrees with more people than this.
    pub max_people: usize,
    /// Spread trait hypotheses across the rayon thread pool.
    pub parallel: bool,
    /// Stop enumerating once this much time has passed.
    pub deadline: Option<Duration>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_people: DEFAULT_MAX_PEOPLE,
            parallel: false,
            deadline: None,
        }
    }
}

/// Counters describing one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumerationStats {
    pub people: usize,
    pub observed: usize,
    /// All trait subsets, before the evidence filter.
    pub trait_sets_total: u64,
    /// Trait subsets that agree with the evidence.
    pub trait_sets_consistent: u64,
    /// Ways to split the pedigree into zero/one/two-copy groups.
    pub gene_partitions: u64,
    pub hypotheses_scored: u64,
    pub hypotheses_expected: u64,
    /// Sum of joint probabilities over the scored hypotheses.
    pub evidence_likelihood: f64,
    /// False when the deadline stopped enumeration early.
    pub complete: bool,
    pub elapsed_ms: u64,
}

/// Posteriors plus the statistics of the run that produced them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceOutcome {
    pub posteriors: Vec<PersonPosterior>,
    pub stats: EnumerationStats,
}

/// True if `have_trait` agrees with every observed trait.
///
/// People with an unknown trait impose no constraint.
pub fn is_consistent_with_evidence(pedigree: &Pedigree, have_trait: &PersonSet) -> bool {
    pedigree.iter().all(|(idx, person)| {
        person
            .observed_trait
            .map_or(true, |observed| observed == have_trait.contains(idx))
    })
}

/// Materialized hypothesis space for one pedigree.
#[derive(Debug, Clone)]
pub struct HypothesisSpace {
    trait_sets: Vec<PersonSet>,
    trait_sets_total: u64,
    partitions: Vec<(PersonSet, PersonSet)>,
}

impl HypothesisSpace {
    /// Hypotheses whose trait assignment agrees with the evidence.
    pub fn consistent(pedigree: &Pedigree) -> Result<Self> {
        Self::build(pedigree, true)
    }

    /// Every hypothesis, ignoring the evidence.
    pub fn unfiltered(pedigree: &Pedigree) -> Result<Self> {
        Self::build(pedigree, false)
    }

    fn build(pedigree: &Pedigree, apply_evidence: bool) -> Result<Self> {
        let people = pedigree.len();
        let too_large = || Error::PedigreeTooLarge {
            people,
            limit: MAX_ENUMERABLE_PEOPLE,
        };
        if people > MAX_ENUMERABLE_PEOPLE {
            return Err(too_large());
        }

        let everyone: Vec<PersonIndex> = pedigree.indices().collect();
        let subsets = powerset(&everyone).ok_or_else(too_large)?;

        let mut trait_sets = Vec::new();
        for subset in &subsets {
            let have_trait = PersonSet::from_indices(subset)?;
            if !apply_evidence || is_consistent_with_evidence(pedigree, &have_trait) {
                trait_sets.push(have_trait);
            }
        }

        let mut partitions = Vec::new();
        for subset in &subsets {
            let one_gene = PersonSet::from_indices(subset)?;
            let rest: Vec<PersonIndex> = everyone
                .iter()
                .copied()
                .filter(|idx| !one_gene.contains(*idx))
                .collect();
            for two in powerset(&rest).ok_or_else(too_large)? {
                partitions.push((one_gene, PersonSet::from_indices(&two)?));
            }
        }

        Ok(Self {
            trait_sets,
            trait_sets_total: subsets.len() as u64,
            partitions,
        })
    }

    pub fn trait_sets(&self) -> &[PersonSet] {
        &self.trait_sets
    }

    /// `(one_gene, two_genes)` pairs; zero-copy people are implicit.
    pub fn partitions(&self) -> &[(PersonSet, PersonSet)] {
        &self.partitions
    }

    pub fn hypothesis_count(&self) -> u64 {
        (self.trait_sets.len() as u64).saturating_mul(self.partitions.len() as u64)
    }

    pub fn hypotheses(&self) -> impl Iterator<Item = Hypothesis> + '_ {
        self.trait_sets.iter().flat_map(move |have_trait| {
            self.partitions
                .iter()
                .map(move |(one, two)| Hypothesis::new(*one, *two, *have_trait))
        })
    }
}

/// A worker's share of the sum.
struct Partial {
    belief: BeliefState,
    scored: u64,
    likelihood: f64,
    complete: bool,
}

impl Partial {
    fn new(people: usize) -> Self {
        Self {
            belief: BeliefState::new(people),
            scored: 0,
            likelihood: 0.0,
            complete: true,
        }
    }

    fn merge(self, other: Partial) -> Result<Partial> {
        Ok(Partial {
            belief: self.belief.merge(other.belief)?,
            scored: self.scored + other.scored,
            likelihood: self.likelihood + other.likelihood,
            complete: self.complete && other.complete,
        })
    }
}

/// Exact enumeration engine over one pedigree and model.
pub struct InferenceEngine<'a> {
    pedigree: &'a Pedigree,
    model: &'a ProbabilityModel,
    config: EngineConfig,
}

impl<'a> InferenceEngine<'a> {
    pub fn new(pedigree: &'a Pedigree, model: &'a ProbabilityModel, config: EngineConfig) -> Self {
        Self {
            pedigree,
            model,
            config,
        }
    }

    /// Run inference and return normalized posteriors.
    pub fn run(&self) -> Result<InferenceOutcome> {
        let started = Instant::now();
        let people = self.pedigree.len();
        let limit = self.config.max_people.min(MAX_ENUMERABLE_PEOPLE);
        if people > limit {
            return Err(Error::PedigreeTooLarge { people, limit });
        }

        let space = HypothesisSpace::consistent(self.pedigree)?;
        info!(
            people,
            observed = self.pedigree.observed_count(),
            trait_sets = space.trait_sets().len(),
            gene_partitions = space.partitions().len(),
            parallel = self.config.parallel,
            "starting exact inference"
        );
        debug!(
            rejected = space.trait_sets_total - space.trait_sets.len() as u64,
            "trait hypotheses rejected by evidence"
        );

        let deadline = self.config.deadline.map(|d| started + d);
        let partial = if self.config.parallel {
            self.run_parallel(&space, deadline)?
        } else {
            self.run_sequential(&space, deadline)?
        };

        let stats = EnumerationStats {
            people,
            observed: self.pedigree.observed_count(),
            trait_sets_total: space.trait_sets_total,
            trait_sets_consistent: space.trait_sets.len() as u64,
            gene_partitions: space.partitions.len() as u64,
            hypotheses_scored: partial.scored,
            hypotheses_expected: space.hypothesis_count(),
            evidence_likelihood: partial.likelihood,
            complete: partial.complete,
            elapsed_ms: started.elapsed().as_millis() as u64,
        };

        if partial.likelihood <= 0.0 {
            return Err(match self.config.deadline {
                Some(d) if !partial.complete => Error::DeadlineExceeded {
                    deadline_ms: d.as_millis() as u64,
                },
                _ => Error::ImpossibleEvidence,
            });
        }
        if !partial.complete {
            warn!(
                scored = stats.hypotheses_scored,
                expected = stats.hypotheses_expected,
                "deadline reached; posteriors cover a partial hypothesis space"
            );
        }

        let posteriors = partial.belief.normalize(self.pedigree)?;
        info!(
            scored = stats.hypotheses_scored,
            likelihood = stats.evidence_likelihood,
            elapsed_ms = stats.elapsed_ms,
            complete = stats.complete,
            "inference finished"
        );
        Ok(InferenceOutcome { posteriors, stats })
    }

    fn score_trait_set(
        &self,
        acc: &mut Partial,
        partitions: &[(PersonSet, PersonSet)],
        have_trait: PersonSet,
        deadline: Option<Instant>,
    ) -> Result<()> {
        for (one_gene, two_genes) in partitions {
            if acc.scored > 0
                && acc.scored % DEADLINE_CHECK_INTERVAL == 0
                && deadline.is_some_and(|d| Instant::now() >= d)
            {
                acc.complete = false;
                return Ok(());
            }
            let hypothesis = Hypothesis::new(*one_gene, *two_genes, have_trait);
            let p = joint_probability(self.pedigree, self.model, &hypothesis)?;
            acc.belief.accumulate(&hypothesis, p)?;
            acc.scored += 1;
            acc.likelihood += p;
        }
        Ok(())
    }

    fn run_sequential(&self, space: &HypothesisSpace, deadline: Option<Instant>) -> Result<Partial> {
        let mut acc = Partial::new(self.pedigree.len());
        for have_trait in space.trait_sets() {
            self.score_trait_set(&mut acc, space.partitions(), *have_trait, deadline)?;
            if !acc.complete {
                break;
            }
        }
        Ok(acc)
    }

    fn run_parallel(&self, space: &HypothesisSpace, deadline: Option<Instant>) -> Result<Partial> {
        let people = self.pedigree.len();
        space
            .trait_sets()
            .par_iter()
            .try_fold(
                || Partial::new(people),
                |mut acc, have_trait| -> Result<Partial> {
                    if acc.complete {
                        self.score_trait_set(&mut acc, space.partitions(), *have_trait, deadline)?;
                    }
                    Ok(acc)
                },
            )
            .try_reduce(|| Partial::new(people), Partial::merge)
    }
}

/// Run inference with `config`.
pub fn infer(
    pedigree: &Pedigree,
    model: &ProbabilityModel,
    config: &EngineConfig,
) -> Result<InferenceOutcome> {
    InferenceEngine::new(pedigree, model, config.clone()).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pedigree::PersonRecord;
    use hd_common::GeneCount;

    fn trio() -> Pedigree {
        Pedigree::from_records(vec![
            PersonRecord::child("Harry", "Lily", "James", None),
            PersonRecord::founder("James", Some(true)),
            PersonRecord::founder("Lily", Some(false)),
        ])
        .unwrap()
    }

    #[test]
    fn space_sizes() {
        let pedigree = trio();
        let space = HypothesisSpace::consistent(&pedigree).unwrap();
        // Harry is the only unobserved person.
        assert_eq!(space.trait_sets().len(), 2);
        assert_eq!(space.partitions().len(), 27);
        assert_eq!(space.hypothesis_count(), 54);

        let full = HypothesisSpace::unfiltered(&pedigree).unwrap();
        assert_eq!(full.trait_sets().len(), 8);
        assert_eq!(full.hypotheses().count(), 216);
    }

    #[test]
    fn partitions_are_disjoint_and_distinct() {
        let pedigree = trio();
        let space = HypothesisSpace::consistent(&pedigree).unwrap();
        let mut seen = std::collections::HashSet::new();
        for (one, two) in space.partitions() {
            assert!(one.intersection(two).is_empty());
            assert!(seen.insert((*one, *two)));
        }
    }

    #[test]
    fn evidence_filter() {
        let pedigree = trio();
        let james = pedigree.lookup("James").unwrap();
        let harry = pedigree.lookup("Harry").unwrap();
        let mut with_james = PersonSet::empty();
        with_james.insert(james).unwrap();
        assert!(is_consistent_with_evidence(&pedigree, &with_james));
        with_james.insert(harry).unwrap();
        assert!(is_consistent_with_evidence(&pedigree, &with_james));
        assert!(!is_consistent_with_evidence(&pedigree, &PersonSet::empty()));
    }

    #[test]
    fn trio_matches_reference_posteriors() {
        let pedigree = trio();
        let model = ProbabilityModel::default();
        let outcome = infer(&pedigree, &model, &EngineConfig::default()).unwrap();
        let harry = &outcome.posteriors[0];
        assert!((harry.gene.get(GeneCount::Two) - 0.0091831197).abs() < 1e-9);
        assert!((harry.gene.get(GeneCount::One) - 0.4556982701).abs() < 1e-9);
        assert!((harry.gene.get(GeneCount::Zero) - 0.5351186101).abs() < 1e-9);
        assert!((harry.traits.expressed - 0.2665112452).abs() < 1e-9);
        assert!(outcome.stats.complete);
        assert_eq!(outcome.stats.hypotheses_scored, 54);
        assert!((outcome.stats.evidence_likelihood - 0.03181759).abs() < 1e-12);
    }

    #[test]
    fn too_large_is_refused() {
        let records: Vec<PersonRecord> = (0..4)
            .map(|i| PersonRecord::founder(&format!("P{i}"), None))
            .collect();
        let pedigree = Pedigree::from_records(records).unwrap();
        let config = EngineConfig {
            max_people: 3,
            ..EngineConfig::default()
        };
        let err = infer(&pedigree, &ProbabilityModel::default(), &config).unwrap_err();
        assert!(matches!(err, Error::PedigreeTooLarge { people: 4, limit: 3 }));
    }

    fn weasley() -> Pedigree {
        Pedigree::from_records(vec![
            PersonRecord::founder("Arthur", Some(false)),
            PersonRecord::child("Charlie", "Molly", "Arthur", Some(false)),
            PersonRecord::child("Fred", "Molly", "Arthur", Some(true)),
            PersonRecord::child("Ginny", "Molly", "Arthur", None),
            PersonRecord::founder("Molly", None),
            PersonRecord::child("Ron", "Molly", "Arthur", None),
        ])
        .unwrap()
    }

    fn assert_distributions(outcome: &InferenceOutcome) {
        for p in &outcome.posteriors {
            assert!((p.gene.sum() - 1.0).abs() < 1e-9, "{}", p.name);
            assert!((p.traits.sum() - 1.0).abs() < 1e-9, "{}", p.name);
        }
    }

    #[test]
    fn oversized_limit_is_capped() {
        let records: Vec<PersonRecord> = (0..64)
            .map(|i| PersonRecord::founder(&format!("P{i}"), Some(i % 2 == 0)))
            .collect();
        let pedigree = Pedigree::from_records(records).unwrap();
        let config = EngineConfig {
            max_people: 64,
            ..EngineConfig::default()
        };
        let err = infer(&pedigree, &ProbabilityModel::default(), &config).unwrap_err();
        assert!(matches!(
            err,
            Error::PedigreeTooLarge {
                people: 64,
                limit: MAX_ENUMERABLE_PEOPLE
            }
        ));
    }

    #[test]
    fn hypothesis_space_refuses_oversized_pedigree() {
        let records: Vec<PersonRecord> = (0..=MAX_ENUMERABLE_PEOPLE)
            .map(|i| PersonRecord::founder(&format!("P{i}"), None))
            .collect();
        let pedigree = Pedigree::from_records(records).unwrap();
        assert!(matches!(
            HypothesisSpace::unfiltered(&pedigree).unwrap_err(),
            Error::PedigreeTooLarge { .. }
        ));
    }

    #[test]
    fn zero_deadline_returns_partial_posteriors() {
        let pedigree = weasley();
        let config = EngineConfig {
            deadline: Some(Duration::ZERO),
            ..EngineConfig::default()
        };
        let outcome = infer(&pedigree, &ProbabilityModel::default(), &config).unwrap();
        assert!(!outcome.stats.complete);
        assert_eq!(outcome.stats.hypotheses_scored, DEADLINE_CHECK_INTERVAL);
        assert_eq!(outcome.stats.hypotheses_expected, 8 * 729);
        assert_eq!(outcome.posteriors.len(), 6);
        assert_distributions(&outcome);
    }

    #[test]
    fn zero_deadline_parallel_returns_partial_posteriors() {
        let pedigree = weasley();
        let config = EngineConfig {
            parallel: true,
            deadline: Some(Duration::ZERO),
            ..EngineConfig::default()
        };
        let outcome = infer(&pedigree, &ProbabilityModel::default(), &config).unwrap();
        assert!(!outcome.stats.complete);
        assert!(outcome.stats.hypotheses_scored >= DEADLINE_CHECK_INTERVAL);
        assert!(outcome.stats.hypotheses_scored < outcome.stats.hypotheses_expected);
        assert_distributions(&outcome);
    }

    #[test]
    fn deadline_without_mass_is_reported() {
        // P0's trait needs two copies, which the prior rules out, so every
        // hypothesis has zero probability.
        let records: Vec<PersonRecord> = (0..6)
            .map(|i| PersonRecord::founder(&format!("P{i}"), (i == 0).then_some(true)))
            .collect();
        let pedigree = Pedigree::from_records(records).unwrap();
        let mut model = ProbabilityModel::default();
        model.gene = hd_config::GeneTable::new(1.0, 0.0, 0.0);
        model.trait_given_gene = hd_config::GeneTable::new(0.0, 0.0, 1.0);

        let config = EngineConfig {
            deadline: Some(Duration::ZERO),
            ..EngineConfig::default()
        };
        let err = infer(&pedigree, &model, &config).unwrap_err();
        assert!(matches!(err, Error::DeadlineExceeded { deadline_ms: 0 }));

        let err = infer(&pedigree, &model, &EngineConfig::default()).unwrap_err();
        assert!(matches!(err, Error::ImpossibleEvidence));
    }

    #[test]
    fn generous_deadline_completes() {
        let pedigree = trio();
        let config = EngineConfig {
            deadline: Some(Duration::from_secs(600)),
            ..EngineConfig::default()
        };
        let outcome = infer(&pedigree, &ProbabilityModel::default(), &config).unwrap();
        assert!(outcome.stats.complete);
    }

    #[test]
    fn impossible_evidence_is_reported() {
        let pedigree =
            Pedigree::from_records(vec![PersonRecord::founder("Ann", Some(true))]).unwrap();
        let mut model = ProbabilityModel::default();
        model.trait_given_gene = hd_config::GeneTable::new(0.0, 0.0, 0.0);
        let err = infer(&pedigree, &model, &EngineConfig::default()).unwrap_err();
        assert!(matches!(err, Error::ImpossibleEvidence));
    }

    #[test]
    fn empty_pedigree_yields_no_posteriors() {
        let pedigree = Pedigree::from_records(Vec::new()).unwrap();
        let outcome =
            infer(&pedigree, &ProbabilityModel::default(), &EngineConfig::default()).unwrap();
        assert!(outcome.posteriors.is_empty());
        assert_eq!(outcome.stats.hypotheses_scored, 1);
        assert_eq!(outcome.stats.evidence_likelihood, 1.0);
    }
}
