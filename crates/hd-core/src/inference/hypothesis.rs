//! Full-pedigree hypotheses.
//!
//! A hypothesis assigns every person a gene count and a trait. Gene counts
//! are stored as the `one_gene` and `two_genes` sets; everyone else carries
//! zero copies.

use std::fmt;

use hd_common::{Error, GeneCount, Result};

use crate::pedigree::PersonIndex;

/// Bitset over person indices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PersonSet(u64);

impl PersonSet {
    /// Largest pedigree a set can describe.
    pub const CAPACITY: usize = u64::BITS as usize;

    pub fn empty() -> Self {
        PersonSet(0)
    }

    /// Every index in `0..len`.
    pub fn full(len: usize) -> Self {
        if len >= Self::CAPACITY {
            PersonSet(u64::MAX)
        } else {
            PersonSet((1u64 << len) - 1)
        }
    }

    pub fn insert(&mut self, person: PersonIndex) -> Result<()> {
        if person.0 >= Self::CAPACITY {
            return Err(Error::invariant(format!(
                "person index {} exceeds set capacity {}",
                person.0,
                Self::CAPACITY
            )));
        }
        self.0 |= 1u64 << person.0;
        Ok(())
    }

    pub fn contains(&self, person: PersonIndex) -> bool {
        person.0 < Self::CAPACITY && (self.0 >> person.0) & 1 == 1
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn intersection(&self, other: &PersonSet) -> PersonSet {
        PersonSet(self.0 & other.0)
    }

    /// Members of `0..len` not in this set.
    pub fn complement(&self, len: usize) -> PersonSet {
        PersonSet(!self.0 & Self::full(len).0)
    }

    /// True if every member is below `len`.
    pub fn within(&self, len: usize) -> bool {
        self.0 & !Self::full(len).0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = PersonIndex> + '_ {
        (0..Self::CAPACITY)
            .filter(move |i| (self.0 >> i) & 1 == 1)
            .map(PersonIndex)
    }

    /// Build a set from indices, failing on an index past [`Self::CAPACITY`].
    pub fn from_indices<'a>(indices: impl IntoIterator<Item = &'a PersonIndex>) -> Result<Self> {
        let mut set = PersonSet::empty();
        for idx in indices {
            set.insert(*idx)?;
        }
        Ok(set)
    }
}

impl fmt::Display for PersonSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let members: Vec<String> = self.iter().map(|i| i.0.to_string()).collect();
        write!(f, "{{{}}}", members.join(","))
    }
}

/// One complete assignment of gene counts and traits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hypothesis {
    pub one_gene: PersonSet,
    pub two_genes: PersonSet,
    pub have_trait: PersonSet,
}

impl Hypothesis {
    pub fn new(one_gene: PersonSet, two_genes: PersonSet, have_trait: PersonSet) -> Self {
        Self {
            one_gene,
            two_genes,
            have_trait,
        }
    }

    /// Gene count hypothesized for `person`.
    ///
    /// A person in both `one_gene` and `two_genes` cannot be classified and
    /// is reported as an invariant violation.
    pub fn gene_count(&self, person: PersonIndex) -> Result<GeneCount> {
        match (self.one_gene.contains(person), self.two_genes.contains(person)) {
            (false, false) => Ok(GeneCount::Zero),
            (true, false) => Ok(GeneCount::One),
            (false, true) => Ok(GeneCount::Two),
            (true, true) => Err(Error::invariant(format!(
                "person {} is assigned both one and two gene copies",
                person.0
            ))),
        }
    }

    pub fn has_trait(&self, person: PersonIndex) -> bool {
        self.have_trait.contains(person)
    }

    /// Reject hypotheses that name people outside a pedigree of `len`.
    pub fn check_bounds(&self, len: usize) -> Result<()> {
        for (label, set) in [
            ("one_gene", &self.one_gene),
            ("two_genes", &self.two_genes),
            ("have_trait", &self.have_trait),
        ] {
            if !set.within(len) {
                return Err(Error::invariant(format!(
                    "{label} {set} names people outside a pedigree of {len}"
                )));
            }
        }
        Ok(())
    }
}
