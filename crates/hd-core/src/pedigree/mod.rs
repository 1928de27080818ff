//! Pedigree model: people and resolved parent links.
//!
//! A [`Pedigree`] is only ever built through [`Pedigree::from_records`],
//! which rejects malformed input. Inference never sees an invalid pedigree
//! and never looks parents up by name.

pub mod loader;

use std::collections::HashMap;

use hd_common::{Error, PersonId, Result};
use serde::{Deserialize, Serialize};

pub use loader::{load_csv, parse_trait};

/// Position of a person inside a [`Pedigree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonIndex(pub usize);

/// Both parents of a non-founder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parents {
    pub mother: PersonIndex,
    pub father: PersonIndex,
}

/// One individual. Immutable once the pedigree is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: PersonId,
    pub parents: Option<Parents>,
    /// Observed trait, `None` when unknown.
    pub observed_trait: Option<bool>,
}

impl Person {
    pub fn is_founder(&self) -> bool {
        self.parents.is_none()
    }
}

/// Unvalidated input record, as produced by a loader.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonRecord {
    pub name: String,
    pub mother: Option<String>,
    pub father: Option<String>,
    pub observed_trait: Option<bool>,
}

impl PersonRecord {
    pub fn founder(name: &str, observed_trait: Option<bool>) -> Self {
        Self {
            name: name.to_string(),
            mother: None,
            father: None,
            observed_trait,
        }
    }

    pub fn child(name: &str, mother: &str, father: &str, observed_trait: Option<bool>) -> Self {
        Self {
            name: name.to_string(),
            mother: Some(mother.to_string()),
            father: Some(father.to_string()),
            observed_trait,
        }
    }
}

/// A validated family forest.
#[derive(Debug, Clone)]
pub struct Pedigree {
    people: Vec<Person>,
    by_name: HashMap<PersonId, PersonIndex>,
}

impl Pedigree {
    /// Validate records and resolve parent names to indices.
    ///
    /// People keep the order of `records`. Fails with a data error on blank
    /// or duplicate names, a single recorded parent, a self-parent, an
    /// unknown parent name, or a cycle in the parent links.
    pub fn from_records(records: Vec<PersonRecord>) -> Result<Self> {
        let mut by_name = HashMap::with_capacity(records.len());
        let mut ids = Vec::with_capacity(records.len());
        for (row, record) in records.iter().enumerate() {
            let id = PersonId::parse(&record.name).ok_or(Error::EmptyName { row: row + 1 })?;
            if by_name.insert(id.clone(), PersonIndex(row)).is_some() {
                return Err(Error::DuplicatePerson { name: id.0 });
            }
            ids.push(id);
        }

        let resolve = |person: &PersonId, parent: &str| -> Result<PersonIndex> {
            let parent_id = PersonId::parse(parent).ok_or_else(|| Error::HalfParented {
                name: person.0.clone(),
            })?;
            if &parent_id == person {
                return Err(Error::SelfParent {
                    name: person.0.clone(),
                });
            }
            by_name
                .get(&parent_id)
                .copied()
                .ok_or_else(|| Error::UnknownParent {
                    person: person.0.clone(),
                    parent: parent_id.0,
                })
        };

        let mut people = Vec::with_capacity(records.len());
        for (id, record) in ids.into_iter().zip(records) {
            let mother = record.mother.as_deref().map(str::trim).filter(|s| !s.is_empty());
            let father = record.father.as_deref().map(str::trim).filter(|s| !s.is_empty());
            let parents = match (mother, father) {
                (None, None) => None,
                (Some(mother), Some(father)) => Some(Parents {
                    mother: resolve(&id, mother)?,
                    father: resolve(&id, father)?,
                }),
                _ => return Err(Error::HalfParented { name: id.0 }),
            };
            people.push(Person {
                id,
                parents,
                observed_trait: record.observed_trait,
            });
        }

        let pedigree = Self { people, by_name };
        pedigree.check_acyclic()?;
        Ok(pedigree)
    }

    /// Depth-first walk over parent links; a back edge is a cycle.
    fn check_acyclic(&self) -> Result<()> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            InProgress,
            Done,
        }

        let mut marks = vec![Mark::Unvisited; self.people.len()];
        for start in 0..self.people.len() {
            if marks[start] != Mark::Unvisited {
                continue;
            }
            // (person, expanded) pairs; a person is finished on its second pop.
            let mut stack = vec![(start, false)];
            while let Some((idx, expanded)) = stack.pop() {
                if expanded {
                    marks[idx] = Mark::Done;
                    continue;
                }
                match marks[idx] {
                    Mark::Done => continue,
                    Mark::InProgress => {
                        return Err(Error::ParentCycle {
                            name: self.people[idx].id.0.clone(),
                        })
                    }
                    Mark::Unvisited => {}
                }
                marks[idx] = Mark::InProgress;
                stack.push((idx, true));
                if let Some(parents) = self.people[idx].parents {
                    for parent in [parents.mother.0, parents.father.0] {
                        match marks[parent] {
                            Mark::InProgress => {
                                return Err(Error::ParentCycle {
                                    name: self.people[parent].id.0.clone(),
                                })
                            }
                            Mark::Unvisited => stack.push((parent, false)),
                            Mark::Done => {}
                        }
                    }
                }
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn get(&self, index: PersonIndex) -> Option<&Person> {
        self.people.get(index.0)
    }

    pub fn lookup(&self, name: &str) -> Option<PersonIndex> {
        self.by_name.get(&PersonId::from(name)).copied()
    }

    /// Indices of every person, in pedigree order.
    pub fn indices(&self) -> impl Iterator<Item = PersonIndex> + '_ {
        (0..self.people.len()).map(PersonIndex)
    }

    /// People paired with their index.
    pub fn iter(&self) -> impl Iterator<Item = (PersonIndex, &Person)> + '_ {
        self.people
            .iter()
            .enumerate()
            .map(|(i, person)| (PersonIndex(i), person))
    }

    /// Number of people with a known trait.
    pub fn observed_count(&self) -> usize {
        self.people
            .iter()
            .filter(|p| p.observed_trait.is_some())
            .count()
    }
}
