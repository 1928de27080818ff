//! CSV pedigree loader.
//!
//! Expected header: `name,mother,father,trait`. `mother` and `father` are
//! both blank or both names from the same file; `trait` is `1`, `0`, or
//! blank for unknown.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use hd_common::{Error, Result};
use serde::Deserialize;
use tracing::debug;

use super::{Pedigree, PersonRecord};

#[derive(Debug, Deserialize)]
struct CsvRow {
    name: String,
    #[serde(default)]
    mother: String,
    #[serde(default)]
    father: String,
    #[serde(rename = "trait", default)]
    trait_value: String,
}

fn non_blank(field: String) -> Option<String> {
    if field.is_empty() {
        None
    } else {
        Some(field)
    }
}

/// Parse a trait cell: `1` → expressed, `0` → not expressed, blank → unknown.
pub fn parse_trait(name: &str, value: &str) -> Result<Option<bool>> {
    match value.trim() {
        "" => Ok(None),
        "1" => Ok(Some(true)),
        "0" => Ok(Some(false)),
        other => Err(Error::InvalidTrait {
            name: name.to_string(),
            value: other.to_string(),
        }),
    }
}

impl Pedigree {
    /// Read and validate a pedigree from CSV data.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for row in csv_reader.deserialize::<CsvRow>() {
            let row = row.map_err(|e| Error::Csv(e.to_string()))?;
            let observed_trait = parse_trait(&row.name, &row.trait_value)?;
            records.push(PersonRecord {
                name: row.name,
                mother: non_blank(row.mother),
                father: non_blank(row.father),
                observed_trait,
            });
        }

        Self::from_records(records)
    }
}

/// Load a pedigree from a CSV file.
pub fn load_csv(path: &Path) -> Result<Pedigree> {
    let file = File::open(path)?;
    let pedigree = Pedigree::from_csv_reader(file)?;
    debug!(
        path = %path.display(),
        people = pedigree.len(),
        observed = pedigree.observed_count(),
        "pedigree loaded"
    );
    Ok(pedigree)
}
