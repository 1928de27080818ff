//! Text and JSON renderers.

use std::fmt::Write as _;

use hd_common::{GeneCount, OutputFormat, Result, SCHEMA_VERSION};
use serde::Serialize;

use crate::inference::{EnumerationStats, InferenceOutcome, PersonPosterior};

/// Decimal places in text output.
const TEXT_PRECISION: usize = 4;

/// Per-person listing: gene counts from two down to zero, then trait.
pub fn render_text(posteriors: &[PersonPosterior]) -> String {
    let mut out = String::new();
    for person in posteriors {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{}:", person.name);
        let _ = writeln!(out, "  Gene:");
        for gene in GeneCount::ALL.iter().rev() {
            let _ = writeln!(
                out,
                "    {}: {:.prec$}",
                gene,
                person.gene.get(*gene),
                prec = TEXT_PRECISION
            );
        }
        let _ = writeln!(out, "  Trait:");
        for expressed in [true, false] {
            let label = if expressed { "True" } else { "False" };
            let _ = writeln!(
                out,
                "    {}: {:.prec$}",
                label,
                person.traits.get(expressed),
                prec = TEXT_PRECISION
            );
        }
    }
    out
}

/// JSON report body.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub schema_version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_source: Option<String>,
    pub people: &'a [PersonPosterior],
    pub stats: &'a EnumerationStats,
}

/// Pretty-printed JSON report.
pub fn render_json(outcome: &InferenceOutcome, model_source: Option<&str>) -> Result<String> {
    let report = JsonReport {
        schema_version: SCHEMA_VERSION,
        model_source: model_source.map(str::to_string),
        people: &outcome.posteriors,
        stats: &outcome.stats,
    };
    let mut json = serde_json::to_string_pretty(&report)?;
    json.push('\n');
    Ok(json)
}

/// Render in the requested format.
pub fn render(
    outcome: &InferenceOutcome,
    format: OutputFormat,
    model_source: Option<&str>,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(&outcome.posteriors)),
        OutputFormat::Json => render_json(outcome, model_source),
    }
}
