//! End-to-end posteriors for the bundled fixture families.

use std::path::PathBuf;

use hd_core::common::GeneCount;
use hd_core::config::ProbabilityModel;
use hd_core::inference::{infer, EngineConfig, PersonPosterior};
use hd_core::load_csv;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn posterior<'a>(posteriors: &'a [PersonPosterior], name: &str) -> &'a PersonPosterior {
    posteriors
        .iter()
        .find(|p| p.name.as_str() == name)
        .unwrap_or_else(|| panic!("no posterior for {name}"))
}

fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "{what}: expected {expected}, got {actual}"
    );
}

/// (name, P(0), P(1), P(2), P(trait))
type Expected = (&'static str, f64, f64, f64, f64);

fn check_family(file: &str, expected: &[Expected]) {
    let pedigree = load_csv(&fixture(file)).expect("fixture loads");
    let outcome = infer(&pedigree, &ProbabilityModel::default(), &EngineConfig::default())
        .expect("inference succeeds");
    assert!(outcome.stats.complete);
    assert_eq!(outcome.posteriors.len(), expected.len());
    for (name, zero, one, two, expressed) in expected {
        let p = posterior(&outcome.posteriors, name);
        assert_close(p.gene.get(GeneCount::Zero), *zero, &format!("{name} gene 0"));
        assert_close(p.gene.get(GeneCount::One), *one, &format!("{name} gene 1"));
        assert_close(p.gene.get(GeneCount::Two), *two, &format!("{name} gene 2"));
        assert_close(p.traits.expressed, *expressed, &format!("{name} trait"));
        assert_close(p.traits.absent, 1.0 - *expressed, &format!("{name} no trait"));
    }
}

#[test]
fn family0_trio() {
    check_family(
        "family0.csv",
        &[
            ("Harry", 0.5351186101, 0.4556982701, 0.0091831197, 0.2665112452),
            ("James", 0.2917933131, 0.5106382979, 0.1975683891, 1.0),
            ("Lily", 0.9827318788, 0.0136490539, 0.0036190673, 0.0),
        ],
    );
}

#[test]
fn family1_siblings() {
    check_family(
        "family1.csv",
        &[
            ("Arthur", 0.8822557906, 0.0894598972, 0.0282843122, 0.0),
            ("Charlie", 0.8025275714, 0.1943873716, 0.0030850570, 0.0),
            ("Fred", 0.2917920186, 0.6995517237, 0.0086562577, 1.0),
            ("Ginny", 0.7403108724, 0.2552325640, 0.0044565635, 0.1532301109),
            ("Molly", 0.7260015723, 0.1957688645, 0.0782295632, 0.1677397959),
            ("Ron", 0.7403108724, 0.2552325640, 0.0044565635, 0.1532301109),
        ],
    );
}

#[test]
fn unobserved_siblings_are_exchangeable() {
    let pedigree = load_csv(&fixture("family1.csv")).unwrap();
    let outcome =
        infer(&pedigree, &ProbabilityModel::default(), &EngineConfig::default()).unwrap();
    let ginny = posterior(&outcome.posteriors, "Ginny");
    let ron = posterior(&outcome.posteriors, "Ron");
    assert!((ginny.gene.one - ron.gene.one).abs() < 1e-12);
    assert!((ginny.traits.expressed - ron.traits.expressed).abs() < 1e-12);
}

#[test]
fn loader_errors_abort_before_inference() {
    let err = load_csv(&fixture("unknown_parent.csv")).unwrap_err();
    assert!(err.is_data_error());
    assert!(err.to_string().contains("James"));
}
