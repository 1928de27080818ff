//! Allele transmission with mutation.
//!
//! A parent carries `copies` of the gene out of two alleles and passes one
//! allele, chosen uniformly, to each child. The passed allele then flips
//! with probability `mutation_rate`.

/// Alleles per individual.
pub const PLOIDY: u8 = 2;

/// Probability that a parent with `copies` gene alleles passes the gene on.
///
/// `transmit(0) = m`, `transmit(1) = 0.5`, `transmit(2) = 1 - m`.
pub fn transmit(copies: u8, mutation_rate: f64) -> f64 {
    let carried = f64::from(copies.min(PLOIDY)) / f64::from(PLOIDY);
    carried * (1.0 - mutation_rate) + (1.0 - carried) * mutation_rate
}

/// Child gene-count distribution `[P(0), P(1), P(2)]` from the two
/// parents' transmission probabilities.
pub fn child_gene_distribution(from_mother: f64, from_father: f64) -> [f64; 3] {
    let two = from_mother * from_father;
    let zero = (1.0 - from_mother) * (1.0 - from_father);
    let one = from_mother * (1.0 - from_father) + from_father * (1.0 - from_mother);
    [zero, one, two]
}
