//! Weight normalization.
//!
//! Accumulated beliefs are plain (non-log) weights; these helpers rescale
//! them into probability vectors.

/// Sum of weights, or `None` if the total cannot be used as a divisor.
///
/// A usable total is finite and strictly positive.
pub fn usable_total(weights: &[f64]) -> Option<f64> {
    if weights.iter().any(|w| w.is_nan() || *w < 0.0) {
        return None;
    }
    let total: f64 = weights.iter().sum();
    if total.is_finite() && total > 0.0 {
        Some(total)
    } else {
        None
    }
}

/// Rescale `weights` in place so they sum to one.
///
/// Returns the pre-normalization total, or `None` (leaving `weights`
/// untouched) when the total is zero, negative, or not finite.
pub fn normalize_in_place(weights: &mut [f64]) -> Option<f64> {
    let total = usable_total(weights)?;
    for w in weights.iter_mut() {
        *w /= total;
    }
    Some(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn normalizes_basic() {
        let mut w = [1.0, 3.0];
        let total = normalize_in_place(&mut w).unwrap();
        assert_eq!(total, 4.0);
        assert!((w[0] - 0.25).abs() < 1e-12);
        assert!((w[1] - 0.75).abs() < 1e-12);
    }

    #[test]
    fn zero_total_is_rejected() {
        let mut w = [0.0, 0.0, 0.0];
        assert!(normalize_in_place(&mut w).is_none());
        assert_eq!(w, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn nan_and_negative_are_rejected() {
        assert!(usable_total(&[f64::NAN, 1.0]).is_none());
        assert!(usable_total(&[-1.0, 2.0]).is_none());
        assert!(usable_total(&[]).is_none());
    }

    #[test]
    fn tiny_weights_still_normalize() {
        let mut w = [1e-300, 3e-300];
        normalize_in_place(&mut w).unwrap();
        assert!((w[0] + w[1] - 1.0).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn normalized_sums_to_one(w in proptest::collection::vec(0.0f64..1e6, 1..8)) {
            let mut w = w;
            prop_assume!(w.iter().sum::<f64>() > 0.0);
            normalize_in_place(&mut w).unwrap();
            let sum: f64 = w.iter().sum();
            prop_assert!((sum - 1.0).abs() < 1e-9);
        }
    }
}
