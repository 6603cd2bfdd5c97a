//! Reduction of syndrome counts into logical error rates.
//!
//! The corrected rate models a decoder that, for each flagged syndrome, picks
//! the majority-likely logical value: the residual error is the minority
//! probability min(P, 1 - P), weighted by how often the syndrome occurred.
//! The trivial syndrome carries no correctable information and its whole
//! relative frequency counts as error in both rates.

use std::collections::HashMap;

/// Syndrome key of samples that carry no usable syndrome information.
pub const TRIVIAL_SYNDROME: &str = "0";

/// Majority-vote correction: the decoder's residual error for a syndrome
/// with empirical error probability `p`.
fn corrected_conditional(p: f64) -> f64 {
    p.min(1.0 - p)
}

/// Reduce counted samples to (corrected, uncorrected) logical error rates.
///
/// `effective_steps` must be the number of samples behind the counts; both
/// returned rates lie in [0, 1].
pub fn logical_error_rates(
    error_cooccurrence: &HashMap<String, u64>,
    syndrome_counts: &HashMap<String, u64>,
    effective_steps: u64,
) -> (f64, f64) {
    if effective_steps == 0 {
        return (0.0, 0.0);
    }
    let steps = effective_steps as f64;
    let mut corrected = 0.0;
    let mut uncorrected = 0.0;
    for (key, &count) in syndrome_counts {
        if count == 0 {
            continue;
        }
        let weight = count as f64 / steps;
        if key == TRIVIAL_SYNDROME {
            corrected += weight;
            uncorrected += weight;
        } else {
            let errors = error_cooccurrence.get(key).copied().unwrap_or(0) as f64;
            let p_error = errors / count as f64;
            corrected += weight * corrected_conditional(p_error);
            uncorrected += errors / steps;
        }
    }
    (corrected, uncorrected)
}

/// Mean and population standard deviation of a sample.
pub fn mean_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    (mean, variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn maps(entries: &[(&str, u64, u64)]) -> (HashMap<String, u64>, HashMap<String, u64>) {
        let mut cooccurrence = HashMap::new();
        let mut counts = HashMap::new();
        for (key, count, errors) in entries {
            counts.insert(key.to_string(), *count);
            cooccurrence.insert(key.to_string(), *errors);
        }
        (cooccurrence, counts)
    }

    #[test]
    fn hand_computed_rates() {
        // 1000 steps: syndrome "1-1" seen 600 times with 150 errors,
        // "-11" seen 400 times with 300 errors.
        let (cooccurrence, counts) = maps(&[("1-1", 600, 150), ("-11", 400, 300)]);
        let (corrected, uncorrected) = logical_error_rates(&cooccurrence, &counts, 1000);
        // corrected = 0.6·min(0.25, 0.75) + 0.4·min(0.75, 0.25) = 0.25
        assert!((corrected - 0.25).abs() < 1e-12);
        // uncorrected = (150 + 300) / 1000
        assert!((uncorrected - 0.45).abs() < 1e-12);
    }

    #[test]
    fn trivial_syndrome_counts_fully_in_both_rates() {
        let (cooccurrence, counts) = maps(&[(TRIVIAL_SYNDROME, 250, 250), ("11", 750, 0)]);
        let (corrected, uncorrected) = logical_error_rates(&cooccurrence, &counts, 1000);
        assert!((corrected - 0.25).abs() < 1e-12);
        assert!((uncorrected - 0.25).abs() < 1e-12);
    }

    #[test]
    fn corrected_never_exceeds_uncorrected() {
        let mut rng = StdRng::seed_from_u64(23);
        for _ in 0..50 {
            let mut counts = HashMap::new();
            let mut cooccurrence = HashMap::new();
            let mut steps = 0u64;
            for key in ["0", "11", "1-1", "-11", "-1-1"] {
                let count = rng.gen_range(1..500u64);
                let errors = rng.gen_range(0..=count);
                counts.insert(key.to_string(), count);
                cooccurrence.insert(key.to_string(), errors);
                steps += count;
            }
            let (corrected, uncorrected) = logical_error_rates(&cooccurrence, &counts, steps);
            assert!(
                corrected <= uncorrected + 1e-12,
                "corrected {} must not exceed uncorrected {}",
                corrected,
                uncorrected
            );
            assert!((0.0..=1.0).contains(&corrected));
            assert!((0.0..=1.0).contains(&uncorrected));
        }
    }

    #[test]
    fn empty_counts_give_zero_rates() {
        let (corrected, uncorrected) =
            logical_error_rates(&HashMap::new(), &HashMap::new(), 1000);
        assert_eq!((corrected, uncorrected), (0.0, 0.0));
    }

    #[test]
    fn mean_std_of_constant_sample_is_exact() {
        let (mean, std) = mean_std(&[0.3, 0.3, 0.3]);
        assert!((mean - 0.3).abs() < 1e-12);
        assert!(std.abs() < 1e-12);
    }

    #[test]
    fn mean_std_matches_hand_computation() {
        let (mean, std) = mean_std(&[0.1, 0.3]);
        assert!((mean - 0.2).abs() < 1e-12);
        assert!((std - 0.1).abs() < 1e-12);
    }
}
