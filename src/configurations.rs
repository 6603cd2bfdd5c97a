//! Enumeration of measurement-outcome branch configurations.
//!
//! A configuration assigns "+" or "-" to each measured photon (qubit 0 is
//! excluded: its outcome is fixed by the deterministic input collapse). The
//! full set walks every branch of the probability tree exactly once. For n
//! qubits the set is produced weight class by weight class, each class
//! expanded to its distinct sign arrangements; classes follow a fixed per-n
//! ordering and arrangements appear in first-occurrence order.

use crate::error::SimError;

/// Number of "-" symbols per weight class, indexed by qubit count 3..=8.
const WEIGHT_ORDERS: [&[usize]; 6] = [
    &[0, 1, 2],
    &[0, 1, 2, 3],
    &[1, 2, 3, 4, 0],
    &[1, 2, 3, 4, 0, 5],
    &[1, 2, 3, 4, 5, 0, 6],
    &[1, 2, 3, 4, 5, 6, 0, 7],
];

/// Enumerate every branch configuration for the given qubit count.
///
/// Each element has length `num_qubits - 1` over {+, -}; no two elements are
/// equal. Qubit counts outside 3..=8 are unsupported.
pub fn enumerate_configurations(num_qubits: usize) -> Result<Vec<String>, SimError> {
    if !(3..=8).contains(&num_qubits) {
        return Err(SimError::UnsupportedSize { qubits: num_qubits });
    }
    let length = num_qubits - 1;
    let mut configurations = Vec::with_capacity(1 << length);
    for &minuses in WEIGHT_ORDERS[num_qubits - 3] {
        push_arrangements(
            String::with_capacity(length),
            length - minuses,
            minuses,
            &mut configurations,
        );
    }
    Ok(configurations)
}

/// Emit every distinct arrangement of the remaining "+" and "-" symbols,
/// "+" branch first at each position.
fn push_arrangements(prefix: String, pluses: usize, minuses: usize, out: &mut Vec<String>) {
    if pluses == 0 && minuses == 0 {
        out.push(prefix);
        return;
    }
    if pluses > 0 {
        let mut next = prefix.clone();
        next.push('+');
        push_arrangements(next, pluses - 1, minuses, out);
    }
    if minuses > 0 {
        let mut next = prefix;
        next.push('-');
        push_arrangements(next, pluses, minuses - 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn three_qubit_order_is_weight_by_weight() {
        let configs = enumerate_configurations(3).unwrap();
        assert_eq!(configs, vec!["++", "+-", "-+", "--"]);
    }

    #[test]
    fn five_qubit_order_starts_with_single_minus_class() {
        let configs = enumerate_configurations(5).unwrap();
        assert_eq!(configs[0], "+++-");
        assert_eq!(configs[1], "++-+");
        // The all-plus arrangement belongs to the weight-0 class, which comes
        // after the weight-4 class for five qubits.
        let all_plus = configs.iter().position(|c| c == "++++").unwrap();
        let all_minus = configs.iter().position(|c| c == "----").unwrap();
        assert!(all_minus < all_plus);
    }

    #[test]
    fn covers_every_branch_without_duplicates() {
        for num_qubits in 3..=8 {
            let configs = enumerate_configurations(num_qubits).unwrap();
            let length = num_qubits - 1;
            assert_eq!(
                configs.len(),
                1 << length,
                "expected 2^{} branches for {} qubits",
                length,
                num_qubits
            );
            let distinct: HashSet<&String> = configs.iter().collect();
            assert_eq!(distinct.len(), configs.len(), "duplicate configuration");
            for config in &configs {
                assert_eq!(config.len(), length);
                assert!(config.chars().all(|c| c == '+' || c == '-'));
            }
        }
    }

    #[test]
    fn rejects_unsupported_sizes() {
        assert_eq!(
            enumerate_configurations(2).unwrap_err(),
            SimError::UnsupportedSize { qubits: 2 }
        );
        assert_eq!(
            enumerate_configurations(9).unwrap_err(),
            SimError::UnsupportedSize { qubits: 9 }
        );
    }
}
