//! Execution results.

use num_complex::Complex64;

/// The outcome of executing a circuit on a backend.
///
/// `counts` is a dense histogram of length `2^num_qubits`; index `i` counts
/// the shots whose bit for qubit `q` was `(i >> q) & 1`. `final_state` is
/// populated only by statevector-kind backends.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionOutcome {
    /// Measurement histogram, one bucket per basis state.
    pub counts: Vec<u64>,
    /// Number of shots taken.
    pub shots: u64,
    /// Final amplitudes, when the backend exposes them.
    pub final_state: Option<Vec<Complex64>>,
    /// Wall-clock execution time in milliseconds.
    pub elapsed_ms: u64,
}

impl ExecutionOutcome {
    /// The most frequent outcome as `(basis_index, count)`.
    ///
    /// Ties break toward the lower index. `None` for an empty histogram.
    pub fn most_frequent(&self) -> Option<(usize, u64)> {
        self.counts
            .iter()
            .enumerate()
            .max_by(|(ia, a), (ib, b)| a.cmp(b).then(ib.cmp(ia)))
            .map(|(i, &c)| (i, c))
    }

    /// Number of qubits implied by the histogram size.
    pub fn num_qubits(&self) -> u32 {
        self.counts.len().trailing_zeros()
    }

    /// Format a basis index as a bitstring, most significant qubit first.
    pub fn bitstring(&self, index: usize) -> String {
        let n = self.num_qubits();
        (0..n).rev().map(|q| if index >> q & 1 == 1 { '1' } else { '0' }).collect()
    }

    /// Non-zero histogram entries as `(bitstring, count)`, descending count.
    pub fn sorted_entries(&self) -> Vec<(String, u64)> {
        let mut entries: Vec<(usize, u64)> = self
            .counts
            .iter()
            .enumerate()
            .filter(|(_, &c)| c > 0)
            .map(|(i, &c)| (i, c))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        entries
            .into_iter()
            .map(|(i, c)| (self.bitstring(i), c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(counts: Vec<u64>) -> ExecutionOutcome {
        let shots = counts.iter().sum();
        ExecutionOutcome {
            counts,
            shots,
            final_state: None,
            elapsed_ms: 0,
        }
    }

    #[test]
    fn test_most_frequent() {
        let out = outcome(vec![10, 0, 70, 20]);
        assert_eq!(out.most_frequent(), Some((2, 70)));
    }

    #[test]
    fn test_most_frequent_tie_breaks_low() {
        let out = outcome(vec![50, 50, 0, 0]);
        assert_eq!(out.most_frequent(), Some((0, 50)));
    }

    #[test]
    fn test_bitstring_is_msb_first() {
        let out = outcome(vec![0; 8]);
        assert_eq!(out.num_qubits(), 3);
        // Index 6 = qubit2 and qubit1 set.
        assert_eq!(out.bitstring(6), "110");
        assert_eq!(out.bitstring(1), "001");
    }

    #[test]
    fn test_sorted_entries_skip_zeros() {
        let out = outcome(vec![5, 0, 0, 95]);
        assert_eq!(
            out.sorted_entries(),
            vec![("11".to_string(), 95), ("00".to_string(), 5)]
        );
    }
}
