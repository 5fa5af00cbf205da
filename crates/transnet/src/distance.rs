// Structural distance between states of a transition network.

use tracing::trace;

use crate::NetworkError;
use crate::network::TransitionNetwork;
use crate::target::{StateId, Target};

/// Raw tallies behind a distance: weighted matching and diverging structure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Comparison {
    /// Two per matching terminal edge or shared state, both sides counted.
    pub matched: usize,
    /// One per diverging edge plus the leaves beneath it.
    pub unmatched: usize,
}

impl Comparison {
    /// `1 - matched / (matched + unmatched)`; two states without any outgoing
    /// structure are vacuously identical (distance 0).
    pub fn distance(&self) -> f64 {
        let total = self.matched + self.unmatched;
        if total == 0 {
            return 0.0;
        }
        1.0 - self.matched as f64 / total as f64
    }
}

impl TransitionNetwork {
    /// Symmetric structural distance in `[0, 1]` between two states.
    ///
    /// 0 means identical reachable structure, 1 means nothing in common.
    pub fn state_distance(&self, a: StateId, b: StateId) -> Result<f64, NetworkError> {
        let distance = self.compare_states(a, b)?.distance();
        trace!(a = a.get(), b = b.get(), distance, "state distance");
        Ok(distance)
    }

    /// Tally matching and diverging structure under `a` and `b`, column by column.
    ///
    /// Equal cells count 2 when they are FINAL or the same state; a shared
    /// state is then compared against itself, which rewards the whole shared
    /// subtree. Unequal cells count `1 + leaves` for each non-empty side,
    /// where a FINAL side has no leaves beneath it.
    pub fn compare_states(&self, a: StateId, b: StateId) -> Result<Comparison, NetworkError> {
        self.check_state(a)?;
        self.check_state(b)?;

        let mut tally = Comparison::default();
        // Pairs only get pushed for a shared child, which is younger than its
        // parent, so the stack never holds more entries than there are states.
        let mut stack = vec![(a, b)];
        while let Some((one, two)) = stack.pop() {
            for (&left, &right) in self.row(one).iter().zip(self.row(two)) {
                if left == right {
                    match left {
                        Target::Invalid => {}
                        Target::Final => tally.matched += 2,
                        Target::State(shared) => {
                            tally.matched += 2;
                            stack.push((shared, shared));
                        }
                    }
                } else {
                    tally.unmatched += self.divergence_weight(left) + self.divergence_weight(right);
                }
            }
        }
        Ok(tally)
    }

    /// Pairwise distances between `states`, as a symmetric matrix with a zero
    /// diagonal.
    pub fn distance_matrix(&self, states: &[StateId]) -> Result<Vec<Vec<f64>>, NetworkError> {
        for &state in states {
            self.check_state(state)?;
        }
        let n = states.len();
        let mut matrix = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = self.compare_states(states[i], states[j])?.distance();
                matrix[i][j] = d;
                matrix[j][i] = d;
            }
        }
        Ok(matrix)
    }

    fn divergence_weight(&self, target: Target) -> usize {
        match target {
            Target::Invalid => 0,
            Target::Final => 1,
            Target::State(child) => 1 + self.leaves_beneath(child),
        }
    }
}
