//! Gate-count statistics.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::gate::Gate;

/// Gate counts used to judge optimization progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitStats {
    /// Number of Hadamard gates.
    pub hadamard: usize,
    /// Number of CZ and CNOT gates.
    pub two_qubit: usize,
    /// Number of phase gates whose phase is not π.
    pub non_pauli: usize,
    /// Number of phase gates with an odd multiple of π/4.
    pub t_count: usize,
    /// Total number of gates.
    pub total: usize,
}

impl CircuitStats {
    /// Count the gates in `gates`.
    pub fn from_gates(gates: &[Gate]) -> Self {
        let mut stats = Self {
            total: gates.len(),
            ..Self::default()
        };
        for gate in gates {
            match gate {
                Gate::H { .. } => stats.hadamard += 1,
                Gate::Cz { .. } | Gate::Cnot { .. } => stats.two_qubit += 1,
                Gate::Not { .. } | Gate::Swap { .. } => {}
                Gate::ZPhase { .. } | Gate::XPhase { .. } | Gate::S { .. } => {
                    if let Some(phase) = gate.phase() {
                        if !phase.is_pi() {
                            stats.non_pauli += 1;
                        }
                        if phase.denom() == 4 {
                            stats.t_count += 1;
                        }
                    }
                }
            }
        }
        stats
    }

    /// The `(hadamard, two_qubit, non_pauli)` triple compared between rounds.
    pub fn metric(&self) -> (usize, usize, usize) {
        (self.hadamard, self.two_qubit, self.non_pauli)
    }

    /// Whether any metric component is strictly smaller than in `previous`.
    pub fn improves_on(&self, previous: &Self) -> bool {
        let (h, tq, np) = self.metric();
        let (ph, ptq, pnp) = previous.metric();
        h < ph || tq < ptq || np < pnp
    }
}

impl fmt::Display for CircuitStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} gates (h: {}, 2q: {}, non-pauli: {}, t: {})",
            self.total, self.hadamard, self.two_qubit, self.non_pauli, self.t_count
        )
    }
}
