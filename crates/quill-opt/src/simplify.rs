//! Phase-polynomial simplifiers.
//!
//! The phase-block driver hands every extracted block to a
//! [`PhasePolySimplifier`]. A block contains only CNOT, CZ and Z-phase gates,
//! so its unitary is a diagonal phase function of the input basis state
//! followed by a linear reversible map, and a simplifier is free to rebuild
//! it in any form with the same action.

use quill_ir::Gate;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::{OptError, OptResult};

/// A simplified block together with the wire relabeling it introduces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimplifiedBlock {
    /// The replacement gates.
    pub gates: Vec<Gate>,
    /// `relabel[w]` is the wire whose content the original block would have
    /// left on wire `w`.
    ///
    /// Following `gates` with a SWAP network that moves wire `relabel[w]` to
    /// wire `w` reproduces the original block.
    pub relabel: Vec<usize>,
}

impl SimplifiedBlock {
    /// A block with the identity relabeling.
    pub fn unpermuted(gates: Vec<Gate>, num_qubits: usize) -> Self {
        Self {
            gates,
            relabel: (0..num_qubits).collect(),
        }
    }
}

/// Rewrites a CNOT+CZ+phase block into an equivalent one.
pub trait PhasePolySimplifier: Send + Sync {
    /// Get the name of this simplifier.
    fn name(&self) -> &str;

    /// Simplify `block`, a circuit on `num_qubits` wires.
    fn simplify(&self, block: &[Gate], num_qubits: usize) -> OptResult<SimplifiedBlock>;
}

/// Returns every block unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl PhasePolySimplifier for Passthrough {
    fn name(&self) -> &str {
        "passthrough"
    }

    fn simplify(&self, block: &[Gate], num_qubits: usize) -> OptResult<SimplifiedBlock> {
        Ok(SimplifiedBlock::unpermuted(block.to_vec(), num_qubits))
    }
}

/// Merges phase gates that act on the same parity of input bits.
///
/// Every wire carries an XOR of input bits, which CNOTs update. A Z phase on
/// a wire multiplies the state by a phase depending only on that parity, and
/// all diagonal gates commute, so two phases applied to equal parities can be
/// merged at the position of the first. Merged phases summing to zero are
/// removed.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseFolding;

/// Parity of input bits as a bit vector.
type Parity = Vec<u64>;

impl PhasePolySimplifier for PhaseFolding {
    fn name(&self) -> &str {
        "phase_folding"
    }

    fn simplify(&self, block: &[Gate], num_qubits: usize) -> OptResult<SimplifiedBlock> {
        let words = num_qubits.div_ceil(64).max(1);
        let mut parities: Vec<Parity> = (0..num_qubits)
            .map(|q| {
                let mut p = vec![0; words];
                p[q / 64] |= 1 << (q % 64);
                p
            })
            .collect();
        let mut slots: Vec<Gate> = Vec::with_capacity(block.len());
        let mut first_phase: FxHashMap<Parity, usize> = FxHashMap::default();

        for &gate in block {
            match gate {
                Gate::ZPhase { target, .. } | Gate::S { target, .. } => {
                    let phase = gate.z_phase().unwrap_or_default();
                    let parity = &parities[target.index()];
                    if let Some(&slot) = first_phase.get(parity) {
                        let merged = slots[slot].z_phase().unwrap_or_default() + phase;
                        slots[slot] = slots[slot].with_z_phase(merged);
                    } else {
                        first_phase.insert(parity.clone(), slots.len());
                        slots.push(gate);
                    }
                }
                Gate::Cnot { control, target } => {
                    let (c, t) = (control.index(), target.index());
                    for w in 0..words {
                        let bits = parities[c][w];
                        parities[t][w] ^= bits;
                    }
                    slots.push(gate);
                }
                Gate::Cz { .. } => slots.push(gate),
                Gate::XPhase { .. } | Gate::H { .. } | Gate::Not { .. } | Gate::Swap { .. } => {
                    return Err(OptError::unsupported(&gate, "phase-polynomial block"));
                }
            }
        }

        let gates: Vec<Gate> = slots
            .into_iter()
            .filter(|g| !g.z_phase().is_some_and(|p| p.is_zero()))
            .collect();
        debug!(before = block.len(), after = gates.len(), "folded phases");
        Ok(SimplifiedBlock::unpermuted(gates, num_qubits))
    }
}

/// Check that `relabel` is a permutation of `0..num_qubits` and invert it.
pub(crate) fn invert_relabel(relabel: &[usize], num_qubits: usize) -> OptResult<Vec<usize>> {
    if relabel.len() != num_qubits {
        return Err(OptError::InvariantViolation(format!(
            "simplifier returned a relabeling of {} wires for {num_qubits} qubits",
            relabel.len()
        )));
    }
    Ok(quill_ir::invert_permutation(relabel)?)
}
