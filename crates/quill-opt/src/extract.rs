//! Greedy extraction of phase-polynomial blocks.
//!
//! A phase-polynomial block is a region of CNOT, CZ and Z-phase gates with
//! no Hadamard inside. [`greedy_consume`] pulls such a region off the front
//! of a circuit held as per-wire gate lists: a gate is taken as soon as every
//! gate before it on each of its wires has been taken or commutes with it.
//! When everything left is stuck behind a Hadamard, gates just behind that
//! Hadamard are moved across it by conjugation where the result still fits
//! the block.

use quill_ir::{Gate, QubitId};
use rustc_hash::FxHashSet;

use crate::error::{OptError, OptResult};
use crate::rewrite::{CommutationType, Handle, remove_handle};

/// A circuit stored as per-wire lists of arena handles.
///
/// Handles are assigned in push order, so comparing two handles compares
/// circuit positions.
#[derive(Debug, Clone)]
pub(crate) struct GateLists {
    arena: Vec<Gate>,
    lists: Vec<Vec<Handle>>,
}

impl GateLists {
    pub(crate) fn new(num_qubits: usize) -> Self {
        Self {
            arena: vec![],
            lists: vec![vec![]; num_qubits],
        }
    }

    /// Append a gate at the end of every wire it acts on.
    pub(crate) fn push(&mut self, gate: Gate) -> Handle {
        let handle = self.arena.len();
        self.arena.push(gate);
        for q in gate.qubits() {
            self.lists[q.index()].push(handle);
        }
        handle
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.lists.iter().all(Vec::is_empty)
    }

    pub(crate) fn num_qubits(&self) -> usize {
        self.lists.len()
    }

    /// Gates still in the lists, each once, in circuit order.
    pub(crate) fn remaining(&self) -> Vec<Gate> {
        let mut handles: Vec<Handle> = self.lists.iter().flatten().copied().collect();
        handles.sort_unstable();
        handles.dedup();
        handles.into_iter().map(|h| self.arena[h]).collect()
    }

    /// Move the content of every wire `w` to wire `inverse[w]`.
    pub(crate) fn relabel(&mut self, inverse: &[usize]) {
        let mut lists = vec![vec![]; self.lists.len()];
        for (wire, list) in self.lists.drain(..).enumerate() {
            lists[inverse[wire]] = list;
        }
        self.lists = lists;
        for gate in &mut self.arena {
            *gate = gate.map_qubits(|q| QubitId::from(inverse[q.index()]));
        }
    }

    fn remove(&mut self, handle: Handle) {
        for q in self.arena[handle].qubits() {
            remove_handle(&mut self.lists[q.index()], handle);
        }
    }

    fn front(&self, wire: usize) -> Option<Handle> {
        self.lists[wire].first().copied()
    }
}

fn is_hadamard(gate: &Gate) -> bool {
    matches!(gate, Gate::H { .. })
}

fn opposite(ty: CommutationType) -> CommutationType {
    match ty {
        CommutationType::Z => CommutationType::X,
        CommutationType::X => CommutationType::Z,
    }
}

/// Bookkeeping for one sweep over the wires.
struct Sweep {
    /// First Hadamard met on each wire.
    blocked: Vec<Option<Handle>>,
    /// Commutation type of the gates taken from each wire, if any were.
    wire_type: Vec<Option<CommutationType>>,
    /// Two-qubit gates reachable from at least one side.
    seen: FxHashSet<Handle>,
}

impl Sweep {
    fn is_behind_hadamard(&self, wire: usize, handle: Handle) -> bool {
        self.blocked[wire].is_some_and(|had| handle > had)
    }
}

/// Extract one maximal phase-polynomial block from the front of `lists`.
///
/// Returns the block and the Hadamards that are left at the front of the
/// wires afterwards; both are removed from `lists`.
pub(crate) fn greedy_consume(lists: &mut GateLists) -> OptResult<(Vec<Gate>, Vec<Gate>)> {
    let n = lists.num_qubits();
    let mut block = vec![];

    loop {
        let mut sweep = Sweep {
            blocked: vec![None; n],
            wire_type: vec![None; n],
            seen: FxHashSet::default(),
        };
        let mut ready: Vec<Handle> = vec![];

        for q in 0..n {
            let Some(head) = lists.front(q) else {
                continue;
            };
            if is_hadamard(&lists.arena[head]) {
                sweep.blocked[q] = Some(head);
                continue;
            }
            let ty = CommutationType::of(&lists.arena[head], q);
            sweep.wire_type[q] = ty;
            for &h in &lists.lists[q] {
                let gate = &lists.arena[h];
                if is_hadamard(gate) {
                    sweep.blocked[q] = Some(h);
                    break;
                }
                if CommutationType::of(gate, q) != ty {
                    break;
                }
                if !gate.is_two_qubit() || sweep.seen.contains(&h) {
                    ready.push(h);
                } else {
                    sweep.seen.insert(h);
                }
            }
        }

        if !ready.is_empty() {
            for h in ready {
                block.push(lists.arena[h]);
                lists.remove(h);
            }
            continue;
        }

        // Nothing is directly reachable. Look behind the blocking Hadamards.
        let mut candidates: Vec<Handle> = vec![];
        let mut cancelled_pair = false;
        for q in 0..n {
            let Some(had) = sweep.blocked[q] else {
                continue;
            };
            let Some(i) = lists.lists[q].iter().position(|&h| h == had) else {
                continue;
            };
            let Some(&first) = lists.lists[q].get(i + 1) else {
                continue;
            };
            if is_hadamard(&lists.arena[first]) {
                lists.lists[q].drain(i..i + 2);
                cancelled_pair = true;
                break;
            }

            let Some(right) = CommutationType::of(&lists.arena[first], q) else {
                continue;
            };
            let left = sweep.wire_type[q].unwrap_or(opposite(right));
            // Crossing the Hadamard flips the type, so only the opposite type
            // can join what is already on the left.
            if left == right {
                continue;
            }
            for &h in &lists.lists[q][i + 1..] {
                let gate = &lists.arena[h];
                if is_hadamard(gate) {
                    break;
                }
                let ty = CommutationType::of(gate, q);
                if !gate.is_two_qubit() {
                    if ty == Some(right) {
                        continue;
                    }
                    break;
                }
                if ty != Some(right) {
                    break;
                }
                if !sweep.seen.contains(&h) {
                    // A CZ here would sit behind Hadamards on both legs.
                    if matches!(gate, Gate::Cnot { .. }) {
                        sweep.seen.insert(h);
                    }
                } else if !candidates.contains(&h) {
                    candidates.push(h);
                }
            }
        }
        if cancelled_pair {
            continue;
        }

        let mut converted = false;
        for h in candidates {
            let gate = lists.arena[h];
            let replacement = match gate {
                Gate::Cz { control, target } => {
                    let (c, t) = (control.index(), target.index());
                    let (q, q2) = if sweep.is_behind_hadamard(t, h) {
                        (t, c)
                    } else {
                        (c, t)
                    };
                    if sweep.is_behind_hadamard(q2, h) {
                        return Err(OptError::InvariantViolation(format!(
                            "{gate} is behind Hadamards on both wires"
                        )));
                    }
                    Gate::cnot(QubitId::from(q2), QubitId::from(q))
                }
                Gate::Cnot { control, target } => {
                    let behind_target = sweep.is_behind_hadamard(target.index(), h);
                    let behind_control = sweep.is_behind_hadamard(control.index(), h);
                    match (behind_control, behind_target) {
                        (true, true) => Gate::cnot(target, control),
                        (false, true) => Gate::cz(control, target),
                        _ => continue,
                    }
                }
                _ => continue,
            };
            lists.remove(h);
            block.push(replacement);
            converted = true;
        }
        if !converted {
            break;
        }
    }

    let mut hadamards = vec![];
    for q in 0..n {
        if let Some(h) = lists.front(q) {
            if is_hadamard(&lists.arena[h]) {
                lists.lists[q].remove(0);
                hadamards.push(lists.arena[h]);
            }
        }
    }
    Ok((block, hadamards))
}
