//! Commutation-state rewriter.
//!
//! A forward pass streams the gates of a circuit once. Pauli and Hadamard
//! gates are not placed immediately: they are recorded per wire as pending
//! corrections and pushed through later gates by conjugation, so that they
//! can cancel or change the kind of what follows. Placed gates go into a
//! per-wire list, and the tail of each list that later gates may still fuse
//! or cancel with forms that wire's *available window*. A window only ever
//! holds gates of one commutation type (Z-like or X-like).
//!
//! At the end of the pass the per-wire lists are linearised by
//! [`crate::schedule`], and the leftover NOT gates plus the wire permutation
//! picked up from CNOT/SWAP commutations are returned as a correction.

mod pending;
mod two_qubit;

#[cfg(test)]
mod tests;

use quill_ir::{Circuit, Gate, Phase, QubitId, permutation_as_swaps};
use tracing::trace;

use crate::error::{OptError, OptResult};
use crate::schedule::schedule;
use pending::PendingSet;

/// Arena slot of a placed gate.
///
/// A two-qubit gate owns one slot, referenced from both operand lists.
pub(crate) type Handle = usize;

/// Remove the first occurrence of `handle`. Returns whether it was present.
pub(crate) fn remove_handle(list: &mut Vec<Handle>, handle: Handle) -> bool {
    match list.iter().position(|&h| h == handle) {
        Some(pos) => {
            list.remove(pos);
            true
        }
        None => false,
    }
}

/// Which single-qubit phases a gate commutes with on a given wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CommutationType {
    /// Diagonal on the wire: Z phases, CZ legs, CNOT controls.
    Z,
    /// X-diagonal on the wire: X phases, CNOT targets.
    X,
}

impl CommutationType {
    /// The commutation type of `gate` on `wire`, if it has one.
    pub(crate) fn of(gate: &Gate, wire: usize) -> Option<Self> {
        match *gate {
            Gate::ZPhase { .. } | Gate::S { .. } | Gate::Cz { .. } => Some(CommutationType::Z),
            Gate::XPhase { .. } => Some(CommutationType::X),
            Gate::Cnot { control, .. } if control.index() == wire => Some(CommutationType::Z),
            Gate::Cnot { .. } => Some(CommutationType::X),
            Gate::H { .. } | Gate::Not { .. } | Gate::Swap { .. } => None,
        }
    }
}

/// What a forward pass did with one incoming gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RewriteOutcome {
    /// The gate was an identity.
    Dropped,
    /// The gate became (or toggled) a pending correction.
    Deferred,
    /// The gate merged into an available phase gate.
    Fused,
    /// The gate cancelled against an available gate.
    Cancelled,
    /// The gate was appended to its wires.
    Placed,
    /// Gates already placed were rewritten to absorb it.
    Rewritten,
}

/// State of one forward pass.
#[derive(Debug)]
pub(crate) struct ForwardPass {
    arena: Vec<Gate>,
    /// Placed gates per wire, in order.
    gates: Vec<Vec<Handle>>,
    /// Suffix of `gates` still open for fusion and cancellation.
    available: Vec<Vec<Handle>>,
    window: Vec<CommutationType>,
    hadamards: PendingSet,
    nots: PendingSet,
    zs: PendingSet,
    /// Wire to the logical qubit it currently carries.
    permutation: Vec<usize>,
    /// Inverse of `permutation`.
    wires: Vec<usize>,
    cz_minimization: bool,
}

impl ForwardPass {
    pub(crate) fn new(num_qubits: usize, cz_minimization: bool) -> Self {
        Self {
            arena: vec![],
            gates: vec![vec![]; num_qubits],
            available: vec![vec![]; num_qubits],
            window: vec![CommutationType::Z; num_qubits],
            hadamards: PendingSet::new(num_qubits),
            nots: PendingSet::new(num_qubits),
            zs: PendingSet::new(num_qubits),
            permutation: (0..num_qubits).collect(),
            wires: (0..num_qubits).collect(),
            cz_minimization,
        }
    }

    /// Feed one gate, expressed on logical qubits.
    pub(crate) fn parse_gate(&mut self, gate: Gate) -> OptResult<RewriteOutcome> {
        let wires = &self.wires;
        let gate = gate.map_qubits(|q| QubitId::from(wires[q.index()]));
        let outcome = match gate {
            Gate::H { target } => self.parse_hadamard(target.index()),
            Gate::Not { target } => {
                self.nots.toggle(target.index());
                RewriteOutcome::Deferred
            }
            Gate::ZPhase { target, .. } | Gate::S { target, .. } => {
                self.parse_z_phase(gate, target.index())
            }
            Gate::Cz { control, target } => self.parse_cz(control.index(), target.index()),
            Gate::Cnot { control, target } => self.parse_cnot(control.index(), target.index()),
            Gate::XPhase { .. } | Gate::Swap { .. } => {
                return Err(OptError::unsupported(&gate, "forward pass"));
            }
        };
        trace!(%gate, ?outcome, "parsed gate");
        Ok(outcome)
    }

    fn parse_hadamard(&mut self, t: usize) -> RewriteOutcome {
        if self.nots.contains(t) && !self.zs.contains(t) {
            self.nots.remove(t);
            self.zs.insert(t);
        } else if self.zs.contains(t) && !self.nots.contains(t) {
            self.zs.remove(t);
            self.nots.insert(t);
        }
        if !self.hadamards.contains(t) && self.rewrite_hsh(t) {
            return RewriteOutcome::Rewritten;
        }
        if self.hadamards.toggle(t) {
            RewriteOutcome::Deferred
        } else {
            RewriteOutcome::Cancelled
        }
    }

    /// Turn a placed `H · P` (P a quarter-turn phase) followed by the incoming
    /// Hadamard into `P† · H · P†`.
    fn rewrite_hsh(&mut self, t: usize) -> bool {
        let placed = &self.gates[t];
        let n = placed.len();
        if n < 2 || !matches!(self.arena[placed[n - 2]], Gate::H { .. }) {
            return false;
        }
        let last = placed[n - 1];
        let Some(phase) = self.arena[last].z_phase() else {
            return false;
        };
        if phase.denom() != 2 {
            return false;
        }
        let flipped = -phase;
        self.arena[last] = self.arena[last].with_z_phase(flipped);
        let before = self.alloc(Gate::zphase(QubitId::from(t), flipped));
        self.gates[t].insert(n - 2, before);
        true
    }

    fn parse_z_phase(&mut self, gate: Gate, t: usize) -> RewriteOutcome {
        let mut phase = gate.z_phase().unwrap_or_default();
        if self.zs.remove(t) {
            phase = phase + Phase::pi();
        }
        if phase.is_zero() {
            return RewriteOutcome::Dropped;
        }
        if self.nots.contains(t) {
            phase = -phase;
        }
        if phase.is_pi() {
            self.zs.toggle(t);
            return RewriteOutcome::Deferred;
        }
        let gate = gate.with_z_phase(phase);
        if self.hadamards.contains(t) {
            self.place_hadamard(t);
        }

        if self.window[t] == CommutationType::Z {
            let fusable = self.available[t]
                .iter()
                .position(|&h| self.arena[h].is_z_phase());
            if let Some(pos) = fusable {
                let other = self.available[t].remove(pos);
                remove_handle(&mut self.gates[t], other);
                let sum = phase + self.arena[other].z_phase().unwrap_or_default();
                if sum.is_zero() {
                    return RewriteOutcome::Cancelled;
                }
                if sum.is_pi() {
                    self.zs.toggle(t);
                } else {
                    self.add_single(t, Gate::zphase(QubitId::from(t), sum));
                }
                return RewriteOutcome::Fused;
            }
        } else {
            self.reset_window(t, CommutationType::Z);
        }
        self.add_single(t, gate);
        RewriteOutcome::Placed
    }

    fn parse_cz(&mut self, a: usize, b: usize) -> RewriteOutcome {
        let (t1, t2) = (a.min(b), a.max(b));
        if self.nots.contains(t1) {
            self.zs.toggle(t2);
        }
        if self.nots.contains(t2) {
            self.zs.toggle(t1);
        }
        match (self.hadamards.contains(t1), self.hadamards.contains(t2)) {
            (true, true) => {
                self.place_hadamard(t1);
                self.place_hadamard(t2);
                self.add_cz(t1, t2)
            }
            (false, false) => self.add_cz(t1, t2),
            // A Hadamard on one leg turns the CZ into a CNOT onto that leg.
            (true, false) => self.add_cnot(t2, t1),
            (false, true) => self.add_cnot(t1, t2),
        }
    }

    fn parse_cnot(&mut self, c: usize, t: usize) -> RewriteOutcome {
        if self.nots.contains(c) {
            self.nots.toggle(t);
        }
        if self.zs.contains(t) {
            self.zs.toggle(c);
        }
        match (self.hadamards.contains(c), self.hadamards.contains(t)) {
            (true, true) => self.add_cnot(t, c),
            (false, false) => self.add_cnot(c, t),
            (false, true) => self.add_cz(c.min(t), c.max(t)),
            (true, false) => {
                self.place_hadamard(c);
                self.add_cnot(c, t)
            }
        }
    }

    fn alloc(&mut self, gate: Gate) -> Handle {
        self.arena.push(gate);
        self.arena.len() - 1
    }

    fn place_hadamard(&mut self, t: usize) {
        let h = self.alloc(Gate::h(QubitId::from(t)));
        self.gates[t].push(h);
        self.hadamards.remove(t);
        self.reset_window(t, CommutationType::Z);
    }

    fn reset_window(&mut self, t: usize, ty: CommutationType) {
        self.available[t].clear();
        self.window[t] = ty;
    }

    fn add_single(&mut self, t: usize, gate: Gate) {
        let h = self.alloc(gate);
        self.gates[t].push(h);
        self.available[t].push(h);
    }

    fn add_two_qubit(&mut self, gate: Gate) {
        let h = self.alloc(gate);
        for q in gate.qubits() {
            self.gates[q.index()].push(h);
            self.available[q.index()].push(h);
        }
    }

    /// Remove a placed gate from every list of both its operands.
    fn unplace(&mut self, handle: Handle) {
        for q in self.arena[handle].qubits() {
            remove_handle(&mut self.gates[q.index()], handle);
            remove_handle(&mut self.available[q.index()], handle);
        }
    }

    /// Materialise the pending Hadamards and Z(π) gates, schedule, and split
    /// off the correction.
    pub(crate) fn finish(mut self, template: &Circuit) -> OptResult<(Circuit, Vec<Gate>)> {
        let pending_h: Vec<usize> = self.hadamards.iter().collect();
        for t in pending_h {
            self.place_hadamard(t);
        }
        let pending_z: Vec<usize> = self.zs.iter().collect();
        for t in pending_z {
            let h = self.alloc(Gate::z(QubitId::from(t)));
            self.gates[t].push(h);
        }

        let ordered = schedule(&self.arena, self.gates)?;
        let circuit = template.with_gates(ordered)?;

        let mut correction: Vec<Gate> = self
            .nots
            .iter()
            .map(|t| Gate::not(QubitId::from(t)))
            .collect();
        for (a, b) in permutation_as_swaps(&self.permutation)? {
            correction.push(Gate::swap(QubitId::from(a), QubitId::from(b)));
        }
        Ok((circuit, correction))
    }
}

/// Run one forward pass over `circuit`.
///
/// Returns the rewritten circuit and the correction (NOT gates followed by
/// SWAPs) that must be appended to it to recover the input's action.
pub fn forward_pass(circuit: &Circuit, cz_minimization: bool) -> OptResult<(Circuit, Vec<Gate>)> {
    if let Some(gate) = circuit
        .gates()
        .iter()
        .find(|g| matches!(g, Gate::XPhase { .. } | Gate::Swap { .. }))
    {
        return Err(OptError::unsupported(gate, "forward pass"));
    }
    let mut pass = ForwardPass::new(circuit.num_qubits(), cz_minimization);
    for &gate in circuit.gates() {
        pass.parse_gate(gate)?;
    }
    pass.finish(circuit)
}
