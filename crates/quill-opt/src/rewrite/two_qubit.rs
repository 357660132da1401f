//! Cancellation and commutation rules for CZ and CNOT.

use quill_ir::{Gate, QubitId};

use super::{CommutationType, ForwardPass, Handle, RewriteOutcome, remove_handle};

fn is_cnot(gate: &Gate, c: usize, t: usize) -> bool {
    matches!(*gate, Gate::Cnot { control, target } if control.index() == c && target.index() == t)
}

fn is_cz(gate: &Gate, t1: usize, t2: usize) -> bool {
    matches!(*gate, Gate::Cz { control, target } if control.index() == t1 && target.index() == t2)
}

/// Where a CNOT was found for absorbing an incoming CZ.
enum CnotSite {
    /// In the target's X-type window.
    TargetWindow,
    /// In the run of CNOTs onto the target just behind its Z-type window.
    BehindWindow,
}

impl ForwardPass {
    /// Place a CZ on `t1 < t2`, cancelling or absorbing it where possible.
    pub(super) fn add_cz(&mut self, t1: usize, t2: usize) -> RewriteOutcome {
        if self.cz_minimization {
            if let Some((c, t, g, site)) = self.find_cnot_for_cz(t1, t2) {
                self.absorb_cz(c, t, g, site);
                return RewriteOutcome::Rewritten;
            }
        }

        for q in [t1, t2] {
            if self.window[q] == CommutationType::X {
                self.reset_window(q, CommutationType::Z);
            }
        }

        let candidate = self.available[t1]
            .iter()
            .rev()
            .copied()
            .find(|&h| is_cz(&self.arena[h], t1, t2));
        if let Some(g) = candidate {
            if self.available[t2].contains(&g) {
                self.unplace(g);
                return RewriteOutcome::Cancelled;
            }
        }

        self.add_two_qubit(Gate::cz(QubitId::from(t1), QubitId::from(t2)));
        RewriteOutcome::Placed
    }

    /// Look for an available CNOT between the CZ's operands that the CZ can be
    /// commuted next to.
    fn find_cnot_for_cz(&self, t1: usize, t2: usize) -> Option<(usize, usize, Handle, CnotSite)> {
        for (c, t) in [(t1, t2), (t2, t1)] {
            for (pos, &g) in self.available[c].iter().enumerate() {
                if !is_cnot(&self.arena[g], c, t) {
                    continue;
                }
                match self.window[t] {
                    CommutationType::X => {
                        if self.available[t].contains(&g) {
                            return Some((c, t, g, CnotSite::TargetWindow));
                        }
                    }
                    CommutationType::Z => {
                        let Some(skipped) = self.position_in_cnot_run(t, g) else {
                            continue;
                        };
                        // Moving the CNOT forward past other CNOTs onto `t` is
                        // only sound while nothing two-qubit follows it on `c`.
                        let blocked = skipped
                            && self.available[c][pos + 1..]
                                .iter()
                                .any(|&h| self.arena[h].is_two_qubit());
                        if !blocked {
                            return Some((c, t, g, CnotSite::BehindWindow));
                        }
                    }
                }
            }
        }
        None
    }

    /// Scan backwards from the start of `t`'s window over CNOTs targeting `t`.
    ///
    /// Returns `Some(skipped)` when `g` is in that run, where `skipped` says
    /// whether other CNOTs of the run follow it.
    fn position_in_cnot_run(&self, t: usize, g: Handle) -> Option<bool> {
        let placed = &self.gates[t];
        let end = placed.len().saturating_sub(self.available[t].len());
        for (k, &h) in placed[..end].iter().enumerate().rev() {
            if !matches!(self.arena[h], Gate::Cnot { target, .. } if target.index() == t) {
                return None;
            }
            if h == g {
                return Some(k + 1 < end);
            }
        }
        None
    }

    /// Apply `CNOT(c,t) · CZ(c,t) = S†(t) · CNOT(c,t) · S(t) · S(c)`, in
    /// circuit order.
    fn absorb_cz(&mut self, c: usize, t: usize, g: Handle, site: CnotSite) {
        let sdg_t = self.alloc(Gate::sdg(QubitId::from(t)));
        match site {
            CnotSite::TargetWindow => {
                self.reset_window(t, CommutationType::Z);
                remove_handle(&mut self.gates[t], g);
                remove_handle(&mut self.gates[c], g);
                remove_handle(&mut self.available[c], g);
                self.gates[t].push(sdg_t);
                self.gates[t].push(g);
                self.gates[c].push(g);
                self.available[c].push(g);
            }
            CnotSite::BehindWindow => {
                remove_handle(&mut self.gates[t], g);
                let at = self.gates[t]
                    .len()
                    .saturating_sub(self.available[t].len());
                self.gates[t].insert(at, sdg_t);
                self.gates[t].insert(at + 1, g);
            }
        }
        self.add_single(t, Gate::s(QubitId::from(t)));
        self.add_single(c, Gate::s(QubitId::from(c)));
    }

    /// Place a CNOT, cancelling it or trading an anti-parallel pair for a
    /// wire swap where possible.
    pub(super) fn add_cnot(&mut self, c: usize, t: usize) -> RewriteOutcome {
        if self.window[c] == CommutationType::X {
            if self.window[t] == CommutationType::Z && self.commute_antiparallel(c, t) {
                return RewriteOutcome::Rewritten;
            }
            self.reset_window(c, CommutationType::Z);
        }
        if self.window[t] == CommutationType::Z {
            self.reset_window(t, CommutationType::X);
        }

        let candidate = self.available[c]
            .iter()
            .rev()
            .copied()
            .find(|&h| is_cnot(&self.arena[h], c, t));
        if let Some(g) = candidate {
            if self.available[t].contains(&g) {
                self.unplace(g);
                return RewriteOutcome::Cancelled;
            }
        }

        self.add_two_qubit(Gate::cnot(QubitId::from(c), QubitId::from(t)));
        RewriteOutcome::Placed
    }

    /// `CNOT(t,c)` then `CNOT(c,t)` equals `CNOT(c,t)` then `SWAP(c,t)`; the
    /// swap is recorded in the permutation instead of being placed.
    fn commute_antiparallel(&mut self, c: usize, t: usize) -> bool {
        let found = self.available[c]
            .iter()
            .rev()
            .copied()
            .find(|&h| is_cnot(&self.arena[h], t, c));
        let Some(g) = found else {
            return false;
        };
        if !self.available[t].contains(&g) {
            return false;
        }

        remove_handle(&mut self.gates[c], g);
        remove_handle(&mut self.gates[t], g);
        let cnot = self.alloc(Gate::cnot(QubitId::from(c), QubitId::from(t)));
        self.gates[c].push(cnot);
        self.gates[t].push(cnot);
        self.window[c] = CommutationType::Z;
        self.window[t] = CommutationType::X;
        self.available[c] = vec![cnot];
        self.available[t] = vec![cnot];

        self.permutation.swap(c, t);
        self.wires[self.permutation[c]] = c;
        self.wires[self.permutation[t]] = t;
        self.hadamards.swap(c, t);
        self.nots.swap(c, t);
        self.zs.swap(c, t);
        true
    }
}
