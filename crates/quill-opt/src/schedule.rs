//! Topological scheduling of per-wire gate lists.

use std::collections::VecDeque;

use quill_ir::{Gate, QubitId};
use rustc_hash::FxHashSet;

use crate::error::{OptError, OptResult};
use crate::rewrite::{CommutationType, Handle};

/// Linearise per-wire lists of arena handles into one gate sequence.
///
/// Each two-qubit gate appears in the lists of both its operands under the
/// same handle and is emitted once, when it has reached the front on both
/// sides. Gates that commute with a waiting two-qubit head on its wire are
/// pulled forward so that a pair that is not adjacent on one side does not
/// stall the rest of that wire.
pub(crate) fn schedule(arena: &[Gate], lists: Vec<Vec<Handle>>) -> OptResult<Vec<Gate>> {
    let mut lists: Vec<VecDeque<Handle>> = lists.into_iter().map(VecDeque::from).collect();
    let mut output = Vec::with_capacity(arena.len());

    while lists.iter().any(|l| !l.is_empty()) {
        let emitted_before = output.len();
        let mut seen: FxHashSet<Handle> = FxHashSet::default();

        for q in 0..lists.len() {
            while let Some(&head) = lists[q].front() {
                let gate = arena[head];
                if !gate.is_two_qubit() {
                    output.push(gate);
                    lists[q].pop_front();
                    continue;
                }
                if seen.remove(&head) {
                    remove_from_partner(&mut lists, &gate, q, head)?;
                    output.push(gate);
                    lists[q].pop_front();
                    continue;
                }

                seen.insert(head);
                let ty = CommutationType::of(&gate, q);
                let mut k = 1;
                while k < lists[q].len() {
                    let handle = lists[q][k];
                    let next = arena[handle];
                    if !next.is_two_qubit() {
                        if CommutationType::of(&next, q) == ty {
                            output.push(next);
                            lists[q].remove(k);
                            continue;
                        }
                        break;
                    }
                    if CommutationType::of(&next, q) != ty {
                        break;
                    }
                    if seen.remove(&handle) {
                        remove_from_partner(&mut lists, &next, q, handle)?;
                        output.push(next);
                        lists[q].remove(k);
                        continue;
                    }
                    seen.insert(handle);
                    k += 1;
                }
                break;
            }
        }

        if output.len() == emitted_before {
            let left: usize = lists.iter().map(VecDeque::len).sum();
            return Err(OptError::InvariantViolation(format!(
                "scheduler stalled with {left} gate entries left; per-wire orders are cyclic"
            )));
        }
    }

    Ok(output)
}

fn remove_from_partner(
    lists: &mut [VecDeque<Handle>],
    gate: &Gate,
    wire: usize,
    handle: Handle,
) -> OptResult<()> {
    let partner = gate
        .partner(QubitId::from(wire))
        .map(QubitId::index)
        .ok_or_else(|| {
            OptError::InvariantViolation(format!("{gate} is listed on wire {wire} it does not act on"))
        })?;
    let pos = lists[partner]
        .iter()
        .position(|&h| h == handle)
        .ok_or_else(|| {
            OptError::InvariantViolation(format!("{gate} is missing from the list of wire {partner}"))
        })?;
    lists[partner].remove(pos);
    Ok(())
}
