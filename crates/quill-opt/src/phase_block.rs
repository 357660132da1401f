//! Phase-block driver.
//!
//! The circuit is cut into maximal Hadamard-free regions by the greedy
//! extractor. Each region is handed to a [`PhasePolySimplifier`] together
//! with whatever could be pulled back out of the previous region, and the
//! simplifier's wire relabeling is pushed onto everything not yet processed.

use quill_ir::{Circuit, Gate, QubitId, invert_permutation, permutation_as_swaps};
use tracing::{debug, instrument};

use crate::error::{OptError, OptResult};
use crate::extract::{GateLists, greedy_consume};
use crate::fixpoint::{DEFAULT_MAX_ITERATIONS, optimize_separate};
use crate::simplify::{PhaseFolding, PhasePolySimplifier, invert_relabel};

/// Run the phase-block optimizer with [`PhaseFolding`].
pub fn phase_block_optimize(circuit: &Circuit, pre_optimize: bool) -> OptResult<Circuit> {
    phase_block_optimize_with(circuit, pre_optimize, DEFAULT_MAX_ITERATIONS, &PhaseFolding)
}

/// Run the phase-block optimizer with a caller-supplied simplifier.
///
/// With `pre_optimize` the circuit is first run through
/// [`optimize_separate`] with at most `max_iterations` rounds; its NOT
/// gates and wire permutation are carried to the end of the output, and
/// only the pre-optimized circuit has to be Clifford+T. Without it, the
/// input may only contain Z phases that are multiples of π/4, S gates,
/// Hadamards, CNOTs and CZs.
#[instrument(
    skip(circuit, simplifier),
    fields(qubits = circuit.num_qubits(), gates = circuit.num_gates(), simplifier = simplifier.name())
)]
pub fn phase_block_optimize_with<S: PhasePolySimplifier + ?Sized>(
    circuit: &Circuit,
    pre_optimize: bool,
    max_iterations: usize,
    simplifier: &S,
) -> OptResult<Circuit> {
    if pre_optimize {
        check_rewriter_input(circuit.gates())?;
    } else {
        check_block_input(circuit.gates())?;
    }
    let n = circuit.num_qubits();

    let (working, correction) = if pre_optimize {
        optimize_separate(circuit, max_iterations)?
    } else {
        (circuit.clone(), vec![])
    };

    // Wire to the logical qubit it carries once the correction is applied.
    let mut carried: Vec<usize> = (0..n).collect();
    let mut nots = vec![];
    for gate in correction {
        match gate {
            Gate::Swap { control, target } => carried.swap(control.index(), target.index()),
            Gate::Not { .. } => nots.push(gate),
            other => {
                return Err(OptError::InvariantViolation(format!(
                    "unexpected {other} in fixpoint correction"
                )));
            }
        }
    }
    let mut permutation = invert_permutation(&carried)?;

    check_block_input(working.gates())?;
    let mut lists = GateLists::new(n);
    for &gate in working.gates() {
        lists.push(gate);
    }

    let mut consumed: Vec<Gate> = vec![];
    let mut block: Vec<Gate> = vec![];
    let mut hadamards: Vec<Gate> = vec![];
    let mut round = 0;
    while !lists.is_empty() {
        // Pull gates of the previous block back across the Hadamards that
        // ended it, so they can join the next block.
        let mut reverse = GateLists::new(n);
        for &h in &hadamards {
            reverse.push(h);
        }
        for &gate in block.iter().rev() {
            reverse.push(gate);
        }
        let (pulled, returned) = greedy_consume(&mut reverse)?;
        if returned.len() != hadamards.len() {
            return Err(OptError::InvariantViolation(format!(
                "reverse extraction returned {} Hadamards, expected {}",
                returned.len(),
                hadamards.len()
            )));
        }
        consumed.extend(reverse.remaining().into_iter().rev());
        consumed.extend(returned);

        let (next, exposed) = greedy_consume(&mut lists)?;
        if next.is_empty() && exposed.is_empty() {
            return Err(OptError::InvariantViolation(format!(
                "block extraction made no progress with {} gates left",
                lists.remaining().len()
            )));
        }
        let merged: Vec<Gate> = pulled.into_iter().rev().chain(next).collect();

        let simplified = simplifier.simplify(&merged, n)?;
        let inverse = invert_relabel(&simplified.relabel, n)?;
        round += 1;
        debug!(
            round,
            block = merged.len(),
            simplified = simplified.gates.len(),
            hadamards = exposed.len(),
            "phase block"
        );

        let relabel = |q: QubitId| QubitId::from(inverse[q.index()]);
        block = simplified.gates;
        lists.relabel(&inverse);
        hadamards = exposed.into_iter().map(|g| g.map_qubits(relabel)).collect();
        for not in &mut nots {
            *not = not.map_qubits(relabel);
        }
        permutation = simplified
            .relabel
            .iter()
            .map(|&w| permutation[w])
            .collect();
    }

    let mut output = consumed;
    output.extend(block);
    output.extend(hadamards);
    output.extend(nots);
    let mut result = working.with_gates(output)?;
    let swaps: Vec<Gate> = permutation_as_swaps(&permutation)?
        .into_iter()
        .map(|(a, b)| Gate::swap(QubitId::from(a), QubitId::from(b)))
        .collect();
    result.extend_basic(&swaps)?;
    debug!(rounds = round, gates = result.num_gates(), "phase blocks done");
    Ok(result)
}

/// Reject gates the block extractor cannot handle. NOT gates are only
/// accepted when the fixpoint driver runs first and moves them out.
/// Gate kinds the fixpoint driver can clean up before blocks are cut.
fn check_rewriter_input(gates: &[Gate]) -> OptResult<()> {
    match gates
        .iter()
        .find(|g| matches!(g, Gate::XPhase { .. } | Gate::Swap { .. }))
    {
        Some(gate) => Err(OptError::unsupported(gate, "phase-block optimizer")),
        None => Ok(()),
    }
}

fn check_block_input(gates: &[Gate]) -> OptResult<()> {
    for gate in gates {
        let supported = match *gate {
            Gate::ZPhase { phase, .. } => phase.is_clifford_t(),
            Gate::S { .. } | Gate::H { .. } | Gate::Cz { .. } | Gate::Cnot { .. } => true,
            Gate::Not { .. } | Gate::XPhase { .. } | Gate::Swap { .. } => false,
        };
        if !supported {
            return Err(OptError::unsupported(gate, "phase-block optimizer"));
        }
    }
    Ok(())
}
