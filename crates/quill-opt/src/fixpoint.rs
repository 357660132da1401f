//! Forward/backward fixpoint driver.

use quill_ir::{Circuit, Gate};
use tracing::{debug, instrument};

use crate::error::OptResult;
use crate::rewrite::forward_pass;

/// Default cap on forward/backward rounds.
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// Optimize until the gate metrics stop improving, returning the correction
/// separately.
///
/// The correction consists of NOT gates followed by SWAPs; appending it
/// (with [`Circuit::extend_basic`]) to the returned circuit gives a circuit
/// with the same action as `circuit`.
///
/// A backward pass is a forward pass over the reversed gate list. Every gate
/// kind the rewriter accepts is a symmetric matrix, so reversing a circuit
/// transposes its unitary and reversing twice restores it.
#[instrument(skip(circuit), fields(qubits = circuit.num_qubits(), gates = circuit.num_gates()))]
pub fn optimize_separate(
    circuit: &Circuit,
    max_iterations: usize,
) -> OptResult<(Circuit, Vec<Gate>)> {
    let (mut working, mut correction) = forward_pass(circuit, false)?;
    let mut count = working.stats();
    working.extend_basic(&correction)?;

    let mut cz_minimization = false;
    let mut round = 0;
    loop {
        let (mut backward, backward_correction) = forward_pass(&working.reversed(), cz_minimization)?;
        backward.extend_basic(&backward_correction)?;
        (working, correction) = forward_pass(&backward.reversed(), cz_minimization)?;
        round += 1;

        let stats = working.stats();
        debug!(round, cz_minimization, %stats, "fixpoint round");
        if cz_minimization && (!stats.improves_on(&count) || round >= max_iterations) {
            break;
        }
        working.extend_basic(&correction)?;
        count = stats;
        cz_minimization = true;
    }

    debug!(rounds = round, correction = correction.len(), "fixpoint reached");
    Ok((working, correction))
}

/// Optimize until the gate metrics stop improving.
///
/// The returned circuit includes the correction, with SWAPs decomposed into
/// CNOTs.
pub fn optimize_rounds(circuit: &Circuit, max_iterations: usize) -> OptResult<Circuit> {
    let (mut optimized, correction) = optimize_separate(circuit, max_iterations)?;
    optimized.extend_basic(&correction)?;
    Ok(optimized)
}
