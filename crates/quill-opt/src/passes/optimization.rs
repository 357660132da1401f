//! Passes wrapping the two optimization drivers.

use quill_ir::Circuit;

use crate::error::OptResult;
use crate::fixpoint::{DEFAULT_MAX_ITERATIONS, optimize_rounds};
use crate::pass::Pass;
use crate::phase_block::phase_block_optimize_with;
use crate::simplify::{PhaseFolding, PhasePolySimplifier};

/// Forward/backward rewriting until the gate counts stop improving.
///
/// The wire permutation and NOT gates collected by the rewriter are
/// appended to the circuit, SWAPs as CNOT triples.
#[derive(Debug, Clone, Copy)]
pub struct BasicOptimization {
    max_iterations: usize,
}

impl BasicOptimization {
    /// Create the pass with a cap on forward/backward rounds.
    pub fn new(max_iterations: usize) -> Self {
        Self { max_iterations }
    }
}

impl Default for BasicOptimization {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ITERATIONS)
    }
}

impl Pass for BasicOptimization {
    fn name(&self) -> &'static str {
        "BasicOptimization"
    }

    fn run(&self, circuit: &mut Circuit) -> OptResult<()> {
        *circuit = optimize_rounds(circuit, self.max_iterations)?;
        Ok(())
    }

    fn should_run(&self, circuit: &Circuit) -> bool {
        !circuit.is_empty()
    }
}

/// Phase-block optimization with a pluggable phase-polynomial simplifier.
#[derive(Debug, Clone)]
pub struct PhaseBlockOptimization<S = PhaseFolding> {
    simplifier: S,
    pre_optimize: bool,
    max_iterations: usize,
}

impl PhaseBlockOptimization {
    /// Create the pass with [`PhaseFolding`] and pre-optimization enabled.
    pub fn new() -> Self {
        Self::with_simplifier(PhaseFolding)
    }
}

impl Default for PhaseBlockOptimization {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PhasePolySimplifier> PhaseBlockOptimization<S> {
    /// Create the pass around `simplifier`.
    pub fn with_simplifier(simplifier: S) -> Self {
        Self {
            simplifier,
            pre_optimize: true,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Run the fixpoint driver before cutting blocks.
    #[must_use]
    pub fn with_pre_optimize(mut self, pre_optimize: bool) -> Self {
        self.pre_optimize = pre_optimize;
        self
    }

    /// Cap the rounds of the fixpoint driver used for pre-optimization.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

impl<S: PhasePolySimplifier> Pass for PhaseBlockOptimization<S> {
    fn name(&self) -> &'static str {
        "PhaseBlockOptimization"
    }

    fn run(&self, circuit: &mut Circuit) -> OptResult<()> {
        *circuit = phase_block_optimize_with(
            circuit,
            self.pre_optimize,
            self.max_iterations,
            &self.simplifier,
        )?;
        Ok(())
    }

    fn should_run(&self, circuit: &Circuit) -> bool {
        !circuit.is_empty()
    }
}
