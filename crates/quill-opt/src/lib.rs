//! Quill Circuit Optimizer
//!
//! This crate shrinks Clifford+phase circuits built from Z phases, S, H, NOT,
//! CZ and CNOT. It offers two drivers:
//!
//! 1. **Fixpoint rewriting** ([`optimize`], [`optimize_separate`]): a
//!    commutation-aware forward pass pushes Pauli and Hadamard gates through
//!    the circuit, fuses phases and cancels two-qubit pairs. Passes are run
//!    forwards and backwards until the gate counts stop improving.
//! 2. **Phase blocks** ([`phase_block_optimize`]): the circuit is cut into
//!    maximal Hadamard-free regions which a [`PhasePolySimplifier`] rewrites
//!    as a whole.
//!
//! # Architecture
//!
//! ```text
//! Input Circuit
//!       │
//!       ▼
//! ┌─────────────┐
//! │ PassManager │ ◄── OptimizerConfig (level, max_iterations, pre_optimize)
//! └─────────────┘
//!       │
//!       ├── BasicOptimization ──────► forward_pass ◄─► schedule
//!       └── PhaseBlockOptimization ─► greedy extraction ─► PhasePolySimplifier
//!       │
//!       ▼
//! Output Circuit (same action, fewer gates)
//! ```
//!
//! # Example: Optimizing a circuit
//!
//! ```rust
//! use quill_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("example", 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.h(QubitId(0)).unwrap();
//! circuit.t(QubitId(1)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.t(QubitId(1)).unwrap();
//!
//! let optimized = quill_opt::optimize(&circuit).unwrap();
//! assert_eq!(optimized.num_gates(), 1);
//! assert_eq!(optimized.stats().t_count, 0);
//! ```
//!
//! # Optimization Levels
//!
//! | Level | Passes Included |
//! |-------|-----------------|
//! | 0 | None |
//! | 1 | [`BasicOptimization`] |
//! | 2 | [`PhaseBlockOptimization`] with pre-optimization |
//!
//! # Custom Passes
//!
//! Implement the [`Pass`] trait to create custom passes:
//!
//! ```rust
//! use quill_ir::Circuit;
//! use quill_opt::{OptResult, Pass};
//!
//! struct MyCustomPass;
//!
//! impl Pass for MyCustomPass {
//!     fn name(&self) -> &str { "my_custom_pass" }
//!
//!     fn run(&self, circuit: &mut Circuit) -> OptResult<()> {
//!         // Your pass logic here
//!         Ok(())
//!     }
//! }
//! ```

pub mod config;
pub mod error;
pub mod manager;
pub mod pass;
pub mod passes;
pub mod simplify;

mod extract;
mod fixpoint;
mod phase_block;
mod rewrite;
mod schedule;

use quill_ir::Circuit;

pub use config::OptimizerConfig;
pub use error::{OptError, OptResult};
pub use fixpoint::{DEFAULT_MAX_ITERATIONS, optimize_separate};
pub use manager::{PassManager, PassManagerBuilder};
pub use pass::Pass;
pub use passes::{BasicOptimization, PhaseBlockOptimization};
pub use phase_block::{phase_block_optimize, phase_block_optimize_with};
pub use rewrite::forward_pass;
pub use simplify::{Passthrough, PhaseFolding, PhasePolySimplifier, SimplifiedBlock};

/// Rewrite `circuit` to a fixpoint and append the correction.
///
/// SWAPs in the correction are emitted as CNOT triples, so the result only
/// uses gate kinds the input already allowed.
pub fn optimize(circuit: &Circuit) -> OptResult<Circuit> {
    fixpoint::optimize_rounds(circuit, DEFAULT_MAX_ITERATIONS)
}

/// Run the passes selected by `config` on a copy of `circuit`.
pub fn optimize_with(circuit: &Circuit, config: &OptimizerConfig) -> OptResult<Circuit> {
    let pm = PassManagerBuilder::new().with_config(config.clone()).build()?;
    let mut optimized = circuit.clone();
    pm.run(&mut optimized)?;
    Ok(optimized)
}
