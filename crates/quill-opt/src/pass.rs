//! Pass trait and types for optimization passes.

use quill_ir::Circuit;

use crate::error::OptResult;

/// An optimization pass that operates on a circuit.
///
/// A pass either replaces the circuit with an equivalent one or leaves it
/// untouched and returns an error; it never leaves a partial rewrite behind.
pub trait Pass: Send + Sync {
    /// Get the name of this pass.
    fn name(&self) -> &str;

    /// Run the pass on the given circuit.
    fn run(&self, circuit: &mut Circuit) -> OptResult<()>;

    /// Check if this pass should run based on current state.
    ///
    /// This can be overridden to skip passes that are not needed.
    fn should_run(&self, _circuit: &Circuit) -> bool {
        true
    }
}
