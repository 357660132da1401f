//! Pass manager for orchestrating optimization.

use tracing::{debug, info, instrument};

use quill_ir::Circuit;

use crate::config::OptimizerConfig;
use crate::error::OptResult;
use crate::pass::Pass;
use crate::passes::{BasicOptimization, PhaseBlockOptimization};

/// Manages and executes a sequence of optimization passes.
pub struct PassManager {
    /// The passes to execute, in order.
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    /// Create a new empty pass manager.
    pub fn new() -> Self {
        Self { passes: vec![] }
    }

    /// Add a pass to the manager.
    pub fn add_pass(&mut self, pass: impl Pass + 'static) {
        self.passes.push(Box::new(pass));
    }

    /// Run all passes on the given circuit.
    ///
    /// On error the circuit holds the result of the last pass that
    /// succeeded.
    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    pub fn run(&self, circuit: &mut Circuit) -> OptResult<()> {
        info!(
            "Running pass manager with {} passes on circuit with {} qubits, {}",
            self.passes.len(),
            circuit.num_qubits(),
            circuit.stats()
        );

        for pass in &self.passes {
            if pass.should_run(circuit) {
                debug!("Running pass: {}", pass.name());
                pass.run(circuit)?;
                debug!("Pass {} completed, {}", pass.name(), circuit.stats());
            } else {
                debug!("Skipping pass: {}", pass.name());
            }
        }

        info!("Pass manager completed, {}", circuit.stats());

        Ok(())
    }

    /// Get the number of passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Check if the manager has no passes.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Names of the passes, in run order.
    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.name()).collect()
    }
}

impl Default for PassManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating pass managers with preset configurations.
pub struct PassManagerBuilder {
    config: OptimizerConfig,
}

impl PassManagerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: OptimizerConfig::default(),
        }
    }

    /// Set the optimization level.
    ///
    /// - Level 0: No optimization
    /// - Level 1: Forward/backward rewriting to a fixpoint
    /// - Level 2: Phase-block optimization (default)
    #[must_use]
    pub fn with_optimization_level(mut self, level: u8) -> Self {
        self.config.optimization_level = level.min(crate::config::MAX_OPTIMIZATION_LEVEL);
        self
    }

    /// Take every setting from `config`.
    #[must_use]
    pub fn with_config(mut self, config: OptimizerConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the pass manager.
    pub fn build(self) -> OptResult<PassManager> {
        self.config.validate()?;
        let mut pm = PassManager::new();

        match self.config.optimization_level {
            0 => {}
            1 => pm.add_pass(BasicOptimization::new(self.config.max_iterations)),
            _ => pm.add_pass(
                PhaseBlockOptimization::new()
                    .with_pre_optimize(self.config.pre_optimize)
                    .with_max_iterations(self.config.max_iterations),
            ),
        }

        Ok(pm)
    }
}

impl Default for PassManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_ir::QubitId;

    #[test]
    fn test_empty_pass_manager() {
        let pm = PassManager::new();
        assert!(pm.is_empty());
        assert_eq!(pm.len(), 0);
    }

    #[test]
    fn test_pass_manager_run() {
        let pm = PassManager::new();

        let mut circuit = Circuit::with_size("test", 2);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();

        pm.run(&mut circuit).unwrap();
        assert_eq!(circuit.num_gates(), 2);
    }

    #[test]
    fn test_pass_manager_builder_levels() {
        let pm = PassManagerBuilder::new()
            .with_optimization_level(0)
            .build()
            .unwrap();
        assert!(pm.is_empty());

        let pm = PassManagerBuilder::new()
            .with_optimization_level(1)
            .build()
            .unwrap();
        assert_eq!(pm.pass_names(), vec!["BasicOptimization"]);

        let pm = PassManagerBuilder::new()
            .with_optimization_level(7)
            .build()
            .unwrap();
        assert_eq!(pm.pass_names(), vec!["PhaseBlockOptimization"]);
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        let config = OptimizerConfig {
            max_iterations: 0,
            ..OptimizerConfig::default()
        };
        assert!(PassManagerBuilder::new().with_config(config).build().is_err());
    }

    #[test]
    fn test_builder_runs_optimization() {
        let pm = PassManagerBuilder::new().build().unwrap();

        let mut circuit = Circuit::with_size("cancel", 2);
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.h(QubitId(1)).unwrap();
        circuit.h(QubitId(1)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();

        pm.run(&mut circuit).unwrap();
        assert!(circuit.is_empty());
    }
}
