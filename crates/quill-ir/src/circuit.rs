//! High-level circuit builder API.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::phase::Phase;
use crate::qubit::QubitId;
use crate::stats::CircuitStats;

/// A quantum circuit: a qubit count and an ordered list of gates.
///
/// Every gate in a circuit refers only to qubits `0..num_qubits`, and the two
/// operands of a two-qubit gate are distinct. The builder methods enforce
/// this, so downstream passes can index per-qubit arenas without checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of qubits.
    num_qubits: u32,
    /// Gates in application order.
    gates: Vec<Gate>,
}

impl Circuit {
    /// Create an empty circuit on `num_qubits` qubits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            gates: vec![],
        }
    }

    /// Create a circuit from a gate list, validating every gate.
    pub fn from_gates(
        name: impl Into<String>,
        num_qubits: u32,
        gates: impl IntoIterator<Item = Gate>,
    ) -> IrResult<Self> {
        let mut circuit = Self::with_size(name, num_qubits);
        for gate in gates {
            circuit.apply(gate)?;
        }
        Ok(circuit)
    }

    /// A circuit with the same name and qubit count holding `gates`.
    pub fn with_gates(&self, gates: impl IntoIterator<Item = Gate>) -> IrResult<Self> {
        Self::from_gates(self.name.clone(), self.num_qubits, gates)
    }

    /// Add a single qubit to the circuit.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId(self.num_qubits);
        self.num_qubits += 1;
        id
    }

    /// Append a gate after checking its operands.
    pub fn apply(&mut self, gate: Gate) -> IrResult<&mut Self> {
        self.validate(&gate)?;
        self.gates.push(gate);
        Ok(self)
    }

    fn validate(&self, gate: &Gate) -> IrResult<()> {
        for qubit in gate.qubits() {
            if qubit.0 >= self.num_qubits {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: Some(gate.name().to_string()),
                });
            }
        }
        if gate.control() == Some(gate.target()) {
            return Err(IrError::DuplicateQubit {
                qubit: gate.target(),
                gate_name: Some(gate.name().to_string()),
            });
        }
        Ok(())
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::h(qubit))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::not(qubit))
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::z(qubit))
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::s(qubit))
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::sdg(qubit))
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::t(qubit))
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::tdg(qubit))
    }

    /// Apply a Z rotation.
    pub fn zphase(&mut self, phase: impl Into<Phase>, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::zphase(qubit, phase.into()))
    }

    /// Apply an X rotation.
    pub fn xphase(&mut self, phase: impl Into<Phase>, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::xphase(qubit, phase.into()))
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::cnot(control, target))
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::cz(control, target))
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::swap(q1, q2))
    }

    // =========================================================================
    // Whole-circuit operations
    // =========================================================================

    /// Append gates, decomposing each with [`Gate::to_basic_gates`].
    pub fn extend_basic<'a>(&mut self, gates: impl IntoIterator<Item = &'a Gate>) -> IrResult<()> {
        for gate in gates {
            for basic in gate.to_basic_gates() {
                self.apply(basic)?;
            }
        }
        Ok(())
    }

    /// The same gates in reverse order.
    ///
    /// Every gate kind in this IR is a symmetric matrix, so the reversed
    /// circuit implements the transpose of the original.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            name: self.name.clone(),
            num_qubits: self.num_qubits,
            gates: self.gates.iter().rev().copied().collect(),
        }
    }

    /// Gate statistics for this circuit.
    pub fn stats(&self) -> CircuitStats {
        CircuitStats::from_gates(&self.gates)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Get the number of gates.
    pub fn num_gates(&self) -> usize {
        self.gates.len()
    }

    /// Whether the circuit has no gates.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// The gates in application order.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Consume the circuit and return its gates.
    pub fn into_gates(self) -> Vec<Gate> {
        self.gates
    }
}
