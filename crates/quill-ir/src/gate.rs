//! Quantum gate types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::phase::Phase;
use crate::qubit::QubitId;

/// A gate together with its operands.
///
/// The variant set is closed: every pass matches on it exhaustively, so a new
/// kind cannot be added without every component deciding how to treat it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gate {
    /// Rotation about the Z axis by `phase` (diagonal, `diag(1, e^{iπ·phase})`).
    ZPhase {
        /// The qubit acted on.
        target: QubitId,
        /// The rotation angle as a multiple of π.
        phase: Phase,
    },
    /// Rotation about the X axis by `phase` (`H · ZPhase · H`).
    XPhase {
        /// The qubit acted on.
        target: QubitId,
        /// The rotation angle as a multiple of π.
        phase: Phase,
    },
    /// Quarter-turn Z phase, `S` or `S†`.
    S {
        /// The qubit acted on.
        target: QubitId,
        /// `true` for `S†` (phase 3π/2).
        adjoint: bool,
    },
    /// Hadamard gate.
    H {
        /// The qubit acted on.
        target: QubitId,
    },
    /// Pauli-X gate.
    Not {
        /// The qubit acted on.
        target: QubitId,
    },
    /// Controlled-Z gate. Symmetric in its operands.
    Cz {
        /// First operand.
        control: QubitId,
        /// Second operand.
        target: QubitId,
    },
    /// Controlled-NOT gate.
    Cnot {
        /// Control qubit.
        control: QubitId,
        /// Target qubit.
        target: QubitId,
    },
    /// SWAP gate.
    Swap {
        /// First operand.
        control: QubitId,
        /// Second operand.
        target: QubitId,
    },
}

impl Gate {
    /// Z rotation by `phase`.
    pub fn zphase(target: QubitId, phase: Phase) -> Self {
        Gate::ZPhase { target, phase }
    }

    /// X rotation by `phase`.
    pub fn xphase(target: QubitId, phase: Phase) -> Self {
        Gate::XPhase { target, phase }
    }

    /// Pauli-Z, represented as a π Z-rotation.
    pub fn z(target: QubitId) -> Self {
        Gate::zphase(target, Phase::pi())
    }

    /// S gate.
    pub fn s(target: QubitId) -> Self {
        Gate::S {
            target,
            adjoint: false,
        }
    }

    /// S-dagger gate.
    pub fn sdg(target: QubitId) -> Self {
        Gate::S {
            target,
            adjoint: true,
        }
    }

    /// T gate.
    pub fn t(target: QubitId) -> Self {
        Gate::zphase(target, Phase::new(1, 4))
    }

    /// T-dagger gate.
    pub fn tdg(target: QubitId) -> Self {
        Gate::zphase(target, Phase::new(7, 4))
    }

    /// Hadamard gate.
    pub fn h(target: QubitId) -> Self {
        Gate::H { target }
    }

    /// Pauli-X gate.
    pub fn not(target: QubitId) -> Self {
        Gate::Not { target }
    }

    /// Controlled-Z gate.
    pub fn cz(control: QubitId, target: QubitId) -> Self {
        Gate::Cz { control, target }
    }

    /// Controlled-NOT gate.
    pub fn cnot(control: QubitId, target: QubitId) -> Self {
        Gate::Cnot { control, target }
    }

    /// SWAP gate.
    pub fn swap(a: QubitId, b: QubitId) -> Self {
        Gate::Swap {
            control: a,
            target: b,
        }
    }

    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Gate::ZPhase { .. } => "zphase",
            Gate::XPhase { .. } => "xphase",
            Gate::S { adjoint: false, .. } => "s",
            Gate::S { adjoint: true, .. } => "sdg",
            Gate::H { .. } => "h",
            Gate::Not { .. } => "x",
            Gate::Cz { .. } => "cz",
            Gate::Cnot { .. } => "cx",
            Gate::Swap { .. } => "swap",
        }
    }

    /// The target qubit. Every gate has one.
    #[inline]
    pub fn target(&self) -> QubitId {
        match *self {
            Gate::ZPhase { target, .. }
            | Gate::XPhase { target, .. }
            | Gate::S { target, .. }
            | Gate::H { target }
            | Gate::Not { target }
            | Gate::Cz { target, .. }
            | Gate::Cnot { target, .. }
            | Gate::Swap { target, .. } => target,
        }
    }

    /// The control (first operand) of a two-qubit gate.
    #[inline]
    pub fn control(&self) -> Option<QubitId> {
        match *self {
            Gate::Cz { control, .. } | Gate::Cnot { control, .. } | Gate::Swap { control, .. } => {
                Some(control)
            }
            _ => None,
        }
    }

    /// The qubits this gate acts on, control first.
    pub fn qubits(&self) -> Vec<QubitId> {
        match self.control() {
            Some(control) => vec![control, self.target()],
            None => vec![self.target()],
        }
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        if self.is_two_qubit() { 2 } else { 1 }
    }

    /// Whether this gate acts on two qubits.
    #[inline]
    pub fn is_two_qubit(&self) -> bool {
        matches!(self, Gate::Cz { .. } | Gate::Cnot { .. } | Gate::Swap { .. })
    }

    /// For a two-qubit gate, the operand that is not `qubit`.
    pub fn partner(&self, qubit: QubitId) -> Option<QubitId> {
        let control = self.control()?;
        let target = self.target();
        if control == qubit {
            Some(target)
        } else if target == qubit {
            Some(control)
        } else {
            None
        }
    }

    /// The phase of a Z-like phase gate (`ZPhase` or `S`).
    pub fn z_phase(&self) -> Option<Phase> {
        match *self {
            Gate::ZPhase { phase, .. } => Some(phase),
            Gate::S { adjoint: false, .. } => Some(Phase::new(1, 2)),
            Gate::S { adjoint: true, .. } => Some(Phase::new(3, 2)),
            _ => None,
        }
    }

    /// The phase of any phase gate (Z-like or X-like).
    pub fn phase(&self) -> Option<Phase> {
        match *self {
            Gate::XPhase { phase, .. } => Some(phase),
            _ => self.z_phase(),
        }
    }

    /// Whether this is a Z-like phase gate.
    #[inline]
    pub fn is_z_phase(&self) -> bool {
        matches!(self, Gate::ZPhase { .. } | Gate::S { .. })
    }

    /// Re-phase a Z-like phase gate.
    ///
    /// An `S` stays an `S` as long as the new phase is a quarter turn, with its
    /// adjoint flag following the phase; otherwise the result is a `ZPhase`.
    /// Other gates are returned unchanged.
    #[must_use]
    pub fn with_z_phase(self, phase: Phase) -> Self {
        match self {
            Gate::S { target, .. } if phase.denom() == 2 => Gate::S {
                target,
                adjoint: phase.numer() != 1,
            },
            Gate::S { target, .. } | Gate::ZPhase { target, .. } => Gate::ZPhase { target, phase },
            other => other,
        }
    }

    /// Rename the operands of this gate through `f`.
    #[must_use]
    pub fn map_qubits(self, mut f: impl FnMut(QubitId) -> QubitId) -> Self {
        match self {
            Gate::ZPhase { target, phase } => Gate::ZPhase {
                target: f(target),
                phase,
            },
            Gate::XPhase { target, phase } => Gate::XPhase {
                target: f(target),
                phase,
            },
            Gate::S { target, adjoint } => Gate::S {
                target: f(target),
                adjoint,
            },
            Gate::H { target } => Gate::H { target: f(target) },
            Gate::Not { target } => Gate::Not { target: f(target) },
            Gate::Cz { control, target } => Gate::Cz {
                control: f(control),
                target: f(target),
            },
            Gate::Cnot { control, target } => Gate::Cnot {
                control: f(control),
                target: f(target),
            },
            Gate::Swap { control, target } => Gate::Swap {
                control: f(control),
                target: f(target),
            },
        }
    }

    /// Decompose into the elementary gate set used by the optimizer.
    ///
    /// A SWAP becomes three alternating CNOTs; every other gate is returned
    /// as is.
    pub fn to_basic_gates(&self) -> Vec<Gate> {
        match *self {
            Gate::Swap { control, target } => vec![
                Gate::cnot(control, target),
                Gate::cnot(target, control),
                Gate::cnot(control, target),
            ],
            other => vec![other],
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Gate::ZPhase { target, phase } | Gate::XPhase { target, phase } => {
                write!(f, "{}({phase}) {target}", self.name())
            }
            Gate::Cz { control, target }
            | Gate::Cnot { control, target }
            | Gate::Swap { control, target } => {
                write!(f, "{} {control}, {target}", self.name())
            }
            Gate::S { target, .. } | Gate::H { target } | Gate::Not { target } => {
                write!(f, "{} {target}", self.name())
            }
        }
    }
}
