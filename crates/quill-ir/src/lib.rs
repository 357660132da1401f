//! Quill Circuit Intermediate Representation
//!
//! This crate provides the gate-list circuit model consumed by the Quill
//! optimizer. Circuits are plain ordered sequences of gates over a fixed number
//! of qubits; there is no graph representation, because the optimizer builds
//! its own per-qubit arenas for each pass.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] addressing wires by dense index
//! - **Phases**: [`Phase`], an exact rational multiple of π reduced modulo 2π
//! - **Gates**: [`Gate`], a closed set of Z/X phase rotations, S, H, NOT, CZ,
//!   CNOT and SWAP
//! - **Circuit**: [`Circuit`] builder with operand validation
//! - **Statistics**: [`CircuitStats`] gate counts
//! - **Permutations**: [`permutation_as_swaps`] for turning a wire relabeling
//!   into explicit SWAP gates
//!
//! # Example: Building a Clifford+T circuit
//!
//! ```rust
//! use quill_ir::{Circuit, Phase, QubitId};
//!
//! let mut circuit = Circuit::with_size("toffoli_fragment", 2);
//! circuit.h(QubitId(1)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.tdg(QubitId(1)).unwrap();
//! circuit.zphase(Phase::new(3, 4), QubitId(0)).unwrap();
//!
//! let stats = circuit.stats();
//! assert_eq!(stats.two_qubit, 1);
//! assert_eq!(stats.t_count, 2);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `ZPhase` | 1 | Z rotation by a rational multiple of π |
//! | `XPhase` | 1 | X rotation by a rational multiple of π |
//! | `S`, `Sdg` | 1 | Quarter-turn Z phase and its adjoint |
//! | `H` | 1 | Hadamard gate |
//! | `Not` | 1 | Pauli X |
//! | `Cz` | 2 | Controlled-Z |
//! | `Cnot` | 2 | Controlled-NOT |
//! | `Swap` | 2 | SWAP gate |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod permutation;
pub mod phase;
pub mod qubit;
pub mod stats;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::Gate;
pub use permutation::{invert_permutation, permutation_as_swaps, validate_permutation};
pub use phase::Phase;
pub use qubit::QubitId;
pub use stats::CircuitStats;
