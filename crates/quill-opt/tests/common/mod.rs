//! Shared helpers for the optimizer integration tests.

#![allow(dead_code)]

use num_complex::Complex64;
use proptest::prelude::*;
use quill_ir::{Circuit, Gate, Phase, QubitId};
use tracing_subscriber::EnvFilter;

/// Route optimizer logs to the test output, filtered by `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Dense unitary of `circuit`, column `b` being the image of basis state `b`.
/// Qubit `i` is bit `i` of the basis index.
pub fn unitary(circuit: &Circuit) -> Vec<Vec<Complex64>> {
    let dim = 1usize << circuit.num_qubits();
    (0..dim)
        .map(|b| {
            let mut state = vec![Complex64::new(0.0, 0.0); dim];
            state[b] = Complex64::new(1.0, 0.0);
            for gate in circuit.gates() {
                state = apply(&state, gate);
            }
            state
        })
        .collect()
}

fn apply(state: &[Complex64], gate: &Gate) -> Vec<Complex64> {
    let mut out = state.to_vec();
    let bit = |q: QubitId| 1usize << q.index();
    match *gate {
        Gate::ZPhase { target, .. } | Gate::S { target, .. } => {
            let phase = gate.z_phase().unwrap_or_default();
            let factor = Complex64::from_polar(1.0, phase.to_radians());
            for (i, amp) in out.iter_mut().enumerate() {
                if i & bit(target) != 0 {
                    *amp *= factor;
                }
            }
        }
        Gate::XPhase { target, phase } => {
            let mut s = apply(state, &Gate::h(target));
            s = apply(&s, &Gate::zphase(target, phase));
            return apply(&s, &Gate::h(target));
        }
        Gate::H { target } => {
            let r = std::f64::consts::FRAC_1_SQRT_2;
            for i in (0..state.len()).filter(|i| i & bit(target) == 0) {
                let j = i | bit(target);
                out[i] = (state[i] + state[j]) * r;
                out[j] = (state[i] - state[j]) * r;
            }
        }
        Gate::Not { target } => {
            for (i, &amp) in state.iter().enumerate() {
                out[i ^ bit(target)] = amp;
            }
        }
        Gate::Cz { control, target } => {
            for (i, amp) in out.iter_mut().enumerate() {
                if i & bit(control) != 0 && i & bit(target) != 0 {
                    *amp = -*amp;
                }
            }
        }
        Gate::Cnot { control, target } => {
            for (i, &amp) in state.iter().enumerate() {
                let j = if i & bit(control) != 0 { i ^ bit(target) } else { i };
                out[j] = amp;
            }
        }
        Gate::Swap { control, target } => {
            for (i, &amp) in state.iter().enumerate() {
                let differ = (i & bit(control) != 0) != (i & bit(target) != 0);
                let j = if differ { i ^ bit(control) ^ bit(target) } else { i };
                out[j] = amp;
            }
        }
    }
    out
}

/// Whether two circuits have the same unitary up to a global phase.
pub fn equivalent(a: &Circuit, b: &Circuit) -> bool {
    if a.num_qubits() != b.num_qubits() {
        return false;
    }
    let ua = unitary(a);
    let ub = unitary(b);
    let mut global: Option<Complex64> = None;
    for (col_a, col_b) in ua.iter().zip(&ub) {
        for (&x, &y) in col_a.iter().zip(col_b) {
            match global {
                None if x.norm() > 1e-9 => global = Some(y / x),
                None if y.norm() > 1e-9 => return false,
                None => {}
                Some(g) => {
                    if (x * g - y).norm() > 1e-7 {
                        return false;
                    }
                }
            }
        }
    }
    global.is_some_and(|g| (g.norm() - 1.0).abs() < 1e-7)
}

/// Gate operations for generated circuits.
#[derive(Debug, Clone)]
pub enum GateOp {
    H(u32),
    Not(u32),
    Phase(u32, i64),
    S(u32, bool),
    Cz(u32, u32),
    Cx(u32, u32),
}

impl GateOp {
    fn to_gate(&self) -> Gate {
        match *self {
            GateOp::H(q) => Gate::h(QubitId(q)),
            GateOp::Not(q) => Gate::not(QubitId(q)),
            GateOp::Phase(q, k) => Gate::zphase(QubitId(q), Phase::new(k, 4)),
            GateOp::S(q, false) => Gate::s(QubitId(q)),
            GateOp::S(q, true) => Gate::sdg(QubitId(q)),
            GateOp::Cz(a, b) => Gate::cz(QubitId(a), QubitId(b)),
            GateOp::Cx(a, b) => Gate::cnot(QubitId(a), QubitId(b)),
        }
    }
}

fn arb_pair(num_qubits: u32) -> impl Strategy<Value = (u32, u32)> {
    (0..num_qubits, 1..num_qubits).prop_map(move |(a, d)| (a, (a + d) % num_qubits))
}

/// Generate a random gate operation on `num_qubits >= 2` wires.
fn arb_gate_op(num_qubits: u32, with_not: bool) -> BoxedStrategy<GateOp> {
    let phase = (0..num_qubits, 1_i64..8).prop_map(|(q, k)| GateOp::Phase(q, k));
    let s = (0..num_qubits, any::<bool>()).prop_map(|(q, adj)| GateOp::S(q, adj));
    let cz = arb_pair(num_qubits).prop_map(|(a, b)| GateOp::Cz(a, b));
    let cx = arb_pair(num_qubits).prop_map(|(a, b)| GateOp::Cx(a, b));
    if with_not {
        prop_oneof![
            2 => (0..num_qubits).prop_map(GateOp::H),
            1 => (0..num_qubits).prop_map(GateOp::Not),
            2 => phase,
            1 => s,
            2 => cz,
            3 => cx,
        ]
        .boxed()
    } else {
        prop_oneof![
            2 => (0..num_qubits).prop_map(GateOp::H),
            2 => phase,
            1 => s,
            2 => cz,
            3 => cx,
        ]
        .boxed()
    }
}

/// Random Clifford+T circuits on 2 to 4 qubits.
pub fn arb_circuit(with_not: bool) -> impl Strategy<Value = Circuit> {
    (2_u32..=4).prop_flat_map(move |num_qubits| {
        prop::collection::vec(arb_gate_op(num_qubits, with_not), 0..=30).prop_map(move |ops| {
            Circuit::from_gates("random", num_qubits, ops.iter().map(GateOp::to_gate))
                .expect("generated gates are in range")
        })
    })
}
