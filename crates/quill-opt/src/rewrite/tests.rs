use super::*;

fn q(i: u32) -> QubitId {
    QubitId(i)
}

fn run(num_qubits: u32, gates: &[Gate], cz_minimization: bool) -> (Vec<Gate>, Vec<Gate>) {
    let circuit = Circuit::from_gates("test", num_qubits, gates.iter().copied()).unwrap();
    let (out, correction) = forward_pass(&circuit, cz_minimization).unwrap();
    (out.into_gates(), correction)
}

#[test]
fn test_outcomes_on_one_wire() {
    let mut pass = ForwardPass::new(1, false);
    assert_eq!(pass.parse_gate(Gate::t(q(0))).unwrap(), RewriteOutcome::Placed);
    assert_eq!(pass.parse_gate(Gate::t(q(0))).unwrap(), RewriteOutcome::Fused);
    assert_eq!(
        pass.parse_gate(Gate::zphase(q(0), Phase::new(3, 2))).unwrap(),
        RewriteOutcome::Cancelled
    );
    assert_eq!(
        pass.parse_gate(Gate::zphase(q(0), Phase::zero())).unwrap(),
        RewriteOutcome::Dropped
    );
    assert_eq!(pass.parse_gate(Gate::not(q(0))).unwrap(), RewriteOutcome::Deferred);
    assert_eq!(pass.parse_gate(Gate::h(q(0))).unwrap(), RewriteOutcome::Deferred);
    assert_eq!(pass.parse_gate(Gate::h(q(0))).unwrap(), RewriteOutcome::Cancelled);
}

#[test]
fn test_hadamard_pair_cancels() {
    let (out, correction) = run(1, &[Gate::h(q(0)), Gate::h(q(0))], false);
    assert!(out.is_empty());
    assert!(correction.is_empty());
}

#[test]
fn test_not_through_hadamard_becomes_z() {
    let (out, correction) = run(1, &[Gate::not(q(0)), Gate::h(q(0))], false);
    assert_eq!(out, vec![Gate::h(q(0)), Gate::z(q(0))]);
    assert!(correction.is_empty());
}

#[test]
fn test_not_negates_later_phase() {
    let (out, correction) = run(1, &[Gate::not(q(0)), Gate::t(q(0))], false);
    assert_eq!(out, vec![Gate::tdg(q(0))]);
    assert_eq!(correction, vec![Gate::not(q(0))]);
}

#[test]
fn test_phase_fusion() {
    let (out, _) = run(1, &[Gate::t(q(0)), Gate::t(q(0))], false);
    assert_eq!(out, vec![Gate::zphase(q(0), Phase::new(1, 2))]);

    let (out, _) = run(1, &[Gate::t(q(0)), Gate::tdg(q(0))], false);
    assert!(out.is_empty());

    // Summing to π defers a Z, which is placed at the end.
    let (out, _) = run(1, &[Gate::s(q(0)), Gate::s(q(0))], false);
    assert_eq!(out, vec![Gate::z(q(0))]);
}

#[test]
fn test_phase_fuses_across_cz() {
    let gates = [Gate::t(q(0)), Gate::cz(q(0), q(1)), Gate::t(q(0))];
    let (out, _) = run(2, &gates, false);
    assert_eq!(out.len(), 2);
    assert!(out.contains(&Gate::zphase(q(0), Phase::new(1, 2))));
}

#[test]
fn test_hsh_rewrite() {
    let mut pass = ForwardPass::new(1, false);
    pass.parse_gate(Gate::h(q(0))).unwrap();
    pass.parse_gate(Gate::s(q(0))).unwrap();
    assert_eq!(pass.parse_gate(Gate::h(q(0))).unwrap(), RewriteOutcome::Rewritten);

    let (out, correction) = pass.finish(&Circuit::with_size("hsh", 1)).unwrap();
    assert_eq!(
        out.gates(),
        &[
            Gate::zphase(q(0), Phase::new(3, 2)),
            Gate::h(q(0)),
            Gate::sdg(q(0))
        ]
    );
    assert!(correction.is_empty());
}

#[test]
fn test_hadamard_turns_cz_into_cnot() {
    let gates = [Gate::h(q(1)), Gate::cz(q(0), q(1)), Gate::h(q(1))];
    let (out, _) = run(2, &gates, false);
    assert_eq!(out, vec![Gate::cnot(q(0), q(1))]);
}

#[test]
fn test_hadamard_on_target_turns_cnot_into_cz() {
    let gates = [Gate::h(q(1)), Gate::cnot(q(0), q(1))];
    let (out, _) = run(2, &gates, false);
    assert_eq!(out, vec![Gate::cz(q(0), q(1)), Gate::h(q(1))]);
}

#[test]
fn test_hadamard_on_control_is_placed() {
    let gates = [Gate::h(q(0)), Gate::cnot(q(0), q(1)), Gate::h(q(0))];
    let (out, _) = run(2, &gates, false);
    assert_eq!(out, gates.to_vec());
}

#[test]
fn test_cnot_and_cz_pairs_cancel() {
    let gates = [Gate::cnot(q(0), q(1)), Gate::cnot(q(0), q(1))];
    assert!(run(2, &gates, false).0.is_empty());

    let gates = [Gate::cz(q(1), q(0)), Gate::cz(q(0), q(1))];
    assert!(run(2, &gates, false).0.is_empty());
}

#[test]
fn test_antiparallel_cnots_become_swap() {
    let gates = [
        Gate::cnot(q(1), q(0)),
        Gate::cnot(q(0), q(1)),
        Gate::t(q(0)),
    ];
    let (out, correction) = run(2, &gates, false);
    assert_eq!(out, vec![Gate::cnot(q(0), q(1)), Gate::t(q(1))]);
    assert_eq!(correction, vec![Gate::swap(q(0), q(1))]);
}

#[test]
fn test_cz_absorbed_by_cnot_in_target_window() {
    let gates = [Gate::cnot(q(0), q(1)), Gate::cz(q(0), q(1))];

    let (out, _) = run(2, &gates, false);
    assert_eq!(out, gates.to_vec());

    let (out, correction) = run(2, &gates, true);
    assert_eq!(
        out,
        vec![
            Gate::s(q(0)),
            Gate::sdg(q(1)),
            Gate::cnot(q(0), q(1)),
            Gate::s(q(1))
        ]
    );
    assert!(correction.is_empty());
}

#[test]
fn test_cz_absorbed_by_cnot_behind_window() {
    // The T on the target closes the CNOT's window, but the CNOT is still
    // directly behind it.
    let gates = [Gate::cnot(q(0), q(1)), Gate::t(q(1)), Gate::cz(q(0), q(1))];
    let (out, _) = run(2, &gates, true);
    assert_eq!(
        out,
        vec![
            Gate::s(q(0)),
            Gate::sdg(q(1)),
            Gate::cnot(q(0), q(1)),
            Gate::t(q(1)),
            Gate::s(q(1))
        ]
    );
}

#[test]
fn test_rejects_unsupported_gates() {
    for gate in [
        Gate::xphase(q(0), Phase::new(1, 4)),
        Gate::swap(q(0), q(1)),
    ] {
        let circuit = Circuit::from_gates("bad", 2, [Gate::t(q(0)), gate]).unwrap();
        let err = forward_pass(&circuit, false).unwrap_err();
        assert!(matches!(err, OptError::UnsupportedGateKind { .. }));
        assert_eq!(circuit.num_gates(), 2);
    }
}

#[test]
fn test_commutation_type() {
    let cx = Gate::cnot(q(0), q(1));
    assert_eq!(CommutationType::of(&cx, 0), Some(CommutationType::Z));
    assert_eq!(CommutationType::of(&cx, 1), Some(CommutationType::X));
    assert_eq!(
        CommutationType::of(&Gate::xphase(q(0), Phase::new(1, 4)), 0),
        Some(CommutationType::X)
    );
    assert_eq!(CommutationType::of(&Gate::h(q(0)), 0), None);
}
