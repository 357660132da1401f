//! Pending single-qubit corrections.

/// A set of wires carrying a deferred Hadamard, NOT or Z(π).
///
/// Iteration is in ascending wire order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingSet {
    members: Vec<bool>,
}

impl PendingSet {
    pub(crate) fn new(num_qubits: usize) -> Self {
        Self {
            members: vec![false; num_qubits],
        }
    }

    #[inline]
    pub(crate) fn contains(&self, wire: usize) -> bool {
        self.members[wire]
    }

    /// Flip membership. Returns `true` if the wire is now a member.
    pub(crate) fn toggle(&mut self, wire: usize) -> bool {
        self.members[wire] = !self.members[wire];
        self.members[wire]
    }

    pub(crate) fn insert(&mut self, wire: usize) {
        self.members[wire] = true;
    }

    /// Returns `true` if the wire was a member.
    pub(crate) fn remove(&mut self, wire: usize) -> bool {
        std::mem::replace(&mut self.members[wire], false)
    }

    /// Exchange the membership of two wires.
    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.members.swap(a, b);
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.members
            .iter()
            .enumerate()
            .filter_map(|(wire, &member)| member.then_some(wire))
    }
}
