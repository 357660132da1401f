//! Decomposition of qubit permutations into SWAPs.

use crate::error::{IrError, IrResult};

/// Check that `perm` is a bijection on `0..perm.len()`.
pub fn validate_permutation(perm: &[usize]) -> IrResult<()> {
    let mut seen = vec![false; perm.len()];
    for (wire, &logical) in perm.iter().enumerate() {
        if logical >= perm.len() {
            return Err(IrError::InvalidPermutation(format!(
                "wire {wire} maps to {logical}, out of range for {} qubits",
                perm.len()
            )));
        }
        if std::mem::replace(&mut seen[logical], true) {
            return Err(IrError::InvalidPermutation(format!(
                "qubit {logical} appears more than once"
            )));
        }
    }
    Ok(())
}

/// Invert a permutation: `inverse[perm[i]] == i`.
pub fn invert_permutation(perm: &[usize]) -> IrResult<Vec<usize>> {
    validate_permutation(perm)?;
    let mut inverse = vec![0; perm.len()];
    for (i, &p) in perm.iter().enumerate() {
        inverse[p] = i;
    }
    Ok(inverse)
}

/// SWAPs that undo a wire permutation.
///
/// `perm[w]` is the logical qubit currently held by wire `w`. Applying the
/// returned `(a, b)` swaps in order moves every logical qubit back onto the
/// wire of the same number. Each cycle of length `k` costs `k - 1` swaps.
pub fn permutation_as_swaps(perm: &[usize]) -> IrResult<Vec<(usize, usize)>> {
    let mut holds = perm.to_vec();
    let mut wire_of = invert_permutation(perm)?;
    let mut swaps = vec![];
    for i in 0..holds.len() {
        if holds[i] == i {
            continue;
        }
        let displaced = holds[i];
        let other = wire_of[i];
        swaps.push((i, other));
        holds[other] = displaced;
        holds[i] = i;
        wire_of[displaced] = other;
        wire_of[i] = i;
    }
    Ok(swaps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn apply_swaps(perm: &[usize], swaps: &[(usize, usize)]) -> Vec<usize> {
        let mut holds = perm.to_vec();
        for &(a, b) in swaps {
            holds.swap(a, b);
        }
        holds
    }

    #[test]
    fn test_identity_needs_no_swaps() {
        assert!(permutation_as_swaps(&[0, 1, 2, 3]).unwrap().is_empty());
        assert!(permutation_as_swaps(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_transposition() {
        assert_eq!(permutation_as_swaps(&[1, 0, 2]).unwrap(), vec![(0, 1)]);
    }

    #[test]
    fn test_three_cycle() {
        let perm = [2, 0, 1];
        let swaps = permutation_as_swaps(&perm).unwrap();
        assert_eq!(swaps.len(), 2);
        assert_eq!(apply_swaps(&perm, &swaps), vec![0, 1, 2]);
    }

    #[test]
    fn test_invalid_permutations() {
        assert!(matches!(
            permutation_as_swaps(&[0, 0]),
            Err(IrError::InvalidPermutation(_))
        ));
        assert!(matches!(
            permutation_as_swaps(&[0, 3, 1]),
            Err(IrError::InvalidPermutation(_))
        ));
    }

    #[test]
    fn test_invert() {
        assert_eq!(invert_permutation(&[2, 0, 1]).unwrap(), vec![1, 2, 0]);
    }

    proptest! {
        #[test]
        fn swaps_restore_identity(perm in (1usize..10).prop_flat_map(|n| {
            Just((0..n).collect::<Vec<_>>()).prop_shuffle()
        })) {
            let swaps = permutation_as_swaps(&perm).unwrap();
            prop_assert!(swaps.len() < perm.len());
            let restored = apply_swaps(&perm, &swaps);
            prop_assert_eq!(restored, (0..perm.len()).collect::<Vec<_>>());
        }
    }
}
