/// Classic Feistel network over two 32 bit halves.
///
/// Every round computes `(left, right) = (right, left ^ f(right, key))`. After
/// the last round the halves come back swapped, `(right, left)`, so the same
/// network undoes itself when the round keys are read back to front.
pub(crate) fn classic_feistel_network_encrypt<const ROUND: usize, KEY, F>(
    left: u32,
    right: u32,
    keys: &[KEY; ROUND],
    perm: F,
) -> (u32, u32)
where
    F: Fn(u32, &KEY) -> u32,
{
    feistel_rounds(left, right, keys, |round| round, perm)
}

/// Same network, round `i` reads `keys[ROUND - 1 - i]`. The schedule itself is
/// never touched.
pub(crate) fn classic_feistel_network_decrypt<const ROUND: usize, KEY, F>(
    left: u32,
    right: u32,
    keys: &[KEY; ROUND],
    perm: F,
) -> (u32, u32)
where
    F: Fn(u32, &KEY) -> u32,
{
    feistel_rounds(left, right, keys, |round| ROUND - 1 - round, perm)
}

fn feistel_rounds<KEY, S, F>(left: u32, right: u32, keys: &[KEY], key_index: S, perm: F) -> (u32, u32)
where
    S: Fn(usize) -> usize,
    F: Fn(u32, &KEY) -> u32,
{
    let mut left = left;
    let mut right = right;
    for round in 0..keys.len() {
        (left, right) = (right, left ^ perm(right, &keys[key_index(round)]));
    }
    (right, left)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_round(half: u32, key: &u32) -> u32 {
        half.rotate_left(3).wrapping_add(*key) ^ 0xa5a5_a5a5
    }

    #[test]
    fn decrypt_undoes_encrypt() {
        let keys: [u32; 16] = core::array::from_fn(|i| (i as u32).wrapping_mul(0x9e37_79b9));
        let (l, r) = classic_feistel_network_encrypt(0x0123_4567, 0x89ab_cdef, &keys, toy_round);
        assert_ne!((l, r), (0x0123_4567, 0x89ab_cdef));
        let back = classic_feistel_network_decrypt(l, r, &keys, toy_round);
        assert_eq!(back, (0x0123_4567, 0x89ab_cdef));
    }

    #[test]
    fn single_round_swaps_at_the_end() {
        let (l, r) = classic_feistel_network_encrypt(1, 2, &[0u32], |half, _| half);
        // round: (left, right) = (2, 1 ^ 2), output swapped
        assert_eq!((l, r), (3, 2));
    }
}
