use crate::Integrity::Merkle_Damgard::{merkle_damgard, HashFunction, MerkleDamgard, BLOCK_SIZE};

pub const DIGEST_SIZE: usize = 20;

const IV: [u32; 5] = [0x67452301, 0xEFCDAB89, 0x98BADCFE, 0x10325476, 0xC3D2E1F0];

/// Round function and constant for step `i`: choose, parity, majority, then
/// parity again over the last twenty steps.
pub fn sha_1_constants(i: usize, b: u32, c: u32, d: u32) -> (u32, u32) {
    match i {
        0..=19 => ((b & c) | (!b & d), 0x5A827999),
        20..=39 => (b ^ c ^ d, 0x6ED9EBA1),
        40..=59 => ((b & c) | (b & d) | (c & d), 0x8F1BBCDC),
        60..=79 => (b ^ c ^ d, 0xCA62C1D6),
        _ => unreachable!("SHA-1 has 80 steps, got step {i}"),
    }
}

fn sha1_comp_fun(state: &mut [u32; 5], chunk: &[u8; BLOCK_SIZE]) {
    let [mut a, mut b, mut c, mut d, mut e]: [u32; 5] = *state;
    let mut words: [u32; 80] = [0; 80];
    for (word, bytes) in words.iter_mut().zip(chunk.chunks_exact(4)) {
        *word = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }
    for i in 16usize..80 {
        words[i] = (words[i - 3] ^ words[i - 8] ^ words[i - 14] ^ words[i - 16]).rotate_left(1);
    }
    for (i, w) in words.into_iter().enumerate() {
        let (f, k) = sha_1_constants(i, b, c, d);
        (a, b, c, d, e) = (
            a.rotate_left(5)
                .wrapping_add(f)
                .wrapping_add(e)
                .wrapping_add(k)
                .wrapping_add(w),
            a,
            b.rotate_left(30),
            c,
            d,
        );
    }
    for (s, x) in state.iter_mut().zip([a, b, c, d, e]) {
        *s = s.wrapping_add(x);
    }
}

/// SHA-1 engine, FIPS 180-4.
#[derive(Debug, Clone)]
pub struct Sha1 {
    state: [u32; 5],
}

impl MerkleDamgard for Sha1 {
    type State = [u32; 5];
    type Digest = [u8; DIGEST_SIZE];
    const DIGEST_SIZE: usize = DIGEST_SIZE;

    fn compress(state: &mut Self::State, block: &[u8; BLOCK_SIZE]) {
        sha1_comp_fun(state, block)
    }

    fn length_field(bit_length: u64) -> [u8; 8] {
        bit_length.to_be_bytes()
    }

    fn finalize(state: Self::State) -> Self::Digest {
        core::array::from_fn(|i| state[i / 4].to_be_bytes()[i % 4])
    }
}

impl HashFunction for Sha1 {
    const BLOCK_SIZE: usize = BLOCK_SIZE;
    const DIGEST_SIZE: usize = <Sha1 as MerkleDamgard>::DIGEST_SIZE;

    fn new() -> Self {
        Sha1 { state: IV }
    }

    fn hash(self, input: &[u8]) -> Vec<u8> {
        merkle_damgard::<Sha1>(self.state, input).to_vec()
    }
}

pub fn sha1(input: &[u8]) -> [u8; DIGEST_SIZE] {
    merkle_damgard::<Sha1>(IV, input)
}
