//! MD5, RFC 1321. Broken for collision resistance, kept for HMAC-MD5 and
//! compatibility with old formats.

use crate::Integrity::Merkle_Damgard::{merkle_damgard, HashFunction, MerkleDamgard, BLOCK_SIZE};

pub const DIGEST_SIZE: usize = 16;

const IV: [u32; 4] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476];

/// Per step left rotation amounts.
pub const S: [u32; 64] = [
    7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22, //
    5, 9, 14, 20, 5, 9, 14, 20, 5, 9, 14, 20, 5, 9, 14, 20, //
    4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23, //
    6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21,
];

/// `floor(abs(sin(i + 1)) * 2^32)`.
pub const K: [u32; 64] = [
    0xd76aa478, 0xe8c7b756, 0x242070db, 0xc1bdceee, 0xf57c0faf, 0x4787c62a, 0xa8304613, 0xfd469501,
    0x698098d8, 0x8b44f7af, 0xffff5bb1, 0x895cd7be, 0x6b901122, 0xfd987193, 0xa679438e, 0x49b40821,
    0xf61e2562, 0xc040b340, 0x265e5a51, 0xe9b6c7aa, 0xd62f105d, 0x02441453, 0xd8a1e681, 0xe7d3fbc8,
    0x21e1cde6, 0xc33707d6, 0xf4d50d87, 0x455a14ed, 0xa9e3e905, 0xfcefa3f8, 0x676f02d9, 0x8d2a4c8a,
    0xfffa3942, 0x8771f681, 0x6d9d6122, 0xfde5380c, 0xa4beea44, 0x4bdecfa9, 0xf6bb4b60, 0xbebfbc70,
    0x289b7ec6, 0xeaa127fa, 0xd4ef3085, 0x04881d05, 0xd9d4d039, 0xe6db99e5, 0x1fa27cf8, 0xc4ac5665,
    0xf4292244, 0x432aff97, 0xab9423a7, 0xfc93a039, 0x655b59c3, 0x8f0ccc92, 0xffeff47d, 0x85845dd1,
    0x6fa87e4f, 0xfe2ce6e0, 0xa3014314, 0x4e0811a1, 0xf7537e82, 0xbd3af235, 0x2ad7d2bb, 0xeb86d391,
];

/// The auxiliary function F, G, H or I of step `i`.
pub fn md5_round_function(i: usize, b: u32, c: u32, d: u32) -> u32 {
    match i {
        0..=15 => (b & c) | (!b & d),
        16..=31 => (d & b) | (!d & c),
        32..=47 => b ^ c ^ d,
        48..=63 => c ^ (b | !d),
        _ => unreachable!("MD5 has 64 steps, got step {i}"),
    }
}

/// Which message word step `i` reads.
pub fn message_index(i: usize) -> usize {
    match i {
        0..=15 => i,
        16..=31 => (5 * i + 1) % 16,
        32..=47 => (3 * i + 5) % 16,
        48..=63 => (7 * i) % 16,
        _ => unreachable!("MD5 has 64 steps, got step {i}"),
    }
}

fn md5_comp_fun(state: &mut [u32; 4], chunk: &[u8; BLOCK_SIZE]) {
    let mut words = [0u32; 16];
    for (word, bytes) in words.iter_mut().zip(chunk.chunks_exact(4)) {
        *word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }
    let [mut a, mut b, mut c, mut d] = *state;
    for i in 0..64 {
        let f = md5_round_function(i, b, c, d)
            .wrapping_add(a)
            .wrapping_add(K[i])
            .wrapping_add(words[message_index(i)]);
        (a, b, c, d) = (d, b.wrapping_add(f.rotate_left(S[i])), b, c);
    }
    for (s, x) in state.iter_mut().zip([a, b, c, d]) {
        *s = s.wrapping_add(x);
    }
}

/// MD5 engine.
#[derive(Debug, Clone)]
pub struct Md5 {
    state: [u32; 4],
}

impl MerkleDamgard for Md5 {
    type State = [u32; 4];
    type Digest = [u8; DIGEST_SIZE];
    const DIGEST_SIZE: usize = DIGEST_SIZE;

    fn compress(state: &mut Self::State, block: &[u8; BLOCK_SIZE]) {
        md5_comp_fun(state, block)
    }

    fn length_field(bit_length: u64) -> [u8; 8] {
        bit_length.to_le_bytes()
    }

    fn finalize(state: Self::State) -> Self::Digest {
        core::array::from_fn(|i| state[i / 4].to_le_bytes()[i % 4])
    }
}

impl HashFunction for Md5 {
    const BLOCK_SIZE: usize = BLOCK_SIZE;
    const DIGEST_SIZE: usize = <Md5 as MerkleDamgard>::DIGEST_SIZE;

    fn new() -> Self {
        Md5 { state: IV }
    }

    fn hash(self, input: &[u8]) -> Vec<u8> {
        merkle_damgard::<Md5>(self.state, input).to_vec()
    }
}

pub fn md5(input: &[u8]) -> [u8; DIGEST_SIZE] {
    merkle_damgard::<Md5>(IV, input)
}
