//! The Salsa20 stream cipher, after Bernstein's Salsa20 paper (cr.yp.to/snuffle/spec.pdf).
//!
//! The 64 byte state is sixteen little endian words. Ten double rounds are
//! applied and the input is added back, which gives one keystream block.
//! Encryption and decryption are the same XOR.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};

pub const BLOCK_SIZE: usize = 64;

const SIGMA: &[u8; 16] = b"expand 32-byte k";
const TAU: &[u8; 16] = b"expand 16-byte k";

/// Which state words each quarter round of a row round reads and writes back.
const ROWS: [[usize; 4]; 4] = [[0, 1, 2, 3], [5, 6, 7, 4], [10, 11, 8, 9], [15, 12, 13, 14]];
/// Same for the column round.
const COLUMNS: [[usize; 4]; 4] = [[0, 4, 8, 12], [5, 9, 13, 1], [10, 14, 2, 6], [15, 3, 7, 11]];

pub fn quarter_round(y: [u32; 4]) -> [u32; 4] {
    let z1 = y[1] ^ y[0].wrapping_add(y[3]).rotate_left(7);
    let z2 = y[2] ^ z1.wrapping_add(y[0]).rotate_left(9);
    let z3 = y[3] ^ z2.wrapping_add(z1).rotate_left(13);
    let z0 = y[0] ^ z3.wrapping_add(z2).rotate_left(18);
    [z0, z1, z2, z3]
}

fn quarter_rounds_over(state: &[u32; 16], groups: &[[usize; 4]; 4]) -> [u32; 16] {
    let mut mixed = [0u32; 16];
    for group in groups {
        let words = quarter_round(group.map(|index| state[index]));
        for (&index, word) in group.iter().zip(words) {
            mixed[index] = word;
        }
    }
    mixed
}

pub fn row_round(y: &[u32; 16]) -> [u32; 16] {
    quarter_rounds_over(y, &ROWS)
}

pub fn column_round(x: &[u32; 16]) -> [u32; 16] {
    quarter_rounds_over(x, &COLUMNS)
}

pub fn double_round(x: &[u32; 16]) -> [u32; 16] {
    row_round(&column_round(x))
}

/// The Salsa20 core: ten double rounds, then the input words are added back.
pub fn salsa20_hash(input: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
    let original: [u32; 16] = core::array::from_fn(|i| {
        u32::from_le_bytes([input[4 * i], input[4 * i + 1], input[4 * i + 2], input[4 * i + 3]])
    });
    let mixed = (0..10).fold(original, |state, _| double_round(&state));
    let mut output = [0x00u8; BLOCK_SIZE];
    for (chunk, (word, start)) in output
        .chunks_exact_mut(4)
        .zip(mixed.iter().zip(original.iter()))
    {
        chunk.copy_from_slice(&word.wrapping_add(*start).to_le_bytes());
    }
    output
}

/// Builds the initial state from a 16 or 32 byte key and the 16 byte `n`
/// (nonce then block counter) and hashes it.
pub fn expand(key: &[u8], n: &[u8; 16]) -> Result<[u8; BLOCK_SIZE]> {
    check_key(key)?;
    Ok(expand_checked(key, n))
}

fn check_key(key: &[u8]) -> Result<()> {
    match key.len() {
        16 | 32 => Ok(()),
        actual => Err(Error::KeyLength {
            algorithm: "Salsa20",
            expected: "16 or 32",
            actual,
        }),
    }
}

fn expand_checked(key: &[u8], n: &[u8; 16]) -> [u8; BLOCK_SIZE] {
    // a 16 byte key is used twice, with tau in place of sigma
    let (constant, k0, k1) = if key.len() == 32 {
        (SIGMA, &key[..16], &key[16..])
    } else {
        (TAU, key, key)
    };
    let mut input = [0x00u8; BLOCK_SIZE];
    input[0..4].copy_from_slice(&constant[0..4]);
    input[4..20].copy_from_slice(k0);
    input[20..24].copy_from_slice(&constant[4..8]);
    input[24..40].copy_from_slice(n);
    input[40..44].copy_from_slice(&constant[8..12]);
    input[44..60].copy_from_slice(k1);
    input[60..64].copy_from_slice(&constant[12..16]);
    salsa20_hash(&input)
}

/// A Salsa20 key and nonce pair.
///
/// The nonce enters the state as its eight big endian bytes, the block counter
/// as eight little endian bytes.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Salsa20 {
    key: Vec<u8>,
    #[zeroize(skip)]
    nonce: u64,
}

impl fmt::Debug for Salsa20 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Salsa20")
            .field("key_bits", &(self.key.len() * 8))
            .field("nonce", &self.nonce)
            .finish_non_exhaustive()
    }
}

impl Salsa20 {
    pub fn new(key: &[u8], nonce: u64) -> Result<Self> {
        check_key(key)?;
        log::debug!("Salsa20 instance created with a {} bit key", key.len() * 8);
        Ok(Salsa20 {
            key: key.to_vec(),
            nonce,
        })
    }

    /// Picks the nonce from the thread local CSPRNG. Read it back with
    /// [`Salsa20::nonce`], the receiving side needs it.
    pub fn with_random_nonce(key: &[u8]) -> Result<Self> {
        Self::new(key, rand::random())
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn keystream_block(&self, counter: u64) -> [u8; BLOCK_SIZE] {
        let mut n = [0x00u8; 16];
        n[..8].copy_from_slice(&self.nonce.to_be_bytes());
        n[8..].copy_from_slice(&counter.to_le_bytes());
        expand_checked(&self.key, &n)
    }

    /// XORs `message` with the keystream. Byte `i` uses block
    /// `starting_counter + i / 64`.
    pub fn encode_decode(&self, message: &[u8], starting_counter: u64) -> Vec<u8> {
        log::trace!(
            "Salsa20 processing {} bytes from block {starting_counter}",
            message.len()
        );
        let mut output = Vec::with_capacity(message.len());
        let counters = (0u64..).map(|offset| starting_counter.wrapping_add(offset));
        for (chunk, counter) in message.chunks(BLOCK_SIZE).zip(counters) {
            let keystream = self.keystream_block(counter);
            output.extend(chunk.iter().zip(keystream).map(|(byte, key_byte)| byte ^ key_byte));
        }
        output
    }

    pub fn apply_keystream(&self, message: &[u8]) -> Vec<u8> {
        self.encode_decode(message, 0)
    }
}
