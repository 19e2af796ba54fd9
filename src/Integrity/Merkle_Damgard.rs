use crate::Block_cypher::to_block;

/// Both SHA-1 and MD5 work on 512 bit blocks.
pub const BLOCK_SIZE: usize = 64;
const LENGTH_FIELD_SIZE: usize = 8;

/// What a Merkle–Damgård hash has to bring for the shared driver.
///
/// The algorithms only differ in their state, the compression function, the
/// byte order of the length field and how the final state is serialized.
pub trait MerkleDamgard {
    type State;
    type Digest;
    const DIGEST_SIZE: usize;

    fn compress(state: &mut Self::State, block: &[u8; BLOCK_SIZE]);
    /// The message length in bits as the eight bytes closing the padding.
    fn length_field(bit_length: u64) -> [u8; LENGTH_FIELD_SIZE];
    fn finalize(state: Self::State) -> Self::Digest;
}

/// The hash engine contract.
///
/// `hash` consumes the engine so every digest starts from a fresh state,
/// callers needing several digests make several engines with `new`.
pub trait HashFunction {
    const BLOCK_SIZE: usize;
    const DIGEST_SIZE: usize;

    fn new() -> Self;
    fn hash(self, input: &[u8]) -> Vec<u8>;
}

/// `0x80`, zeros up to 56 mod 64 bytes, then the length field. The result is
/// always a whole number of blocks.
pub fn md_padding(input: &[u8], length_field: [u8; LENGTH_FIELD_SIZE]) -> Vec<[u8; BLOCK_SIZE]> {
    let zeros_needed =
        (BLOCK_SIZE - (input.len() + 1 + LENGTH_FIELD_SIZE) % BLOCK_SIZE) % BLOCK_SIZE;
    let message = [
        input,
        [0x80u8].as_slice(),
        [0x00u8].repeat(zeros_needed).as_slice(),
        length_field.as_slice(),
    ]
    .concat();
    message
        .chunks_exact(BLOCK_SIZE)
        .map(to_block::<BLOCK_SIZE>)
        .collect()
}

pub fn merkle_damgard<A: MerkleDamgard>(iv: A::State, input: &[u8]) -> A::Digest {
    // lengths are taken mod 2^64 bits
    let bit_length = (input.len() as u64).wrapping_mul(8);
    let padded = md_padding(input, A::length_field(bit_length));
    log::trace!(
        "Merkle-Damgard over {} bytes, {} blocks",
        input.len(),
        padded.len()
    );
    let mut state = iv;
    for block in &padded {
        A::compress(&mut state, block);
    }
    A::finalize(state)
}
