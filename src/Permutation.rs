//! Index-table driven bit permutations.
//!
//! The DES tables (IP, IP⁻¹, E, P, PC-1, PC-2) are all written the way FIPS 46-3
//! prints them: entry `i` names the 1-based input bit, counted from the most
//! significant end, that lands on output bit `i`. [`permute`] applies such a
//! table to the low `input_width` bits of an integer.

/// Permutes (or selects, or expands) the low `input_width` bits of `input`.
///
/// The output is `table.len()` bits wide and right aligned.
pub fn permute(input: u64, input_width: u32, table: &[u8]) -> u64 {
    debug_assert!(table.len() <= 64);
    table.iter().fold(0u64, |acc, &position| {
        debug_assert!((1..=input_width).contains(&u32::from(position)));
        (acc << 1) | ((input >> (input_width - u32::from(position))) & 1)
    })
}

/// Rotation of a 28 bit half key.
pub fn rotate_left_28(half: u32, shift: u32) -> u32 {
    const MASK: u32 = 0x0FFF_FFFF;
    let half = half & MASK;
    ((half << shift) | (half >> (28 - shift))) & MASK
}
