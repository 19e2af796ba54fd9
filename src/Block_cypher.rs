use std::ops::BitXor;

use crate::error::{Error, Result};

pub trait BlockCypher<const BLOCK_SIZE_BYTES: usize> {
    fn encrypt_block(&self, plain_text_block: &[u8; BLOCK_SIZE_BYTES]) -> [u8; BLOCK_SIZE_BYTES];
    fn decrypt_block(&self, cypher_text_block: &[u8; BLOCK_SIZE_BYTES]) -> [u8; BLOCK_SIZE_BYTES];
}

pub trait Padding<const BLOCK_SIZE_BYTES: usize> {
    fn pad(data: &[u8]) -> impl Iterator<Item = [u8; BLOCK_SIZE_BYTES]>;
    fn unpad(data: &[[u8; BLOCK_SIZE_BYTES]]) -> Result<Vec<u8>>;
}

pub(crate) fn zip_with<const N: usize, T: Copy, U: Copy, V, F: Fn(T, U) -> V>(
    arr1: [T; N],
    arr2: [U; N],
    f: F,
) -> [V; N] {
    core::array::from_fn(|i| f(arr1[i], arr2[i]))
}

fn bytes_needed_to_fit(data_len: usize, block_size: usize) -> usize {
    block_size - (data_len % block_size)
}

/// ISO/IEC 7816-4 padding: one `0x80` byte, then `0x00` up to the block boundary.
///
/// A message that is already block aligned still gets a whole extra block, so
/// the marker is always there to be found again.
pub fn pad_iso7816(data: &[u8], block_size: usize) -> Vec<u8> {
    let padding_needed = bytes_needed_to_fit(data.len(), block_size);
    [
        data,
        [0x80u8].as_slice(),
        [0x00u8].repeat(padding_needed - 1).as_slice(),
    ]
    .concat()
}

/// Undoes [`pad_iso7816`]. Trailing zeros are stripped and the byte in front of
/// them has to be the `0x80` marker, anything else is rejected.
pub fn unpad_iso7816(data: &[u8]) -> Result<Vec<u8>> {
    let marker_position = data
        .iter()
        .rposition(|&byte| byte != 0x00)
        .ok_or(Error::Padding("no padding marker found"))?;
    if data[marker_position] != 0x80 {
        log::warn!(
            "rejecting padding: expected 0x80 marker, found {:#04x}",
            data[marker_position]
        );
        return Err(Error::Padding("the byte before the zero run is not 0x80"));
    }
    Ok(data[..marker_position].to_vec())
}

pub(crate) fn iso7816_blocks<const BLOCK_SIZE_BYTES: usize>(
    data: &[u8],
) -> impl Iterator<Item = [u8; BLOCK_SIZE_BYTES]> + '_ {
    let block_iterator = data.chunks_exact(BLOCK_SIZE_BYTES);
    let remainder = block_iterator.remainder();
    let mut last = [0x00u8; BLOCK_SIZE_BYTES];
    last[..remainder.len()].copy_from_slice(remainder);
    last[remainder.len()] = 0x80;
    block_iterator
        .map(to_block::<BLOCK_SIZE_BYTES>)
        .chain(std::iter::once(last))
}

pub(crate) fn to_block<const BLOCK_SIZE_BYTES: usize>(chunk: &[u8]) -> [u8; BLOCK_SIZE_BYTES] {
    let mut block = [0x00u8; BLOCK_SIZE_BYTES];
    block.copy_from_slice(chunk);
    block
}

/// Splits `data` into blocks, it must be a non-empty multiple of the block size.
pub(crate) fn to_blocks<const BLOCK_SIZE_BYTES: usize>(
    context: &'static str,
    data: &[u8],
) -> Result<Vec<[u8; BLOCK_SIZE_BYTES]>> {
    crate::error::validate::whole_blocks(context, data.len(), BLOCK_SIZE_BYTES)?;
    Ok(data
        .chunks_exact(BLOCK_SIZE_BYTES)
        .map(to_block::<BLOCK_SIZE_BYTES>)
        .collect())
}

pub trait ECB<const BLOCK_SIZE_BYTES: usize>
where
    Self: BlockCypher<BLOCK_SIZE_BYTES> + Padding<BLOCK_SIZE_BYTES>,
{
    fn ecb_encrypt(&self, plain_text: &[u8]) -> Vec<[u8; BLOCK_SIZE_BYTES]> {
        let mut cypher_text: Vec<[u8; BLOCK_SIZE_BYTES]> = Vec::with_capacity(
            (plain_text.len() + bytes_needed_to_fit(plain_text.len(), BLOCK_SIZE_BYTES))
                / BLOCK_SIZE_BYTES,
        );
        cypher_text.extend(Self::pad(plain_text).map(|block| self.encrypt_block(&block)));
        cypher_text
    }
    fn ecb_decrypt(&self, cypher_text: &[[u8; BLOCK_SIZE_BYTES]]) -> Result<Vec<u8>> {
        let mut plain_text: Vec<[u8; BLOCK_SIZE_BYTES]> = Vec::with_capacity(cypher_text.len());
        plain_text.extend(cypher_text.iter().map(|block| self.decrypt_block(block)));
        Self::unpad(&plain_text)
    }
}

impl<T, const BLOCK_SIZE_BYTES: usize> ECB<BLOCK_SIZE_BYTES> for T where
    T: BlockCypher<BLOCK_SIZE_BYTES> + Padding<BLOCK_SIZE_BYTES>
{
}

pub trait CBC<const BLOCK_SIZE_BYTES: usize>
where
    Self: BlockCypher<BLOCK_SIZE_BYTES> + Padding<BLOCK_SIZE_BYTES>,
{
    fn cbc_encrypt(
        &self,
        plain_text: &[u8],
        iv: [u8; BLOCK_SIZE_BYTES],
    ) -> Vec<[u8; BLOCK_SIZE_BYTES]> {
        let padded_text = Self::pad(plain_text);
        let mut cypher_text: Vec<[u8; BLOCK_SIZE_BYTES]> = Vec::with_capacity(
            (plain_text.len() + bytes_needed_to_fit(plain_text.len(), BLOCK_SIZE_BYTES))
                / BLOCK_SIZE_BYTES,
        );
        let mut chain: [u8; BLOCK_SIZE_BYTES] = iv;
        let mut cypher_block: [u8; BLOCK_SIZE_BYTES];
        for block in padded_text {
            cypher_block = self.encrypt_block(&zip_with(block, chain, BitXor::bitxor));
            cypher_text.push(cypher_block);
            chain = cypher_block;
        }
        cypher_text
    }
    fn cbc_decrypt(
        &self,
        cypher_text: &[[u8; BLOCK_SIZE_BYTES]],
        iv: [u8; BLOCK_SIZE_BYTES],
    ) -> Result<Vec<u8>> {
        let mut plain_text: Vec<[u8; BLOCK_SIZE_BYTES]> = Vec::with_capacity(cypher_text.len());
        let with_iv = [std::slice::from_ref(&iv), cypher_text].concat();
        let iterator = with_iv.windows(2).map(|blocks| {
            zip_with(
                self.decrypt_block(&blocks[1]),
                blocks[0],
                BitXor::bitxor,
            )
        });
        plain_text.extend(iterator);
        Self::unpad(&plain_text)
    }
}

impl<T, const BLOCK_SIZE_BYTES: usize> CBC<BLOCK_SIZE_BYTES> for T where
    T: BlockCypher<BLOCK_SIZE_BYTES> + Padding<BLOCK_SIZE_BYTES>
{
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Adds a key byte-wise, enough structure to see chaining at work.
    struct Toy(u8);

    impl BlockCypher<4> for Toy {
        fn encrypt_block(&self, plain_text_block: &[u8; 4]) -> [u8; 4] {
            plain_text_block.map(|byte| byte.wrapping_add(self.0))
        }
        fn decrypt_block(&self, cypher_text_block: &[u8; 4]) -> [u8; 4] {
            cypher_text_block.map(|byte| byte.wrapping_sub(self.0))
        }
    }

    impl Padding<4> for Toy {
        fn pad(data: &[u8]) -> impl Iterator<Item = [u8; 4]> {
            iso7816_blocks::<4>(data)
        }
        fn unpad(data: &[[u8; 4]]) -> Result<Vec<u8>> {
            unpad_iso7816(&data.concat())
        }
    }

    #[test]
    fn padding_test() {
        assert_eq!(
            pad_iso7816(&[0xff, 0xab, 0x12, 0x45], 8),
            vec![0xff, 0xab, 0x12, 0x45, 0x80, 0x00, 0x00, 0x00]
        );
        assert_eq!(
            unpad_iso7816(&[0xff, 0xab, 0x12, 0x45, 0x80, 0x00, 0x00, 0x00]).unwrap(),
            vec![0xff, 0xab, 0x12, 0x45]
        );
    }

    #[test]
    fn aligned_message_gets_a_whole_block() {
        let padded = pad_iso7816(&[1, 2, 3, 4, 5, 6, 7, 8], 8);
        assert_eq!(padded.len(), 16);
        assert_eq!(&padded[8..], &[0x80, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(pad_iso7816(&[], 8), vec![0x80, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn wrong_marker_is_rejected() {
        assert!(matches!(
            unpad_iso7816(&[0xff, 0xab, 0x12, 0x45, 0x86, 0x00, 0x00, 0x00]),
            Err(Error::Padding(_))
        ));
        assert!(unpad_iso7816(&[0x00; 8]).is_err());
        assert!(unpad_iso7816(&[]).is_err());
    }

    #[test]
    fn block_padding_matches_flat_padding() {
        for len in 0..13 {
            let data: Vec<u8> = (1..=len as u8).collect();
            let blocks: Vec<u8> = iso7816_blocks::<4>(&data).flatten().collect();
            assert_eq!(blocks, pad_iso7816(&data, 4));
        }
    }

    #[test]
    fn ragged_input_is_not_split_into_blocks() {
        assert!(to_blocks::<4>("toy", &[1, 2, 3]).is_err());
        assert!(to_blocks::<4>("toy", &[]).is_err());
        assert_eq!(
            to_blocks::<4>("toy", &[1, 2, 3, 4, 5, 6, 7, 8]).unwrap(),
            vec![[1, 2, 3, 4], [5, 6, 7, 8]]
        );
    }

    #[test]
    fn ecb_encrypt_decrypt_test() {
        let toy = Toy(1);
        let encrypted = toy.ecb_encrypt(b"abcdef");
        assert_eq!(encrypted, vec![*b"bcde", [b'f', b'g', 0x81, 0x01]]);
        assert_eq!(toy.ecb_decrypt(&encrypted).unwrap(), b"abcdef".to_vec());
    }

    #[test]
    fn cbc_encrypt_decrypt_test() {
        let toy = Toy(0);
        let iv = [0x0f, 0xf0, 0x00, 0xff];
        let encrypted = toy.cbc_encrypt(&[0x00; 4], iv);
        // identity cipher: first block is the IV, the padding block XORs onto it
        assert_eq!(encrypted[0], iv);
        assert_eq!(encrypted[1], [0x80 ^ 0x0f, 0xf0, 0x00, 0xff]);
        assert_eq!(toy.cbc_decrypt(&encrypted, iv).unwrap(), vec![0x00; 4]);
    }

    #[test]
    fn cbc_equal_blocks_do_not_repeat() {
        let toy = Toy(7);
        let encrypted = toy.cbc_encrypt(&[0x42; 8], [0x01; 4]);
        assert_ne!(encrypted[0], encrypted[1]);
        let ecb = toy.ecb_encrypt(&[0x42; 8]);
        assert_eq!(ecb[0], ecb[1]);
    }
}
