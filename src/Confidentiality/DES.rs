//! The Data Encryption Standard, FIPS 46-3, with ECB and CBC chaining.
//!
//! ```
//! use classiccrab::Confidentiality::DES::{Des, Mode};
//!
//! let key = [0x13, 0x34, 0x57, 0x79, 0x9B, 0xBC, 0xDF, 0xF1];
//! let des = Des::new(&key, Mode::ECB).unwrap();
//! let cypher_text = des.encrypt(b"attack at dawn").unwrap();
//! assert_eq!(des.decrypt(&cypher_text).unwrap(), b"attack at dawn");
//! ```

use std::fmt;
use std::str::FromStr;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{validate, Error, Result};
use crate::Block_cypher::{iso7816_blocks, to_blocks, unpad_iso7816, BlockCypher, Padding, CBC, ECB};
use crate::Feistel_network::{classic_feistel_network_decrypt, classic_feistel_network_encrypt};
use crate::Permutation::{permute, rotate_left_28};

mod tables;

use tables::*;

pub const BLOCK_SIZE: usize = 8;
pub const KEY_SIZE: usize = 8;

/// Mode of operation. Parsing from text accepts exactly `"ECB"` and `"CBC"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    ECB,
    CBC,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ECB" => Ok(Mode::ECB),
            "CBC" => Ok(Mode::CBC),
            other => Err(Error::UnsupportedMode(other.to_owned())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::ECB => write!(f, "ECB"),
            Mode::CBC => write!(f, "CBC"),
        }
    }
}

/// The 16 round keys, 48 bits each, right aligned in a `u64`.
pub type SubkeySchedule = [u64; 16];

/// A DES instance bound to one key and one mode.
///
/// The subkey schedule is derived once in [`Des::new`] and never modified
/// afterwards, decryption reads it back to front.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Des {
    key: [u8; KEY_SIZE],
    subkeys: SubkeySchedule,
    #[zeroize(skip)]
    mode: Mode,
    iv: Option<[u8; BLOCK_SIZE]>,
}

impl fmt::Debug for Des {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Des")
            .field("mode", &self.mode)
            .field("iv", &self.iv)
            .finish_non_exhaustive()
    }
}

enum Direction {
    Encrypt,
    Decrypt,
}

impl Des {
    pub fn new(key: &[u8], mode: Mode) -> Result<Self> {
        if key.len() != KEY_SIZE {
            return Err(Error::KeyLength {
                algorithm: "DES",
                expected: "8",
                actual: key.len(),
            });
        }
        let mut key_bytes = [0x00u8; KEY_SIZE];
        key_bytes.copy_from_slice(key);
        log::debug!("DES instance created in {mode} mode");
        Ok(Des {
            subkeys: generate_subkeys(&key_bytes),
            key: key_bytes,
            mode,
            iv: None,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn subkeys(&self) -> &SubkeySchedule {
        &self.subkeys
    }

    pub fn iv(&self) -> Option<[u8; BLOCK_SIZE]> {
        self.iv
    }

    /// Replaces the initialization vector. It has to be exactly 8 bytes, in
    /// every mode, even though ECB never reads it.
    pub fn set_iv(&mut self, iv: &[u8]) -> Result<()> {
        validate::length("DES initialization vector", iv.len(), BLOCK_SIZE)?;
        let mut block = [0x00u8; BLOCK_SIZE];
        block.copy_from_slice(iv);
        self.iv = Some(block);
        Ok(())
    }

    /// Fills the IV from the thread local CSPRNG and returns it, so it can be
    /// sent along with the cypher text.
    pub fn generate_iv(&mut self) -> [u8; BLOCK_SIZE] {
        let iv: [u8; BLOCK_SIZE] = rand::random();
        self.iv = Some(iv);
        iv
    }

    pub fn encrypt_block(&self, plain_text_block: &[u8]) -> Result<[u8; BLOCK_SIZE]> {
        validate::length("DES block", plain_text_block.len(), BLOCK_SIZE)?;
        Ok(self.crypt_block(
            &crate::Block_cypher::to_block(plain_text_block),
            Direction::Encrypt,
        ))
    }

    pub fn decrypt_block(&self, cypher_text_block: &[u8]) -> Result<[u8; BLOCK_SIZE]> {
        validate::length("DES block", cypher_text_block.len(), BLOCK_SIZE)?;
        Ok(self.crypt_block(
            &crate::Block_cypher::to_block(cypher_text_block),
            Direction::Decrypt,
        ))
    }

    /// Pads `plain_text` and encrypts it in the configured mode.
    pub fn encrypt(&self, plain_text: &[u8]) -> Result<Vec<u8>> {
        let cypher_text: Vec<[u8; BLOCK_SIZE]> = match self.mode {
            Mode::ECB => self.ecb_encrypt(plain_text),
            Mode::CBC => self.cbc_encrypt(plain_text, self.chain_start()?),
        };
        log::trace!(
            "DES-{} encrypted {} bytes into {} blocks",
            self.mode,
            plain_text.len(),
            cypher_text.len()
        );
        Ok(cypher_text.concat())
    }

    /// Decrypts and removes the padding. Malformed padding is an error, it is
    /// never guessed around.
    pub fn decrypt(&self, cypher_text: &[u8]) -> Result<Vec<u8>> {
        let blocks = to_blocks::<BLOCK_SIZE>("DES cypher text", cypher_text)?;
        log::trace!("DES-{} decrypting {} blocks", self.mode, blocks.len());
        match self.mode {
            Mode::ECB => self.ecb_decrypt(&blocks),
            Mode::CBC => self.cbc_decrypt(&blocks, self.chain_start()?),
        }
    }

    fn chain_start(&self) -> Result<[u8; BLOCK_SIZE]> {
        self.iv.ok_or(Error::MissingIv)
    }

    fn crypt_block(&self, block: &[u8; BLOCK_SIZE], direction: Direction) -> [u8; BLOCK_SIZE] {
        let permuted = permute(u64::from_be_bytes(*block), 64, &IP);
        let (left, right) = ((permuted >> 32) as u32, permuted as u32);
        let (left, right) = match direction {
            Direction::Encrypt => {
                classic_feistel_network_encrypt(left, right, &self.subkeys, |r, k| feistel(r, *k))
            }
            Direction::Decrypt => {
                classic_feistel_network_decrypt(left, right, &self.subkeys, |r, k| feistel(r, *k))
            }
        };
        permute((u64::from(left) << 32) | u64::from(right), 64, &IP_INV).to_be_bytes()
    }
}

impl BlockCypher<BLOCK_SIZE> for Des {
    fn encrypt_block(&self, plain_text_block: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
        self.crypt_block(plain_text_block, Direction::Encrypt)
    }
    fn decrypt_block(&self, cypher_text_block: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
        self.crypt_block(cypher_text_block, Direction::Decrypt)
    }
}

impl Padding<BLOCK_SIZE> for Des {
    fn pad(data: &[u8]) -> impl Iterator<Item = [u8; BLOCK_SIZE]> {
        iso7816_blocks::<BLOCK_SIZE>(data)
    }
    fn unpad(data: &[[u8; BLOCK_SIZE]]) -> Result<Vec<u8>> {
        unpad_iso7816(&data.concat())
    }
}

/// PC-1, then for round `i` both 28 bit halves rotated by the sum of the first
/// `i + 1` shifts, then PC-2.
pub fn generate_subkeys(key: &[u8; KEY_SIZE]) -> SubkeySchedule {
    let selected = permute(u64::from_be_bytes(*key), 64, &PC1);
    let mut left = (selected >> 28) as u32;
    let mut right = (selected & 0x0FFF_FFFF) as u32;
    let mut subkeys: SubkeySchedule = [0; 16];
    for (subkey, &shift) in subkeys.iter_mut().zip(SHIFTS.iter()) {
        left = rotate_left_28(left, shift);
        right = rotate_left_28(right, shift);
        *subkey = permute((u64::from(left) << 28) | u64::from(right), 56, &PC2);
    }
    subkeys
}

/// E expansion of a right half, 48 bits.
pub fn expand(right: u32) -> u64 {
    permute(u64::from(right), 32, &E)
}

/// Looks a 6 bit group up in S-box `index` (0 based). The outer two bits pick
/// the row, the inner four the column.
pub fn sbox_lookup(group: u8, index: usize) -> u8 {
    assert!(index < S_BOXES.len(), "DES has 8 S-boxes, got index {index}");
    let row = ((group & 0b10_0000) >> 4) | (group & 0b1);
    let column = (group >> 1) & 0b1111;
    S_BOXES[index][usize::from(row) * 16 + usize::from(column)]
}

/// The round function F.
pub fn feistel(right: u32, subkey: u64) -> u32 {
    let mixed = expand(right) ^ subkey;
    let substituted = (0..S_BOXES.len()).fold(0u32, |acc, index| {
        let group = ((mixed >> (42 - 6 * index)) & 0b11_1111) as u8;
        (acc << 4) | u32::from(sbox_lookup(group, index))
    });
    permute(u64::from(substituted), 32, &P) as u32
}
