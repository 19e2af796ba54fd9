use crate::error::Result;
use crate::Block_cypher::CBC;
use crate::Confidentiality::DES::{Des, Mode, BLOCK_SIZE};

const ZERO_IV: [u8; BLOCK_SIZE] = [0x00; BLOCK_SIZE];

/// Textbook CBC-MAC over DES: CBC encryption under an all zero IV, the tag is
/// the last cypher text block.
///
/// Only sound for messages of one fixed length. There is no verify call,
/// recompute the tag and compare.
#[derive(Debug, Clone)]
pub struct CbcMac {
    encoder: Des,
}

impl CbcMac {
    pub fn new(key: &[u8]) -> Result<Self> {
        let mut encoder = Des::new(key, Mode::CBC)?;
        encoder.set_iv(&ZERO_IV)?;
        Ok(CbcMac { encoder })
    }

    pub fn generate(&self, message: &[u8]) -> [u8; BLOCK_SIZE] {
        log::trace!("CBC-MAC over {} bytes", message.len());
        // padding always yields at least one block
        match self.encoder.cbc_encrypt(message, ZERO_IV).pop() {
            Some(tag) => tag,
            None => unreachable!("CBC output is never empty"),
        }
    }
}
