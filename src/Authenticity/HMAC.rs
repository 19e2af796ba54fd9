//! HMAC, RFC 2104, over any [`HashFunction`].
//!
//! ```
//! use classiccrab::Authenticity::HMAC::Hmac;
//! use classiccrab::Integrity::SHA::SHA1::Sha1;
//!
//! let mac = Hmac::<Sha1>::new(b"key");
//! let tag = mac.generate(b"The quick brown fox jumps over the lazy dog");
//! assert_eq!(classiccrab::hexdigest(tag), "de7c9b85b8b78aa6bc8a7a36f70a90701c9db4d9");
//! ```

use std::fmt;
use std::marker::PhantomData;

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::Integrity::Merkle_Damgard::HashFunction;

/// HMAC keyed with K′, the key hashed down if longer than a block and then
/// zero padded to exactly one block.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Hmac<H: HashFunction> {
    k_prime: Vec<u8>,
    #[zeroize(skip)]
    hash: PhantomData<H>,
}

impl<H: HashFunction> fmt::Debug for Hmac<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hmac")
            .field("block_size", &H::BLOCK_SIZE)
            .field("digest_size", &H::DIGEST_SIZE)
            .finish_non_exhaustive()
    }
}

impl<H: HashFunction> Hmac<H> {
    const IPAD_BYTE: u8 = 0x36;
    const OPAD_BYTE: u8 = 0x5c;

    pub fn new(key: &[u8]) -> Self {
        let mut k_prime = if key.len() > H::BLOCK_SIZE {
            H::new().hash(key)
        } else {
            key.to_vec()
        };
        k_prime.resize(H::BLOCK_SIZE, 0x00);
        log::debug!(
            "HMAC keyed with {} bytes, block size {}",
            key.len(),
            H::BLOCK_SIZE
        );
        Hmac {
            k_prime,
            hash: PhantomData,
        }
    }

    /// `H((K′ ^ opad) || H((K′ ^ ipad) || message))`, each hash on a fresh engine.
    pub fn generate(&self, message: &[u8]) -> Vec<u8> {
        let inner_key = self.masked_key(Self::IPAD_BYTE);
        let outer_key = self.masked_key(Self::OPAD_BYTE);
        let inner = H::new().hash(&[inner_key.as_slice(), message].concat());
        log::trace!("HMAC over {} bytes", message.len());
        H::new().hash(&[outer_key.as_slice(), inner.as_slice()].concat())
    }

    fn masked_key(&self, pad: u8) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.k_prime.iter().map(|byte| byte ^ pad).collect())
    }
}
