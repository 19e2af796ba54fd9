use thiserror::Error;

/// Everything that can go wrong when configuring or using a primitive.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid key length for {algorithm}: expected {expected} bytes, got {actual}")]
    KeyLength {
        algorithm: &'static str,
        expected: &'static str,
        actual: usize,
    },

    #[error("unsupported mode of operation '{0}', expected one of ECB, CBC")]
    UnsupportedMode(String),

    #[error("invalid length for {context}: expected {expected}, got {actual}")]
    Length {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("CBC mode needs an initialization vector, set one with `set_iv` or `generate_iv`")]
    MissingIv,

    /// Unpadding found something other than the ISO/IEC 7816-4 marker.
    #[error("the padding is wrong: {0}")]
    Padding(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) mod validate {
    use super::{Error, Result};

    #[inline(always)]
    pub(crate) fn length(context: &'static str, actual: usize, expected: usize) -> Result<()> {
        if actual != expected {
            return Err(Error::Length {
                context,
                expected,
                actual,
            });
        }
        Ok(())
    }

    /// `actual` must be a non-zero multiple of `block_size`.
    #[inline(always)]
    pub(crate) fn whole_blocks(context: &'static str, actual: usize, block_size: usize) -> Result<()> {
        if actual == 0 || actual % block_size != 0 {
            return Err(Error::Length {
                context,
                expected: (actual / block_size + 1) * block_size,
                actual,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_validation() {
        assert!(validate::length("DES block", 8, 8).is_ok());
        assert_eq!(
            validate::length("DES block", 7, 8),
            Err(Error::Length {
                context: "DES block",
                expected: 8,
                actual: 7
            })
        );
    }

    #[test]
    fn whole_block_validation() {
        assert!(validate::whole_blocks("ciphertext", 16, 8).is_ok());
        assert!(validate::whole_blocks("ciphertext", 0, 8).is_err());
        assert_eq!(
            validate::whole_blocks("ciphertext", 12, 8),
            Err(Error::Length {
                context: "ciphertext",
                expected: 16,
                actual: 12
            })
        );
    }

    #[test]
    fn messages_name_the_problem() {
        let err = Error::KeyLength {
            algorithm: "DES",
            expected: "8",
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "invalid key length for DES: expected 8 bytes, got 3"
        );
        assert!(Error::UnsupportedMode("OFB".into())
            .to_string()
            .contains("OFB"));
    }
}
