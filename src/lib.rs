#![allow(non_snake_case)]

pub mod error;

pub mod Block_cypher;
pub mod Feistel_network;
pub mod Permutation;

pub mod Integrity {
    pub mod MD5;
    pub mod Merkle_Damgard;
    pub mod SHA;
}

pub mod Confidentiality {
    pub mod DES;
    pub mod Salsa20;
}

pub mod Authenticity {
    pub mod CBC_MAC;
    pub mod HMAC;
}

pub use const_hex::encode as hexdigest;
pub use error::{Error, Result};
