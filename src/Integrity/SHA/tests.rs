use super::SHA1::*;
use crate::Integrity::Merkle_Damgard::{HashFunction, MerkleDamgard};
use const_hex::encode;

#[test]
fn sha1_merkel_test() {
    let lol_hash = encode(sha1(b"lol"));
    assert_eq!(
        lol_hash,
        "403926033d001b5279df37cbbe5287b7c7c267fa".to_owned()
    );
    let lazy_dog = encode(sha1(b"The quick brown fox jumps over the lazy dog").as_slice());
    assert_eq!(
        lazy_dog,
        "2fd4e1c67a2d28fced849ee1bb76e7391b93eb12".to_owned()
    );
    let lazy_cog = encode(sha1(b"The quick brown fox jumps over the lazy cog").as_slice());
    assert_eq!(
        lazy_cog,
        "de9f2c7fd25e1b3afad3e85a0bd17d9b100db4b3".to_owned()
    );
}

#[test]
fn sha1_empty_test() {
    assert_eq!(
        encode(sha1(b"")),
        "da39a3ee5e6b4b0d3255bfef95601890afd80709"
    );
}

#[test]
fn sha1_block_boundaries() {
    assert_eq!(
        encode(sha1(&[b'a'; 55])),
        "c1c8bbdc22796e28c0e15163d20899b65621d65a"
    );
    assert_eq!(
        encode(sha1(&[b'a'; 56])),
        "c2db330f6083854c99d4b5bfb6e8f29f201be699"
    );
    assert_eq!(
        encode(sha1(&[b'a'; 64])),
        "0098ba824b5c16427bd7a1122a5a442a25ec644d"
    );
    assert_eq!(
        encode(sha1(b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq")),
        "84983e441c3bd26ebaae4aa1f95129e5e54670f1"
    );
}

#[test]
fn sha1_million_a() {
    assert_eq!(
        encode(sha1(&vec![b'a'; 1_000_000])),
        "34aa973cd4c4daa4f61eeb2bdbad27316534016f"
    );
}

#[test]
fn sha1_engine_matches_function() {
    let digest = Sha1::new().hash(b"abc");
    assert_eq!(digest.len(), <Sha1 as HashFunction>::DIGEST_SIZE);
    assert_eq!(digest, sha1(b"abc").to_vec());
    assert_eq!(encode(&digest), "a9993e364706816aba3e25717850c26c9cd0d89d");
    // a fresh engine per input, nothing carries over
    assert_eq!(Sha1::new().hash(b"abc"), digest);
}

#[test]
fn sha1_digest_size_matches_the_digest() {
    assert_eq!(<Sha1 as MerkleDamgard>::DIGEST_SIZE, 20);
    assert_eq!(sha1(b"").len(), <Sha1 as MerkleDamgard>::DIGEST_SIZE);
    assert_eq!(<Sha1 as HashFunction>::DIGEST_SIZE, <Sha1 as MerkleDamgard>::DIGEST_SIZE);
}

#[test]
fn sha1_constants_test() {
    assert_eq!(sha_1_constants(0, 0xffffffff, 0x12345678, 0), (0x12345678, 0x5A827999));
    assert_eq!(sha_1_constants(20, 1, 2, 4), (7, 0x6ED9EBA1));
    assert_eq!(sha_1_constants(59, 0b110, 0b101, 0b011), (0b111, 0x8F1BBCDC));
    assert_eq!(sha_1_constants(79, 1, 1, 1).1, 0xCA62C1D6);
}

#[test]
#[should_panic]
fn sha1_constants_out_of_range() {
    sha_1_constants(80, 0, 0, 0);
}
