use classiccrab::Authenticity::CBC_MAC::CbcMac;
use classiccrab::Authenticity::HMAC::Hmac;
use classiccrab::Confidentiality::DES::{Des, Mode};
use classiccrab::Confidentiality::Salsa20::Salsa20;
use classiccrab::Integrity::Merkle_Damgard::HashFunction;
use classiccrab::Integrity::MD5::{md5, Md5};
use classiccrab::Integrity::SHA::SHA1::{sha1, Sha1};
use classiccrab::{hexdigest, Error};

const DES_KEY: [u8; 8] = [0x13, 0x34, 0x57, 0x79, 0x9B, 0xBC, 0xDF, 0xF1];
const DES_MSG: [u8; 8] = [0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF];

#[test]
fn des_from_textual_mode() {
    let mode: Mode = "CBC".parse().unwrap();
    let mut des = Des::new(&DES_KEY, mode).unwrap();
    des.set_iv(&[0x00; 8]).unwrap();
    assert_eq!(
        hexdigest(des.encrypt(&DES_MSG).unwrap()),
        "85e813540f0ab405b8df615c66ca5b29"
    );
    assert!(matches!(
        "OFB".parse::<Mode>(),
        Err(Error::UnsupportedMode(_))
    ));
}

#[test]
fn des_round_trip_over_lengths() {
    let ecb = Des::new(&DES_KEY, Mode::ECB).unwrap();
    let mut cbc = Des::new(&DES_KEY, Mode::CBC).unwrap();
    cbc.generate_iv();
    for len in [0usize, 1, 7, 8, 9, 16, 33] {
        let message: Vec<u8> = (0..len as u8).collect();
        assert_eq!(ecb.decrypt(&ecb.encrypt(&message).unwrap()).unwrap(), message);
        assert_eq!(cbc.decrypt(&cbc.encrypt(&message).unwrap()).unwrap(), message);
    }
}

#[test]
fn independent_instances_agree() {
    let key = [0x5a; 32];
    let first = Salsa20::new(&key, 99).unwrap();
    let second = Salsa20::new(&key, 99).unwrap();
    let message = [0x11u8; 100];
    assert_eq!(first.apply_keystream(&message), second.apply_keystream(&message));

    assert_eq!(Sha1::new().hash(b"x"), Sha1::new().hash(b"x"));
    assert_eq!(Md5::new().hash(b"x"), Md5::new().hash(b"x"));

    let a = CbcMac::new(&DES_KEY).unwrap();
    let b = CbcMac::new(&DES_KEY).unwrap();
    assert_eq!(a.generate(b"same input"), b.generate(b"same input"));

    assert_eq!(
        Hmac::<Sha1>::new(b"k").generate(b"m"),
        Hmac::<Sha1>::new(b"k").generate(b"m")
    );
}

#[test]
fn digests_and_tags() {
    assert_eq!(
        hexdigest(sha1(b"The quick brown fox jumps over the lazy dog")),
        "2fd4e1c67a2d28fced849ee1bb76e7391b93eb12"
    );
    assert_eq!(hexdigest(md5(b"")), "d41d8cd98f00b204e9800998ecf8427e");
    assert_eq!(
        hexdigest(Hmac::<Md5>::new(b"key").generate(b"The quick brown fox jumps over the lazy dog")),
        "80070713463e7749b90c2dc24911e275"
    );
    assert_eq!(
        hexdigest(CbcMac::new(&DES_KEY).unwrap().generate(&DES_MSG)),
        "b8df615c66ca5b29"
    );
}

#[test]
fn configuration_errors_surface_at_construction() {
    assert!(Des::new(&[0x00; 4], Mode::ECB).is_err());
    assert!(Salsa20::new(&[0x00; 20], 0).is_err());
    assert!(CbcMac::new(&[]).is_err());
    let mut des = Des::new(&DES_KEY, Mode::CBC).unwrap();
    assert!(des.set_iv(&[0x00; 4]).is_err());
    assert_eq!(des.encrypt(b"no iv yet"), Err(Error::MissingIv));
}
