use crate::{CryptoError, KeyPair, verify};

#[test]
fn sign_then_verify() {
    let keys = KeyPair::generate();
    let signature = keys.sign(b"block header");

    assert!(verify(&keys.public_key(), b"block header", &signature).unwrap());
    assert!(!verify(&keys.public_key(), b"tampered header", &signature).unwrap());
}

#[test]
fn seeded_keys_are_deterministic() {
    let a = KeyPair::from_seed(b"seed").unwrap();
    let b = KeyPair::from_seed(b"seed").unwrap();
    assert_eq!(a.public_key(), b.public_key());
    assert_eq!(a.public_key().len(), 33);
}

#[test]
fn malformed_inputs_are_errors() {
    let keys = KeyPair::from_seed(b"seed").unwrap();
    let signature = keys.sign(b"msg");

    assert!(matches!(
        verify(b"not a key", b"msg", &signature),
        Err(CryptoError::InvalidPublicKey)
    ));
    assert!(matches!(
        verify(&keys.public_key(), b"msg", b"not der"),
        Err(CryptoError::InvalidSignature)
    ));
}
