#![cfg(feature = "serde")]

use quorum_ristretto255::*;
use rand::thread_rng;

#[test]
fn check_serde_session() {
    let rng = thread_rng();

    quorum_core::tests::serde_tests::check_serde_session::<Ristretto255Sha512, _>(rng);
}

#[test]
fn check_serde_rejects_invalid() {
    let rng = thread_rng();

    quorum_core::tests::serde_tests::check_serde_rejects_invalid::<Ristretto255Sha512, _>(rng);
}

#[test]
fn check_signature_json() {
    let mut rng = thread_rng();
    let signing_key = SigningKey::new(&mut rng);
    let signature = signing_key.sign(&mut rng, b"json").unwrap();

    let json = serde_json::to_string(&signature).unwrap();
    // R and z, both 32 bytes, hex-encoded
    assert_eq!(json.len(), 2 + 128);

    let decoded: Signature = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, signature);
    VerifyingKey::from(&signing_key)
        .verify(b"json", &decoded)
        .unwrap();
}
