use quorum_p256::*;
use rand::thread_rng;

#[test]
fn check_zero_key_fails() {
    quorum_core::tests::ciphersuite_generic::check_zero_key_fails::<P256Sha256>();
}

#[test]
fn check_dealer_parameters() {
    let rng = thread_rng();

    quorum_core::tests::ciphersuite_generic::check_dealer_parameters::<P256Sha256, _>(rng);
}

#[test]
fn check_sign_with_dealer() {
    let rng = thread_rng();

    quorum_core::tests::ciphersuite_generic::check_sign_with_dealer::<P256Sha256, _>(rng);
}

#[test]
fn check_commitment_list_errors() {
    let rng = thread_rng();

    quorum_core::tests::ciphersuite_generic::check_commitment_list_errors::<P256Sha256, _>(rng);
}

#[test]
fn check_identity_commitment() {
    let rng = thread_rng();

    quorum_core::tests::ciphersuite_generic::check_identity_commitment::<P256Sha256, _>(rng);
}

#[test]
fn check_invalid_signature_shares() {
    let rng = thread_rng();

    quorum_core::tests::ciphersuite_generic::check_invalid_signature_shares::<P256Sha256, _>(rng);
}

#[test]
fn check_tampered_key_share() {
    let rng = thread_rng();

    quorum_core::tests::ciphersuite_generic::check_tampered_key_share::<P256Sha256, _>(rng);
}

#[test]
fn check_state_equality() {
    let rng = thread_rng();

    quorum_core::tests::ciphersuite_generic::check_state_equality::<P256Sha256, _>(rng);
}

#[test]
fn check_reconstruct() {
    let rng = thread_rng();

    quorum_core::tests::ciphersuite_generic::check_reconstruct::<P256Sha256, _>(rng);
}

#[test]
fn check_schnorr_sign() {
    let rng = thread_rng();

    quorum_core::tests::ciphersuite_generic::check_schnorr_sign::<P256Sha256, _>(rng);
}

#[test]
fn check_nonce_independence() {
    let rng = thread_rng();

    quorum_core::tests::ciphersuite_generic::check_nonce_independence::<P256Sha256, _>(rng);
}

#[test]
fn check_round_message_encodings() {
    let rng = thread_rng();

    quorum_core::tests::ciphersuite_generic::check_round_message_encodings::<P256Sha256, _>(rng);
}

#[test]
fn check_group_laws() {
    let rng = thread_rng();

    quorum_core::tests::group_generic::check_group_laws::<P256Group, _>(rng);
}

#[test]
fn check_scalar_laws() {
    let rng = thread_rng();

    quorum_core::tests::group_generic::check_scalar_laws::<P256Group, _>(rng);
}

#[test]
fn check_encoding_roundtrip() {
    let rng = thread_rng();

    quorum_core::tests::group_generic::check_encoding_roundtrip::<P256Group, _>(rng);
}

#[test]
fn check_reject_noncanonical() {
    quorum_core::tests::group_generic::check_reject_noncanonical::<P256Group>();
}

#[test]
fn check_hash_to_group() {
    quorum_core::tests::group_generic::check_hash_to_group::<P256Group>();
}

#[test]
fn check_polynomial_evaluation() {
    quorum_core::tests::secret_sharing::check_polynomial_evaluation::<P256Group>();
}

#[test]
fn check_lagrange_errors() {
    quorum_core::tests::secret_sharing::check_lagrange_errors::<P256Group>();
}

#[test]
fn check_shamir() {
    let rng = thread_rng();

    quorum_core::tests::secret_sharing::check_shamir::<P256Group, _>(rng);
}

#[test]
fn check_feldman() {
    let rng = thread_rng();

    quorum_core::tests::secret_sharing::check_feldman::<P256Group, _>(rng);
}

#[test]
fn check_suite_wrappers() {
    let mut rng = thread_rng();

    let (key_shares, public_key_package) = keys::generate_with_dealer(1, 3, &mut rng).unwrap();
    let signers = key_shares
        .iter()
        .cloned()
        .map(|k| PeerSigner::try_from(k).unwrap())
        .collect::<Vec<_>>();

    let (nonces_1, commitments_1) =
        round1::commit(*signers[0].identifier(), signers[0].signing_share(), &mut rng).unwrap();
    let (nonces_3, commitments_3) =
        round1::commit(*signers[2].identifier(), signers[2].signing_share(), &mut rng).unwrap();
    let commitments = [commitments_1, commitments_3];

    let message = b"suite wrappers";
    let shares = [
        round2::sign(message, nonces_1, &commitments, &signers[0]).unwrap(),
        round2::sign(message, nonces_3, &commitments, &signers[2]).unwrap(),
    ];

    let combiner = Combiner::new(public_key_package).unwrap();
    let signature = combiner.sign(message, &commitments, &shares).unwrap();
    verify(message, &signature, combiner.verifying_key()).unwrap();

    let group_key = keys::reconstruct(&key_shares[1..]).unwrap();
    assert_eq!(VerifyingKey::from(&group_key), *combiner.verifying_key());
}
